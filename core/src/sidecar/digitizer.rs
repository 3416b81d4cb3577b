use crate::error::{MammoconvError, Result};
use crate::types::{Digitizer, DigitizerVariant, ImageDescriptor};

/// Digitizer whose output depends on the scanning site
pub const HOWTEK: &str = "howtek";

/// Normalizes a digitizer name for one image
///
/// Two sites scanned on `howtek` hardware with different calibrations, so
/// the site is read off the image name: `A...` is MGH, `D...` is ISMD.
///
/// # Errors
///
/// Returns `DigitizerVariantUndetermined` for a `howtek` image whose name
/// starts with any other character.
pub fn resolve_digitizer(name: &str, image: &ImageDescriptor) -> Result<Digitizer> {
    let digitizer = Digitizer::new(name);
    if digitizer.name != HOWTEK {
        return Ok(digitizer);
    }

    match image.leading_char().and_then(DigitizerVariant::from_leading_char) {
        Some(variant) => Ok(digitizer.with_variant(variant)),
        None => Err(MammoconvError::DigitizerVariantUndetermined {
            image: image.name().to_string(),
            digitizer: digitizer.name,
        }),
    }
}
