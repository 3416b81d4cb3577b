use crate::error::{MammoconvError, Result};
use crate::sidecar::{resolve_digitizer, SidecarLine};
use crate::types::{ImageDescriptor, ScanMetadata};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Extractor for per-image scan metadata
///
/// Reads the sidecar file of a case and recovers the dimensions and the
/// normalized digitizer of one of its images. Extraction only reads, so the
/// same sidecar can be used for many images, concurrently if needed.
///
/// # Example
///
/// ```
/// use mammoconv_core::{ImageDescriptor, MetadataExtractor};
///
/// let sidecar = "\
/// ics_version 1.0
/// DIGITIZER LUMISYS LASER
/// LEFT_CC LINES 4096 PIXELS_PER_LINE 2048 BITS_PER_PIXEL 12 RESOLUTION 50 NON_OVERLAY
/// RIGHT_CC LINES 4104 PIXELS_PER_LINE 2056 BITS_PER_PIXEL 12 RESOLUTION 50 NON_OVERLAY
/// ";
///
/// let image = ImageDescriptor::new("C_0029_1.RIGHT_CC").unwrap();
/// let metadata = MetadataExtractor::extract_from_reader(&image, sidecar.as_bytes()).unwrap();
///
/// assert_eq!(metadata.descriptor(), "4104 2056 lumisys");
/// ```
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extracts metadata for `image` from the sidecar file at `sidecar`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sidecar file cannot be read
    /// - No geometry line for the view token or no `DIGITIZER` line exists
    /// - The digitizer is `howtek` and the scanning site cannot be determined
    pub fn extract(image: &ImageDescriptor, sidecar: &Path) -> Result<ScanMetadata> {
        debug!("Reading sidecar {} for {}", sidecar.display(), image);
        let file = File::open(sidecar)?;
        Self::extract_from_reader(image, BufReader::new(file))
    }

    /// Extracts metadata for `image` from any line-oriented reader
    ///
    /// The first geometry line declaring the view token and the first
    /// `DIGITIZER` line win; later duplicates are ignored.
    pub fn extract_from_reader<R: BufRead>(image: &ImageDescriptor, reader: R) -> Result<ScanMetadata> {
        let token = image.view_token();
        let mut geometry: Option<SidecarLine> = None;
        let mut digitizer_name: Option<String> = None;

        for line in reader.lines() {
            let line = line?;
            match SidecarLine::parse(&line) {
                SidecarLine::Digitizer { name } => {
                    if digitizer_name.is_none() {
                        debug!("{}: digitizer {}", image, name);
                        digitizer_name = Some(name);
                    }
                }
                parsed @ SidecarLine::ViewGeometry { .. } => {
                    if geometry.is_none() && parsed.declares_view(token) {
                        debug!("{}: geometry line {:?}", image, parsed);
                        geometry = Some(parsed);
                    }
                }
                SidecarLine::Other => {}
            }
        }

        match (geometry, digitizer_name) {
            (
                Some(SidecarLine::ViewGeometry {
                    rows,
                    cols,
                    bits_per_pixel,
                    resolution,
                    has_overlay,
                    ..
                }),
                Some(name),
            ) => {
                let digitizer = resolve_digitizer(&name, image)?;
                Ok(ScanMetadata {
                    rows,
                    cols,
                    digitizer,
                    bits_per_pixel,
                    resolution,
                    has_overlay,
                })
            }
            (geometry, digitizer_name) => {
                let mut missing = Vec::new();
                if geometry.is_none() {
                    missing.push("dimensions");
                }
                if digitizer_name.is_none() {
                    missing.push("digitizer");
                }
                Err(MammoconvError::MetadataIncomplete {
                    image: image.name().to_string(),
                    missing,
                })
            }
        }
    }
}
