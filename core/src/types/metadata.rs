use std::fmt;

/// Scanning site of a `howtek` digitizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum DigitizerVariant {
    /// Massachusetts General Hospital scanner (image names starting with `A`)
    Mgh,
    /// Intl. Society for Mammographic Density scanner (image names starting with `D`)
    Ismd,
}

impl DigitizerVariant {
    /// Suffix appended to the digitizer name
    pub fn suffix(&self) -> &'static str {
        match self {
            DigitizerVariant::Mgh => "mgh",
            DigitizerVariant::Ismd => "ismd",
        }
    }

    /// Selects the variant from the leading character of an image name
    pub fn from_leading_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(DigitizerVariant::Mgh),
            'D' => Some(DigitizerVariant::Ismd),
            _ => None,
        }
    }
}

/// Normalized digitizer identity
///
/// Displays as the lowercase hardware name, followed by `-<variant>` when
/// the hardware needed disambiguation (`howtek-mgh`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Digitizer {
    pub name: String,
    pub variant: Option<DigitizerVariant>,
}

impl Digitizer {
    /// Creates a digitizer without a variant, lowercasing the name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            variant: None,
        }
    }

    /// Returns a copy tagged with the given variant
    pub fn with_variant(mut self, variant: DigitizerVariant) -> Self {
        self.variant = Some(variant);
        self
    }
}

impl fmt::Display for Digitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}-{}", self.name, variant.suffix()),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Physical scan metadata for one image
///
/// Only ever produced fully populated: if either the dimensions or the
/// digitizer are missing from the sidecar, extraction fails instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ScanMetadata {
    /// Number of rows (`LINES`)
    pub rows: u32,

    /// Number of columns (`PIXELS_PER_LINE`)
    pub cols: u32,

    /// Normalized digitizer identity
    pub digitizer: Digitizer,

    /// Bits per pixel, when the geometry line declares it
    pub bits_per_pixel: Option<u32>,

    /// Scan resolution in microns, when the geometry line declares it
    pub resolution: Option<u32>,

    /// Whether the sidecar flags an overlay (abnormality outline) for this view
    pub has_overlay: bool,
}

impl ScanMetadata {
    /// Descriptor handed to the raw-to-portable converter: `"<rows> <cols> <digitizer>"`
    ///
    /// # Example
    ///
    /// ```
    /// use mammoconv_core::{Digitizer, ScanMetadata};
    ///
    /// let metadata = ScanMetadata {
    ///     rows: 4096,
    ///     cols: 2048,
    ///     digitizer: Digitizer::new("LUMISYS"),
    ///     bits_per_pixel: None,
    ///     resolution: None,
    ///     has_overlay: false,
    /// };
    /// assert_eq!(metadata.descriptor(), "4096 2048 lumisys");
    /// ```
    pub fn descriptor(&self) -> String {
        format!("{} {} {}", self.rows, self.cols, self.digitizer)
    }
}

impl fmt::Display for ScanMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor())
    }
}
