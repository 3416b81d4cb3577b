use std::path::PathBuf;

/// When the decompressed raw file is removed after the raw-to-portable stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum RawCleanup {
    /// Delete right after the converter returns, before its exit status is checked
    #[default]
    Always,

    /// Delete only once the converter reported success; keep the raw file on failure
    OnSuccess,
}

/// Locations and options of the three external conversion programs
///
/// Bare program names are resolved through `PATH`; nothing is looked up
/// relative to the working directory.
///
/// # Example
///
/// ```
/// use mammoconv_core::{RawCleanup, ToolConfig};
///
/// let tools = ToolConfig::default()
///     .with_decompressor("/opt/ddsm/bin/jpeg")
///     .with_raw_cleanup(RawCleanup::OnSuccess);
///
/// assert_eq!(tools.decompressor.to_str(), Some("/opt/ddsm/bin/jpeg"));
/// assert_eq!(tools.raw_converter.to_str(), Some("ddsmraw2pnm"));
/// assert_eq!(tools.raw_cleanup, RawCleanup::OnSuccess);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct ToolConfig {
    /// Lossless JPEG decompressor, writes `<source>.1`
    pub decompressor: PathBuf,

    /// Flags requesting decompression to a raw file
    pub decompressor_args: Vec<String>,

    /// Raw-to-PNM converter, prints the PNM path on stdout
    pub raw_converter: PathBuf,

    /// Generic image converter (ImageMagick `convert`)
    pub image_converter: PathBuf,

    /// Bit depth requested from the image converter
    pub depth: u8,

    /// Raw intermediate deletion policy
    pub raw_cleanup: RawCleanup,
}

/// Default decompressor executable name
pub const DEFAULT_DECOMPRESSOR: &str = "jpeg";
/// Default raw-to-PNM converter executable name
pub const DEFAULT_RAW_CONVERTER: &str = "ddsmraw2pnm";
/// Default image converter executable name
pub const DEFAULT_IMAGE_CONVERTER: &str = "convert";

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            decompressor: PathBuf::from(DEFAULT_DECOMPRESSOR),
            decompressor_args: vec!["-d".to_string(), "-s".to_string()],
            raw_converter: PathBuf::from(DEFAULT_RAW_CONVERTER),
            image_converter: PathBuf::from(DEFAULT_IMAGE_CONVERTER),
            depth: 16,
            raw_cleanup: RawCleanup::default(),
        }
    }
}

impl ToolConfig {
    /// Builder: Set the decompressor executable
    pub fn with_decompressor(mut self, path: impl Into<PathBuf>) -> Self {
        self.decompressor = path.into();
        self
    }

    /// Builder: Set the raw-to-PNM converter executable
    pub fn with_raw_converter(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw_converter = path.into();
        self
    }

    /// Builder: Set the image converter executable
    pub fn with_image_converter(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_converter = path.into();
        self
    }

    /// Builder: Set the output bit depth
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Builder: Set the raw intermediate deletion policy
    pub fn with_raw_cleanup(mut self, policy: RawCleanup) -> Self {
        self.raw_cleanup = policy;
        self
    }
}
