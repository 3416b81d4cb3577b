use crate::error::{MammoconvError, Result};
use std::fmt;
use std::path::Path;

/// File extension of the lossless-JPEG scans
pub const LJPEG_EXTENSION: &str = "LJPEG";

/// Identity of one scanned image
///
/// The name is the dotted identifier of the scan (`A_1234_1.LEFT_CC`).
/// The part after the final `.` is the view token used to look the image
/// up in its sidecar file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImageDescriptor {
    name: String,
    view_token: String,
}

impl ImageDescriptor {
    /// Creates a descriptor from an image name, with or without the `.LJPEG` extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidImageName` if the name has no `.` separator or nothing follows it.
    ///
    /// # Example
    ///
    /// ```
    /// use mammoconv_core::ImageDescriptor;
    ///
    /// let image = ImageDescriptor::new("A_1234_1.LEFT_MLO.LJPEG").unwrap();
    /// assert_eq!(image.name(), "A_1234_1.LEFT_MLO");
    /// assert_eq!(image.view_token(), "LEFT_MLO");
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        let name = strip_ljpeg_extension(name.trim());
        let view_token = match name.rsplit_once('.') {
            Some((_, token)) if !token.is_empty() => token.to_string(),
            _ => return Err(MammoconvError::InvalidImageName(name.to_string())),
        };

        Ok(Self {
            name: name.to_string(),
            view_token,
        })
    }

    /// Creates a descriptor from the file name of a discovered scan
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MammoconvError::InvalidImageName(path.display().to_string()))?;
        Self::new(file_name)
    }

    /// Full image name without extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substring after the last `.` of the name
    pub fn view_token(&self) -> &str {
        &self.view_token
    }

    /// First character of the name, which identifies the scanning site
    pub fn leading_char(&self) -> Option<char> {
        self.name.chars().next()
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Returns whether a path carries the `.LJPEG` extension (any case)
pub fn is_ljpeg(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(LJPEG_EXTENSION))
        .unwrap_or(false)
}

fn strip_ljpeg_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case(LJPEG_EXTENSION) => stem,
        _ => name,
    }
}
