use crate::error::{MammoconvError, Result};
use std::path::{Path, PathBuf};

/// File extension of sidecar files
pub const SIDECAR_EXTENSION: &str = "ics";

/// Finds the sidecar file describing the images in `dir`
///
/// Each case directory holds exactly one `.ics` file; if several are
/// present the lexicographically first is used.
pub fn find_sidecar(dir: &Path) -> Result<PathBuf> {
    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_sidecar(&path) {
            candidates.push(path);
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| MammoconvError::SidecarNotFound(dir.to_path_buf()))
}

/// Finds the sidecar file next to an image file
pub fn find_sidecar_for(image_path: &Path) -> Result<PathBuf> {
    let dir = match image_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    find_sidecar(dir)
}

fn is_sidecar(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(SIDECAR_EXTENSION))
        .unwrap_or(false)
}
