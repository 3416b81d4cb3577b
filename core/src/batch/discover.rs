use crate::types::is_ljpeg;
use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects every `.LJPEG` file below `root`, sorted by path
///
/// Symlinks are followed. A file reachable through more than one path is
/// returned once, under its first path in sorted order. Unreadable entries
/// are logged and skipped.
pub fn discover_sources(root: &Path) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_ljpeg(path) {
            debug!("Found {}", path.display());
            sources.push(path.to_path_buf());
        }
    }

    sources.sort();

    let mut seen = HashSet::new();
    sources.retain(|path| {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
        let first = seen.insert(key);
        if !first {
            debug!("Skipping {}: already discovered under another path", path.display());
        }
        first
    });
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_discover_sources_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let case_a = temp_dir.path().join("normals/case0001");
        let case_b = temp_dir.path().join("cancers/case3001");
        fs::create_dir_all(&case_a).unwrap();
        fs::create_dir_all(&case_b).unwrap();

        File::create(case_a.join("A_0001_1.RIGHT_CC.LJPEG")).unwrap();
        File::create(case_a.join("A_0001_1.LEFT_CC.LJPEG")).unwrap();
        File::create(case_a.join("A-0001-1.ics")).unwrap();
        File::create(case_b.join("b_3001_1.left_mlo.ljpeg")).unwrap();
        File::create(case_b.join("B_3001_1.LEFT_MLO.OVERLAY")).unwrap();
        File::create(case_b.join("B_3001_1.LEFT_MLO.LJPEG.1")).unwrap();

        let sources = discover_sources(temp_dir.path());

        assert_eq!(
            sources,
            vec![
                case_b.join("b_3001_1.left_mlo.ljpeg"),
                case_a.join("A_0001_1.LEFT_CC.LJPEG"),
                case_a.join("A_0001_1.RIGHT_CC.LJPEG"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_case_discovered_once() {
        let temp_dir = TempDir::new().unwrap();
        let case = temp_dir.path().join("cases/case0001");
        fs::create_dir_all(&case).unwrap();
        File::create(case.join("A_0001_1.LEFT_CC.LJPEG")).unwrap();
        std::os::unix::fs::symlink(&case, temp_dir.path().join("alias")).unwrap();

        let sources = discover_sources(temp_dir.path());

        assert_eq!(
            sources,
            vec![temp_dir.path().join("alias/A_0001_1.LEFT_CC.LJPEG")]
        );
    }

    #[test]
    fn test_discover_sources_empty() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("notes.txt")).unwrap();
        assert!(discover_sources(temp_dir.path()).is_empty());
    }
}
