use crate::error::{MammoconvError, Result};
use crate::sidecar::find_sidecar_for;
use crate::types::{ImageDescriptor, ScanMetadata};
use std::path::{Path, PathBuf};

/// Extension of the final images
pub const PNG_EXTENSION: &str = "png";

/// Everything needed to convert one discovered scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// The `.LJPEG` file
    pub source: PathBuf,

    /// Image identity derived from the file name
    pub image: ImageDescriptor,

    /// Sidecar file of the case directory
    pub sidecar: PathBuf,

    /// Where the PNG goes
    pub target: PathBuf,
}

impl ConversionJob {
    /// Plans the conversion of `source`
    ///
    /// The target is `<image name>.png`, placed in `output_dir` when given
    /// and next to the source otherwise.
    pub fn plan(source: &Path, output_dir: Option<&Path>) -> Result<Self> {
        let image = ImageDescriptor::from_path(source)?;
        let sidecar = find_sidecar_for(source)?;

        let file_name = format!("{}.{}", image.name(), PNG_EXTENSION);
        let target = match output_dir {
            Some(dir) => dir.join(file_name),
            None => source.with_file_name(file_name),
        };

        Ok(Self {
            source: source.to_path_buf(),
            image,
            sidecar,
            target,
        })
    }
}

/// Result of processing one discovered scan
#[derive(Debug)]
pub enum JobOutcome {
    /// PNG written at `png`
    Converted { png: PathBuf, metadata: ScanMetadata },

    /// Metadata extracted, conversion not requested
    Described(ScanMetadata),

    /// Target already existed and overwriting was off
    Skipped(PathBuf),

    /// Extraction or conversion failed
    Failed(MammoconvError),
}

impl JobOutcome {
    /// Whether this outcome counts as a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, JobOutcome::Failed(_))
    }

    /// Metadata recovered for the image, if extraction got that far
    pub fn metadata(&self) -> Option<&ScanMetadata> {
        match self {
            JobOutcome::Converted { metadata, .. } | JobOutcome::Described(metadata) => {
                Some(metadata)
            }
            _ => None,
        }
    }
}

/// Outcome of one discovered scan, tagged with its path
#[derive(Debug)]
pub struct JobReport {
    pub source: PathBuf,
    pub outcome: JobOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_plan_next_to_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("A_1234_1.LEFT_CC.LJPEG");
        File::create(&source).unwrap();
        File::create(temp_dir.path().join("A-1234-1.ics")).unwrap();

        let job = ConversionJob::plan(&source, None).unwrap();

        assert_eq!(job.image.view_token(), "LEFT_CC");
        assert_eq!(job.sidecar, temp_dir.path().join("A-1234-1.ics"));
        assert_eq!(job.target, temp_dir.path().join("A_1234_1.LEFT_CC.png"));
    }

    #[test]
    fn test_plan_into_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let case_dir = temp_dir.path().join("case1234");
        let out_dir = temp_dir.path().join("png");
        fs::create_dir_all(&case_dir).unwrap();
        let source = case_dir.join("A_1234_1.LEFT_CC.LJPEG");
        File::create(&source).unwrap();
        File::create(case_dir.join("A-1234-1.ics")).unwrap();

        let job = ConversionJob::plan(&source, Some(&out_dir)).unwrap();
        assert_eq!(job.target, out_dir.join("A_1234_1.LEFT_CC.png"));
    }

    #[test]
    fn test_plan_without_sidecar() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("A_1234_1.LEFT_CC.LJPEG");
        File::create(&source).unwrap();

        let result = ConversionJob::plan(&source, None);
        assert!(matches!(result, Err(MammoconvError::SidecarNotFound(_))));
    }
}
