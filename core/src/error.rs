use crate::pipeline::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mammoconv operations
pub type Result<T> = std::result::Result<T, MammoconvError>;

/// Error types for mammoconv operations
///
/// Every variant is fatal for the image being processed. Nothing is retried.
#[derive(Error, Debug)]
pub enum MammoconvError {
    /// Dimensions and/or digitizer were not found in the sidecar file
    #[error("Metadata incomplete for {image}: missing {}", .missing.join(" and "))]
    MetadataIncomplete {
        image: String,
        missing: Vec<&'static str>,
    },

    /// A `howtek` digitizer whose image name does not identify the scanning site
    #[error("Cannot determine {digitizer} variant for {image}: image name must start with 'A' or 'D'")]
    DigitizerVariantUndetermined { image: String, digitizer: String },

    /// A conversion stage did not leave its expected artifact behind
    #[error("{stage} failed: expected output {} was not produced", .path.display())]
    StageOutputMissing { stage: Stage, path: PathBuf },

    /// A conversion stage did not report where it wrote its artifact
    #[error("{stage} failed: no output path reported on stdout")]
    StageOutputUnreported { stage: Stage },

    /// A conversion stage reported failure through its exit status
    #[error("{stage} failed: process exited with {}{}", exit_label(.status), stderr_suffix(.stderr))]
    StageExitNonZero {
        stage: Stage,
        status: Option<i32>,
        stderr: String,
    },

    /// Image file name has no view token
    #[error("Invalid image name: {0}")]
    InvalidImageName(String),

    /// No sidecar (.ics) file next to an image
    #[error("No sidecar file found in {}", .0.display())]
    SidecarNotFound(PathBuf),

    /// External program could not be started
    #[error("Failed to launch {}: {source}", .program.display())]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MammoconvError {
    /// Whether the error came from metadata extraction, before any conversion stage ran
    pub fn is_metadata_error(&self) -> bool {
        matches!(
            self,
            MammoconvError::MetadataIncomplete { .. }
                | MammoconvError::DigitizerVariantUndetermined { .. }
                | MammoconvError::InvalidImageName(_)
                | MammoconvError::SidecarNotFound(_)
        )
    }

    /// The pipeline stage that failed, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            MammoconvError::StageOutputMissing { stage, .. }
            | MammoconvError::StageOutputUnreported { stage }
            | MammoconvError::StageExitNonZero { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
