use super::command::{CommandRunner, SystemRunner};
use super::stage::Stage;
use crate::error::{MammoconvError, Result};
use crate::types::{RawCleanup, ScanMetadata, ToolConfig};
use log::{debug, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix the decompressor appends to the source path
pub const RAW_SUFFIX: &str = ".1";

/// Path where the decompressor leaves the raw file: `<source>.1`
pub fn raw_artifact_path(source: &Path) -> PathBuf {
    let mut raw = source.as_os_str().to_owned();
    raw.push(RAW_SUFFIX);
    PathBuf::from(raw)
}

/// Drives one LJPEG scan through the three external conversion stages
///
/// Stages run strictly in sequence and each one's output is verified before
/// the next starts. The raw intermediate is removed after the raw-to-PNM
/// stage (see [`RawCleanup`]) and the PNM intermediate once the PNG exists.
/// The source LJPEG is never touched; the final PNG belongs to the caller.
///
/// There is no rollback: a failure in a later stage leaves earlier deletions
/// in place.
pub struct ConversionPipeline<R = SystemRunner> {
    tools: ToolConfig,
    runner: R,
}

impl ConversionPipeline<SystemRunner> {
    /// Creates a pipeline that runs the configured tools as child processes
    pub fn new(tools: ToolConfig) -> Self {
        Self::with_runner(tools, SystemRunner)
    }
}

impl<R: CommandRunner> ConversionPipeline<R> {
    /// Creates a pipeline with a custom command runner
    pub fn with_runner(tools: ToolConfig, runner: R) -> Self {
        Self { tools, runner }
    }

    /// Tool configuration in use
    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    /// Converts `source` into a 16-bit PNG at `target`
    ///
    /// Taking [`ScanMetadata`] rather than a free-form descriptor means the
    /// pipeline can only be reached once extraction fully succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A tool cannot be launched
    /// - The decompressor does not produce `<source>.1`
    /// - The raw-to-PNM converter exits non-zero, prints no path, or the path does not exist
    /// - The image converter does not produce `target`
    pub fn convert(&self, source: &Path, metadata: &ScanMetadata, target: &Path) -> Result<PathBuf> {
        let raw = self.decompress(source)?;
        let pnm = self.raw_to_pnm(&raw, metadata)?;
        self.pnm_to_png(&pnm, target)
    }

    fn decompress(&self, source: &Path) -> Result<PathBuf> {
        let mut args: Vec<OsString> = self
            .tools
            .decompressor_args
            .iter()
            .map(OsString::from)
            .collect();
        args.push(source.as_os_str().to_owned());

        let output = self.runner.run(&self.tools.decompressor, &args)?;
        if !output.success() {
            debug!(
                "{} exited with {:?}, checking for output anyway",
                Stage::Decompress,
                output.status
            );
        }

        let raw = raw_artifact_path(source);
        require_artifact(Stage::Decompress, &raw)?;
        Ok(raw)
    }

    fn raw_to_pnm(&self, raw: &Path, metadata: &ScanMetadata) -> Result<PathBuf> {
        let mut args = vec![raw.as_os_str().to_owned()];
        args.extend(metadata.descriptor().split_whitespace().map(OsString::from));

        let output = self.runner.run(&self.tools.raw_converter, &args);

        let succeeded = matches!(&output, Ok(o) if o.success());
        if succeeded || self.tools.raw_cleanup == RawCleanup::Always {
            remove_artifact(raw);
        }

        let output = output?;
        if !output.success() {
            return Err(MammoconvError::StageExitNonZero {
                stage: Stage::RawToPnm,
                status: output.status,
                stderr: output.stderr,
            });
        }

        let pnm = output
            .first_stdout_token()
            .map(PathBuf::from)
            .ok_or(MammoconvError::StageOutputUnreported {
                stage: Stage::RawToPnm,
            })?;
        require_artifact(Stage::RawToPnm, &pnm)?;
        Ok(pnm)
    }

    fn pnm_to_png(&self, pnm: &Path, target: &Path) -> Result<PathBuf> {
        // A leftover PNG would satisfy the existence check on its own
        if target.exists() {
            debug!("Removing stale {}", target.display());
            std::fs::remove_file(target)?;
        }

        let args: Vec<OsString> = vec![
            "-depth".into(),
            self.tools.depth.to_string().into(),
            pnm.as_os_str().to_owned(),
            target.as_os_str().to_owned(),
        ];
        let output = self.runner.run(&self.tools.image_converter, &args)?;
        if !output.success() {
            debug!(
                "{} exited with {:?}, checking for output anyway",
                Stage::PnmToPng,
                output.status
            );
        }

        require_artifact(Stage::PnmToPng, target)?;
        remove_artifact(pnm);

        Ok(std::fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf()))
    }
}

fn require_artifact(stage: Stage, path: &Path) -> Result<()> {
    if path.is_file() {
        debug!("{}: produced {}", stage, path.display());
        Ok(())
    } else {
        Err(MammoconvError::StageOutputMissing {
            stage,
            path: path.to_path_buf(),
        })
    }
}

fn remove_artifact(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed intermediate {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove intermediate {}: {}", path.display(), e),
    }
}
