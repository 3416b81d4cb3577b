use super::job::{ConversionJob, JobOutcome, JobReport};
use crate::api::MetadataExtractor;
use crate::error::Result;
use crate::pipeline::{CommandRunner, ConversionPipeline};
use log::{error, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Directory receiving the PNGs; next to each source when `None`
    pub output_dir: Option<PathBuf>,

    /// Convert even when the target PNG already exists
    pub overwrite: bool,

    /// Only extract metadata, run no conversion
    pub metadata_only: bool,

    /// Images processed concurrently (stages within one image are always sequential)
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            overwrite: false,
            metadata_only: false,
            jobs: 1,
        }
    }
}

/// Processes discovered scans one image at a time
///
/// Failures are contained per image: every source gets a [`JobReport`],
/// in the order the sources were given.
pub struct BatchRunner<R> {
    pipeline: ConversionPipeline<R>,
    options: BatchOptions,
}

impl<R: CommandRunner + Sync> BatchRunner<R> {
    /// Creates a batch runner around a pipeline
    pub fn new(pipeline: ConversionPipeline<R>, options: BatchOptions) -> Self {
        Self { pipeline, options }
    }

    /// Options in use
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Processes every source and reports each outcome
    pub fn run(&self, sources: &[PathBuf]) -> Vec<JobReport> {
        if self.options.jobs > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()
            {
                Ok(pool) => {
                    info!("Processing with {} workers", self.options.jobs);
                    return pool.install(|| {
                        sources
                            .par_iter()
                            .map(|source| self.process(source))
                            .collect()
                    });
                }
                Err(e) => warn!("Falling back to sequential processing: {}", e),
            }
        }

        sources.iter().map(|source| self.process(source)).collect()
    }

    /// Processes a single source
    pub fn process(&self, source: &Path) -> JobReport {
        let outcome = match self.try_process(source) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{}: {}", source.display(), e);
                JobOutcome::Failed(e)
            }
        };

        JobReport {
            source: source.to_path_buf(),
            outcome,
        }
    }

    fn try_process(&self, source: &Path) -> Result<JobOutcome> {
        let job = ConversionJob::plan(source, self.options.output_dir.as_deref())?;

        if !self.options.metadata_only && !self.options.overwrite && job.target.exists() {
            warn!("Skipping {}: {} exists", job.image, job.target.display());
            return Ok(JobOutcome::Skipped(job.target));
        }

        let metadata = MetadataExtractor::extract(&job.image, &job.sidecar)?;
        if self.options.metadata_only {
            info!("{}: {}", job.image, metadata.descriptor());
            return Ok(JobOutcome::Described(metadata));
        }

        if let Some(dir) = &self.options.output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let png = self.pipeline.convert(&job.source, &metadata, &job.target)?;
        info!("Converted {} -> {}", job.image, png.display());

        Ok(JobOutcome::Converted { png, metadata })
    }
}

/// Tallies of a finished batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BatchSummary {
    pub converted: usize,
    pub described: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Counts the outcomes of a batch
    pub fn from_reports(reports: &[JobReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                JobOutcome::Converted { .. } => summary.converted += 1,
                JobOutcome::Described(_) => summary.described += 1,
                JobOutcome::Skipped(_) => summary.skipped += 1,
                JobOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Whether any image failed
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MammoconvError;
    use crate::pipeline::{ProcessOutput, Stage};
    use crate::types::ToolConfig;
    use std::ffi::OsString;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const SIDECAR: &str = "\
DIGITIZER HOWTEK
LEFT_CC LINES 4696 PIXELS_PER_LINE 3024 BITS_PER_PIXEL 12 RESOLUTION 43 OVERLAY
RIGHT_CC LINES 4096 PIXELS_PER_LINE 2048 BITS_PER_PIXEL 12 RESOLUTION 43 NON_OVERLAY
";

    /// Fakes all three tools; the decompressor fails for sources whose path contains `broken`
    #[derive(Default)]
    struct FakeTools {
        calls: Mutex<Vec<String>>,
    }

    impl CommandRunner for FakeTools {
        fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput> {
            let program = program.display().to_string();
            let args: Vec<String> = args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            self.calls.lock().unwrap().push(program.clone());

            let mut output = ProcessOutput {
                status: Some(0),
                ..Default::default()
            };
            match program.as_str() {
                "jpeg" if !args[2].contains("broken") => {
                    fs::write(format!("{}.1", args[2]), b"raw").unwrap();
                }
                "ddsmraw2pnm" => {
                    let pnm = format!("{}.pnm", args[0]);
                    fs::write(&pnm, b"P5").unwrap();
                    output.stdout = pnm;
                }
                "convert" => fs::write(&args[3], b"PNG").unwrap(),
                _ => {}
            }
            Ok(output)
        }
    }

    fn case_dir(root: &Path, name: &str, sidecar: &str, images: &[&str]) -> Vec<PathBuf> {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.ics", name)), sidecar).unwrap();
        images
            .iter()
            .map(|image| {
                let path = dir.join(image);
                fs::write(&path, b"ljpeg").unwrap();
                path
            })
            .collect()
    }

    fn runner(tools: &FakeTools, options: BatchOptions) -> BatchRunner<&FakeTools> {
        BatchRunner::new(
            ConversionPipeline::with_runner(ToolConfig::default(), tools),
            options,
        )
    }

    #[test]
    fn test_batch_is_fail_soft() {
        let temp_dir = TempDir::new().unwrap();
        let mut sources = case_dir(
            temp_dir.path(),
            "case0001",
            SIDECAR,
            &["A_0001_1.LEFT_CC.LJPEG", "A_0001_1.RIGHT_CC.LJPEG"],
        );
        sources.extend(case_dir(
            temp_dir.path(),
            "case3001",
            SIDECAR,
            &["B_3001_1.LEFT_CC.LJPEG"],
        ));
        sources.extend(case_dir(
            temp_dir.path(),
            "case4001_broken",
            SIDECAR,
            &["D_4001_1.LEFT_CC.LJPEG"],
        ));

        let tools = FakeTools::default();
        let reports = runner(&tools, BatchOptions::default()).run(&sources);

        assert_eq!(reports.len(), 4);
        assert!(matches!(reports[0].outcome, JobOutcome::Converted { .. }));
        assert!(matches!(reports[1].outcome, JobOutcome::Converted { .. }));
        assert!(matches!(
            reports[2].outcome,
            JobOutcome::Failed(MammoconvError::DigitizerVariantUndetermined { .. })
        ));
        match &reports[3].outcome {
            JobOutcome::Failed(e) => assert_eq!(e.stage(), Some(Stage::Decompress)),
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(
            reports[0].outcome.metadata().unwrap().descriptor(),
            "4696 3024 howtek-mgh"
        );
        assert!(temp_dir.path().join("case0001/A_0001_1.RIGHT_CC.png").exists());

        // Metadata failure never reaches the tools: 2 full runs + 1 decompress attempt
        assert_eq!(tools.calls.lock().unwrap().len(), 7);

        let summary = BatchSummary::from_reports(&reports);
        assert_eq!(
            summary,
            BatchSummary {
                converted: 2,
                described: 0,
                skipped: 0,
                failed: 2,
            }
        );
        assert!(summary.has_failures());
    }

    #[test]
    fn test_metadata_only_runs_no_tools() {
        let temp_dir = TempDir::new().unwrap();
        let sources = case_dir(
            temp_dir.path(),
            "case0001",
            SIDECAR,
            &["A_0001_1.RIGHT_CC.LJPEG"],
        );

        let tools = FakeTools::default();
        let options = BatchOptions {
            metadata_only: true,
            ..Default::default()
        };
        let reports = runner(&tools, options).run(&sources);

        match &reports[0].outcome {
            JobOutcome::Described(metadata) => {
                assert_eq!(metadata.descriptor(), "4096 2048 howtek-mgh")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(tools.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_existing_target_is_skipped_unless_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let sources = case_dir(
            temp_dir.path(),
            "case0001",
            SIDECAR,
            &["A_0001_1.LEFT_CC.LJPEG"],
        );
        let target = temp_dir.path().join("case0001/A_0001_1.LEFT_CC.png");
        fs::write(&target, b"old").unwrap();

        let tools = FakeTools::default();
        let reports = runner(&tools, BatchOptions::default()).run(&sources);
        assert!(matches!(&reports[0].outcome, JobOutcome::Skipped(p) if *p == target));
        assert!(tools.calls.lock().unwrap().is_empty());

        let options = BatchOptions {
            overwrite: true,
            ..Default::default()
        };
        let reports = runner(&tools, options).run(&sources);
        assert!(matches!(reports[0].outcome, JobOutcome::Converted { .. }));
        assert_eq!(fs::read(&target).unwrap(), b"PNG");
    }

    #[test]
    fn test_parallel_run_keeps_order_and_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let sources = case_dir(
            temp_dir.path(),
            "case0001",
            SIDECAR,
            &["A_0001_1.LEFT_CC.LJPEG", "A_0001_1.RIGHT_CC.LJPEG"],
        );
        let out_dir = temp_dir.path().join("png");

        let tools = FakeTools::default();
        let options = BatchOptions {
            output_dir: Some(out_dir.clone()),
            jobs: 2,
            ..Default::default()
        };
        let reports = runner(&tools, options).run(&sources);

        assert_eq!(reports[0].source, sources[0]);
        assert_eq!(reports[1].source, sources[1]);
        assert!(reports.iter().all(|r| !r.outcome.is_failure()));
        assert!(out_dir.join("A_0001_1.LEFT_CC.png").exists());
        assert!(out_dir.join("A_0001_1.RIGHT_CC.png").exists());
    }

    #[test]
    fn test_missing_sidecar_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("A_0001_1.LEFT_CC.LJPEG");
        fs::write(&source, b"ljpeg").unwrap();

        let tools = FakeTools::default();
        let reports = runner(&tools, BatchOptions::default()).run(&[source]);
        assert!(matches!(
            reports[0].outcome,
            JobOutcome::Failed(MammoconvError::SidecarNotFound(_))
        ));
    }
}
