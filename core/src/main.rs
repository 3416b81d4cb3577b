use clap::Parser;
use log::{error, info};
use mammoconv_core::cli::{Cli, OutputFormat};
use mammoconv_core::{
    discover_sources, BatchRunner, BatchSummary, ConversionPipeline, JobOutcome, JobReport,
    TextReport,
};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    info!("Searching {}", cli.directory.display());
    let sources = discover_sources(&cli.directory);

    if sources.is_empty() {
        eprintln!("Error: No LJPEG files (.LJPEG) found in directory");
        process::exit(1);
    }

    info!("Found {} LJPEG files", sources.len());

    let tools = cli.tool_config();
    info!(
        "Using tools: {}, {}, {}",
        tools.decompressor.display(),
        tools.raw_converter.display(),
        tools.image_converter.display()
    );

    let runner = BatchRunner::new(ConversionPipeline::new(tools), cli.batch_options());
    let reports = runner.run(&sources);
    let summary = BatchSummary::from_reports(&reports);

    output_reports(&reports, &summary, cli.format);

    if summary.has_failures() {
        error!("{} of {} images failed", summary.failed, reports.len());
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn output_reports(reports: &[JobReport], summary: &BatchSummary, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(reports));
        }
        OutputFormat::Paths => {
            for report in reports {
                if let JobOutcome::Converted { png, .. } = &report.outcome {
                    println!("{}", png.display());
                }
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(reports, summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = summary;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(reports: &[JobReport], summary: &BatchSummary) -> Result<String, serde_json::Error> {
    use mammoconv_core::{ScanMetadata, Stage};
    use serde::Serialize;

    #[derive(Serialize)]
    struct BatchJson<'a> {
        images: Vec<ImageJson<'a>>,
        summary: &'a BatchSummary,
    }

    #[derive(Serialize)]
    struct ImageJson<'a> {
        source: String,
        status: &'static str,
        output: Option<String>,
        descriptor: Option<String>,
        metadata: Option<&'a ScanMetadata>,
        failed_stage: Option<Stage>,
        error: Option<String>,
    }

    let images = reports
        .iter()
        .map(|report| {
            let (status, output, failed_stage, error) = match &report.outcome {
                JobOutcome::Converted { png, .. } => {
                    ("converted", Some(png.display().to_string()), None, None)
                }
                JobOutcome::Described(_) => ("described", None, None, None),
                JobOutcome::Skipped(target) => {
                    ("skipped", Some(target.display().to_string()), None, None)
                }
                JobOutcome::Failed(e) => ("failed", None, e.stage(), Some(e.to_string())),
            };
            let metadata = report.outcome.metadata();
            ImageJson {
                source: report.source.display().to_string(),
                status,
                output,
                descriptor: metadata.map(ScanMetadata::descriptor),
                metadata,
                failed_stage,
                error,
            }
        })
        .collect();

    serde_json::to_string_pretty(&BatchJson { images, summary })
}
