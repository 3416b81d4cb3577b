pub mod report;

use crate::batch::BatchOptions;
use crate::types::{
    RawCleanup, ToolConfig, DEFAULT_DECOMPRESSOR, DEFAULT_IMAGE_CONVERTER, DEFAULT_RAW_CONVERTER,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for mammoconv
#[derive(Parser, Debug)]
#[command(name = "mammoconv")]
#[command(about = "Convert scanned LJPEG mammograms to 16-bit PNG using their .ics metadata")]
#[command(version)]
pub struct Cli {
    /// Directory searched recursively for .LJPEG files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Write PNGs here instead of next to each source
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only extract and report metadata, do not convert
    #[arg(long)]
    pub metadata_only: bool,

    /// Convert even if the PNG already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Number of images converted in parallel
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// LJPEG decompressor executable
    #[arg(long, env = "MAMMOCONV_JPEG", default_value = DEFAULT_DECOMPRESSOR)]
    pub jpeg: PathBuf,

    /// Raw-to-PNM converter executable
    #[arg(long, env = "MAMMOCONV_DDSMRAW2PNM", default_value = DEFAULT_RAW_CONVERTER)]
    pub ddsmraw2pnm: PathBuf,

    /// Image converter executable
    #[arg(long, env = "MAMMOCONV_CONVERT", default_value = DEFAULT_IMAGE_CONVERTER)]
    pub convert: PathBuf,

    /// When to delete the decompressed raw file
    #[arg(long, default_value = "always")]
    pub raw_cleanup: RawCleanupArg,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Tool configuration selected on the command line
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig::default()
            .with_decompressor(&self.jpeg)
            .with_raw_converter(&self.ddsmraw2pnm)
            .with_image_converter(&self.convert)
            .with_raw_cleanup(self.raw_cleanup.clone().into())
    }

    /// Batch options selected on the command line
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            output_dir: self.output_dir.clone(),
            overwrite: self.overwrite,
            metadata_only: self.metadata_only,
            jobs: self.jobs as usize,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Produced PNG paths only (one per line)
    Paths,
}

/// Raw intermediate deletion policy
#[derive(Debug, Clone, ValueEnum)]
pub enum RawCleanupArg {
    /// Delete as soon as the raw-to-PNM converter returns
    Always,
    /// Keep the raw file when the raw-to-PNM converter fails
    OnSuccess,
}

impl From<RawCleanupArg> for RawCleanup {
    fn from(arg: RawCleanupArg) -> Self {
        match arg {
            RawCleanupArg::Always => RawCleanup::Always,
            RawCleanupArg::OnSuccess => RawCleanup::OnSuccess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mammoconv", "/data/ddsm"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("/data/ddsm"));
        assert!(!cli.metadata_only);
        assert_eq!(cli.batch_options(), BatchOptions::default());
        assert_eq!(cli.tool_config(), ToolConfig::default());
    }

    #[test]
    fn test_tool_overrides() {
        let cli = Cli::try_parse_from([
            "mammoconv",
            "/data/ddsm",
            "--jpeg",
            "/opt/ddsm/jpeg",
            "--ddsmraw2pnm",
            "/opt/ddsm/ddsmraw2pnm",
            "--convert",
            "/usr/bin/convert",
            "--raw-cleanup",
            "on-success",
            "-o",
            "/data/png",
            "-j",
            "4",
        ])
        .unwrap();

        let tools = cli.tool_config();
        assert_eq!(tools.decompressor, PathBuf::from("/opt/ddsm/jpeg"));
        assert_eq!(tools.raw_converter, PathBuf::from("/opt/ddsm/ddsmraw2pnm"));
        assert_eq!(tools.image_converter, PathBuf::from("/usr/bin/convert"));
        assert_eq!(tools.raw_cleanup, RawCleanup::OnSuccess);

        let options = cli.batch_options();
        assert_eq!(options.output_dir, Some(PathBuf::from("/data/png")));
        assert_eq!(options.jobs, 4);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["mammoconv", "/data/ddsm", "-j", "0"]).is_err());
    }
}
