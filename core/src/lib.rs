pub mod api;
pub mod batch;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod sidecar;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use api::MetadataExtractor;
pub use batch::{
    discover_sources, BatchOptions, BatchRunner, BatchSummary, ConversionJob, JobOutcome,
    JobReport,
};
pub use cli::report::TextReport;
pub use error::{MammoconvError, Result};
pub use pipeline::{CommandRunner, ConversionPipeline, ProcessOutput, Stage, SystemRunner};
pub use types::*;
