//! Batch conversion of every scan below a directory
//!
//! Discovery, per-image planning and a fail-soft driver: one image failing
//! never stops the others.

mod discover;
mod job;
mod runner;

pub use discover::discover_sources;
pub use job::{ConversionJob, JobOutcome, JobReport, PNG_EXTENSION};
pub use runner::{BatchOptions, BatchRunner, BatchSummary};
