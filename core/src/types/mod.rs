//! Core type definitions for scanned-mammogram conversion
//!
//! This module provides the fundamental types used throughout the mammoconv library:
//! - [`ImageDescriptor`]: Name and view token of one scanned image
//! - [`ScanMetadata`]: Dimensions and digitizer recovered from the sidecar file
//! - [`Digitizer`] / [`DigitizerVariant`]: Normalized scanner identity
//! - [`ToolConfig`]: Locations and options of the external conversion programs

mod config;
mod image;
mod metadata;

pub use config::{
    RawCleanup, ToolConfig, DEFAULT_DECOMPRESSOR, DEFAULT_IMAGE_CONVERTER, DEFAULT_RAW_CONVERTER,
};
pub use image::{is_ljpeg, ImageDescriptor, LJPEG_EXTENSION};
pub use metadata::{Digitizer, DigitizerVariant, ScanMetadata};
