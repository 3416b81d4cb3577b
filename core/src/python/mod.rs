//! Python bindings for mammoconv
//!
//! This module provides PyO3 bindings enabling Python users to read scan
//! metadata from sidecar files and drive the LJPEG to PNG conversion.

// Suppress false positive warnings from PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod errors;
mod extractor;
mod metadata;
mod utils;

pub use errors::*;
pub use extractor::*;
pub use metadata::*;

/// Python module definition
#[pymodule]
fn _mammoconv(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register exception classes
    m.add(
        "MammoconvError",
        py.get_type_bound::<errors::PyMammoconvError>(),
    )?;
    m.add("MetadataError", py.get_type_bound::<errors::PyMetadataError>())?;
    m.add(
        "DigitizerVariantError",
        py.get_type_bound::<errors::PyDigitizerVariantError>(),
    )?;
    m.add(
        "ConversionError",
        py.get_type_bound::<errors::PyConversionError>(),
    )?;

    // Register data structure classes
    m.add_class::<PyScanMetadata>()?;

    // Register main API
    m.add_class::<PyMetadataExtractor>()?;
    m.add_class::<PyConversionPipeline>()?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
