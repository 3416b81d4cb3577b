//! Python exception types for mammoconv
//!
//! This module defines Python exception classes that map to Rust error types.

// Suppress warnings from PyO3's create_exception! macro about gil-refs feature
#![allow(unexpected_cfgs)]

use crate::error::MammoconvError;
use pyo3::{create_exception, exceptions::PyException, prelude::*};

// Base exception
create_exception!(
    mammoconv,
    PyMammoconvError,
    PyException,
    "Base exception for all mammoconv errors"
);

// Specific exceptions
create_exception!(
    mammoconv,
    PyMetadataError,
    PyMammoconvError,
    "Scan metadata could not be recovered from the sidecar file"
);

create_exception!(
    mammoconv,
    PyDigitizerVariantError,
    PyMetadataError,
    "Scanning site of a howtek digitizer could not be determined"
);

create_exception!(
    mammoconv,
    PyConversionError,
    PyMammoconvError,
    "An external conversion stage failed"
);

/// Convert Rust MammoconvError to appropriate Python exception
pub fn convert_error(err: MammoconvError) -> PyErr {
    match err {
        MammoconvError::DigitizerVariantUndetermined { .. } => {
            PyDigitizerVariantError::new_err(err.to_string())
        }
        MammoconvError::IoError(e) => pyo3::exceptions::PyIOError::new_err(e.to_string()),
        ref e if e.is_metadata_error() => PyMetadataError::new_err(err.to_string()),
        _ => PyConversionError::new_err(err.to_string()),
    }
}
