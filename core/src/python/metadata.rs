//! Python wrapper for ScanMetadata

use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Python wrapper for ScanMetadata
#[pyclass(name = "ScanMetadata", module = "mammoconv")]
#[derive(Clone)]
pub struct PyScanMetadata {
    pub(crate) inner: crate::types::ScanMetadata,
}

impl From<crate::types::ScanMetadata> for PyScanMetadata {
    fn from(inner: crate::types::ScanMetadata) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyScanMetadata {
    /// Number of rows
    #[getter]
    fn rows(&self) -> u32 {
        self.inner.rows
    }

    /// Number of columns
    #[getter]
    fn cols(&self) -> u32 {
        self.inner.cols
    }

    /// Normalized digitizer, e.g. "lumisys" or "howtek-mgh"
    #[getter]
    fn digitizer(&self) -> String {
        self.inner.digitizer.to_string()
    }

    /// Bits per pixel (if declared)
    #[getter]
    fn bits_per_pixel(&self) -> Option<u32> {
        self.inner.bits_per_pixel
    }

    /// Scan resolution in microns (if declared)
    #[getter]
    fn resolution(&self) -> Option<u32> {
        self.inner.resolution
    }

    /// Whether the view has an overlay
    #[getter]
    fn has_overlay(&self) -> bool {
        self.inner.has_overlay
    }

    /// Descriptor passed to the raw-to-PNM converter: "<rows> <cols> <digitizer>"
    fn descriptor(&self) -> String {
        self.inner.descriptor()
    }

    /// Convert to dictionary
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("rows", self.inner.rows)?;
        dict.set_item("cols", self.inner.cols)?;
        dict.set_item("digitizer", self.inner.digitizer.to_string())?;
        dict.set_item("bits_per_pixel", self.inner.bits_per_pixel)?;
        dict.set_item("resolution", self.inner.resolution)?;
        dict.set_item("has_overlay", self.inner.has_overlay)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "ScanMetadata(rows={}, cols={}, digitizer='{}')",
            self.inner.rows, self.inner.cols, self.inner.digitizer
        )
    }

    fn __str__(&self) -> String {
        self.inner.descriptor()
    }
}
