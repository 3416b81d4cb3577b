//! Python wrappers for MetadataExtractor and ConversionPipeline

use pyo3::prelude::*;

use super::errors::convert_error;
use super::metadata::PyScanMetadata;
use super::utils::{optional_path, path_to_pathbuf, path_to_string};
use crate::types::{ImageDescriptor, RawCleanup, ToolConfig};

/// Extracts scan metadata from sidecar (.ics) files
#[pyclass(name = "MetadataExtractor", module = "mammoconv")]
pub struct PyMetadataExtractor;

#[pymethods]
impl PyMetadataExtractor {
    /// Extract metadata for an image from its sidecar file
    ///
    /// Args:
    ///     image: Path or file name of the LJPEG image (str or pathlib.Path)
    ///     sidecar: Path to the .ics file (str or pathlib.Path)
    ///
    /// Returns:
    ///     ScanMetadata: Dimensions and digitizer of the image
    ///
    /// Raises:
    ///     MetadataError: If dimensions or digitizer are missing
    ///     DigitizerVariantError: If a howtek image name starts with neither A nor D
    ///
    /// Example:
    ///     >>> from mammoconv import MetadataExtractor
    ///     >>> meta = MetadataExtractor.extract("A_1234_1.LEFT_CC.LJPEG", "A-1234-1.ics")
    ///     >>> meta.descriptor()
    ///     '4696 3024 howtek-mgh'
    #[staticmethod]
    #[pyo3(signature = (image, sidecar))]
    fn extract(image: &Bound<'_, PyAny>, sidecar: &Bound<'_, PyAny>) -> PyResult<PyScanMetadata> {
        let image = ImageDescriptor::from_path(&path_to_pathbuf(image)?).map_err(convert_error)?;
        let sidecar = path_to_pathbuf(sidecar)?;

        let metadata =
            crate::api::MetadataExtractor::extract(&image, &sidecar).map_err(convert_error)?;

        Ok(metadata.into())
    }
}

/// Runs the external LJPEG → PNG conversion tools
#[pyclass(name = "ConversionPipeline", module = "mammoconv")]
pub struct PyConversionPipeline {
    inner: crate::pipeline::ConversionPipeline,
}

#[pymethods]
impl PyConversionPipeline {
    /// Create a pipeline
    ///
    /// Args:
    ///     jpeg: LJPEG decompressor executable (default: "jpeg")
    ///     ddsmraw2pnm: Raw-to-PNM converter executable (default: "ddsmraw2pnm")
    ///     convert: Image converter executable (default: "convert")
    ///     keep_raw_on_failure: Keep the raw file when ddsmraw2pnm fails (default: False)
    #[new]
    #[pyo3(signature = (jpeg=None, ddsmraw2pnm=None, convert=None, keep_raw_on_failure=false))]
    fn new(
        jpeg: Option<&Bound<'_, PyAny>>,
        ddsmraw2pnm: Option<&Bound<'_, PyAny>>,
        convert: Option<&Bound<'_, PyAny>>,
        keep_raw_on_failure: bool,
    ) -> PyResult<Self> {
        let mut tools = ToolConfig::default();
        if let Some(path) = optional_path(jpeg)? {
            tools = tools.with_decompressor(path);
        }
        if let Some(path) = optional_path(ddsmraw2pnm)? {
            tools = tools.with_raw_converter(path);
        }
        if let Some(path) = optional_path(convert)? {
            tools = tools.with_image_converter(path);
        }
        if keep_raw_on_failure {
            tools = tools.with_raw_cleanup(RawCleanup::OnSuccess);
        }

        Ok(Self {
            inner: crate::pipeline::ConversionPipeline::new(tools),
        })
    }

    /// Convert an LJPEG file to a 16-bit PNG
    ///
    /// Args:
    ///     source: LJPEG file (str or pathlib.Path)
    ///     metadata: ScanMetadata from MetadataExtractor.extract
    ///     target: Path of the PNG to write (str or pathlib.Path)
    ///
    /// Returns:
    ///     str: Absolute path of the PNG
    ///
    /// Raises:
    ///     ConversionError: If a stage fails or a tool cannot be launched
    fn convert(
        &self,
        py: Python<'_>,
        source: &Bound<'_, PyAny>,
        metadata: &PyScanMetadata,
        target: &Bound<'_, PyAny>,
    ) -> PyResult<String> {
        let source = path_to_pathbuf(source)?;
        let target = path_to_pathbuf(target)?;
        let metadata = metadata.inner.clone();

        let png = py
            .allow_threads(|| self.inner.convert(&source, &metadata, &target))
            .map_err(convert_error)?;

        Ok(path_to_string(&png))
    }
}
