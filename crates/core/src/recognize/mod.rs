//! Recognition engines that turn a page image into detections.
//!
//! The engine is an expensive, long-lived resource: construct it once per
//! batch and share it by reference with every image in that batch.
//!
//! # Example
//!
//! ```ignore
//! use listscan_core::recognize::{SidecarSource, TokenSource};
//!
//! let engine = SidecarSource::default();
//! let report = listscan_core::api::process_folder(&engine, "scans/", &Default::default())?;
//! ```

pub mod sidecar;
#[cfg(feature = "tesseract")]
pub mod tesseract;

use std::path::Path;

use image::GrayImage;

use crate::error::RecognitionError;
use crate::layout::Detection;

pub use sidecar::{DEFAULT_SIDECAR_SUFFIX, SidecarSource};
#[cfg(feature = "tesseract")]
pub use tesseract::{TesseractConfig, TesseractSource};

/// A page handed to a recognition engine.
pub struct PageImage<'a> {
    /// File the page was loaded from.
    pub path: &'a Path,
    /// Preprocessed pixels.
    pub pixels: &'a GrayImage,
}

/// Produces detections for a page.
///
/// Output order is engine-defined. Callers only rely on it to break ties.
pub trait TokenSource: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    fn recognize(&self, page: &PageImage<'_>) -> Result<Vec<Detection>, RecognitionError>;
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, page: &PageImage<'_>) -> Result<Vec<Detection>, RecognitionError> {
        (**self).recognize(page)
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, page: &PageImage<'_>) -> Result<Vec<Detection>, RecognitionError> {
        (**self).recognize(page)
    }
}
