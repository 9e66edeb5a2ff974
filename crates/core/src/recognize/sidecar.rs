//! Detections stored next to the image by an external recognition service.
//!
//! For `scans/page.png` the engine reads `scans/page.ocr.json`, a JSON array
//! in which each item is either an EasyOCR-style triple
//! `[[[x, y], [x, y], [x, y], [x, y]], "text", confidence]` or an object
//! `{"quad": [[x, y], ...], "text": "...", "confidence": 0.9}`. Corners run
//! top-left, top-right, bottom-right, bottom-left. Confidence may be null,
//! and may be left out of the object form.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::RecognitionError;
use crate::layout::Detection;

use super::{PageImage, TokenSource};

pub const DEFAULT_SIDECAR_SUFFIX: &str = ".ocr.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum SidecarEntry {
    Triple([[f64; 2]; 4], String, Option<f64>),
    Object {
        quad: [[f64; 2]; 4],
        text: String,
        #[serde(default)]
        confidence: Option<f64>,
    },
}

impl From<SidecarEntry> for Detection {
    fn from(entry: SidecarEntry) -> Self {
        let (quad, text, confidence) = match entry {
            SidecarEntry::Triple(quad, text, confidence) => (quad, text, confidence),
            SidecarEntry::Object {
                quad,
                text,
                confidence,
            } => (quad, text, confidence),
        };
        Detection::new(quad.map(|[x, y]| (x, y)), text, confidence)
    }
}

/// Reads pre-computed detections from a JSON file beside each image.
#[derive(Debug, Clone)]
pub struct SidecarSource {
    suffix: String,
}

impl Default for SidecarSource {
    fn default() -> Self {
        Self::new(DEFAULT_SIDECAR_SUFFIX)
    }
}

impl SidecarSource {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Location of the detections file for `image`.
    pub fn sidecar_path(&self, image: &Path) -> PathBuf {
        let stem = image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        image.with_file_name(format!("{stem}{}", self.suffix))
    }

    /// Parses a sidecar document. `path` is only used in error messages.
    pub fn parse(path: &Path, json: &str) -> Result<Vec<Detection>, RecognitionError> {
        let entries: Vec<SidecarEntry> =
            serde_json::from_str(json).map_err(|e| RecognitionError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(entries.into_iter().map(Detection::from).collect())
    }
}

impl TokenSource for SidecarSource {
    fn name(&self) -> &str {
        "sidecar"
    }

    fn recognize(&self, page: &PageImage<'_>) -> Result<Vec<Detection>, RecognitionError> {
        let path = self.sidecar_path(page.path);
        let json = std::fs::read_to_string(&path)
            .map_err(|_| RecognitionError::MissingDetections(path.clone()))?;
        let detections = Self::parse(&path, &json)?;
        debug!(file = %path.display(), detections = detections.len(), "loaded sidecar");
        Ok(detections)
    }
}
