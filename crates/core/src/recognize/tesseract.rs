//! Word-level recognition with Tesseract 5.x through leptess.

use std::io::Cursor;
use std::sync::Mutex;

use leptess::{LepTess, Variable};
use tracing::debug;

use crate::error::RecognitionError;
use crate::layout::Detection;

use super::{PageImage, TokenSource};

/// Configuration for the Tesseract engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TesseractConfig {
    /// Tesseract language codes (e.g., "eng", "eng+fra")
    pub language: String,
    /// Directory holding traineddata files. None uses the Tesseract default.
    pub data_path: Option<String>,
    /// Page segmentation mode (see Tesseract PSM)
    pub page_segmentation_mode: u32,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            data_path: None,
            page_segmentation_mode: 11, // PSM_SPARSE_TEXT, words in no particular order
        }
    }
}

struct Engine(LepTess);

// SAFETY: the Tesseract handle has no thread affinity; every access goes
// through the Mutex in TesseractSource, so it is never used concurrently.
unsafe impl Send for Engine {}

/// Tesseract engine, loaded once and shared across a batch.
///
/// Recognition calls are serialized on the loaded model.
pub struct TesseractSource {
    engine: Mutex<Engine>,
}

impl TesseractSource {
    /// Loads the language model. This is the expensive step.
    pub fn new(config: &TesseractConfig) -> Result<Self, RecognitionError> {
        let mut lt = LepTess::new(config.data_path.as_deref(), &config.language).map_err(|e| {
            RecognitionError::Init(format!(
                "failed to load Tesseract language '{}': {}",
                config.language, e
            ))
        })?;
        lt.set_variable(
            Variable::TesseditPagesegMode,
            &config.page_segmentation_mode.to_string(),
        )
        .map_err(|e| RecognitionError::Init(format!("failed to set PSM: {e}")))?;
        Ok(Self {
            engine: Mutex::new(Engine(lt)),
        })
    }
}

impl TokenSource for TesseractSource {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, page: &PageImage<'_>) -> Result<Vec<Detection>, RecognitionError> {
        let (width, height) = page.pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(RecognitionError::InvalidDimensions { width, height });
        }

        // leptess expects encoded image data
        let mut png = Cursor::new(Vec::new());
        page.pixels
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| RecognitionError::Engine(format!("failed to encode page: {e}")))?;

        let mut guard = self
            .engine
            .lock()
            .map_err(|_| RecognitionError::Engine("engine lock poisoned".to_string()))?;
        let lt = &mut guard.0;
        lt.set_image_from_mem(png.get_ref())
            .map_err(|e| RecognitionError::Engine(format!("failed to load page: {e}")))?;

        // None means the page has no text
        let Some(boxes) = lt.get_component_boxes(leptess::capi::TessPageIteratorLevel_RIL_WORD, true)
        else {
            return Ok(Vec::new());
        };

        let mut detections = Vec::new();
        for bbox in &boxes {
            let geom = bbox.get_geometry();
            lt.set_rectangle(geom.x, geom.y, geom.w, geom.h);
            let text = lt.get_utf8_text().unwrap_or_default().trim().to_string();
            if text.is_empty() {
                continue;
            }
            let confidence = f64::from(lt.mean_text_conf()) / 100.0;
            detections.push(Detection::from_rect(
                f64::from(geom.x),
                f64::from(geom.y),
                f64::from(geom.x + geom.w),
                f64::from(geom.y + geom.h),
                text,
                Some(confidence.clamp(0.0, 1.0)),
            ));
        }
        debug!(file = %page.path.display(), words = detections.len(), "tesseract finished");
        Ok(detections)
    }
}
