//! Image loading and binarization ahead of recognition.
//!
//! Binarization uses a single global Otsu threshold and inverts the result so
//! that text becomes the foreground (white on black).

use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::otsu_level;

use crate::error::{ListError, Result};

/// Decodes an image file. Unreadable or undecodable files map to
/// [`ListError::ImageRead`].
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| ListError::ImageRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts to grayscale and applies an inverted Otsu threshold.
///
/// Pixels brighter than the Otsu level become 0, all others 255.
pub fn binarize(image: &DynamicImage) -> GrayImage {
    let mut gray = image.to_luma8();
    let level = otsu_level(&gray);
    for pixel in gray.pixels_mut() {
        *pixel = if pixel.0[0] > level { Luma([0]) } else { Luma([255]) };
    }
    gray
}

/// Loads an image and prepares it for the recognizer.
///
/// With `binarize_input` unset the grayscale image is passed through as-is.
pub fn prepare(path: &Path, binarize_input: bool) -> Result<GrayImage> {
    let image = load_image(path)?;
    Ok(if binarize_input {
        binarize(&image)
    } else {
        image.to_luma8()
    })
}
