//! Image Normalizer
//!
//! Bytes ảnh (JPEG/PNG/...) → tensor (1, 224, 224, 3), RGB, giá trị [0, 1].
//! Không có side effect: hoặc trả về tensor đầy đủ, hoặc lỗi.

use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;

use crate::error::PreprocessError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Model input size (square)
pub const IMG_SIZE: u32 = 224;

/// RGB
pub const CHANNELS: usize = 3;

/// Upper bound on the encoded payload, rejects before decoding.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Bilinear. Golden fixtures and inference must use the same filter.
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Batched NHWC tensor fed to the classifier.
pub type NormalizedImage = Array4<f32>;

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Decode, convert to RGB, resize to 224x224, scale to [0, 1], add batch dim.
pub fn normalize(image_bytes: &[u8]) -> Result<NormalizedImage, PreprocessError> {
    if image_bytes.is_empty() {
        return Err(PreprocessError::EmptyInput);
    }
    if image_bytes.len() > MAX_IMAGE_BYTES {
        return Err(PreprocessError::TooLarge {
            size: image_bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }

    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| PreprocessError::Decode(e.to_string()))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(PreprocessError::InvalidDimensions {
            width: decoded.width(),
            height: decoded.height(),
        });
    }

    log::trace!(
        "Decoded {}x{} image ({:?})",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    // Grayscale, RGBA (alpha dropped), 16-bit, ... all end up as 8-bit RGB
    let rgb = decoded.to_rgb8();
    let resized = resize_exact(&rgb);

    to_tensor(resized)
}

fn resize_exact(rgb: &RgbImage) -> RgbImage {
    if rgb.width() == IMG_SIZE && rgb.height() == IMG_SIZE {
        return rgb.clone();
    }
    imageops::resize(rgb, IMG_SIZE, IMG_SIZE, RESIZE_FILTER)
}

fn to_tensor(rgb: RgbImage) -> Result<NormalizedImage, PreprocessError> {
    let (width, height) = rgb.dimensions();

    // RgbImage raw layout is row-major (y, x, c), same as NHWC
    let data: Vec<f32> = rgb
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect();

    Array4::from_shape_vec((1, height as usize, width as usize, CHANNELS), data)
        .map_err(|_| PreprocessError::InvalidDimensions { width, height })
}

/// All-zero batch, used to probe the classifier at startup.
pub fn blank_batch() -> NormalizedImage {
    Array4::zeros((1, IMG_SIZE as usize, IMG_SIZE as usize, CHANNELS))
}
