// src/services/preprocess.rs
// DOCUMENTATION: Image decoding and model input preparation
// PURPOSE: bytes -> RGB grid -> square preview -> model-sized tensor

use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;

use crate::config::TensorLayout;
use crate::errors::AppError;

/// Decoded upload ready for inference
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Square preview kept for the history
    pub preview: RgbImage,
    /// Batch-of-one model input
    pub tensor: Array4<f32>,
}

/// Decode raw bytes into an RGB pixel grid
/// DOCUMENTATION: Alpha is dropped, grayscale is expanded, and the format
/// is sniffed from the content rather than the upload's file name
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, AppError> {
    if bytes.is_empty() {
        return Err(AppError::InvalidImage("empty upload".to_string()));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| AppError::InvalidImage(e.to_string()))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(AppError::InvalidImage("image has no pixels".to_string()));
    }

    Ok(image.to_rgb8())
}

/// Resize to a size x size square (aspect ratio is not preserved)
pub fn resize_square(image: &RgbImage, size: u32) -> RgbImage {
    if image.width() == size && image.height() == size {
        return image.clone();
    }
    imageops::resize(image, size, size, FilterType::Triangle)
}

/// Convert an RGB image into a [1, .., .., ..] f32 tensor
pub fn to_tensor(image: &RgbImage, layout: TensorLayout, scale: f32) -> Array4<f32> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    let mut tensor = match layout {
        TensorLayout::Nhwc => Array4::zeros((1, height, width, 3)),
        TensorLayout::Nchw => Array4::zeros((1, 3, height, width)),
    };

    for (x, y, pixel) in image.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..3 {
            let value = pixel[c] as f32 * scale;
            match layout {
                TensorLayout::Nhwc => tensor[[0, y, x, c]] = value,
                TensorLayout::Nchw => tensor[[0, c, y, x]] = value,
            }
        }
    }

    tensor
}

/// Full preprocessing pipeline for one upload
/// DOCUMENTATION: The model input is resized from the preview, not from the
/// original, so both come from the same bilinear-filtered grid
pub fn prepare(
    bytes: &[u8],
    preview_size: u32,
    input_size: u32,
    layout: TensorLayout,
    scale: f32,
) -> Result<PreparedImage, AppError> {
    let rgb = decode_rgb(bytes)?;
    let preview = resize_square(&rgb, preview_size);
    let model_input = resize_square(&preview, input_size);
    let tensor = to_tensor(&model_input, layout, scale);

    Ok(PreparedImage { preview, tensor })
}
