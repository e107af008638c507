//! Image decode and BT.601 intensity conversion.

use image::{GrayImage, Luma, RgbImage};

use crate::error::FaceError;

/// Decodes any format the `image` crate recognizes and converts to 8-bit
/// intensity.
pub fn decode_gray(bytes: &[u8]) -> Result<GrayImage, FaceError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| FaceError::Decode(e.to_string()))?;
    Ok(to_gray(&decoded.to_rgb8()))
}

/// `Y = 0.299 R + 0.587 G + 0.114 B` in 14-bit fixed point, rounded.
pub fn to_gray(rgb: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let v = (r as u32 * R + g as u32 * G + b as u32 * B + (1 << (SHIFT - 1))) >> SHIFT;
        Luma([v as u8])
    })
}
