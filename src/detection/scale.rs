use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use crate::models::Rect;

/// Fixed height of the working image. Every downstream pixel threshold
/// assumes the display has been normalized to this scale.
pub const WORKING_HEIGHT: u32 = 500;

/// Resizes the photo to the working height, preserving aspect ratio, and
/// rescales the caller's crop rectangle by the same ratio with integer
/// truncation. A photo already at the working height passes through
/// untouched.
pub fn to_working_height(image: &DynamicImage, crop: Rect) -> (RgbImage, Rect) {
    let rgb = image.to_rgb8();
    let height = rgb.height();
    if height == WORKING_HEIGHT {
        return (rgb, crop);
    }

    let ratio = WORKING_HEIGHT as f64 / height as f64;
    let width = ((rgb.width() as f64 * ratio) as u32).max(1);
    let resized = imageops::resize(&rgb, width, WORKING_HEIGHT, FilterType::Triangle);

    (resized, crop.scaled(ratio))
}
