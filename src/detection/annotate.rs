use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as PixelRect;

use super::segments::DIGIT_PATTERNS;
use crate::models::Rect;

const MARK_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const GLYPH_W: i32 = 10;
const GLYPH_H: i32 = 18;
const GLYPH_STROKE: i32 = 2;

/// Draws a recognized digit's bounding box and a small segment-glyph label
/// onto the working image. `bounds` is given in working-image coordinates.
pub fn mark_digit(canvas: &mut RgbImage, bounds: Rect, digit: u8) {
    let inner = PixelRect::at(bounds.x as i32, bounds.y as i32).of_size(bounds.width, bounds.height);
    let outer = PixelRect::at(bounds.x as i32 - 1, bounds.y as i32 - 1)
        .of_size(bounds.width + 2, bounds.height + 2);
    draw_hollow_rect_mut(canvas, inner, MARK_COLOR);
    draw_hollow_rect_mut(canvas, outer, MARK_COLOR);

    draw_glyph(
        canvas,
        digit,
        bounds.x as i32 - GLYPH_W - 2,
        bounds.y as i32 - GLYPH_H - 2,
    );
}

/// Renders the digit label as a miniature seven-segment glyph, reusing the
/// canonical pattern table instead of a bundled font.
fn draw_glyph(canvas: &mut RgbImage, digit: u8, x: i32, y: i32) {
    let Some((pattern, _)) = DIGIT_PATTERNS.iter().find(|(_, value)| *value == digit) else {
        return;
    };

    let (w, h, t) = (GLYPH_W, GLYPH_H, GLYPH_STROKE);
    let half = h / 2;
    let bars: [(i32, i32, i32, i32); 7] = [
        (0, 0, w, t),
        (0, 0, t, half),
        (w - t, 0, w, half),
        (0, half - t / 2, w, half + t - t / 2),
        (0, half, t, h),
        (w - t, half, w, h),
        (0, h - t, w, h),
    ];

    for (&on, &(x0, y0, x1, y1)) in pattern.iter().zip(bars.iter()) {
        if !on {
            continue;
        }
        let bar = PixelRect::at(x + x0, y + y0).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(canvas, bar, MARK_COLOR);
    }
}

/// Encodes the annotated image as a JPEG wrapped in base64 for transport.
pub fn encode_base64_jpeg(image: &RgbImage, quality: u8) -> Result<String, ImageError> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    image.write_with_encoder(encoder)?;
    Ok(STANDARD.encode(bytes))
}
