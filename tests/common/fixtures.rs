use bpread::Rect;
use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::NamedTempFile;

/// Digit cell geometry for the synthetic seven-segment renderer. The stroke
/// is wide enough that a lone "1" still clears the contour aspect filter.
pub const CELL_W: u32 = 48;
pub const CELL_H: u32 = 90;
pub const STROKE: u32 = 10;

/// Ink and panel shades of the synthetic display photo.
pub const INK: u8 = 20;
pub const PAPER: u8 = 235;

/// Segment flags per digit: top, upper-left, upper-right, middle,
/// lower-left, lower-right, bottom.
pub fn segments_for(digit: u8) -> [bool; 7] {
    match digit {
        0 => [true, true, true, false, true, true, true],
        1 => [false, false, true, false, false, true, false],
        2 => [true, false, true, true, true, true, false],
        3 => [true, false, true, true, false, true, true],
        4 => [false, true, true, true, false, true, false],
        5 => [true, true, false, true, false, true, true],
        6 => [true, true, false, true, true, true, true],
        7 => [true, false, true, false, false, true, false],
        8 => [true, true, true, true, true, true, true],
        9 => [true, true, true, true, false, true, true],
        other => panic!("not a digit: {other}"),
    }
}

/// Segment bars in cell-local coordinates, matching `segments_for` order.
fn bar_rects() -> [(u32, u32, u32, u32); 7] {
    let (w, h, t) = (CELL_W, CELL_H, STROKE);
    let half = h / 2;
    [
        (0, 0, w, t),
        (0, 0, t, half),
        (w - t, 0, w, half),
        (0, half - t / 2, w, half + t - t / 2),
        (0, half, t, h),
        (w - t, half, w, h),
        (0, h - t, w, h),
    ]
}

/// Draws one seven-segment digit with its cell anchored at (x, y).
pub fn draw_digit_rgb(canvas: &mut RgbImage, x: u32, y: u32, digit: u8) {
    for (on, (x0, y0, x1, y1)) in segments_for(digit).iter().zip(bar_rects()) {
        if !*on {
            continue;
        }
        for py in y + y0..y + y1 {
            for px in x + x0..x + x1 {
                canvas.put_pixel(px, py, Rgb([INK, INK, INK]));
            }
        }
    }
}

/// Draws a digit directly into a white-on-black stroke mask.
pub fn draw_digit_mask(mask: &mut GrayImage, x: u32, y: u32, digit: u8) {
    for (on, (x0, y0, x1, y1)) in segments_for(digit).iter().zip(bar_rects()) {
        if !*on {
            continue;
        }
        for py in y + y0..y + y1 {
            for px in x + x0..x + x1 {
                mask.put_pixel(px, py, Luma([255u8]));
            }
        }
    }
}

/// Tight bounding box of all foreground pixels in a mask.
pub fn ink_bounds(mask: &GrayImage) -> Rect {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel[0] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    assert!(min_x <= max_x, "mask has no foreground pixels");
    Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Renders a synthetic monitor photo at the working height: dark digits on a
/// light panel, one row of digits per reading line. Returns the photo and a
/// crop rectangle covering the panel.
pub fn display_photo(lines: &[&str]) -> (RgbImage, Rect) {
    display_photo_spaced(lines, 60, 50)
}

/// Same as [`display_photo`] with an explicit top margin and inter-line gap,
/// for layouts with more than three rows.
pub fn display_photo_spaced(lines: &[&str], top: u32, line_gap: u32) -> (RgbImage, Rect) {
    let (width, height) = (320u32, 500u32);
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([PAPER, PAPER, PAPER]));

    let mut y = top;
    for line in lines {
        let mut x = 40u32;
        for ch in line.chars() {
            let digit = ch.to_digit(10).expect("fixture lines hold digits only") as u8;
            draw_digit_rgb(&mut canvas, x, y, digit);
            x += CELL_W + 25;
        }
        y += CELL_H + line_gap;
    }

    let bottom = if lines.is_empty() { top } else { y - line_gap };
    let crop_top = top.saturating_sub(20);
    (canvas, Rect::new(20, crop_top, 280, bottom + 20 - crop_top))
}

/// Saves a photo to a temporary PNG file. Keep the handle alive for as long
/// as the path is used.
pub fn save_photo(photo: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("failed to create temp image file");
    photo
        .save_with_format(file.path(), image::ImageFormat::Png)
        .expect("failed to save test image");
    file
}
