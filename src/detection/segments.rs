use image::GrayImage;

use crate::models::Rect;

/// Lit-segment flags in display order: top, upper-left, upper-right, middle,
/// lower-left, lower-right, bottom.
pub type SegmentPattern = [bool; 7];

/// Canonical segment encodings for 0-9. Two entries map to 7: the upper-left
/// bar of a 7 varies between display models and both strokes must read as 7.
pub const DIGIT_PATTERNS: [(SegmentPattern, u8); 11] = [
    ([true, true, true, false, true, true, true], 0),
    ([false, false, true, false, false, true, false], 1),
    ([true, false, true, true, true, true, false], 2),
    ([true, false, true, true, false, true, true], 3),
    ([false, true, true, true, false, true, false], 4),
    ([true, true, false, true, false, true, true], 5),
    ([true, true, false, true, true, true, true], 6),
    ([true, false, true, false, false, true, false], 7),
    ([true, true, true, false, false, true, false], 7),
    ([true, true, true, true, true, true, true], 8),
    ([true, true, true, true, false, true, true], 9),
];

/// Exact lookup of a sampled pattern. Unmapped patterns are not an error;
/// the digit is simply absent.
pub fn lookup(pattern: SegmentPattern) -> Option<u8> {
    DIGIT_PATTERNS
        .iter()
        .find(|(candidate, _)| *candidate == pattern)
        .map(|(_, digit)| *digit)
}

/// Samples the seven segment regions of a digit bounding box against the
/// stroke mask. A segment is on when its foreground fraction strictly
/// exceeds `fill_threshold`; regions with degenerate extents stay off.
pub fn sample_pattern(mask: &GrayImage, bounds: Rect, fill_threshold: f32) -> SegmentPattern {
    let (w, h) = (bounds.width, bounds.height);
    let bar_w = (w as f32 * 0.25) as u32;
    let bar_h = (h as f32 * 0.15) as u32;
    let mid_half = (h as f32 * 0.05) as u32;
    let half = h / 2;

    let regions: [(u32, u32, u32, u32); 7] = [
        (0, 0, w, bar_h),
        (0, 0, bar_w, half),
        (w - bar_w, 0, w, half),
        (0, half.saturating_sub(mid_half), w, half + mid_half),
        (0, half, bar_w, h),
        (w - bar_w, half, w, h),
        (0, h - bar_h, w, h),
    ];

    let mut pattern = [false; 7];
    for (flag, &(x0, y0, x1, y1)) in pattern.iter_mut().zip(regions.iter()) {
        if x0 >= x1 || y0 >= y1 {
            continue;
        }
        let area = (x1 - x0) * (y1 - y0);
        let mut lit = 0u32;
        for y in y0..y1 {
            for x in x0..x1 {
                if mask.get_pixel(bounds.x + x, bounds.y + y)[0] > 0 {
                    lit += 1;
                }
            }
        }
        *flag = lit as f32 / area as f32 > fill_threshold;
    }
    pattern
}

/// Decodes one digit from its bounding box in the stroke mask. Boxes with an
/// aspect ratio strictly below `one_aspect_cutoff` are read as 1 without
/// segment sampling.
pub fn decode_digit(
    mask: &GrayImage,
    bounds: Rect,
    one_aspect_cutoff: f32,
    fill_threshold: f32,
) -> Option<u8> {
    if bounds.aspect_ratio() < one_aspect_cutoff {
        return Some(1);
    }
    lookup(sample_pattern(mask, bounds, fill_threshold))
}
