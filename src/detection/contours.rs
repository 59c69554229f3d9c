use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::models::Rect;

/// Finds outer contours in the stroke mask and keeps the bounding boxes that
/// look like digits: taller than `min_height` with an aspect ratio strictly
/// inside `(min_aspect, max_aspect)`. Short specks and wide merged blobs are
/// dropped; a lone "1" stroke still passes. No ordering is guaranteed.
pub fn find_digit_boxes(
    mask: &GrayImage,
    min_height: u32,
    min_aspect: f32,
    max_aspect: f32,
) -> Vec<Rect> {
    find_contours::<i32>(mask)
        .iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .filter_map(|contour| bounding_rect(&contour.points))
        .filter(|bounds| {
            let aspect = bounds.aspect_ratio();
            bounds.height > min_height && aspect > min_aspect && aspect < max_aspect
        })
        .collect()
}

fn bounding_rect(points: &[Point<i32>]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x, first.y);
    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Some(Rect::new(
        min_x as u32,
        min_y as u32,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    ))
}
