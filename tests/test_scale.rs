use bpread::Rect;
use bpread::detection::scale::{WORKING_HEIGHT, to_working_height};
use image::{DynamicImage, RgbImage};

#[test]
fn halves_crop_fields_when_height_halves() {
    let photo = DynamicImage::ImageRgb8(RgbImage::new(800, 1000));
    let (resized, crop) = to_working_height(&photo, Rect::new(101, 201, 301, 401));

    assert_eq!(resized.height(), WORKING_HEIGHT);
    assert_eq!(resized.width(), 400);
    assert_eq!(crop, Rect::new(50, 100, 150, 200));
}

#[test]
fn working_height_photo_passes_through() {
    let photo = DynamicImage::ImageRgb8(RgbImage::new(400, WORKING_HEIGHT));
    let original = Rect::new(10, 20, 30, 40);
    let (resized, crop) = to_working_height(&photo, original);

    assert_eq!(resized.dimensions(), (400, WORKING_HEIGHT));
    assert_eq!(crop, original);
}

#[test]
fn scaled_fields_truncate_toward_zero() {
    // 750 -> 500 is a ratio of 2/3; every field truncates independently.
    let photo = DynamicImage::ImageRgb8(RgbImage::new(600, 750));
    let (resized, crop) = to_working_height(&photo, Rect::new(100, 100, 99, 31));

    assert_eq!(resized.dimensions(), (400, WORKING_HEIGHT));
    assert_eq!(crop, Rect::new(66, 66, 66, 20));
}

#[test]
fn upscales_short_photos_to_working_height() {
    let photo = DynamicImage::ImageRgb8(RgbImage::new(100, 250));
    let (resized, crop) = to_working_height(&photo, Rect::new(5, 10, 20, 40));

    assert_eq!(resized.dimensions(), (200, WORKING_HEIGHT));
    assert_eq!(crop, Rect::new(10, 20, 40, 80));
}
