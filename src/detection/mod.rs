pub mod annotate;
pub mod contours;
pub mod lines;
pub mod preprocessing;
pub mod scale;
pub mod segments;

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::models::{ReadError, Reading, Rect};

/// Single-pass reader for a photographed 7-segment display.
///
/// One call to [`DisplayReader::read`] processes one photo: the image is
/// normalized to the working height, the crop region is binarized, digit
/// contours are grouped into lines and each digit is decoded from its
/// segment pattern. The reader holds no state between calls.
pub struct DisplayReader {
    /// Contours shorter than this are treated as noise.
    pub min_digit_height: u32,
    /// Lower aspect-ratio bound for digit-shaped contours (exclusive).
    pub min_aspect: f32,
    /// Upper aspect-ratio bound for digit-shaped contours (exclusive).
    pub max_aspect: f32,
    /// Boxes narrower than this ratio are read as digit 1 outright.
    pub one_aspect_cutoff: f32,
    /// Minimum foreground fraction for a segment to count as lit (exclusive).
    pub segment_fill_threshold: f32,
    /// Quality of the annotated JPEG payload.
    pub jpeg_quality: u8,
}

impl DisplayReader {
    pub fn new() -> Self {
        Self {
            min_digit_height: 20,
            min_aspect: 0.1,
            max_aspect: 1.0,
            one_aspect_cutoff: 0.4,
            segment_fill_threshold: 0.45,
            jpeg_quality: 90,
        }
    }

    /// Runs the full pipeline over one photo and crop region given in
    /// original-image coordinates.
    pub fn read(&self, image: &DynamicImage, crop: Rect) -> Result<Reading, ReadError> {
        let (working, crop) = scale::to_working_height(image, crop);
        let crop = crop.clamped_to(working.width(), working.height());
        if crop.width == 0 || crop.height == 0 {
            return Err(ReadError::NoContours);
        }

        let gray = image::imageops::grayscale(&working);
        let region = image::imageops::crop_imm(&gray, crop.x, crop.y, crop.width, crop.height)
            .to_image();

        let enhanced = preprocessing::equalize_local_contrast(&region);
        let mask = preprocessing::close_gaps(&preprocessing::threshold_strokes(&enhanced));

        let boxes = contours::find_digit_boxes(
            &mask,
            self.min_digit_height,
            self.min_aspect,
            self.max_aspect,
        );
        if boxes.is_empty() {
            return Err(ReadError::NoContours);
        }
        debug!(count = boxes.len(), "digit-shaped contours kept");

        let grouped = lines::group_into_lines(boxes)?;
        debug!(lines = grouped.len(), "reading lines formed");

        let mut output = working.clone();
        let mut readings = Vec::with_capacity(grouped.len());
        for line in &grouped {
            let mut digits = String::new();
            for bounds in line {
                let Some(digit) = segments::decode_digit(
                    &mask,
                    *bounds,
                    self.one_aspect_cutoff,
                    self.segment_fill_threshold,
                ) else {
                    continue;
                };
                digits.push(char::from(b'0' + digit));
                annotate::mark_digit(&mut output, bounds.translated(crop.x, crop.y), digit);
            }
            debug!(line = %digits, "decoded line");
            readings.push(digits);
        }

        let annotated =
            annotate::encode_base64_jpeg(&output, self.jpeg_quality).map_err(ReadError::Encode)?;
        Ok(Reading::from_lines(readings, annotated))
    }
}

impl Default for DisplayReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads a photo from disk and reads it with default parameters.
pub fn read_from_path(path: &Path, crop: Rect) -> Result<Reading, ReadError> {
    let image = image::open(path).map_err(ReadError::Load)?;
    DisplayReader::new().read(&image, crop)
}
