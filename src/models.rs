use serde::Serialize;
use thiserror::Error;

/// Axis-aligned pixel region, used both for crop rectangles and for contour
/// bounding boxes. Only usable when width and height are both non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Multiplies all four fields by `ratio`, truncating to whole pixels.
    pub fn scaled(&self, ratio: f64) -> Rect {
        Rect {
            x: (self.x as f64 * ratio) as u32,
            y: (self.y as f64 * ratio) as u32,
            width: (self.width as f64 * ratio) as u32,
            height: (self.height as f64 * ratio) as u32,
        }
    }

    /// Intersects the rectangle with an image of the given dimensions.
    /// The result may be empty.
    pub fn clamped_to(&self, image_width: u32, image_height: u32) -> Rect {
        let x = self.x.min(image_width);
        let y = self.y.min(image_height);
        Rect {
            x,
            y,
            width: self.width.min(image_width - x),
            height: self.height.min(image_height - y),
        }
    }

    pub fn translated(&self, dx: u32, dy: u32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// One decoded display reading: the three lines of the monitor plus the
/// annotated working image as a base64 JPEG payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub sys: String,
    pub dia: String,
    pub pulse: String,
    #[serde(rename = "annotatedImage")]
    pub annotated_image: String,
}

impl Reading {
    /// Maps grouped line strings onto the sys/dia/pulse fields. Lines past
    /// the third are discarded and missing lines become empty strings.
    pub fn from_lines(lines: Vec<String>, annotated_image: String) -> Self {
        let field = |index: usize| lines.get(index).cloned().unwrap_or_default();
        Self {
            sys: field(0),
            dia: field(1),
            pulse: field(2),
            annotated_image,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("could not decode the source image: {0}")]
    Load(#[source] image::ImageError),

    #[error("no digit-shaped contours found in the crop region")]
    NoContours,

    #[error("sorting digit contours produced no bounding boxes")]
    SortFailure,

    #[error("could not encode the annotated image: {0}")]
    Encode(#[source] image::ImageError),
}
