pub mod detection;
pub mod models;

pub use detection::{DisplayReader, read_from_path};
pub use models::{ReadError, Reading, Rect};
