pub mod rgb;
pub mod buffer;

pub use rgb::Rgb;
pub use buffer::{ColorHistogram, PixelBuffer};
