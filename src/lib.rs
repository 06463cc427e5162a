pub mod error;
pub mod color;
pub mod cluster;
pub mod palette;
pub mod quantize;
pub mod io;

// Convenience re-exports
pub use error::{QuantError, Result};
pub use color::{ColorHistogram, PixelBuffer, Rgb};
pub use cluster::{KMeans, KMeansConfig, KMeansFit, RunStats, DEFAULT_MAX_K};
pub use palette::{extract_palette, extract_palette_with, ColorRecord, Palette};
pub use quantize::{quantize, Quantized, Quantizer};
