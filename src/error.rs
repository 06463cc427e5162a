use thiserror::Error;

/// Errors raised by the quantizer.
///
/// Only the first group can come out of the clustering / remapping core; the
/// `Decode` and `Io` variants belong to the `io` adapters.
#[derive(Debug, Error)]
pub enum QuantError {
    /// Requested palette size is zero or above the configured maximum.
    #[error("invalid color count {k}: must be between 1 and {max}")]
    InvalidK { k: usize, max: usize },

    /// The image has no pixels.
    #[error("image contains no pixels")]
    EmptyImage,

    /// A raw RGB buffer does not match `width * height * 3`.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// `quantize` was handed a palette with no entries.
    #[error("palette is empty")]
    EmptyPalette,

    /// `max_iterations` or `n_init` is zero.
    #[error("k-means needs at least one restart and one iteration")]
    InvalidIterations,

    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("image decode/encode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuantError>;
