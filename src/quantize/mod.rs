pub mod remap;
pub mod quantizer;

pub use remap::{nearest_index, quantize};
pub use quantizer::{Quantized, Quantizer};
