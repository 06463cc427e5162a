pub mod palette;
pub mod extract;

pub use palette::{ColorRecord, Palette};
pub use extract::{extract_palette, extract_palette_fit, extract_palette_with};
