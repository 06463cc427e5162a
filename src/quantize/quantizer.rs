use std::time::Instant;

use log::{debug, info};

use crate::cluster::{KMeansConfig, RunStats};
use crate::color::buffer::PixelBuffer;
use crate::error::Result;
use crate::palette::{extract_palette_fit, Palette};
use crate::quantize::remap::quantize;

/// Everything a presentation layer needs after one quantization.
#[derive(Debug, Clone)]
pub struct Quantized {
    pub palette: Palette,
    pub image: PixelBuffer,
    /// Per-restart clustering statistics; empty when the image had no more
    /// distinct colors than requested.
    pub runs: Vec<RunStats>,
    pub elapsed_ms: u64,
}

/// Palette extraction followed by nearest-color remapping of the same image.
///
/// Holds only its configuration, so one `Quantizer` can be shared freely
/// across threads; every `run` works on its own buffers.
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    config: KMeansConfig,
}

impl Quantizer {
    pub fn new(config: KMeansConfig) -> Self {
        Quantizer { config }
    }

    /// Default clustering settings with `k` colors.
    pub fn with_colors(k: usize) -> Self {
        Quantizer::new(KMeansConfig::new(k))
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    pub fn run(&self, buffer: &PixelBuffer) -> Result<Quantized> {
        let t_start = Instant::now();
        let (w, h) = buffer.dimensions();

        let (palette, fit) = extract_palette_fit(buffer, &self.config)?;
        debug!("extracted {} colors from {w}x{h} image", palette.len());
        if palette.len() < self.config.k {
            info!(
                "image has only {} distinct colors; palette is smaller than the requested {}",
                palette.len(),
                self.config.k
            );
        }

        let image = quantize(buffer, &palette)?;

        Ok(Quantized {
            palette,
            image,
            runs: fit.runs,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        })
    }
}
