use std::collections::HashMap;

use crate::color::rgb::Rgb;
use crate::error::{QuantError, Result};

/// A decoded RGB image, row-major, `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Builds a buffer from already-decoded pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<PixelBuffer> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(QuantError::DimensionMismatch { expected, actual: pixels.len() });
        }
        Ok(PixelBuffer { width, height, pixels })
    }

    /// A `width × height` buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Builds a buffer from interleaved RGB8 bytes (`R, G, B, R, G, B, ...`).
    pub fn from_raw(width: u32, height: u32, raw: &[u8]) -> Result<PixelBuffer> {
        let expected = width as usize * height as usize * 3;
        if raw.len() != expected {
            return Err(QuantError::DimensionMismatch { expected, actual: raw.len() });
        }
        let pixels = raw.chunks_exact(3).map(|c| Rgb::new(c[0], c[1], c[2])).collect();
        Ok(PixelBuffer { width, height, pixels })
    }

    /// Builds a buffer from interleaved RGBA8 bytes, compositing every pixel
    /// over an opaque white background.
    pub fn from_rgba_over_white(width: u32, height: u32, raw: &[u8]) -> Result<PixelBuffer> {
        let expected = width as usize * height as usize * 4;
        if raw.len() != expected {
            return Err(QuantError::DimensionMismatch { expected, actual: raw.len() });
        }
        let pixels = raw
            .chunks_exact(4)
            .map(|c| flatten_over_white([c[0], c[1], c[2]], c[3]))
            .collect();
        Ok(PixelBuffer { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Interleaved RGB8 bytes, ready for an encoder.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    /// Collapses the pixels into distinct colors with occurrence counts.
    pub fn histogram(&self) -> ColorHistogram {
        ColorHistogram::from_pixels(&self.pixels)
    }
}

/// `c·a + 255·(1 − a)`, rounded, per channel.
pub fn flatten_over_white(rgb: [u8; 3], alpha: u8) -> Rgb {
    if alpha == 255 {
        return Rgb::from(rgb);
    }
    let a = alpha as u32;
    let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    Rgb::new(blend(rgb[0]), blend(rgb[1]), blend(rgb[2]))
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Distinct colors of an image and how often each occurs.
///
/// Entries are sorted by `(r, g, b)` so that everything derived from the
/// histogram (seeding, tie-breaks, re-seeding) is independent of hash order.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    pub colors: Vec<Rgb>,
    pub counts: Vec<u64>,
}

impl ColorHistogram {
    pub fn from_pixels(pixels: &[Rgb]) -> ColorHistogram {
        let mut map: HashMap<Rgb, u64> = HashMap::new();
        for &p in pixels {
            *map.entry(p).or_insert(0) += 1;
        }
        let mut entries: Vec<(Rgb, u64)> = map.into_iter().collect();
        entries.sort_unstable_by_key(|(c, _)| *c);

        let (colors, counts): (Vec<Rgb>, Vec<u64>) = entries.into_iter().unzip();
        ColorHistogram { colors, counts }
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 3]> {
        self.colors.iter().map(|c| c.to_point()).collect()
    }
}
