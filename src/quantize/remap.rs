use rayon::prelude::*;

use crate::color::buffer::PixelBuffer;
use crate::color::rgb::Rgb;
use crate::error::{QuantError, Result};
use crate::palette::Palette;

const REMAP_CHUNK: usize = 8192;

/// Index of the palette entry nearest to `color`; ties go to the lowest index,
/// the same rule the clustering assignment step uses.
#[inline]
pub fn nearest_index(color: Rgb, palette: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (idx, &entry) in palette.iter().enumerate() {
        let d = color.distance_sq(entry);
        if d < best_dist {
            best_dist = d;
            best = idx;
        }
    }
    best
}

/// Replaces every pixel with its nearest palette color.
///
/// The result has the same dimensions as `buffer` and every pixel in it is
/// one of `palette.colors`.
pub fn quantize(buffer: &PixelBuffer, palette: &Palette) -> Result<PixelBuffer> {
    if palette.is_empty() {
        return Err(QuantError::EmptyPalette);
    }
    let colors = &palette.colors;

    let mut out = vec![Rgb::default(); buffer.pixels().len()];
    out.par_chunks_mut(REMAP_CHUNK)
        .zip(buffer.pixels().par_chunks(REMAP_CHUNK))
        .for_each(|(dst, src)| {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = colors[nearest_index(s, colors)];
            }
        });

    PixelBuffer::new(buffer.width(), buffer.height(), out)
}
