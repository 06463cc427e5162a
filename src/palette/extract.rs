use crate::cluster::{KMeans, KMeansConfig, KMeansFit};
use crate::color::buffer::PixelBuffer;
use crate::color::rgb::Rgb;
use crate::error::{QuantError, Result};
use crate::palette::palette::Palette;

/// Extracts a `k`-color palette with the default clustering settings
/// (10 restarts, seed 42, at most 300 iterations each).
pub fn extract_palette(buffer: &PixelBuffer, k: usize) -> Result<Palette> {
    extract_palette_with(buffer, &KMeansConfig::new(k))
}

/// Extracts a palette with explicit clustering settings.
pub fn extract_palette_with(buffer: &PixelBuffer, config: &KMeansConfig) -> Result<Palette> {
    extract_palette_fit(buffer, config).map(|(palette, _)| palette)
}

/// Like `extract_palette_with` but also hands back the raw clustering result
/// (per-restart statistics, unrounded centroids).
///
/// The configuration is validated and the buffer checked for pixels before
/// any clustering work starts.
pub fn extract_palette_fit(buffer: &PixelBuffer, config: &KMeansConfig) -> Result<(Palette, KMeansFit)> {
    let kmeans = KMeans::new(*config)?;
    if buffer.is_empty() {
        return Err(QuantError::EmptyImage);
    }

    let fit = kmeans.fit(&buffer.histogram())?;
    let colors = fit.centroids.iter().map(|&c| Rgb::from_point(c)).collect();
    Ok((Palette::new(colors), fit))
}
