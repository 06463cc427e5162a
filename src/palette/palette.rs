use serde::Serialize;

use crate::color::rgb::Rgb;
use crate::error::Result;

/// An ordered set of representative colors.
///
/// Order is centroid index order as clustering finished; it carries no
/// ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    pub colors: Vec<Rgb>,
}

/// Human-readable form of one palette entry.
///
/// Serializes as `{"rgb": "RGB(220, 50, 50)", "hex": "#dc3232"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorRecord {
    pub rgb: String,
    pub hex: String,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Palette {
        Palette { colors }
    }

    /// Parses a list of `#rrggbb` strings.
    pub fn from_hex_list<S: AsRef<str>>(hex: &[S]) -> Result<Palette> {
        let colors = hex.iter().map(|s| Rgb::from_hex(s.as_ref())).collect::<Result<Vec<_>>>()?;
        Ok(Palette { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    pub fn records(&self) -> Vec<ColorRecord> {
        self.colors
            .iter()
            .map(|c| ColorRecord { rgb: c.to_string(), hex: c.to_hex() })
            .collect()
    }
}
