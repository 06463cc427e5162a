use std::fmt;

use crate::error::{QuantError, Result};

/// A single 8-bit RGB color.
///
/// Field order matters: the derived `Ord` sorts by red, then green, then blue,
/// which is the order the color histogram and the degenerate-palette path use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Color as a floating-point point in RGB space.
    #[inline]
    pub fn to_point(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Rounds each component to the nearest integer and clamps it to [0, 255].
    pub fn from_point(p: [f64; 3]) -> Rgb {
        let c = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Rgb::new(c(p[0]), c(p[1]), c(p[2]))
    }

    /// Squared Euclidean distance to another color. Exact in integer space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `rrggbb` (either case).
    pub fn from_hex(hex: &str) -> Result<Rgb> {
        let s = hex.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(QuantError::InvalidHex(hex.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| QuantError::InvalidHex(hex.to_owned()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Human-readable form, e.g. `RGB(220, 50, 50)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Squared Euclidean distance between two points in RGB space.
#[inline]
pub fn point_distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::black(Rgb::new(0, 0, 0), "#000000")]
    #[case::white(Rgb::WHITE, "#ffffff")]
    #[case::red_ish(Rgb::new(220, 50, 50), "#dc3232")]
    fn hex_formatting(#[case] color: Rgb, #[case] hex: &str) {
        assert_eq!(color.to_hex(), hex);
        assert_eq!(Rgb::from_hex(hex).unwrap(), color);
    }

    #[rstest]
    #[case::too_short("#fff")]
    #[case::not_hex("#gg0000")]
    #[case::multibyte("#ééé")]
    fn bad_hex_is_rejected(#[case] hex: &str) {
        assert!(matches!(Rgb::from_hex(hex), Err(QuantError::InvalidHex(_))));
    }

    #[test]
    fn display_matches_rgb_record() {
        assert_eq!(Rgb::new(50, 100, 200).to_string(), "RGB(50, 100, 200)");
    }

    #[test]
    fn from_point_rounds_and_clamps() {
        assert_eq!(Rgb::from_point([12.5, -3.0, 300.2]), Rgb::new(13, 0, 255));
        assert_eq!(Rgb::from_point([99.49, 0.51, 254.6]), Rgb::new(99, 1, 255));
    }

    #[test]
    fn distances_agree() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(13, 16, 30);
        assert_eq!(a.distance_sq(b), 25);
        assert_eq!(point_distance_sq(a.to_point(), b.to_point()), 25.0);
    }
}
