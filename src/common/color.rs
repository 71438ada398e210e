//! RGB colors and WCAG contrast math.
use std::fmt;

/// RGB color representation.
///
/// # Examples
///
/// ```rust
/// use deckwright::common::RGBColor;
///
/// let green = RGBColor::from_hex("#147B58").unwrap();
/// assert_eq!(green, RGBColor::new(20, 123, 88));
/// assert_eq!(green.to_hex(), "147B58");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    pub const BLACK: RGBColor = RGBColor::new(0, 0, 0);
    pub const WHITE: RGBColor = RGBColor::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB` or `#RRGGBB`. Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Uppercase hex without the `#` prefix, as DrawingML `srgbClr` expects.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG 2.0 relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// WCAG contrast ratio between two colors, in `[1, 21]`.
    pub fn contrast_ratio(&self, other: &RGBColor) -> f64 {
        contrast_ratio(self.relative_luminance(), other.relative_luminance())
    }
}

/// Contrast ratio between two relative luminances, order-independent.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(RGBColor::from_hex("FFFFFF"), Some(RGBColor::WHITE));
        assert_eq!(RGBColor::from_hex("#e65166"), Some(RGBColor::new(230, 81, 102)));
        assert_eq!(RGBColor::from_hex("#FFF"), None);
        assert_eq!(RGBColor::from_hex("GGGGGG"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RGBColor::new(74, 74, 74).to_string(), "#4A4A4A");
    }

    #[test]
    fn test_luminance_extremes() {
        assert!((RGBColor::WHITE.relative_luminance() - 1.0).abs() < 1e-9);
        assert!(RGBColor::BLACK.relative_luminance().abs() < 1e-9);
    }

    #[test]
    fn test_contrast_ratio() {
        let ratio = RGBColor::BLACK.contrast_ratio(&RGBColor::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        // Symmetric
        let a = RGBColor::new(20, 123, 88);
        assert!((a.contrast_ratio(&RGBColor::WHITE) - RGBColor::WHITE.contrast_ratio(&a)).abs() < 1e-12);
    }
}
