//! Unit conversion utilities.
//!
//! Layout is specified in pixels on a 1920x1080 canvas at a 144 DPI reference
//! resolution, so one pixel is 1/144 inch. Everything written to the package is
//! in EMUs (English Metric Units).

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Reference resolution of the layout grid.
pub const REFERENCE_DPI: f64 = 144.0;

/// Convert reference pixels to inches.
#[inline]
pub fn px_to_inches(px: f64) -> f64 {
    px / REFERENCE_DPI
}

/// Convert reference pixels to EMUs, truncating toward zero.
///
/// # Examples
///
/// ```
/// use deckwright::common::unit::px_to_emu;
/// assert_eq!(px_to_emu(144.0), 914_400);
/// assert_eq!(px_to_emu(96.0), 609_600);
/// ```
#[inline]
pub fn px_to_emu(px: f64) -> i64 {
    inches_to_emu(px_to_inches(px))
}

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64) as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64) as i64
}

/// Font sizes are stored in hundredths of a point (`sz="1800"` for 18pt).
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_dimensions() {
        // 1920x1080 at 144 DPI is the 13.333in x 7.5in widescreen slide
        assert_eq!(px_to_emu(1920.0), 12_192_000);
        assert_eq!(px_to_emu(1080.0), 6_858_000);
    }

    #[test]
    fn test_round_trip_inches() {
        let emu = inches_to_emu(2.5);
        assert_eq!(emu, 2_286_000);
        assert!((emu_to_inches(emu) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_points() {
        assert_eq!(pt_to_emu(1.5), 19_050);
        assert_eq!(pt_to_centipoints(18.0), 1800);
        assert_eq!(pt_to_centipoints(10.5), 1050);
    }

    #[test]
    fn test_negative_indent() {
        assert_eq!(px_to_emu(-30.0), -190_500);
    }
}
