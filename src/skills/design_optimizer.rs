//! Named color schemes and contrast correction.
use crate::common::RGBColor;
use crate::model::PresentationRequest;

/// A flat five-color scheme for the classic template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: &'static str,
    pub primary: RGBColor,
    pub secondary: RGBColor,
    pub background: RGBColor,
    pub text: RGBColor,
    pub accent: RGBColor,
}

const fn scheme(
    name: &'static str,
    primary: u32,
    secondary: u32,
    background: u32,
    text: u32,
    accent: u32,
) -> ColorScheme {
    const fn rgb(v: u32) -> RGBColor {
        RGBColor::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
    ColorScheme {
        name,
        primary: rgb(primary),
        secondary: rgb(secondary),
        background: rgb(background),
        text: rgb(text),
        accent: rgb(accent),
    }
}

pub const DEFAULT_SCHEME: &str = "corporate_blue";

pub const COLOR_SCHEMES: [ColorScheme; 8] = [
    scheme("corporate_blue", 0x1F4788, 0x2E7D32, 0xFFFFFF, 0x333333, 0xFF6B35),
    scheme("modern_tech", 0x2C3E50, 0x3498DB, 0xFFFFFF, 0x2C3E50, 0xE74C3C),
    scheme("vibrant_creative", 0x9B59B6, 0xF39C12, 0xFFFFFF, 0x34495E, 0x1ABC9C),
    scheme("minimalist_gray", 0x455A64, 0x78909C, 0xFAFAFA, 0x263238, 0xFF7043),
    scheme("earth_tones", 0x5D4037, 0x8D6E63, 0xFFF8E1, 0x3E2723, 0x43A047),
    scheme("ocean_blue", 0x006064, 0x0097A7, 0xE0F7FA, 0x004D40, 0xFF6F00),
    scheme("sunset", 0xBF360C, 0xF4511E, 0xFFF3E0, 0x3E2723, 0xFFB300),
    scheme("professional_green", 0x1B5E20, 0x388E3C, 0xFFFFFF, 0x263238, 0xFBC02D),
];

/// Topic keywords, checked in order; the first group with a hit wins.
const TOPIC_KEYWORDS: [(&[&str], &str); 5] = [
    (&["tech", "ai", "digital", "software", "innovation"], "modern_tech"),
    (&["business", "finance", "corporate", "strategy"], "corporate_blue"),
    (
        &["environment", "sustainability", "green", "eco", "nature"],
        "professional_green",
    ),
    (&["creative", "design", "art", "marketing"], "vibrant_creative"),
    (&["education", "research", "academic", "science"], "minimalist_gray"),
];

/// WCAG AA minimum for body text.
pub const MIN_CONTRAST_RATIO: f64 = 4.5;

pub fn available_schemes() -> Vec<&'static str> {
    COLOR_SCHEMES.iter().map(|s| s.name).collect()
}

/// Colors of `name`, or of `corporate_blue` when the name is unknown.
pub fn scheme_colors(name: &str) -> &'static ColorScheme {
    COLOR_SCHEMES
        .iter()
        .find(|s| s.name == name)
        .unwrap_or(&COLOR_SCHEMES[0])
}

/// Pick a scheme from keywords in the topic.
///
/// Keywords match as substrings of the lowercased topic.
///
/// # Examples
///
/// ```
/// use deckwright::skills::design_optimizer::suggest_color_scheme;
///
/// assert_eq!(suggest_color_scheme("Cloud Software Roadmap"), "modern_tech");
/// assert_eq!(suggest_color_scheme("Quarterly Strategy"), "corporate_blue");
/// assert_eq!(suggest_color_scheme("Forest Habitats"), "corporate_blue");
/// ```
pub fn suggest_color_scheme(topic: &str) -> &'static str {
    let topic = topic.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| topic.contains(w)))
        .map_or(DEFAULT_SCHEME, |&(_, scheme)| scheme)
}

/// Replace `text` with black or white when it fails the AA contrast ratio
/// against `background`.
pub fn optimize_contrast(background: RGBColor, text: RGBColor) -> (RGBColor, RGBColor) {
    if background.contrast_ratio(&text) >= MIN_CONTRAST_RATIO {
        return (background, text);
    }
    let text = if background.relative_luminance() > 0.5 {
        RGBColor::BLACK
    } else {
        RGBColor::WHITE
    };
    (background, text)
}

/// Attach a scheme to the request, resolving unknown names to the default.
pub fn apply_color_scheme(mut request: PresentationRequest, name: &str) -> PresentationRequest {
    request.color_scheme = Some(scheme_colors(name).name.to_string());
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemes() {
        assert_eq!(available_schemes().len(), 8);
        let ocean = scheme_colors("ocean_blue");
        assert_eq!(ocean.background.to_hex(), "E0F7FA");
        assert_eq!(ocean.accent.to_hex(), "FF6F00");
        assert_eq!(scheme_colors("neon").name, "corporate_blue");
        assert_eq!(scheme_colors("neon").primary.to_hex(), "1F4788");
    }

    #[test]
    fn test_suggestions_follow_group_order() {
        assert_eq!(suggest_color_scheme("Green Finance"), "corporate_blue");
        assert_eq!(suggest_color_scheme("Eco Packaging"), "professional_green");
        assert_eq!(suggest_color_scheme("Brand Marketing"), "vibrant_creative");
        assert_eq!(suggest_color_scheme("Academic Writing"), "minimalist_gray");
        // Substring match: "ai" inside "maintenance"
        assert_eq!(suggest_color_scheme("Fleet Maintenance"), "modern_tech");
    }

    #[test]
    fn test_optimize_contrast() {
        let white = RGBColor::WHITE;
        let pale = RGBColor::new(0xEE, 0xEE, 0xEE);
        assert_eq!(optimize_contrast(white, pale), (white, RGBColor::BLACK));

        let navy = RGBColor::new(0x1F, 0x47, 0x88);
        assert_eq!(
            optimize_contrast(navy, RGBColor::new(0x33, 0x33, 0x33)),
            (navy, RGBColor::WHITE)
        );

        let dark = RGBColor::new(0x33, 0x33, 0x33);
        assert_eq!(optimize_contrast(white, dark), (white, dark));
    }

    #[test]
    fn test_apply_color_scheme() {
        let request = apply_color_scheme(PresentationRequest::new("Deck"), "sunset");
        assert_eq!(request.color_scheme.as_deref(), Some("sunset"));
        let request = apply_color_scheme(request, "unknown");
        assert_eq!(request.color_scheme.as_deref(), Some("corporate_blue"));
    }
}
