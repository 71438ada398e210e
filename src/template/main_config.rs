//! The "Main" template (v2.0).
//!
//! A 1920x1080 px canvas rendered at 144 DPI, so one pixel is 1/144 inch.
//! All geometry here is in those pixels; convert with [`PxRect::to_bounds`]
//! or [`crate::common::unit::px_to_emu`] at the point of writing.
use crate::common::RGBColor;
use crate::common::error::{Error, Result};
use crate::common::unit::px_to_emu;
use crate::ooxml::drawing::{FontStyle, LineStyle};
use crate::ooxml::pptx::Bounds;
use phf::phf_map;

pub const TEMPLATE_NAME: &str = "Main";
pub const TEMPLATE_VERSION: &str = "2.0";

// ============================================================================
// Grid system
// ============================================================================

pub const CANVAS_WIDTH_PX: f64 = 1920.0;
pub const CANVAS_HEIGHT_PX: f64 = 1080.0;
pub const ASPECT_RATIO: &str = "16:9";

/// An axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PxRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PxRect {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Shape bounds in EMUs.
    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(
            px_to_emu(self.x1),
            px_to_emu(self.y1),
            px_to_emu(self.width()),
            px_to_emu(self.height()),
        )
    }

    pub fn contains(&self, other: &PxRect) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }
}

/// 5% margins: 96 px left/right, 54 px top/bottom.
pub const SAFE_ZONE: PxRect = PxRect::new(96.0, 54.0, 1824.0, 1026.0);

/// A named vertical band of the safe zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub bounds: PxRect,
    pub purpose: &'static str,
}

pub const TITLE_REGION: Region = Region {
    name: "Title Area",
    bounds: PxRect::new(96.0, 54.0, 1824.0, 134.0),
    purpose: "Exclusively for the main slide title",
};

pub const CONTENT_REGION: Region = Region {
    name: "Content Area",
    bounds: PxRect::new(96.0, 154.0, 1824.0, 956.0),
    purpose: "Main area for charts, text blocks, and visual elements",
};

pub const FOOTER_REGION: Region = Region {
    name: "Footer Area",
    bounds: PxRect::new(96.0, 972.0, 1824.0, 1026.0),
    purpose: "Source attribution and slide numbers",
};

static REGIONS: phf::Map<&'static str, Region> = phf_map! {
    "title" => TITLE_REGION,
    "content" => CONTENT_REGION,
    "footer" => FOOTER_REGION,
};

/// Look up a region by key (`title`, `content`, `footer`).
pub fn region(name: &str) -> Option<&'static Region> {
    REGIONS.get(name)
}

pub const GUTTER_TITLE_TO_CONTENT_PX: f64 = 20.0;
pub const GUTTER_CONTENT_TO_FOOTER_PX: f64 = 16.0;
pub const GUTTER_HORIZONTAL_PX: f64 = 60.0;
pub const GUTTER_VERTICAL_PX: f64 = 30.0;

// ============================================================================
// Typography
// ============================================================================

pub const FONT_PRIMARY: &str = "Arial";
pub const FONT_FALLBACKS: [&str; 2] = ["Helvetica", "Sans-serif"];

/// One level of the typographic scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub name: &'static str,
    pub size_pt: f64,
    pub bold: bool,
    pub color: RGBColor,
    pub min_size_pt: Option<f64>,
    pub line_spacing: Option<f64>,
}

impl Typography {
    /// Run font for this level in the primary typeface.
    pub fn font(&self) -> FontStyle {
        FontStyle::new(FONT_PRIMARY, self.size_pt, self.color).bold(self.bold)
    }
}

pub const T1: Typography = Typography {
    name: "Slide Title",
    size_pt: 32.0,
    bold: true,
    color: colors::PRIMARY_GREEN,
    min_size_pt: Some(24.0),
    line_spacing: None,
};

pub const T2: Typography = Typography {
    name: "Subtitle / Chart Title",
    size_pt: 20.0,
    bold: true,
    color: colors::BODY_TEXT,
    min_size_pt: None,
    line_spacing: None,
};

pub const T3: Typography = Typography {
    name: "Body Text / Bullets",
    size_pt: 18.0,
    bold: false,
    color: colors::BODY_TEXT,
    min_size_pt: None,
    line_spacing: Some(1.5),
};

pub const T4: Typography = Typography {
    name: "Chart Labels",
    size_pt: 12.0,
    bold: false,
    color: colors::BODY_TEXT,
    min_size_pt: Some(10.0),
    line_spacing: None,
};

pub const T4_5: Typography = Typography {
    name: "Chart Axis / Legend",
    size_pt: 9.0,
    bold: false,
    color: colors::AXIS_GREY,
    min_size_pt: None,
    line_spacing: None,
};

pub const T5: Typography = Typography {
    name: "Footnotes / Source",
    size_pt: 9.0,
    bold: false,
    color: colors::AXIS_GREY,
    min_size_pt: None,
    line_spacing: None,
};

pub const TITLE_SLIDE_MAIN: Typography = Typography {
    name: "Title Slide",
    size_pt: 60.0,
    bold: true,
    color: colors::WHITE,
    min_size_pt: None,
    line_spacing: None,
};

pub const TITLE_SLIDE_SUBTITLE: Typography = Typography {
    name: "Title Slide Subtitle",
    size_pt: 24.0,
    bold: false,
    color: colors::WHITE,
    min_size_pt: None,
    line_spacing: None,
};

/// Gap between the title-slide title and its subtitle.
pub const TITLE_SUBTITLE_SPACING_PX: f64 = 40.0;

pub const SECTION_DIVIDER_TITLE: Typography = Typography {
    name: "Section Divider",
    size_pt: 44.0,
    bold: true,
    color: colors::WHITE,
    min_size_pt: None,
    line_spacing: None,
};

static TYPOGRAPHY: phf::Map<&'static str, Typography> = phf_map! {
    "T1" => T1,
    "T2" => T2,
    "T3" => T3,
    "T4" => T4,
    "T4.5" => T4_5,
    "T5" => T5,
};

/// Look up a typography level by its key (`T1` .. `T5`).
pub fn typography(level: &str) -> Option<&'static Typography> {
    TYPOGRAPHY.get(level)
}

// ============================================================================
// Color palette
// ============================================================================

pub mod colors {
    use crate::common::RGBColor;

    pub const PRIMARY_GREEN: RGBColor = RGBColor::new(0x14, 0x7B, 0x58);
    pub const ACCENT_BLUE: RGBColor = RGBColor::new(0x00, 0x5E, 0xB8);
    pub const ACCENT_YELLOW: RGBColor = RGBColor::new(0xF3, 0xC1, 0x3A);
    pub const NEGATIVE_RED: RGBColor = RGBColor::new(0xE6, 0x51, 0x66);

    pub const BODY_TEXT: RGBColor = RGBColor::new(0x4A, 0x4A, 0x4A);
    pub const AXIS_GREY: RGBColor = RGBColor::new(0xA9, 0xA9, 0xA9);
    pub const LIGHT_GREY: RGBColor = RGBColor::new(0xD3, 0xD3, 0xD3);
    pub const GRIDLINE: RGBColor = RGBColor::new(0xE0, 0xE0, 0xE0);
    pub const WHITE: RGBColor = RGBColor::WHITE;
    pub const LIGHT_GRAY_BG: RGBColor = RGBColor::new(0xF5, 0xF5, 0xF5);
    /// Callout note fill
    pub const NOTE_YELLOW: RGBColor = RGBColor::new(0xFF, 0xFF, 0xE0);

    /// Multi-series palette, darkest first.
    pub const SEQUENTIAL: [RGBColor; 4] = [
        RGBColor::new(0x02, 0x56, 0x45),
        RGBColor::new(0x51, 0x7B, 0x70),
        RGBColor::new(0x51, 0xA3, 0xA3),
        RGBColor::new(0xA2, 0xDA, 0xD9),
    ];
}

/// Semantic role of a data element in the story-driven color engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryRole {
    /// Supporting data, drawn in light grey
    Default,
    /// The single point the slide is about
    Highlight,
    /// Equally important series, indexed into the sequential palette
    Comparison(usize),
}

impl StoryRole {
    pub fn color(&self) -> RGBColor {
        match self {
            StoryRole::Default => colors::LIGHT_GREY,
            StoryRole::Highlight => colors::PRIMARY_GREEN,
            StoryRole::Comparison(idx) => colors::SEQUENTIAL[idx % colors::SEQUENTIAL.len()],
        }
    }
}

// ============================================================================
// Layout distribution
// ============================================================================

/// Single centred component: at most 80% of the content area.
pub const SINGLE_COMPONENT_MAX_SCALE: f64 = 0.80;
pub const SINGLE_COMPONENT_MAX_WIDTH_PX: f64 = 1382.0;
pub const SINGLE_COMPONENT_MAX_HEIGHT_PX: f64 = 642.0;

pub const SIDE_BY_SIDE_LEFT: PxRect = PxRect::new(96.0, 154.0, 906.0, 956.0);
pub const SIDE_BY_SIDE_RIGHT: PxRect = PxRect::new(966.0, 154.0, 1824.0, 956.0);
pub const SIDE_BY_SIDE_MAX_SCALE: f64 = 0.95;

pub const TOP_BOTTOM_TOP: PxRect = PxRect::new(96.0, 154.0, 1824.0, 540.0);
pub const TOP_BOTTOM_BOTTOM: PxRect = PxRect::new(96.0, 570.0, 1824.0, 956.0);

pub const CHART_INSIGHT_CHART: PxRect = PxRect::new(96.0, 154.0, 834.0, 956.0);
pub const CHART_INSIGHT_TEXT: PxRect = PxRect::new(894.0, 154.0, 1824.0, 956.0);
pub const CHART_INSIGHT_GUTTER_PX: f64 = 60.0;

pub const TWO_COLUMN_LEFT: PxRect = PxRect::new(96.0, 154.0, 920.0, 956.0);
pub const TWO_COLUMN_RIGHT: PxRect = PxRect::new(1000.0, 154.0, 1824.0, 956.0);
pub const TWO_COLUMN_GUTTER_PX: f64 = 120.0;

/// Check the gutter invariants of the split layouts.
///
/// The chart+insight text column must start exactly one gutter after the
/// chart column ends.
pub fn check_layout_invariants() -> Result<()> {
    let checks = [
        (
            "chart_plus_insight",
            CHART_INSIGHT_CHART.x2 + CHART_INSIGHT_GUTTER_PX,
            CHART_INSIGHT_TEXT.x1,
        ),
        (
            "two_components_side_by_side",
            SIDE_BY_SIDE_LEFT.x2 + GUTTER_HORIZONTAL_PX,
            SIDE_BY_SIDE_RIGHT.x1,
        ),
        (
            "two_components_top_bottom",
            TOP_BOTTOM_TOP.y2 + GUTTER_VERTICAL_PX,
            TOP_BOTTOM_BOTTOM.y1,
        ),
    ];
    for (layout, expected, actual) in checks {
        if (expected - actual).abs() > f64::EPSILON {
            return Err(Error::Validation(format!(
                "{} gutter violated: second area starts at {}px, expected {}px",
                layout, actual, expected
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Component specifications
// ============================================================================

/// Column chart styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnChartSpec {
    pub x_axis_line: LineStyle,
    pub gridline: LineStyle,
    pub default_bar: RGBColor,
    pub highlight_bar: RGBColor,
    pub gap_width: u32,
    pub data_label_format: &'static str,
}

pub const COLUMN_CHART: ColumnChartSpec = ColumnChartSpec {
    x_axis_line: LineStyle {
        color: colors::AXIS_GREY,
        width_pt: 1.5,
        dash: None,
    },
    gridline: LineStyle {
        color: colors::GRIDLINE,
        width_pt: 1.0,
        dash: None,
    },
    default_bar: colors::LIGHT_GREY,
    highlight_bar: colors::PRIMARY_GREEN,
    gap_width: 50,
    data_label_format: "#,##0",
};

/// Growth-share matrix styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixChartSpec {
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub axis_line: LineStyle,
    pub bubble_border: LineStyle,
    /// Quadrant names: top-left, top-right, bottom-left, bottom-right
    pub quadrants: [&'static str; 4],
    pub bubble_min_px: f64,
    pub bubble_max_px: f64,
}

pub const MATRIX_CHART: MatrixChartSpec = MatrixChartSpec {
    x_axis_title: "Relative Market Share",
    y_axis_title: "Market Growth",
    axis_line: LineStyle {
        color: colors::AXIS_GREY,
        width_pt: 1.5,
        dash: None,
    },
    bubble_border: LineStyle {
        color: colors::BODY_TEXT,
        width_pt: 1.0,
        dash: None,
    },
    quadrants: ["Stars", "Question Marks", "Cash Cows", "Dogs"],
    bubble_min_px: 20.0,
    bubble_max_px: 150.0,
};

/// Waterfall styling. Increases are configured green here; the renderer
/// draws them in accent blue so they read apart from the totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterfallChartSpec {
    pub start_end: RGBColor,
    pub increase: RGBColor,
    pub decrease: RGBColor,
    pub connector: LineStyle,
}

pub const WATERFALL_CHART: WaterfallChartSpec = WaterfallChartSpec {
    start_end: colors::PRIMARY_GREEN,
    increase: colors::PRIMARY_GREEN,
    decrease: colors::NEGATIVE_RED,
    connector: LineStyle {
        color: colors::AXIS_GREY,
        width_pt: 1.0,
        dash: Some(crate::ooxml::drawing::DashStyle::Dash),
    },
};

/// Bulleted list styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletListSpec {
    pub bullet_char: char,
    pub bullet_color: RGBColor,
    /// Left indent per level, in px
    pub indents_px: [f64; 3],
    pub hanging_indent: bool,
    pub typography: Typography,
}

pub const BULLET_LIST: BulletListSpec = BulletListSpec {
    bullet_char: '\u{2022}',
    bullet_color: colors::PRIMARY_GREEN,
    indents_px: [0.0, 30.0, 60.0],
    hanging_indent: true,
    typography: T3,
};

/// Highlighted insight box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutBoxSpec {
    pub fill: RGBColor,
    pub border: LineStyle,
    pub padding_px: f64,
    /// Maximum width as a share of the content area
    pub max_width: f64,
}

pub const CALLOUT_BOX: CalloutBoxSpec = CalloutBoxSpec {
    fill: colors::LIGHT_GRAY_BG,
    border: LineStyle {
        color: colors::PRIMARY_GREEN,
        width_pt: 2.0,
        dash: None,
    },
    padding_px: 20.0,
    max_width: 0.90,
};

// ============================================================================
// Slide blueprints
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideBlueprint {
    TitleSlide,
    SectionDivider,
    ContentChartInsight,
    ContentSingleChart,
    ContentBullets,
}

impl SlideBlueprint {
    pub const ALL: [SlideBlueprint; 5] = [
        SlideBlueprint::TitleSlide,
        SlideBlueprint::SectionDivider,
        SlideBlueprint::ContentChartInsight,
        SlideBlueprint::ContentSingleChart,
        SlideBlueprint::ContentBullets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SlideBlueprint::TitleSlide => "title_slide",
            SlideBlueprint::SectionDivider => "section_divider",
            SlideBlueprint::ContentChartInsight => "content_chart_insight",
            SlideBlueprint::ContentSingleChart => "content_single_chart",
            SlideBlueprint::ContentBullets => "content_bullets",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Full-bleed background, if the blueprint has one.
    pub fn background(&self) -> Option<RGBColor> {
        match self {
            SlideBlueprint::TitleSlide | SlideBlueprint::SectionDivider => {
                Some(colors::PRIMARY_GREEN)
            },
            _ => None,
        }
    }
}

/// Section divider title box.
pub const SECTION_TITLE_BOX: PxRect = PxRect::new(96.0, 486.0, 1824.0, 594.0);

// ============================================================================
// Rendering rules
// ============================================================================

/// Components that overflow shrink in steps of this size.
pub const SCALE_STEP: f64 = 0.05;
pub const MIN_COMPONENT_PADDING_PX: f64 = 20.0;
pub const BULLET_INDENT_PX: f64 = 30.0;

/// Largest scale, reduced from `max_scale` in [`SCALE_STEP`] decrements, at
/// which a `width` x `height` component fits inside `area`.
///
/// Returns `None` if it does not fit even at the smallest step.
pub fn scale_to_fit(width: f64, height: f64, area: &PxRect, max_scale: f64) -> Option<f64> {
    let mut steps = (max_scale / SCALE_STEP).round() as i64;
    while steps > 0 {
        let scale = steps as f64 * SCALE_STEP;
        if width * scale <= area.width() && height * scale <= area.height() {
            return Some(scale);
        }
        steps -= 1;
    }
    None
}

/// Whether an element lies within the safe zone.
///
/// The top-left corner must be inside (inclusive). When both `width` and
/// `height` are positive the bottom-right corner is checked as well.
pub fn validate_bounds(x: f64, y: f64, width: f64, height: f64) -> bool {
    let start_inside =
        (SAFE_ZONE.x1..=SAFE_ZONE.x2).contains(&x) && (SAFE_ZONE.y1..=SAFE_ZONE.y2).contains(&y);
    if width > 0.0 && height > 0.0 {
        start_inside && x + width <= SAFE_ZONE.x2 && y + height <= SAFE_ZONE.y2
    } else {
        start_inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_stack_with_gutters() {
        assert_eq!(
            TITLE_REGION.bounds.y2 + GUTTER_TITLE_TO_CONTENT_PX,
            CONTENT_REGION.bounds.y1
        );
        assert_eq!(
            CONTENT_REGION.bounds.y2 + GUTTER_CONTENT_TO_FOOTER_PX,
            FOOTER_REGION.bounds.y1
        );
        assert_eq!(CONTENT_REGION.bounds.height(), 802.0);
        for key in ["title", "content", "footer"] {
            assert!(SAFE_ZONE.contains(&region(key).unwrap().bounds));
        }
    }

    #[test]
    fn test_layout_invariants_hold() {
        assert!(check_layout_invariants().is_ok());
        assert_eq!(CHART_INSIGHT_CHART.width(), 738.0);
        assert_eq!(CHART_INSIGHT_TEXT.width(), 930.0);
    }

    #[test]
    fn test_typography_lookup() {
        let t1 = typography("T1").unwrap();
        assert_eq!(t1.size_pt, 32.0);
        assert!(t1.bold);
        assert_eq!(t1.color.to_hex(), "147B58");
        assert_eq!(typography("T4.5").unwrap().color, colors::AXIS_GREY);
        assert!(typography("T9").is_none());
    }

    #[test]
    fn test_story_roles() {
        assert_eq!(StoryRole::Default.color().to_hex(), "D3D3D3");
        assert_eq!(StoryRole::Highlight.color().to_hex(), "147B58");
        assert_eq!(StoryRole::Comparison(5).color(), colors::SEQUENTIAL[1]);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(96.0, 54.0, 0.0, 0.0));
        assert!(validate_bounds(96.0, 154.0, 1728.0, 802.0));
        assert!(!validate_bounds(95.0, 154.0, 10.0, 10.0));
        assert!(!validate_bounds(1800.0, 154.0, 100.0, 10.0));
        // Only the origin is checked without a full size
        assert!(validate_bounds(1800.0, 154.0, 100.0, 0.0));
    }

    #[test]
    fn test_scale_to_fit_steps_down() {
        let area = CHART_INSIGHT_CHART;
        assert_eq!(scale_to_fit(400.0, 60.0, &area, 1.0), Some(1.0));
        let scale = scale_to_fit(1000.0, 100.0, &area, 1.0).unwrap();
        assert!((scale - 0.70).abs() < 1e-9);
        assert_eq!(scale_to_fit(1.0e6, 1.0, &area, 1.0), None);
    }

    #[test]
    fn test_blueprints() {
        assert_eq!(
            SlideBlueprint::from_name("section_divider"),
            Some(SlideBlueprint::SectionDivider)
        );
        assert_eq!(
            SlideBlueprint::TitleSlide.background(),
            Some(colors::PRIMARY_GREEN)
        );
        assert!(SlideBlueprint::ContentBullets.background().is_none());
        assert_eq!(SECTION_TITLE_BOX.width(), 1728.0);
        assert_eq!(SECTION_TITLE_BOX.height(), 108.0);
    }
}
