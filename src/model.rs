//! Slide content model.
//!
//! These are the structured records passed from content producers (users, the
//! content generator, the analyzer) to the slide generators. They round-trip
//! through JSON; optional fields are omitted when unset.
use crate::annotate::Placement;
use crate::common::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Fundamental purpose of a slide. Layout is chosen from the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideType {
    Title,
    /// Universal content slide; also accepts the legacy layout names
    #[default]
    #[serde(
        alias = "title_content",
        alias = "two_column",
        alias = "bullet_points",
        alias = "image_caption"
    )]
    StandardContent,
    SectionHeader,
    Quote,
    ThankYou,
    Blank,
}

/// Content of a single slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideContent {
    pub slide_type: SlideType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_author: Option<String>,
    /// Speaker notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Source attribution for the footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// One-sentence insight boxed over the chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_takeaway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
}

impl SlideContent {
    pub fn new(slide_type: SlideType) -> Self {
        Self {
            slide_type,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullet_points = Some(bullets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_chart(mut self, chart: ChartData) -> Self {
        self.chart_data = Some(chart);
        self
    }

    /// Bullets if any are present, otherwise the body text as a single bullet.
    pub fn bullets_or_content(&self) -> Vec<String> {
        match &self.bullet_points {
            Some(bullets) if !bullets.is_empty() => bullets.clone(),
            _ => self.content.iter().filter(|c| !c.is_empty()).cloned().collect(),
        }
    }
}

/// Chart family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Waterfall,
    Matrix,
    /// Clustered column; unknown kinds render as columns
    #[default]
    #[serde(other)]
    Column,
}

/// Column kind in a waterfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterfallStep {
    Start,
    Increase,
    End,
    /// Unknown step names are drawn as decreases
    #[serde(other)]
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    #[serde(default = "default_series_name")]
    pub name: String,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// One bubble of a growth-share matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    #[serde(default = "default_bubble_label")]
    pub label: String,
    #[serde(default = "default_one")]
    pub x: f64,
    #[serde(default = "default_one")]
    pub y: f64,
    #[serde(default = "default_bubble_size")]
    pub size: f64,
}

/// Chart description attached to a slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column and waterfall categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesData>>,
    /// Waterfall values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f64>,
    /// Waterfall step kinds, parallel to `values`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<WaterfallStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bubbles: Vec<Bubble>,
    /// Series to highlight; defaults to the last one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_index: Option<usize>,
    /// `"comparison"` colors every series from the sequential palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    /// Source line drawn under the chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl ChartData {
    pub fn column(categories: Vec<String>, series: Vec<SeriesData>) -> Self {
        Self {
            kind: ChartKind::Column,
            categories: Some(categories),
            series: Some(series),
            ..Default::default()
        }
    }

    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_comparison(&self) -> bool {
        self.color_mode.as_deref() == Some("comparison")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderDirection {
    #[default]
    Up,
    Down,
    Right,
    /// Unknown directions point left
    #[serde(other)]
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutPosition {
    #[default]
    Above,
    Below,
    Right,
    /// Unknown positions place the box to the left
    #[serde(other)]
    Left,
}

/// Chart overlay, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// Curved arrow over the bars from one category to another
    CagrArrow {
        #[serde(default)]
        series_index: usize,
        #[serde(default)]
        from_category: i64,
        /// Negative values count from the last category
        #[serde(default = "default_last_category")]
        to_category: i64,
        #[serde(default = "default_cagr_label")]
        label: String,
    },
    /// Dashed vertical line between two bar tops
    DifferenceLine {
        #[serde(default)]
        series_index: usize,
        #[serde(default)]
        from_category: i64,
        #[serde(default = "default_one_category")]
        to_category: i64,
        #[serde(default = "default_delta_label")]
        label: String,
        /// Settled line and label coordinates; the local gutter rules apply
        /// when unset
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placement: Option<Placement>,
    },
    /// Thin line from a data point to a text label
    LeaderLine {
        #[serde(default = "default_half")]
        x: f64,
        #[serde(default = "default_half")]
        y: f64,
        #[serde(default)]
        text: String,
        #[serde(default)]
        direction: LeaderDirection,
        /// Line length in px
        #[serde(default = "default_line_length")]
        line_length: f64,
    },
    /// Small note box near a data point
    Callout {
        #[serde(default = "default_half")]
        x: f64,
        #[serde(default = "default_half")]
        y: f64,
        #[serde(default)]
        text: String,
        #[serde(default)]
        position: CalloutPosition,
    },
    /// Any annotation type this crate does not draw
    #[serde(other)]
    Unsupported,
}

fn default_series_name() -> String {
    "Data".to_string()
}

fn default_bubble_label() -> String {
    "Item".to_string()
}

fn default_one() -> f64 {
    1.0
}

fn default_half() -> f64 {
    0.5
}

fn default_bubble_size() -> f64 {
    50.0
}

fn default_last_category() -> i64 {
    -1
}

fn default_one_category() -> i64 {
    1
}

/// Label of a CAGR arrow that was given none.
pub const DEFAULT_CAGR_LABEL: &str = "CAGR";
/// Label of a difference line that was given none.
pub const DEFAULT_DELTA_LABEL: &str = "Delta";

fn default_cagr_label() -> String {
    DEFAULT_CAGR_LABEL.to_string()
}

fn default_delta_label() -> String {
    DEFAULT_DELTA_LABEL.to_string()
}

fn default_line_length() -> f64 {
    40.0
}

fn default_output_path() -> String {
    "presentation.pptx".to_string()
}

fn default_template() -> String {
    "main".to_string()
}

/// Request for creating a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationRequest {
    /// Main topic, used as the title-slide heading
    pub topic: String,
    #[serde(default)]
    pub slides: Vec<SlideContent>,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Named color scheme for the classic template; the main template
    /// carries its own palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
}

impl PresentationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            slides: Vec::new(),
            output_path: default_output_path(),
            template: default_template(),
            author: None,
            company: None,
            color_scheme: None,
        }
    }

    pub fn with_slides(mut self, slides: Vec<SlideContent>) -> Self {
        self.slides = slides;
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(default)]
    pub slide_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl GenerationResult {
    pub fn succeeded(output_path: impl Into<String>, slide_count: usize) -> Self {
        Self {
            success: true,
            output_path: Some(output_path.into()),
            slide_count,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>, output_path: Option<String>) -> Self {
        Self {
            success: false,
            output_path,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_slide_types() {
        for name in ["title_content", "two_column", "bullet_points", "image_caption"] {
            let ty: SlideType = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(ty, SlideType::StandardContent);
        }
        let ty: SlideType = serde_json::from_str("\"thank_you\"").unwrap();
        assert_eq!(ty, SlideType::ThankYou);
    }

    #[test]
    fn test_annotation_defaults() {
        let json = r#"[
            {"type": "cagr_arrow"},
            {"type": "difference_line", "from_category": 2, "to_category": 3},
            {"type": "leader_line", "text": "Peak", "direction": "sideways"},
            {"type": "callout", "position": "below"},
            {"type": "sparkle"}
        ]"#;
        let annotations: Vec<Annotation> = serde_json::from_str(json).unwrap();

        assert_eq!(
            annotations[0],
            Annotation::CagrArrow {
                series_index: 0,
                from_category: 0,
                to_category: -1,
                label: "CAGR".to_string(),
            }
        );
        assert!(matches!(
            &annotations[1],
            Annotation::DifferenceLine { from_category: 2, to_category: 3, label, placement: None, .. }
                if label == "Delta"
        ));
        assert!(matches!(
            &annotations[2],
            Annotation::LeaderLine { direction: LeaderDirection::Left, line_length, .. } if *line_length == 40.0
        ));
        assert!(matches!(
            &annotations[3],
            Annotation::Callout { position: CalloutPosition::Below, x, .. } if *x == 0.5
        ));
        assert_eq!(annotations[4], Annotation::Unsupported);
    }

    #[test]
    fn test_chart_data_parsing() {
        let json = r#"{
            "type": "waterfall",
            "categories": ["Start", "Cost", "End"],
            "values": [100, -20, 80],
            "types": ["start", "decrease", "end"],
            "color_mode": "comparison"
        }"#;
        let chart: ChartData = serde_json::from_str(json).unwrap();
        assert_eq!(chart.kind, ChartKind::Waterfall);
        assert_eq!(chart.values, vec![100.0, -20.0, 80.0]);
        assert_eq!(chart.types[1], WaterfallStep::Decrease);
        assert!(chart.is_comparison());
        assert!(!chart.has_title());

        let unknown: ChartData = serde_json::from_str(r#"{"type": "pie"}"#).unwrap();
        assert_eq!(unknown.kind, ChartKind::Column);
    }

    #[test]
    fn test_request_defaults_and_file_round_trip() {
        let request: PresentationRequest =
            serde_json::from_str(r#"{"topic": "Retail", "slides": [{"slide_type": "blank"}]}"#)
                .unwrap();
        assert_eq!(request.output_path, "presentation.pptx");
        assert_eq!(request.template, "main");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        request.save(&path).unwrap();
        assert_eq!(PresentationRequest::load(&path).unwrap(), request);
    }

    #[test]
    fn test_bullets_or_content() {
        let slide = SlideContent::new(SlideType::StandardContent).with_content("Only text");
        assert_eq!(slide.bullets_or_content(), vec!["Only text".to_string()]);

        let slide = slide.with_bullets(["a", "b"]);
        assert_eq!(slide.bullets_or_content().len(), 2);

        assert!(SlideContent::default().bullets_or_content().is_empty());
        assert!(SlideContent::default().with_content("").bullets_or_content().is_empty());
    }
}
