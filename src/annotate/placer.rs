//! Difference-line placement between two bars.
//!
//! The local rules and the model-backed variant produce the same
//! [`Placement`]; the model is only asked when a provider is configured, and
//! any failure falls back to the local rules.
use crate::layout::BarEdges;
use crate::llm::{CompletionRequest, LlmError, LlmProvider, json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Horizontal gap between the line and its label, in px.
pub const LABEL_PADDING_PX: f64 = 10.0;
/// Label width assumed when rendering, in px: the one-inch label box.
pub const LABEL_WIDTH_ESTIMATE_PX: f64 = 144.0;
/// Label width the model-backed placer and its fallback assume, in px.
pub const PLACER_LABEL_WIDTH_PX: f64 = 100.0;

const PLACEMENT_MAX_TOKENS: u32 = 1024;

pub const VISUAL_DESIGN_SYSTEM_PROMPT: &str = "\
You are a Visual Design AI specialized in placing chart annotations.
You receive chart geometry as JSON and return precise coordinates for annotations.

Rules for difference line annotations:

1. GUTTER: line.position_x is the midpoint between bar1.right_edge_x and bar2.left_edge_x.
2. LINE HEIGHT: line.start_y and line.end_y equal the top_edge_y of bar1 and bar2.
3. LABEL:
   - label.vertical_center_y is the midpoint of line.start_y and line.end_y
   - label.position_x is 10 pixels right of the line by default
4. COLLISION AVOIDANCE:
   - Estimate the label width as 100 pixels
   - If label.position_x + 100 > bar2.left_edge_x the label collides with bar2
   - On collision set placement_side to \"left\" and put the label 10 pixels left of the line

Respond with valid JSON only: {\"line\": {\"type\", \"color\", \"start_y\", \"end_y\", \"position_x\"},
\"label\": {\"text\", \"position_x\", \"vertical_center_y\", \"placement_side\"}}.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementLine {
    #[serde(rename = "type")]
    pub style: String,
    pub color: String,
    pub start_y: f64,
    pub end_y: f64,
    pub position_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementLabel {
    pub text: String,
    pub position_x: f64,
    pub vertical_center_y: f64,
    pub placement_side: PlacementSide,
}

/// Line and label coordinates of a difference line, in px.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub line: PlacementLine,
    pub label: PlacementLabel,
}

/// Geometry handed to the placement model.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct PlacementInput<'a> {
    chart_type: &'static str,
    annotation_type: &'static str,
    bar1: BarEdges,
    bar2: BarEdges,
    label_text: &'a str,
}

/// Place a difference line with the local gutter rules and the rendered
/// label width.
///
/// The line stands in the gutter between the bars and spans their tops. The
/// label sits to the right of the line unless it would run into `bar2`.
pub fn place_difference_line(bar1: &BarEdges, bar2: &BarEdges, label_text: &str) -> Placement {
    place_with_label_width(bar1, bar2, label_text, LABEL_WIDTH_ESTIMATE_PX)
}

/// [`place_difference_line`] for a label `label_width` px wide.
pub fn place_with_label_width(bar1: &BarEdges, bar2: &BarEdges, label_text: &str, label_width: f64) -> Placement {
    let gutter = (bar1.right_edge_x + bar2.left_edge_x) / 2.0;
    let start_y = bar1.top_edge_y;
    let end_y = bar2.top_edge_y;

    let mut label_x = gutter + LABEL_PADDING_PX;
    let mut side = PlacementSide::Right;
    if label_x + label_width > bar2.left_edge_x {
        label_x = gutter - LABEL_PADDING_PX - label_width;
        side = PlacementSide::Left;
    }

    Placement {
        line: PlacementLine {
            style: "dashed".to_string(),
            color: "Negative Red".to_string(),
            start_y,
            end_y,
            position_x: gutter,
        },
        label: PlacementLabel {
            text: label_text.to_string(),
            position_x: label_x,
            vertical_center_y: (start_y + end_y) / 2.0,
            placement_side: side,
        },
    }
}

/// Difference-line placer with an optional model behind it.
#[derive(Clone, Default)]
pub struct AnnotationPlacer {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl AnnotationPlacer {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }

    /// Local rules only.
    pub fn local() -> Self {
        Self::default()
    }

    pub fn place_difference_line_prompt(bar1: &BarEdges, bar2: &BarEdges, label_text: &str) -> Result<String, LlmError> {
        let input = PlacementInput {
            chart_type: "column",
            annotation_type: "difference_line",
            bar1: *bar1,
            bar2: *bar2,
            label_text,
        };
        Ok(format!(
            "Calculate the precise placement for this annotation.\n\nInput Data:\n{}\n\nApply your Visual Design AI rules and return the annotation object with exact coordinates.",
            serde_json::to_string_pretty(&input)?
        ))
    }

    /// Place a difference line, asking the model when one is configured.
    pub async fn place_difference_line(&self, bar1: &BarEdges, bar2: &BarEdges, label_text: &str) -> Placement {
        let Some(provider) = &self.provider else {
            return place_with_label_width(bar1, bar2, label_text, PLACER_LABEL_WIDTH_PX);
        };
        match self.ask_model(provider.as_ref(), bar1, bar2, label_text).await {
            Ok(placement) => {
                debug!(side = ?placement.label.placement_side, "model placed difference line");
                placement
            },
            Err(e) => {
                warn!("Annotation placement call failed, using local calculation: {e}");
                place_with_label_width(bar1, bar2, label_text, PLACER_LABEL_WIDTH_PX)
            },
        }
    }

    async fn ask_model(
        &self,
        provider: &dyn LlmProvider,
        bar1: &BarEdges,
        bar2: &BarEdges,
        label_text: &str,
    ) -> Result<Placement, LlmError> {
        let prompt = Self::place_difference_line_prompt(bar1, bar2, label_text)?;
        let request = CompletionRequest::new(VISUAL_DESIGN_SYSTEM_PROMPT, prompt)
            .max_tokens(PLACEMENT_MAX_TOKENS)
            .temperature(0.0);
        let response = provider.complete(&request).await?;
        json::parse_strict(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn bar(left: f64, right: f64, top: f64) -> BarEdges {
        BarEdges {
            left_edge_x: left,
            right_edge_x: right,
            top_edge_y: top,
        }
    }

    #[test]
    fn test_label_right_when_space() {
        let placement = place_difference_line(&bar(100.0, 200.0, 300.0), &bar(600.0, 700.0, 500.0), "Delta");
        assert_eq!(placement.line.position_x, 400.0);
        assert_eq!(placement.line.start_y, 300.0);
        assert_eq!(placement.line.end_y, 500.0);
        assert_eq!(placement.label.position_x, 410.0);
        assert_eq!(placement.label.vertical_center_y, 400.0);
        assert_eq!(placement.label.placement_side, PlacementSide::Right);
    }

    #[test]
    fn test_label_moves_left_on_collision() {
        let placement = place_difference_line(&bar(100.0, 200.0, 300.0), &bar(260.0, 360.0, 500.0), "Delta");
        assert_eq!(placement.line.position_x, 230.0);
        assert_eq!(placement.label.position_x, 230.0 - 10.0 - 144.0);
        assert_eq!(placement.label.placement_side, PlacementSide::Left);
    }

    #[tokio::test]
    async fn test_placer_uses_narrower_label() {
        // 120 px between the line and bar2: room for 100 px, not for 144 px
        let b1 = bar(100.0, 200.0, 300.0);
        let b2 = bar(440.0, 540.0, 500.0);
        let placed = AnnotationPlacer::local().place_difference_line(&b1, &b2, "Delta").await;
        assert_eq!(placed.label.placement_side, PlacementSide::Right);
        assert_eq!(placed.label.position_x, 330.0);

        let rendered = place_difference_line(&b1, &b2, "Delta");
        assert_eq!(rendered.label.placement_side, PlacementSide::Left);
        assert!(VISUAL_DESIGN_SYSTEM_PROMPT.contains("label width as 100 pixels"));
    }

    #[test]
    fn test_placement_json_shape() {
        let placement = place_difference_line(&bar(0.0, 10.0, 5.0), &bar(500.0, 510.0, 8.0), "x");
        let value = serde_json::to_value(&placement).unwrap();
        assert_eq!(value["line"]["type"], "dashed");
        assert_eq!(value["line"]["color"], "Negative Red");
        assert_eq!(value["label"]["placement_side"], "right");
    }

    #[test]
    fn test_prompt_embeds_input() {
        let prompt =
            AnnotationPlacer::place_difference_line_prompt(&bar(1.0, 2.0, 3.0), &bar(4.0, 5.0, 6.0), "€28").unwrap();
        assert!(prompt.contains("\"annotation_type\": \"difference_line\""));
        assert!(prompt.contains("\"label_text\": \"€28\""));
        assert!(prompt.ends_with("exact coordinates."));
    }

    struct CannedProvider(Result<String, LlmError>);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_model_placement_is_used() {
        let canned = r#"```json
{"line": {"type": "dashed", "color": "Negative Red", "start_y": 1, "end_y": 2, "position_x": 3},
 "label": {"text": "x", "position_x": 4, "vertical_center_y": 1.5, "placement_side": "left"}}
```"#;
        let placer = AnnotationPlacer::new(Some(Arc::new(CannedProvider(Ok(canned.to_string())))));
        let placement = placer
            .place_difference_line(&bar(0.0, 1.0, 1.0), &bar(900.0, 901.0, 2.0), "x")
            .await;
        assert_eq!(placement.line.position_x, 3.0);
        assert_eq!(placement.label.placement_side, PlacementSide::Left);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let placer = AnnotationPlacer::new(Some(Arc::new(CannedProvider(Err(LlmError::RateLimit(
            "HTTP 429".into(),
        ))))));
        let b1 = bar(100.0, 200.0, 300.0);
        let b2 = bar(600.0, 700.0, 500.0);
        let placement = placer.place_difference_line(&b1, &b2, "Delta").await;
        assert_eq!(placement, place_with_label_width(&b1, &b2, "Delta", PLACER_LABEL_WIDTH_PX));
    }

    #[tokio::test]
    async fn test_unparseable_response_falls_back() {
        let placer = AnnotationPlacer::new(Some(Arc::new(CannedProvider(Ok("no idea".into())))));
        let placement = placer
            .place_difference_line(&bar(0.0, 1.0, 1.0), &bar(900.0, 901.0, 2.0), "x")
            .await;
        assert_eq!(placement.label.placement_side, PlacementSide::Right);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_gutter_between_bars(
                left in 0.0f64..1000.0,
                width in 1.0f64..200.0,
                gap in 0.0f64..800.0,
                top1 in 0.0f64..1000.0,
                top2 in 0.0f64..1000.0,
            ) {
                let b1 = bar(left, left + width, top1);
                let b2 = bar(left + width + gap, left + 2.0 * width + gap, top2);
                let placement = place_difference_line(&b1, &b2, "d");
                prop_assert!(placement.line.position_x >= b1.right_edge_x);
                prop_assert!(placement.line.position_x <= b2.left_edge_x);
                let label_right = placement.label.position_x + LABEL_WIDTH_ESTIMATE_PX;
                if placement.label.placement_side == PlacementSide::Right {
                    prop_assert!(label_right <= b2.left_edge_x);
                } else {
                    prop_assert!(label_right < placement.line.position_x);
                }
            }
        }
    }
}
