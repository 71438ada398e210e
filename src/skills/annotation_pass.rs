//! Model-backed settling of chart annotations before rendering.
//!
//! Rendering is synchronous and only knows the local rules. This pass runs
//! first: placeholder labels are written by the [`LabelEngine`] and
//! difference lines get coordinates from the [`AnnotationPlacer`]. Both fall
//! back to the local rules when the model fails, so a settled request renders
//! the same way with or without a provider.
use crate::annotate::labels::{ChangeDirection, compute_cagr};
use crate::annotate::{AnnotationPlacer, LabelEngine};
use crate::layout::{BarEdges, BarLayout, InchRect};
use crate::llm::LlmProvider;
use crate::model::{
    Annotation, ChartData, ChartKind, DEFAULT_CAGR_LABEL, DEFAULT_DELTA_LABEL, PresentationRequest,
};
use crate::skills::main_generator::{chart_frame, chart_series_values};
use std::sync::Arc;
use tracing::{debug, info};

/// Currency symbol of generated difference labels.
pub const LABEL_CURRENCY: &str = "€";

/// Label engine and placer run over a request's charts.
#[derive(Clone, Default)]
pub struct AnnotationPass {
    labels: LabelEngine,
    placer: AnnotationPlacer,
}

impl AnnotationPass {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            labels: LabelEngine::new(provider.clone()),
            placer: AnnotationPlacer::new(provider),
        }
    }

    /// Settle every chart annotation in `request`, returning how many changed.
    pub async fn run(&self, request: &mut PresentationRequest) -> usize {
        let mut settled = 0;
        for chart in request
            .slides
            .iter_mut()
            .filter_map(|slide| slide.chart_data.as_mut())
        {
            settled += self.settle_chart(chart).await;
        }
        info!("Settled {} chart annotation(s)", settled);
        settled
    }

    /// Settle the annotations of one chart laid out by the main template.
    ///
    /// Authored labels are kept. Matrix charts and annotations pointing past
    /// the data are left for the renderer to skip.
    pub async fn settle_chart(&self, chart: &mut ChartData) -> usize {
        if chart.kind == ChartKind::Matrix || chart.annotations.is_empty() {
            return 0;
        }
        let frame = chart_frame(chart);
        let series_values = chart_series_values(chart);

        let mut settled = 0;
        for annotation in &mut chart.annotations {
            match annotation {
                Annotation::CagrArrow {
                    series_index,
                    from_category,
                    to_category,
                    label,
                } if label == DEFAULT_CAGR_LABEL => {
                    let Some(span) = BarSpan::resolve(&frame, &series_values, *series_index, *from_category, *to_category)
                    else {
                        continue;
                    };
                    let Some(cagr) = compute_cagr(span.start(), span.end(), span.to.saturating_sub(span.from)) else {
                        debug!("No CAGR for categories {}..{}", span.from, span.to);
                        continue;
                    };
                    *label = self.labels.cagr_label(span.values(), cagr).await.label;
                    settled += 1;
                },
                Annotation::DifferenceLine {
                    series_index,
                    from_category,
                    to_category,
                    label,
                    placement,
                } => {
                    let Some(span) = BarSpan::resolve(&frame, &series_values, *series_index, *from_category, *to_category)
                    else {
                        continue;
                    };
                    if label == DEFAULT_DELTA_LABEL {
                        let direction = if span.end() > span.start() {
                            ChangeDirection::Increase
                        } else if span.end() < span.start() {
                            ChangeDirection::Reduction
                        } else {
                            ChangeDirection::Change
                        };
                        *label = self
                            .labels
                            .difference_label(span.start(), span.end(), LABEL_CURRENCY, direction)
                            .await
                            .to_annotation_text();
                    }
                    let (bar1, bar2) = span.edges();
                    *placement = Some(self.placer.place_difference_line(&bar1, &bar2, label).await);
                    settled += 1;
                },
                _ => {},
            }
        }
        settled
    }
}

/// Two bars of one series, resolved against the chart layout.
struct BarSpan<'a> {
    layout: BarLayout,
    series: usize,
    values: &'a [f64],
    from: usize,
    to: usize,
}

impl<'a> BarSpan<'a> {
    fn resolve(frame: &InchRect, series_values: &'a [Vec<f64>], series: usize, from: i64, to: i64) -> Option<Self> {
        let layout = BarLayout::for_series(frame, series_values, series)?;
        let from = layout.resolve_category(from)?;
        let to = layout.resolve_category(to)?;
        Some(Self {
            layout,
            series,
            values: &series_values[series],
            from,
            to,
        })
    }

    fn start(&self) -> f64 {
        self.values[self.from]
    }

    fn end(&self) -> f64 {
        self.values[self.to]
    }

    /// Values from the first to the last category of the span.
    fn values(&self) -> &'a [f64] {
        &self.values[self.from.min(self.to)..=self.from.max(self.to)]
    }

    fn edges(&self) -> (BarEdges, BarEdges) {
        (
            BarEdges::of_bar(&self.layout, self.from, self.series, self.start()),
            BarEdges::of_bar(&self.layout, self.to, self.series, self.end()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{PlacementSide, place_with_label_width};
    use crate::annotate::placer::PLACER_LABEL_WIDTH_PX;
    use crate::llm::{CompletionRequest, LlmError};
    use crate::model::{SeriesData, SlideContent, SlideType};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with queued responses and records the system prompts it saw.
    struct ScriptedProvider {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        systems: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                systems: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.systems.lock().unwrap().push(request.system.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(LlmError::Provider("no reply queued".into())))
        }
    }

    fn chart() -> ChartData {
        ChartData::column(
            ["2021", "2022", "2023"].map(String::from).to_vec(),
            vec![SeriesData::new("Revenue", vec![45.0, 17.0, 80.0])],
        )
    }

    fn delta(from: i64, to: i64, label: &str) -> Annotation {
        Annotation::DifferenceLine {
            series_index: 0,
            from_category: from,
            to_category: to,
            label: label.to_string(),
            placement: None,
        }
    }

    fn cagr(label: &str) -> Annotation {
        Annotation::CagrArrow {
            series_index: 0,
            from_category: 0,
            to_category: -1,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_local_pass_fills_placeholders() {
        let mut chart = chart();
        chart.annotations = vec![cagr(DEFAULT_CAGR_LABEL), delta(0, 1, DEFAULT_DELTA_LABEL)];

        let settled = AnnotationPass::default().settle_chart(&mut chart).await;
        assert_eq!(settled, 2);
        assert_eq!(chart.annotations[0], cagr("2-Year CAGR: +33%"));

        let Annotation::DifferenceLine { label, placement, .. } = &chart.annotations[1] else {
            panic!("expected a difference line");
        };
        assert_eq!(label, "€28 savings\n(62% reduction)");
        let placement = placement.as_ref().unwrap();
        assert_eq!(placement.label.text, *label);
        assert!(placement.line.start_y < placement.line.end_y);
    }

    #[tokio::test]
    async fn test_authored_labels_are_kept() {
        let mut chart = chart();
        chart.annotations = vec![cagr("Growth"), delta(1, 2, "€63 rebound")];

        let settled = AnnotationPass::default().settle_chart(&mut chart).await;
        assert_eq!(settled, 1);
        assert_eq!(chart.annotations[0], cagr("Growth"));
        assert!(matches!(
            &chart.annotations[1],
            Annotation::DifferenceLine { label, placement: Some(_), .. } if label == "€63 rebound"
        ));
    }

    #[tokio::test]
    async fn test_model_answers_are_stored() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"primary": "€28 cut", "secondary": "(62% lower)"}"#.to_string()),
            Ok(r#"```json
{"line": {"type": "dashed", "color": "Negative Red", "start_y": 400, "end_y": 600, "position_x": 512},
 "label": {"text": "€28 cut", "position_x": 300, "vertical_center_y": 500, "placement_side": "left"}}
```"#
                .to_string()),
        ]);
        let pass = AnnotationPass::new(Some(provider.clone()));

        let mut request = PresentationRequest::new("Costs").with_slides(vec![
            SlideContent::new(SlideType::StandardContent).with_title("No chart"),
            SlideContent::new(SlideType::StandardContent).with_chart(ChartData {
                annotations: vec![delta(0, 1, DEFAULT_DELTA_LABEL)],
                ..chart()
            }),
        ]);
        assert_eq!(pass.run(&mut request).await, 1);

        let chart = request.slides[1].chart_data.as_ref().unwrap();
        let Annotation::DifferenceLine { label, placement, .. } = &chart.annotations[0] else {
            panic!("expected a difference line");
        };
        assert_eq!(label, "€28 cut\n(62% lower)");
        let placement = placement.as_ref().unwrap();
        assert_eq!(placement.line.position_x, 512.0);
        assert_eq!(placement.label.placement_side, PlacementSide::Left);

        let systems = provider.systems.lock().unwrap();
        assert_eq!(systems.len(), 2);
        assert!(systems[0].starts_with("You are a Data Storyteller AI"));
        assert!(systems[1].starts_with("You are a Visual Design AI"));
    }

    #[tokio::test]
    async fn test_model_failure_uses_local_rules() {
        let provider = ScriptedProvider::new(vec![
            Err(LlmError::RateLimit("HTTP 429".into())),
            Ok("not json".to_string()),
        ]);
        let mut chart = chart();
        chart.annotations = vec![delta(0, 1, DEFAULT_DELTA_LABEL)];
        AnnotationPass::new(Some(provider)).settle_chart(&mut chart).await;

        let frame = chart_frame(&chart);
        let values = chart_series_values(&chart);
        let (bar1, bar2) = BarSpan::resolve(&frame, &values, 0, 0, 1).unwrap().edges();
        let label = "€28 savings\n(62% reduction)";
        assert_eq!(
            chart.annotations[0],
            Annotation::DifferenceLine {
                series_index: 0,
                from_category: 0,
                to_category: 1,
                label: label.to_string(),
                placement: Some(place_with_label_width(&bar1, &bar2, label, PLACER_LABEL_WIDTH_PX)),
            }
        );
    }

    #[tokio::test]
    async fn test_unresolvable_annotations_are_untouched() {
        let mut chart = chart();
        chart.annotations = vec![delta(0, 7, DEFAULT_DELTA_LABEL), cagr(DEFAULT_CAGR_LABEL)];
        chart.series = Some(vec![SeriesData::new("Revenue", vec![0.0, 10.0, 20.0])]);

        // Out of range, and no CAGR from a zero start
        assert_eq!(AnnotationPass::default().settle_chart(&mut chart).await, 0);
        assert_eq!(chart.annotations[0], delta(0, 7, DEFAULT_DELTA_LABEL));
        assert_eq!(chart.annotations[1], cagr(DEFAULT_CAGR_LABEL));

        let mut matrix = ChartData {
            kind: ChartKind::Matrix,
            annotations: vec![delta(0, 1, DEFAULT_DELTA_LABEL)],
            ..Default::default()
        };
        assert_eq!(AnnotationPass::default().settle_chart(&mut matrix).await, 0);
    }
}
