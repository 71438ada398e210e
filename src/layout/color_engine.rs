//! Story-driven color selection for column charts.
//!
//! A chart either compares equals (every series or every bar in its own
//! palette color) or tells one story (one series in green, the rest grey).
use crate::common::RGBColor;
use crate::model::ChartData;
use crate::template::StoryRole;

/// How the bars of a column chart are colored.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorPlan {
    /// Series `i` takes palette entry `i`
    Comparison { series_colors: Vec<RGBColor> },
    /// A single series whose bars each take their own palette entry
    CategoryComparison { point_colors: Vec<RGBColor> },
    /// One highlighted series, the others in neutral grey
    Highlight {
        highlight_index: usize,
        series_colors: Vec<RGBColor>,
    },
}

impl ColorPlan {
    /// Pick the plan for `chart` drawn with `series_count` series whose first
    /// series has `point_count` points.
    pub fn for_chart(chart: &ChartData, series_count: usize, point_count: usize) -> Self {
        if chart.is_comparison() {
            ColorPlan::Comparison {
                series_colors: (0..series_count)
                    .map(|i| StoryRole::Comparison(i).color())
                    .collect(),
            }
        } else if series_count == 1 && point_count > 1 {
            ColorPlan::CategoryComparison {
                point_colors: (0..point_count)
                    .map(|i| StoryRole::Comparison(i).color())
                    .collect(),
            }
        } else {
            let highlight_index = chart
                .highlight_index
                .unwrap_or(series_count.saturating_sub(1));
            ColorPlan::Highlight {
                highlight_index,
                series_colors: (0..series_count)
                    .map(|i| {
                        if i == highlight_index {
                            StoryRole::Highlight.color()
                        } else {
                            StoryRole::Default.color()
                        }
                    })
                    .collect(),
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            ColorPlan::Comparison { .. } => "comparison",
            ColorPlan::CategoryComparison { .. } => "category_comparison",
            ColorPlan::Highlight { .. } => "highlight",
        }
    }

    /// Category labels already name every bar in category comparison.
    pub fn shows_legend(&self) -> bool {
        !matches!(self, ColorPlan::CategoryComparison { .. })
    }

    /// Series-level fill, if the plan colors whole series.
    pub fn series_color(&self, series: usize) -> Option<RGBColor> {
        match self {
            ColorPlan::Comparison { series_colors } | ColorPlan::Highlight { series_colors, .. } => {
                series_colors.get(series).copied()
            },
            ColorPlan::CategoryComparison { .. } => None,
        }
    }

    pub fn point_colors(&self) -> &[RGBColor] {
        match self {
            ColorPlan::CategoryComparison { point_colors } => point_colors,
            _ => &[],
        }
    }
}
