//! Chart overlay geometry.
//!
//! The writer never renders the chart, so overlay positions are estimated from
//! the chart frame: a fixed plot-area inset, the clustered-column bar layout at
//! a 50% gap, and a linear value axis starting at zero. All coordinates here
//! are inches on the slide.
use crate::common::unit::{REFERENCE_DPI, emu_to_inches, inches_to_emu, px_to_inches};
use crate::model::{CalloutPosition, LeaderDirection};
use crate::ooxml::pptx::Bounds;

/// Plot area inset as fractions of the chart frame.
pub const PLOT_MARGIN_LEFT: f64 = 0.12;
pub const PLOT_MARGIN_RIGHT: f64 = 0.02;
pub const PLOT_MARGIN_TOP: f64 = 0.08;
pub const PLOT_MARGIN_BOTTOM: f64 = 0.15;

/// Gap between category groups relative to the group width.
pub const GAP_WIDTH_RATIO: f64 = 0.5;

/// Headroom above the tallest bar when the axis maximum is automatic.
pub const AXIS_HEADROOM: f64 = 1.1;

/// Clearance of the CAGR arc above the tallest bar it spans, in px.
pub const ARC_CLEARANCE_PX: f64 = 30.0;
/// Control point overshoot; a quadratic curve peaks halfway to its control point.
pub const ARC_CONTROL_FACTOR: f64 = 1.33;
/// Line segments used to approximate the arc.
pub const ARC_SEGMENTS: usize = 20;

pub const CAGR_LABEL_WIDTH_IN: f64 = 0.9;
pub const CAGR_LABEL_HEIGHT_IN: f64 = 0.25;
/// Gap between the arc apex and the bottom of its label.
pub const CAGR_LABEL_GAP_IN: f64 = 0.08;

pub const LEADER_LABEL_WIDTH_PX: f64 = 100.0;
pub const LEADER_LABEL_HEIGHT_PX: f64 = 20.0;

pub const CALLOUT_WIDTH_PX: f64 = 120.0;
pub const CALLOUT_HEIGHT_PX: f64 = 40.0;

/// A rectangle in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InchRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl InchRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self::new(
            emu_to_inches(bounds.x),
            emu_to_inches(bounds.y),
            emu_to_inches(bounds.width),
            emu_to_inches(bounds.height),
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(
            inches_to_emu(self.x),
            inches_to_emu(self.y),
            inches_to_emu(self.width),
            inches_to_emu(self.height),
        )
    }

    /// Point at fractional position `(fx, fy)`, with `fy` measured upward
    /// from the bottom edge the way chart values are.
    pub fn data_point(&self, fx: f64, fy: f64) -> (f64, f64) {
        (self.x + fx * self.width, self.y + (1.0 - fy) * self.height)
    }
}

/// Estimated plot area of a chart drawn in `frame`.
pub fn plot_area(frame: &InchRect) -> InchRect {
    InchRect::new(
        frame.x + PLOT_MARGIN_LEFT * frame.width,
        frame.y + PLOT_MARGIN_TOP * frame.height,
        frame.width * (1.0 - PLOT_MARGIN_LEFT - PLOT_MARGIN_RIGHT),
        frame.height * (1.0 - PLOT_MARGIN_TOP - PLOT_MARGIN_BOTTOM),
    )
}

/// Linear value axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range for the given values, honouring explicit axis bounds.
    ///
    /// Without an explicit maximum the axis tops out 10% above the largest
    /// value.
    pub fn for_values<'a, I>(values: I, explicit_min: Option<f64>, explicit_max: Option<f64>) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let data_max = values.into_iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let data_max = if data_max.is_finite() { data_max } else { 0.0 };
        Self {
            min: explicit_min.unwrap_or(0.0),
            max: explicit_max.unwrap_or(data_max * AXIS_HEADROOM),
        }
    }

    /// Span of the axis; a degenerate axis spans 1.
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 { 1.0 } else { span }
    }

    pub fn ratio(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

/// Bar positions of a clustered column chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub plot: InchRect,
    pub range: ValueRange,
    pub categories: usize,
    pub series: usize,
    pub category_width: f64,
    pub group_width: f64,
    pub bar_width: f64,
    pub category_gap: f64,
}

impl BarLayout {
    /// Lay out `series` bars per category over `categories` slots.
    ///
    /// Returns `None` when there is nothing to lay out.
    pub fn new(frame: &InchRect, range: ValueRange, categories: usize, series: usize) -> Option<Self> {
        if categories == 0 || series == 0 {
            return None;
        }
        let plot = plot_area(frame);
        let category_width = plot.width / categories as f64;
        let group_width = category_width / (1.0 + GAP_WIDTH_RATIO);
        Some(Self {
            plot,
            range,
            categories,
            series,
            category_width,
            group_width,
            bar_width: group_width / series as f64,
            category_gap: category_width - group_width,
        })
    }

    /// Layout for a chart frame and its series values.
    ///
    /// The category count comes from `series_values[reference_series]`.
    pub fn for_series(frame: &InchRect, series_values: &[Vec<f64>], reference_series: usize) -> Option<Self> {
        let categories = series_values.get(reference_series)?.len();
        let range = ValueRange::for_values(series_values.iter().flatten(), None, None);
        Self::new(frame, range, categories, series_values.len())
    }

    /// Left and right edge of a bar.
    pub fn bar_edges(&self, category: usize, series: usize) -> (f64, f64) {
        let start = self.plot.x
            + category as f64 * self.category_width
            + self.category_gap / 2.0
            + series as f64 * self.bar_width;
        (start, start + self.bar_width)
    }

    pub fn bar_center(&self, category: usize, series: usize) -> f64 {
        let (left, right) = self.bar_edges(category, series);
        (left + right) / 2.0
    }

    /// Y coordinate of the top of a bar holding `value`.
    pub fn bar_top(&self, value: f64) -> f64 {
        self.plot.bottom() - self.range.ratio(value) * self.plot.height
    }

    /// Resolve a category index; negative indices count from the end.
    pub fn resolve_category(&self, index: i64) -> Option<usize> {
        let resolved = if index < 0 {
            self.categories as i64 + index
        } else {
            index
        };
        if (0..self.categories as i64).contains(&resolved) {
            Some(resolved as usize)
        } else {
            None
        }
    }
}

/// Sample a quadratic Bézier curve at `segments + 1` evenly spaced points.
pub fn quadratic_bezier(
    start: (f64, f64),
    control: (f64, f64),
    end: (f64, f64),
    segments: usize,
) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let a = (1.0 - t) * (1.0 - t);
            let b = 2.0 * (1.0 - t) * t;
            let c = t * t;
            (
                a * start.0 + b * control.0 + c * end.0,
                a * start.1 + b * control.1 + c * end.1,
            )
        })
        .collect()
}

/// Geometry of a CAGR arc between two bar tops.
#[derive(Debug, Clone, PartialEq)]
pub struct CagrArc {
    pub from_category: usize,
    pub to_category: usize,
    pub start: (f64, f64),
    pub control: (f64, f64),
    pub end: (f64, f64),
    /// Sampled curve, `ARC_SEGMENTS + 1` points from start to end
    pub points: Vec<(f64, f64)>,
    /// Highest sample; the first one wins on ties
    pub apex: (f64, f64),
    pub label: InchRect,
}

/// Compute the CAGR arc over `series_values[series]` from one category to
/// another.
///
/// The control point is lifted above the tallest bar of any series between
/// the two categories so the curve clears it. Returns `None` when the series
/// or either category does not exist.
///
/// # Arguments
///
/// * `frame` - Chart frame in inches
/// * `series_values` - Values of every series in the chart
/// * `series` - Series the arc is anchored on
/// * `from_category`, `to_category` - Category indices; negative counts from the end
pub fn cagr_arc(
    frame: &InchRect,
    series_values: &[Vec<f64>],
    series: usize,
    from_category: i64,
    to_category: i64,
) -> Option<CagrArc> {
    let layout = BarLayout::for_series(frame, series_values, series)?;
    let values = &series_values[series];
    let from = layout.resolve_category(from_category)?;
    let to = layout.resolve_category(to_category)?;

    let start = (layout.bar_center(from, series), layout.bar_top(values[from]));
    let end = (layout.bar_center(to, series), layout.bar_top(values[to]));

    let (lo, hi) = (from.min(to), from.max(to));
    let obstacle = series_values
        .iter()
        .flat_map(|s| s.iter().enumerate())
        .filter(|(idx, _)| (lo..=hi).contains(idx))
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);
    let control = (
        (start.0 + end.0) / 2.0,
        layout.bar_top(obstacle) - px_to_inches(ARC_CLEARANCE_PX) * ARC_CONTROL_FACTOR,
    );

    let points = quadratic_bezier(start, control, end, ARC_SEGMENTS);
    let apex = points
        .iter()
        .copied()
        .fold(start, |best, p| if p.1 < best.1 { p } else { best });

    let label = InchRect::new(
        apex.0 - CAGR_LABEL_WIDTH_IN / 2.0,
        apex.1 - CAGR_LABEL_HEIGHT_IN - CAGR_LABEL_GAP_IN,
        CAGR_LABEL_WIDTH_IN,
        CAGR_LABEL_HEIGHT_IN,
    );

    Some(CagrArc {
        from_category: from,
        to_category: to,
        start,
        control,
        end,
        points,
        apex,
        label,
    })
}

/// Edges of a bar in reference pixels, as handed to the annotation placer.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarEdges {
    pub left_edge_x: f64,
    pub right_edge_x: f64,
    pub top_edge_y: f64,
}

impl BarEdges {
    /// Edges of a bar in `layout`, converted to px.
    pub fn of_bar(layout: &BarLayout, category: usize, series: usize, value: f64) -> Self {
        let (left, right) = layout.bar_edges(category, series);
        Self {
            left_edge_x: left * REFERENCE_DPI,
            right_edge_x: right * REFERENCE_DPI,
            top_edge_y: layout.bar_top(value) * REFERENCE_DPI,
        }
    }
}

/// Line and label position of a leader line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderGeometry {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub label: InchRect,
    /// Label text is right-aligned so it ends at the line
    pub align_right: bool,
}

/// Leader line from the data point at fractional `(fx, fy)` of the chart
/// frame, running `length_px` in `direction`.
pub fn leader_line(
    frame: &InchRect,
    fx: f64,
    fy: f64,
    direction: LeaderDirection,
    length_px: f64,
) -> LeaderGeometry {
    let start = frame.data_point(fx, fy);
    let length = px_to_inches(length_px);
    let (end, offset) = match direction {
        LeaderDirection::Up => ((start.0, start.1 - length), (-50.0, -25.0)),
        LeaderDirection::Down => ((start.0, start.1 + length), (-50.0, 5.0)),
        LeaderDirection::Right => ((start.0 + length, start.1), (5.0, -10.0)),
        LeaderDirection::Left => ((start.0 - length, start.1), (-105.0, -10.0)),
    };
    LeaderGeometry {
        start,
        end,
        label: InchRect::new(
            end.0 + px_to_inches(offset.0),
            end.1 + px_to_inches(offset.1),
            px_to_inches(LEADER_LABEL_WIDTH_PX),
            px_to_inches(LEADER_LABEL_HEIGHT_PX),
        ),
        align_right: direction == LeaderDirection::Left,
    }
}

/// Callout box placed next to the data point at fractional `(fx, fy)`.
pub fn callout_box(frame: &InchRect, fx: f64, fy: f64, position: CalloutPosition) -> InchRect {
    let (px, py) = frame.data_point(fx, fy);
    let (dx, dy) = match position {
        CalloutPosition::Above => (-60.0, -50.0),
        CalloutPosition::Below => (-60.0, 10.0),
        CalloutPosition::Right => (10.0, -20.0),
        CalloutPosition::Left => (-130.0, -20.0),
    };
    InchRect::new(
        px + px_to_inches(dx),
        py + px_to_inches(dy),
        px_to_inches(CALLOUT_WIDTH_PX),
        px_to_inches(CALLOUT_HEIGHT_PX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn frame() -> InchRect {
        InchRect::new(1.0, 1.0, 5.0, 4.0)
    }

    #[test]
    fn test_plot_area_margins() {
        let plot = plot_area(&frame());
        assert!((plot.x - 1.6).abs() < EPS);
        assert!((plot.width - 4.3).abs() < EPS);
        assert!((plot.y - 1.32).abs() < EPS);
        assert!((plot.height - 3.08).abs() < EPS);
    }

    #[test]
    fn test_value_range() {
        let range = ValueRange::for_values(&[10.0, 50.0, 20.0], None, None);
        assert_eq!(range.min, 0.0);
        assert!((range.max - 55.0).abs() < EPS);

        let flat = ValueRange::for_values(&[0.0, 0.0], None, None);
        assert_eq!(flat.span(), 1.0);

        let explicit = ValueRange::for_values(&[10.0], Some(5.0), Some(25.0));
        assert_eq!(explicit.span(), 20.0);
    }

    #[test]
    fn test_bar_layout_single_series() {
        let range = ValueRange::for_values(&[100.0], None, None);
        let layout = BarLayout::new(&frame(), range, 4, 1).unwrap();
        let cw = 4.3 / 4.0;
        assert!((layout.category_width - cw).abs() < EPS);
        assert!((layout.group_width - cw / 1.5).abs() < EPS);

        let (left, right) = layout.bar_edges(0, 0);
        assert!((left - (1.6 + (cw - cw / 1.5) / 2.0)).abs() < EPS);
        assert!((right - left - cw / 1.5).abs() < EPS);

        // Zero sits on the plot floor, the axis max on the plot ceiling
        assert!((layout.bar_top(0.0) - layout.plot.bottom()).abs() < EPS);
        assert!((layout.bar_top(110.0) - layout.plot.y).abs() < EPS);
    }

    #[test]
    fn test_bar_layout_clusters() {
        let values = vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]];
        let layout = BarLayout::for_series(&frame(), &values, 0).unwrap();
        assert_eq!(layout.series, 2);
        let (_, first_right) = layout.bar_edges(1, 0);
        let (second_left, _) = layout.bar_edges(1, 1);
        assert!((first_right - second_left).abs() < EPS);
    }

    #[test]
    fn test_empty_layout() {
        assert!(BarLayout::for_series(&frame(), &[], 0).is_none());
        assert!(BarLayout::for_series(&frame(), &[vec![]], 0).is_none());
    }

    #[test]
    fn test_resolve_category() {
        let range = ValueRange::for_values(&[1.0], None, None);
        let layout = BarLayout::new(&frame(), range, 5, 1).unwrap();
        assert_eq!(layout.resolve_category(-1), Some(4));
        assert_eq!(layout.resolve_category(2), Some(2));
        assert_eq!(layout.resolve_category(5), None);
        assert_eq!(layout.resolve_category(-6), None);
    }

    #[test]
    fn test_bezier_endpoints() {
        let pts = quadratic_bezier((0.0, 0.0), (1.0, -2.0), (2.0, 0.0), 20);
        assert_eq!(pts.len(), 21);
        assert_eq!(pts[0], (0.0, 0.0));
        assert_eq!(pts[20], (2.0, 0.0));
        // Symmetric curve peaks halfway to the control point
        assert!((pts[10].0 - 1.0).abs() < EPS);
        assert!((pts[10].1 + 1.0).abs() < EPS);
    }

    #[test]
    fn test_cagr_arc() {
        let values = vec![vec![20.0, 35.0, 50.0, 80.0]];
        let arc = cagr_arc(&frame(), &values, 0, 0, -1).unwrap();
        assert_eq!(arc.from_category, 0);
        assert_eq!(arc.to_category, 3);
        assert_eq!(arc.points.len(), ARC_SEGMENTS + 1);

        let layout = BarLayout::for_series(&frame(), &values, 0).unwrap();
        let expected = layout.bar_top(80.0) - (30.0 / 144.0) * 1.33;
        assert!((arc.control.1 - expected).abs() < EPS);

        assert!(arc.apex.1 <= arc.start.1);
        assert!(arc.apex.1 <= arc.end.1);
        assert!((arc.label.x - (arc.apex.0 - 0.45)).abs() < EPS);
        assert!((arc.label.y - (arc.apex.1 - 0.33)).abs() < EPS);
    }

    #[test]
    fn test_cagr_arc_clears_other_series() {
        let values = vec![vec![10.0, 10.0, 10.0], vec![5.0, 90.0, 5.0]];
        let arc = cagr_arc(&frame(), &values, 0, 0, 2).unwrap();
        let layout = BarLayout::for_series(&frame(), &values, 0).unwrap();
        assert!(arc.control.1 < layout.bar_top(90.0));
    }

    #[test]
    fn test_cagr_arc_out_of_range() {
        let values = vec![vec![1.0, 2.0]];
        assert!(cagr_arc(&frame(), &values, 1, 0, 1).is_none());
        assert!(cagr_arc(&frame(), &values, 0, 0, 7).is_none());
    }

    #[test]
    fn test_leader_line_directions() {
        let f = InchRect::new(0.0, 0.0, 2.0, 2.0);
        let up = leader_line(&f, 0.5, 0.5, LeaderDirection::Up, 144.0);
        assert_eq!(up.start, (1.0, 1.0));
        assert_eq!(up.end, (1.0, 0.0));
        assert!(!up.align_right);
        assert!((up.label.y - (-25.0 / 144.0)).abs() < EPS);

        let left = leader_line(&f, 0.5, 0.5, LeaderDirection::Left, 144.0);
        assert_eq!(left.end, (0.0, 1.0));
        assert!(left.align_right);
        assert!((left.label.x - (-105.0 / 144.0)).abs() < EPS);
        assert!((left.label.width - 100.0 / 144.0).abs() < EPS);
    }

    #[test]
    fn test_callout_positions() {
        let f = InchRect::new(0.0, 0.0, 2.0, 2.0);
        let above = callout_box(&f, 0.5, 0.5, CalloutPosition::Above);
        assert!((above.x - (1.0 - 60.0 / 144.0)).abs() < EPS);
        assert!((above.y - (1.0 - 50.0 / 144.0)).abs() < EPS);
        let right = callout_box(&f, 0.5, 0.5, CalloutPosition::Right);
        assert!((right.x - (1.0 + 10.0 / 144.0)).abs() < EPS);
        assert!((right.height - 40.0 / 144.0).abs() < EPS);
    }

    #[test]
    fn test_bounds_round_trip() {
        let rect = InchRect::new(1.0, 0.5, 2.0, 0.25);
        let back = InchRect::from_bounds(&rect.to_bounds());
        assert!((back.x - 1.0).abs() < 1e-6);
        assert!((back.height - 0.25).abs() < 1e-6);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn series_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
            (2usize..8, 1usize..4).prop_flat_map(|(cats, series)| {
                prop::collection::vec(prop::collection::vec(0.0f64..1000.0, cats), series)
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_apex_never_below_anchors(values in series_strategy(), from in 0i64..8, to in -8i64..8) {
                if let Some(arc) = cagr_arc(&frame(), &values, 0, from, to) {
                    prop_assert!(arc.apex.1 <= arc.start.1 + EPS);
                    prop_assert!(arc.apex.1 <= arc.end.1 + EPS);
                    prop_assert!(arc.control.1 < arc.start.1.min(arc.end.1));
                }
            }

            #[test]
            fn prop_bars_stay_in_plot(values in series_strategy()) {
                let layout = BarLayout::for_series(&frame(), &values, 0).unwrap();
                for cat in 0..layout.categories {
                    for ser in 0..layout.series {
                        let (left, right) = layout.bar_edges(cat, ser);
                        prop_assert!(left >= layout.plot.x - EPS);
                        prop_assert!(right <= layout.plot.right() + EPS);
                        prop_assert!(left < right);
                    }
                }
            }
        }
    }
}
