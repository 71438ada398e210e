//! Chart data model.
//!
//! Only the two plot families the generator emits are modelled: clustered
//! columns (also used for waterfalls) and bubbles. Data is written as literals,
//! so charts carry no embedded workbook.
use crate::common::RGBColor;
use crate::ooxml::drawing::{FontStyle, LineStyle, Outline};

/// Fill and outline of a series or data point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesStyle {
    pub fill: Option<RGBColor>,
    pub outline: Outline,
}

impl SeriesStyle {
    /// Solid fill with no border.
    pub fn borderless(fill: RGBColor) -> Self {
        Self {
            fill: Some(fill),
            outline: Outline::None,
        }
    }
}

/// A category series in a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub style: Option<SeriesStyle>,
    /// Per-point overrides as `(point index, style)`
    pub points: Vec<(usize, SeriesStyle)>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>, categories: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            categories,
            values,
            style: None,
            points: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_point(mut self, idx: usize, style: SeriesStyle) -> Self {
        self.points.push((idx, style));
        self
    }
}

/// An XY-size series in a bubble chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSeries {
    pub name: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub sizes: Vec<f64>,
    pub style: Option<SeriesStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    OutsideEnd,
    InsideEnd,
    Center,
}

impl LabelPosition {
    pub fn xml_value(&self) -> &'static str {
        match self {
            LabelPosition::OutsideEnd => "outEnd",
            LabelPosition::InsideEnd => "inEnd",
            LabelPosition::Center => "ctr",
        }
    }
}

/// Value labels drawn on each data point.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLabels {
    pub position: LabelPosition,
    pub number_format: String,
    pub font: FontStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Bottom,
    Right,
    Top,
}

impl LegendPosition {
    pub fn xml_value(&self) -> &'static str {
        match self {
            LegendPosition::Bottom => "b",
            LegendPosition::Right => "r",
            LegendPosition::Top => "t",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub position: LegendPosition,
    /// Whether the legend may overlap the plot area (not "included in layout")
    pub overlay: bool,
    pub font: Option<FontStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
}

impl AxisPosition {
    pub fn xml_value(&self) -> &'static str {
        match self {
            AxisPosition::Bottom => "b",
            AxisPosition::Left => "l",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Category,
    Value,
}

/// A chart axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub kind: AxisKind,
    pub id: u32,
    pub cross_id: u32,
    pub position: AxisPosition,
    /// Draw values high-to-low (`maxMin` orientation)
    pub reversed: bool,
    pub title: Option<String>,
    pub line: Outline,
    pub major_gridlines: Option<LineStyle>,
    pub tick_font: Option<FontStyle>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Axis {
    pub fn category(id: u32, cross_id: u32) -> Self {
        Self::new(AxisKind::Category, id, cross_id, AxisPosition::Bottom)
    }

    pub fn value(id: u32, cross_id: u32, position: AxisPosition) -> Self {
        Self::new(AxisKind::Value, id, cross_id, position)
    }

    fn new(kind: AxisKind, id: u32, cross_id: u32, position: AxisPosition) -> Self {
        Self {
            kind,
            id,
            cross_id,
            position,
            reversed: false,
            title: None,
            line: Outline::Inherit,
            major_gridlines: None,
            tick_font: None,
            min: None,
            max: None,
        }
    }
}

/// The plot contained in a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Plot {
    /// Clustered column chart
    Bar {
        series: Vec<BarSeries>,
        gap_width: u32,
        data_labels: Option<DataLabels>,
    },
    Bubble {
        series: Vec<BubbleSeries>,
        bubble_scale: u32,
    },
}

/// A complete chart part.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub plot: Plot,
    /// Horizontal axis first, vertical second
    pub axes: [Axis; 2],
    pub legend: Option<Legend>,
    /// Draw the chart-space border; generated charts are borderless
    pub border: bool,
}

impl Chart {
    /// Clustered column chart with category and value axes.
    pub fn bar(series: Vec<BarSeries>) -> Self {
        Self {
            plot: Plot::Bar {
                series,
                gap_width: 150,
                data_labels: None,
            },
            axes: [
                Axis::category(1, 2),
                Axis::value(2, 1, AxisPosition::Left),
            ],
            legend: None,
            border: false,
        }
    }

    /// Bubble chart with two value axes.
    pub fn bubble(series: Vec<BubbleSeries>) -> Self {
        Self {
            plot: Plot::Bubble {
                series,
                bubble_scale: 100,
            },
            axes: [
                Axis::value(1, 2, AxisPosition::Bottom),
                Axis::value(2, 1, AxisPosition::Left),
            ],
            legend: None,
            border: false,
        }
    }

    pub fn horizontal_axis_mut(&mut self) -> &mut Axis {
        &mut self.axes[0]
    }

    pub fn vertical_axis_mut(&mut self) -> &mut Axis {
        &mut self.axes[1]
    }

    pub fn series_count(&self) -> usize {
        match &self.plot {
            Plot::Bar { series, .. } => series.len(),
            Plot::Bubble { series, .. } => series.len(),
        }
    }
}
