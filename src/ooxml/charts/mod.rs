//! Chart parts (`ppt/charts/chartN.xml`).

pub mod model;
pub mod writer;

pub use model::{
    Axis, AxisKind, AxisPosition, BarSeries, BubbleSeries, Chart, DataLabels, LabelPosition,
    Legend, LegendPosition, Plot, SeriesStyle,
};
pub use writer::{chart_to_xml, write_chart};
