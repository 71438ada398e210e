//! Pure layout computations: overlay geometry, chart typography and the
//! story-driven color engine. Nothing here touches the document model.

pub mod color_engine;
pub mod geometry;
pub mod typography;

pub use color_engine::ColorPlan;
pub use geometry::{BarEdges, BarLayout, CagrArc, InchRect, LeaderGeometry, ValueRange};
pub use typography::{ChartTypography, LabelDensity};
