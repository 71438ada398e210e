//! Chart annotation helpers: difference-line placement and label text.

pub mod labels;
pub mod placer;

pub use labels::{CagrLabel, ChangeDirection, DifferenceLabel, LabelEngine};
pub use placer::{AnnotationPlacer, Placement, PlacementSide, place_difference_line, place_with_label_width};
