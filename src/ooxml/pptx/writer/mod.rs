//! Mutable presentation writer components.

pub mod pres;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;
pub mod text;

pub use pres::MutablePresentation;
pub use shape::{Bounds, MutableShape};
pub use slide::MutableSlide;
pub use text::{Alignment, Anchor, AutoFit, Bullet, Insets, Paragraph, Run, TextFrame};
