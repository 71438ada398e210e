//! PresentationML package generation.
//!
//! Decks are built with [`MutablePresentation`]: add slides, place shapes in
//! EMU coordinates, register charts, then save.

pub mod parts;
pub mod writer;

pub use parts::CoreProperties;
pub use writer::{
    Alignment, Anchor, AutoFit, Bounds, Bullet, Insets, MutablePresentation, MutableShape,
    MutableSlide, Paragraph, Run, TextFrame,
};
