//! Common types and utilities shared by the writer, layout and generation layers.
//!
//! Everything here is format-agnostic: length units at the 144 DPI reference
//! resolution, RGB colors with WCAG contrast math, XML escaping and the
//! crate-wide error type.

pub mod color;
pub mod error;
pub mod unit;
pub mod xml;

pub use color::RGBColor;
pub use error::{Error, Result};
