//! Office Open XML writing.
//!
//! A small write-only OOXML layer: the OPC container, DrawingML primitives,
//! chart parts and PresentationML slides.

pub mod charts;
pub mod constants;
pub mod drawing;
pub mod error;
pub mod package;
pub mod pptx;
pub mod rels;

pub use error::{OoxmlError, Result};
pub use package::{OpcPackage, PackageWriter, Part};
