//! Slide templates.
//!
//! `main` is the grid-based 16:9 template every layout rule is expressed in;
//! `default` is the classic 4:3 fallback.

pub mod main_config;
pub mod registry;

pub use main_config::{PxRect, Region, SlideBlueprint, StoryRole, Typography, validate_bounds};
pub use registry::{ClassicTemplate, TemplateConfig, TemplateKind, TemplateRegistry};
