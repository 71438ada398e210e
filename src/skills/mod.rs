//! Deck generators and the content and design helpers that feed them.
//!
//! - [`main_generator`]: the 16:9 grid template with charts and annotations
//! - [`annotation_pass`]: model-written annotation labels and positions,
//!   settled before rendering
//! - [`classic_generator`]: the 4:3 scheme-colored fallback
//! - [`content_analyzer`]: topic skeletons and free-text structuring
//! - [`design_optimizer`]: color schemes and contrast correction

pub mod annotation_pass;
pub mod classic_generator;
pub mod content_analyzer;
pub mod design_optimizer;
pub mod main_generator;

pub use annotation_pass::AnnotationPass;
pub use classic_generator::ClassicSlideGenerator;
pub use content_analyzer::{StructuredContent, analyze_topic, structure_content};
pub use design_optimizer::{ColorScheme, suggest_color_scheme};
pub use main_generator::MainSlideGenerator;

use crate::model::{GenerationResult, PresentationRequest};

/// Renders a [`PresentationRequest`] to a `.pptx` file.
///
/// Generators never fail with an error: problems are reported through
/// [`GenerationResult::error`].
pub trait SlideGenerator: Send + Sync {
    /// Short template family name, for logging.
    fn name(&self) -> &str;

    fn create_presentation(&self, request: &PresentationRequest) -> GenerationResult;
}
