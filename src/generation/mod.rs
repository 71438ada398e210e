//! Content generation: source documents in, presentation requests out.
//!
//! The [`ContentGenerator`] asks a model for a whole deck, or builds one
//! offline when no provider is configured. The supporting modules parse
//! documents, recommend storylines and hold the prompt texts.

pub mod content_generator;
pub mod document_parser;
pub mod mock;
pub mod prompts;
pub mod structure;

pub use content_generator::{ContentGenerator, GeneratedDeck, GeneratedSlide, GenerationOptions};
pub use structure::{RecommendedSlide, StructureReport};
