//! Deckwright - consulting-style PowerPoint decks from structured content
//!
//! This library turns slide descriptions into `.pptx` files laid out on a
//! fixed grid, with story-driven chart colors and geometric chart annotations.
//! Slide content can be authored by hand, outlined from a topic, or generated
//! by an LLM from a source document.
//!
//! # Features
//!
//! - **OOXML writer**: Presentation, slide, text, connector, freeform and chart parts
//! - **Grid template**: 1920x1080 px canvas with a safe zone and named regions
//! - **Charts**: Clustered column, waterfall and bubble matrix charts
//! - **Annotations**: CAGR arcs, difference lines, leader lines and callouts
//! - **Content generation**: Anthropic/OpenAI providers with an offline fallback
//!
//! # Example - Rendering a request
//!
//! ```no_run
//! use deckwright::agent::SlideDeckAgent;
//! use deckwright::model::{ChartData, PresentationRequest, SeriesData, SlideContent, SlideType};
//!
//! let chart = ChartData::column(
//!     vec!["2022".into(), "2023".into(), "2024".into()],
//!     vec![SeriesData::new("Revenue", vec![42.0, 55.0, 65.0])],
//! );
//! let slide = SlideContent::new(SlideType::StandardContent)
//!     .with_title("Revenue grew 55% in two years")
//!     .with_bullets(["Growth in every region", "Margins held"])
//!     .with_chart(chart);
//! let request = PresentationRequest::new("Annual Review")
//!     .with_slides(vec![slide])
//!     .with_output_path("annual_review.pptx");
//!
//! let result = SlideDeckAgent::new("main").create_custom_presentation(&request);
//! assert!(result.success);
//! ```
//!
//! # Example - Generating content from a document
//!
//! ```no_run
//! use deckwright::generation::{ContentGenerator, GenerationOptions};
//!
//! # async fn run() -> deckwright::Result<()> {
//! // No provider: the deck is outlined offline from the document's headings
//! let generator = ContentGenerator::mock();
//! let request = generator
//!     .generate_from_document("notes/strategy.md", &GenerationOptions::default())
//!     .await?;
//! println!("{} slides on {}", request.slides.len(), request.topic);
//! # Ok(())
//! # }
//! ```

/// Units, colors, XML escaping and the crate error type
pub mod common;

/// OOXML package and PresentationML/DrawingML writer
pub mod ooxml;

/// Slide templates: the 16:9 grid and the classic 4:3 fallback
pub mod template;

/// Slide content and presentation request model
pub mod model;

/// Overlay geometry, chart typography and the color engine
pub mod layout;

/// LLM providers and JSON extraction from responses
pub mod llm;

/// Difference-line placement and annotation label text
pub mod annotate;

/// Document parsing and LLM-backed slide content generation
pub mod generation;

/// Deck generators and design helpers
pub mod skills;

/// High-level agent API
pub mod agent;

/// YAML application configuration
pub mod config;

pub use agent::SlideDeckAgent;
pub use common::{Error, Result};
pub use model::{GenerationResult, PresentationRequest, SlideContent, SlideType};
