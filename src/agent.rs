//! High-level entry point tying content, design and generation together.
//!
//! [`SlideDeckAgent`] picks a deck generator from a template name and offers
//! one call per way of authoring a deck: from a bare topic, from structured
//! content, or from a complete [`PresentationRequest`].
//!
//! # Examples
//!
//! ```no_run
//! use deckwright::agent::{SlideDeckAgent, TopicOptions};
//!
//! let agent = SlideDeckAgent::new("main");
//! let result = agent.create_presentation_from_topic(
//!     "Cloud Strategy",
//!     &TopicOptions {
//!         output_path: "out/cloud.pptx".to_string(),
//!         ..Default::default()
//!     },
//! );
//! assert!(result.success);
//! ```
use crate::model::{GenerationResult, PresentationRequest, SlideContent};
use crate::skills::design_optimizer::{self, ColorScheme};
use crate::skills::{
    AnnotationPass, ClassicSlideGenerator, MainSlideGenerator, SlideGenerator, StructuredContent,
    content_analyzer,
};
use crate::template::{TemplateKind, TemplateRegistry};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Template names rendered by the grid generator.
const MAIN_TEMPLATES: [&str; 2] = ["main", "default"];

const EXTENDED_TOPIC: &str = "Extended Presentation";

/// Options for [`SlideDeckAgent::create_presentation_from_topic`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopicOptions {
    pub num_slides: usize,
    pub output_path: String,
    /// Scheme name; suggested from the topic when unset
    pub color_scheme: Option<String>,
    pub author: Option<String>,
    pub company: Option<String>,
    /// Template for this deck only, overriding the agent's
    pub template: Option<String>,
}

impl Default for TopicOptions {
    fn default() -> Self {
        Self {
            num_slides: 10,
            output_path: "presentation.pptx".to_string(),
            color_scheme: None,
            author: None,
            company: None,
            template: None,
        }
    }
}

/// Generator for a template name. Unknown names use the classic defaults.
fn generator_for(registry: &TemplateRegistry, template: &str) -> Box<dyn SlideGenerator> {
    let template = template.to_lowercase();
    if MAIN_TEMPLATES.contains(&template.as_str()) {
        return Box::new(MainSlideGenerator::new());
    }
    match registry.get_template(&template).map(|t| &t.kind) {
        Some(TemplateKind::Classic(classic)) => Box::new(ClassicSlideGenerator::new(classic.clone())),
        _ => Box::new(ClassicSlideGenerator::default()),
    }
}

pub struct SlideDeckAgent {
    template: String,
    registry: TemplateRegistry,
    generator: Box<dyn SlideGenerator>,
    annotation_pass: Option<AnnotationPass>,
}

impl Default for SlideDeckAgent {
    fn default() -> Self {
        Self::new("default")
    }
}

impl SlideDeckAgent {
    /// Create an agent for `template`; `main` and `default` use the grid
    /// generator, anything else the classic one.
    pub fn new(template: &str) -> Self {
        Self::with_registry(template, TemplateRegistry::new())
    }

    /// Create an agent resolving classic templates from `registry`.
    pub fn with_registry(template: &str, registry: TemplateRegistry) -> Self {
        let template = template.to_lowercase();
        let generator = generator_for(&registry, &template);
        debug!("Agent using {} generator for template '{}'", generator.name(), template);
        Self {
            template,
            registry,
            generator,
            annotation_pass: None,
        }
    }

    /// Settle chart annotations with `pass` in
    /// [`create_settled_presentation`](Self::create_settled_presentation).
    pub fn with_annotation_pass(mut self, pass: AnnotationPass) -> Self {
        self.annotation_pass = Some(pass);
        self
    }

    /// Build a deck from the canned outline for `topic`.
    ///
    /// A color scheme is suggested from the topic unless one is given or the
    /// per-deck template is `main`, which carries its own palette.
    pub fn create_presentation_from_topic(&self, topic: &str, options: &TopicOptions) -> GenerationResult {
        let override_generator = options
            .template
            .as_deref()
            .map(|t| generator_for(&self.registry, t));
        let generator = override_generator.as_deref().unwrap_or(self.generator.as_ref());

        let own_palette = options
            .template
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("main"));

        let mut request = PresentationRequest::new(topic)
            .with_slides(content_analyzer::analyze_topic(topic, options.num_slides))
            .with_output_path(options.output_path.clone());
        request.template = options.template.clone().unwrap_or_else(|| self.template.clone());
        request.author = options.author.clone();
        request.company = options.company.clone();

        if !own_palette {
            let scheme = options
                .color_scheme
                .clone()
                .unwrap_or_else(|| design_optimizer::suggest_color_scheme(topic).to_string());
            debug!("Using color scheme '{}' for '{}'", scheme, topic);
            request = design_optimizer::apply_color_scheme(request, &scheme);
        }

        info!("Generating {} slides on '{}'", request.slides.len(), topic);
        generator.create_presentation(&request)
    }

    /// Build a deck from authored sections.
    pub fn create_presentation_from_content(
        &self,
        content: &StructuredContent,
        output_path: &str,
    ) -> GenerationResult {
        let topic = content.title.clone().unwrap_or_else(|| "Presentation".to_string());
        let mut request = PresentationRequest::new(topic)
            .with_slides(content_analyzer::structure_content(content))
            .with_output_path(output_path);
        request.template = self.template.clone();
        request.author = content.author.clone();
        request.company = content.company.clone();

        let scheme = content
            .color_scheme
            .as_deref()
            .unwrap_or(design_optimizer::DEFAULT_SCHEME);
        let request = design_optimizer::apply_color_scheme(request, scheme);
        self.generator.create_presentation(&request)
    }

    pub fn create_custom_presentation(&self, request: &PresentationRequest) -> GenerationResult {
        self.generator.create_presentation(request)
    }

    /// Render `request` after settling its chart annotations.
    ///
    /// Only the main template draws annotations; without an annotation pass
    /// or with a classic template this is
    /// [`create_custom_presentation`](Self::create_custom_presentation).
    pub async fn create_settled_presentation(&self, request: &PresentationRequest) -> GenerationResult {
        let Some(pass) = self
            .annotation_pass
            .as_ref()
            .filter(|_| self.generator.name() == "main")
        else {
            return self.create_custom_presentation(request);
        };
        let mut request = request.clone();
        pass.run(&mut request).await;
        self.generator.create_presentation(&request)
    }

    /// Write `new_slides` as a new deck.
    ///
    /// The existing file is not read; without `output_path` it is
    /// overwritten.
    pub fn add_slides_to_existing(
        &self,
        existing_path: &str,
        new_slides: Vec<SlideContent>,
        output_path: Option<&str>,
    ) -> GenerationResult {
        let mut request = PresentationRequest::new(EXTENDED_TOPIC)
            .with_slides(new_slides)
            .with_output_path(output_path.unwrap_or(existing_path));
        request.template = self.template.clone();
        self.generator.create_presentation(&request)
    }

    pub fn available_color_schemes(&self) -> Vec<&'static str> {
        design_optimizer::available_schemes()
    }

    /// Hex colors (`#RRGGBB`) of a scheme, keyed by role.
    pub fn color_scheme_preview(&self, name: &str) -> IndexMap<&'static str, String> {
        let scheme: &ColorScheme = design_optimizer::scheme_colors(name);
        [
            ("primary", scheme.primary),
            ("secondary", scheme.secondary),
            ("background", scheme.background),
            ("text", scheme.text),
            ("accent", scheme.accent),
        ]
        .into_iter()
        .map(|(role, color)| (role, format!("#{}", color.to_hex())))
        .collect()
    }

    pub fn available_templates(&self) -> Vec<String> {
        self.registry.list_templates()
    }

    pub fn current_template(&self) -> &str {
        &self.template
    }

    /// Problems with `request`, empty when it can be rendered.
    pub fn validate_presentation_request(&self, request: &PresentationRequest) -> Vec<String> {
        let mut errors = Vec::new();
        if request.topic.is_empty() {
            errors.push("Topic is required".to_string());
        }
        if request.slides.is_empty() {
            errors.push("At least one slide is required".to_string());
        }
        if request.output_path.is_empty() {
            errors.push("Output path is required".to_string());
        }
        let is_pptx = Path::new(&request.output_path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pptx"));
        if !is_pptx {
            errors.push("Output path must have .pptx extension".to_string());
        }
        if let Some(scheme) = &request.color_scheme
            && !design_optimizer::available_schemes().contains(&scheme.as_str())
        {
            errors.push(format!("Unknown color scheme '{scheme}'"));
        }
        errors
    }

    /// Save `request` as reusable JSON. Returns `false` on failure.
    pub fn save_presentation_template(&self, request: &PresentationRequest, path: &str) -> bool {
        match request.save(path) {
            Ok(()) => {
                info!("Saved presentation template to {}", path);
                true
            },
            Err(e) => {
                warn!("Failed to save presentation template to {}: {e}", path);
                false
            },
        }
    }

    /// Load a request saved with [`save_presentation_template`](Self::save_presentation_template).
    pub fn load_presentation_template(&self, path: &str) -> Option<PresentationRequest> {
        PresentationRequest::load(path)
            .inspect_err(|e| warn!("Failed to load presentation template from {}: {e}", path))
            .ok()
    }
}
