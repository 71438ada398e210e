//! Deck content from documents, prompts and draft text.
use super::{document_parser, mock, prompts};
use crate::common::error::Result;
use crate::llm::{CompletionRequest, LlmError, LlmProvider, json};
use crate::model::{ChartData, PresentationRequest, SlideContent, SlideType};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DECK_MAX_TOKENS: u32 = 4096;
const DECK_TEMPERATURE: f32 = 0.7;
const REFINE_MAX_TOKENS: u32 = 1024;

/// Output path of requests built from generated content.
pub const GENERATED_OUTPUT_PATH: &str = "generated_presentation.pptx";

// ============================================================================
// Generated deck
// ============================================================================

/// Deck as returned by the model (or the offline generator).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedDeck {
    pub presentation_title: String,
    pub subtitle: String,
    pub slides: Vec<GeneratedSlide>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedSlide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_number: Option<usize>,
    /// Storyline role such as `problem` or `recommendation`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub bullet_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_chart")]
    pub chart_data: Option<ChartData>,
}

/// Malformed chart data drops the chart, not the slide.
fn lenient_chart<'de, D>(deserializer: D) -> std::result::Result<Option<ChartData>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(chart) => Some(chart),
        Err(e) => {
            warn!("Dropping unreadable chart data: {e}");
            None
        },
    }))
}

impl GeneratedDeck {
    /// Turn the generated slides into content slides.
    pub fn to_slide_contents(&self) -> Vec<SlideContent> {
        self.slides
            .iter()
            .map(|slide| SlideContent {
                slide_type: SlideType::StandardContent,
                title: Some(
                    slide
                        .title
                        .clone()
                        .unwrap_or_else(|| "Untitled Slide".to_string()),
                ),
                bullet_points: Some(slide.bullet_points.clone()),
                chart_data: slide.chart_data.clone(),
                ..Default::default()
            })
            .collect()
    }
}

// ============================================================================
// Options
// ============================================================================

/// Parameters of a document-to-deck run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub presentation_type: String,
    pub max_slides: usize,
    pub audience: String,
    pub duration_minutes: u32,
    /// Overrides the generated presentation title
    pub title: Option<String>,
    /// Overrides the generated subtitle
    pub company: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            presentation_type: prompts::DEFAULT_PRESENTATION_TYPE.to_string(),
            max_slides: 15,
            audience: "investors".to_string(),
            duration_minutes: 15,
            title: None,
            company: None,
        }
    }
}

#[derive(Deserialize)]
struct RefinedTitle {
    refined_title: Option<String>,
}

#[derive(Deserialize)]
struct RefinedBullets {
    refined_bullets: Option<Vec<String>>,
}

// ============================================================================
// Generator
// ============================================================================

/// Builds presentation requests from source material.
///
/// Without a provider every operation runs offline: canned decks for known
/// documents, a heuristic outline otherwise.
#[derive(Clone, Default)]
pub struct ContentGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl ContentGenerator {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }

    /// Generator that never calls a model.
    pub fn mock() -> Self {
        Self::default()
    }

    pub fn is_mock(&self) -> bool {
        self.provider.is_none()
    }

    /// Generate a complete request from a file path or raw text.
    ///
    /// # Arguments
    ///
    /// * `source` - Path to a `.txt`/`.md` file, or the document text itself
    /// * `options` - Presentation type, length, audience and title overrides
    ///
    /// # Errors
    ///
    /// Returns parse errors for unreadable sources and [`crate::Error::Llm`]
    /// when the model call or its JSON fails.
    pub async fn generate_from_document(
        &self,
        source: &str,
        options: &GenerationOptions,
    ) -> Result<PresentationRequest> {
        let content = document_parser::parse(source)?;
        debug!(
            words = document_parser::word_count(&content),
            presentation_type = %options.presentation_type,
            "Generating deck content"
        );
        let deck = self.generate_deck(&content, options).await?;
        info!(slides = deck.slides.len(), "Generated deck content");

        let mut request = PresentationRequest::new(
            options
                .title
                .clone()
                .or_else(|| Some(deck.presentation_title.clone()).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| "Presentation".to_string()),
        );
        request.company = options
            .company
            .clone()
            .or_else(|| Some(deck.subtitle.clone()).filter(|s| !s.is_empty()));
        request.slides = deck.to_slide_contents();
        request.output_path = GENERATED_OUTPUT_PATH.to_string();
        Ok(request)
    }

    /// Generate a request from a topic and its key points.
    ///
    /// The presentation title is always `topic`.
    pub async fn generate_from_prompt(
        &self,
        topic: &str,
        key_points: &[String],
        options: &GenerationOptions,
    ) -> Result<PresentationRequest> {
        let mut content = format!("Topic: {topic}\n\nKey Points:\n");
        for point in key_points {
            content.push_str("• ");
            content.push_str(point);
            content.push('\n');
        }
        let options = GenerationOptions {
            title: Some(topic.to_string()),
            ..options.clone()
        };
        self.generate_from_document(&content, &options).await
    }

    async fn generate_deck(&self, content: &str, options: &GenerationOptions) -> Result<GeneratedDeck> {
        let Some(provider) = &self.provider else {
            return mock::mock_generate(content, options.max_slides);
        };
        let prompt = prompts::full_presentation_prompt(
            content,
            &options.presentation_type,
            options.max_slides,
            &options.audience,
            options.duration_minutes,
        );
        let request = CompletionRequest::new(prompts::SYSTEM_PROMPT, prompt)
            .max_tokens(DECK_MAX_TOKENS)
            .temperature(DECK_TEMPERATURE);
        let text = provider.complete(&request).await?;
        Ok(json::parse_lenient(&text)?)
    }

    /// Make a draft title more insight-driven.
    ///
    /// Offline this only capitalizes the title and marks titles without
    /// closing punctuation; a failed model call keeps the draft.
    pub async fn refine_title(&self, draft_title: &str, slide_type: &str) -> String {
        let Some(provider) = &self.provider else {
            return mock_refine_title(draft_title);
        };
        let prompt = prompts::title_refinement_prompt(draft_title, slide_type);
        let result: std::result::Result<RefinedTitle, LlmError> = async {
            let request = CompletionRequest::new(prompts::SYSTEM_PROMPT, prompt)
                .max_tokens(REFINE_MAX_TOKENS)
                .temperature(DECK_TEMPERATURE);
            json::parse_lenient(&provider.complete(&request).await?)
        }
        .await;
        match result {
            Ok(RefinedTitle {
                refined_title: Some(title),
            }) => title,
            Ok(_) => draft_title.to_string(),
            Err(e) => {
                warn!("Title refinement failed, keeping draft: {e}");
                draft_title.to_string()
            },
        }
    }

    /// Tighten bullets under `title`.
    pub async fn refine_bullets(&self, bullets: &[String], title: &str) -> Vec<String> {
        let Some(provider) = &self.provider else {
            return mock_refine_bullets(bullets);
        };
        let prompt = prompts::bullet_refinement_prompt(bullets, title);
        let result: std::result::Result<RefinedBullets, LlmError> = async {
            let request = CompletionRequest::new(prompts::SYSTEM_PROMPT, prompt)
                .max_tokens(REFINE_MAX_TOKENS)
                .temperature(DECK_TEMPERATURE);
            json::parse_lenient(&provider.complete(&request).await?)
        }
        .await;
        match result {
            Ok(RefinedBullets {
                refined_bullets: Some(refined),
            }) => refined,
            Ok(_) => bullets.to_vec(),
            Err(e) => {
                warn!("Bullet refinement failed, keeping input: {e}");
                bullets.to_vec()
            },
        }
    }
}

fn mock_refine_title(draft_title: &str) -> String {
    let mut chars = draft_title.chars();
    let mut title = match chars.next() {
        Some(first) if !first.is_uppercase() => {
            let mut capitalized: String = first.to_uppercase().collect();
            capitalized.push_str(&chars.as_str().to_lowercase());
            capitalized
        },
        _ => draft_title.to_string(),
    };
    if !title.contains(['.', '!', '?']) {
        let trimmed = title.trim_end().len();
        title.truncate(trimmed);
        title.push_str(" - key insight");
    }
    title
}

fn mock_refine_bullets(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .map(|b| b.trim().trim_end_matches('.').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: std::result::Result<String, LlmError>,
        prompts: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedProvider {
        fn new(reply: std::result::Result<&str, LlmError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-1"
        }

        async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, LlmError> {
            self.prompts.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn test_mock_document_generation() {
        let generator = ContentGenerator::mock();
        let request = generator
            .generate_from_document("Retail e-commerce expansion", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(request.topic, "Retail Digital Transformation");
        assert_eq!(request.company.as_deref(), Some("BCG Strategy Update"));
        assert_eq!(request.output_path, GENERATED_OUTPUT_PATH);
        assert_eq!(request.slides.len(), 10);
        assert!(request.slides.iter().all(|s| s.slide_type == SlideType::StandardContent));
        assert!(request.slides[0].chart_data.is_some());
    }

    #[tokio::test]
    async fn test_overrides_win() {
        let options = GenerationOptions {
            title: Some("Board Update".to_string()),
            company: Some("Acme".to_string()),
            max_slides: 2,
            ..Default::default()
        };
        let request = ContentGenerator::mock()
            .generate_from_document("tesla and spacex", &options)
            .await
            .unwrap();
        assert_eq!(request.topic, "Board Update");
        assert_eq!(request.company.as_deref(), Some("Acme"));
        assert_eq!(request.slides.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_from_prompt_forces_topic() {
        let points = vec![
            "Key growth driver is mobile".to_string(),
            "Main risk is churn".to_string(),
        ];
        let request = ContentGenerator::mock()
            .generate_from_prompt("Quarterly Review", &points, &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(request.topic, "Quarterly Review");
        assert!(request.company.is_none());
        assert!(!request.slides.is_empty());
    }

    #[tokio::test]
    async fn test_llm_generation() {
        let reply = r#"Here you go:
{"presentation_title": "Deck", "subtitle": "", "slides": [
  {"slide_number": 1, "title": "Costs fell", "bullet_points": ["a"],
   "chart_data": {"type": "column", "categories": ["A"], "series": [{"name": "S", "values": [1]}]}},
  {"slide_number": 2, "bullet_points": [], "chart_data": {"type": "column", "series": "broken"}}
]}"#;
        let provider = CannedProvider::new(Ok(reply));
        let generator = ContentGenerator::new(Some(provider.clone()));
        let request = generator
            .generate_from_document("Plain notes about costs", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(request.topic, "Deck");
        assert!(request.company.is_none());
        assert_eq!(request.slides[0].title.as_deref(), Some("Costs fell"));
        assert!(request.slides[0].chart_data.is_some());
        assert_eq!(request.slides[1].title.as_deref(), Some("Untitled Slide"));
        assert!(request.slides[1].chart_data.is_none());

        let sent = provider.prompts.lock().unwrap();
        assert_eq!(sent[0].max_tokens, DECK_MAX_TOKENS);
        assert_eq!(sent[0].temperature, DECK_TEMPERATURE);
        assert!(sent[0].prompt.contains("Plain notes about costs"));
    }

    #[tokio::test]
    async fn test_llm_errors_propagate() {
        let provider = CannedProvider::new(Err(LlmError::RateLimit("slow down".to_string())));
        let generator = ContentGenerator::new(Some(provider));
        let err = generator
            .generate_from_document("anything", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Llm(LlmError::RateLimit(_))));
    }

    #[tokio::test]
    async fn test_mock_refinement() {
        let generator = ContentGenerator::mock();
        assert_eq!(
            generator.refine_title("market OVERVIEW ", "content").await,
            "Market overview - key insight"
        );
        assert_eq!(generator.refine_title("Costs fell 20%.", "content").await, "Costs fell 20%.");
        let bullets = vec![" First point. ".to_string(), "Second".to_string()];
        assert_eq!(
            generator.refine_bullets(&bullets, "Title").await,
            vec!["First point", "Second"]
        );
    }

    #[tokio::test]
    async fn test_llm_refinement_defaults() {
        let provider = CannedProvider::new(Ok(r#"{"refined_title": "Costs fell 20% in Q3"}"#));
        let generator = ContentGenerator::new(Some(provider));
        assert_eq!(generator.refine_title("costs", "content").await, "Costs fell 20% in Q3");
        let bullets = vec!["keep".to_string()];
        assert_eq!(generator.refine_bullets(&bullets, "t").await, bullets);

        let failing = ContentGenerator::new(Some(CannedProvider::new(Err(LlmError::Network(
            "down".to_string(),
        )))));
        assert_eq!(failing.refine_title("draft", "content").await, "draft");
    }
}
