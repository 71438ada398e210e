//! Offline deck generation.
//!
//! Two showcase documents map to canned decks; anything else is outlined
//! heuristically from its headings, bullets and keyword sentences.
use super::content_generator::{GeneratedDeck, GeneratedSlide};
use crate::common::error::Result;
use tracing::debug;

const ECOSYSTEM_BANK_DECK: &str = include_str!("resources/ecosystem_bank_deck.json");
const RETAIL_TRANSFORMATION_DECK: &str = include_str!("resources/retail_transformation_deck.json");

const BULLET_MARKERS: [char; 4] = ['•', '-', '*', '–'];
const KEYWORDS: [&str; 5] = ["key", "important", "main", "value", "benefit"];
const MAX_BULLETS_PER_SLIDE: usize = 4;
/// Keyword sentences stop being collected once a slide has this many bullets.
const MAX_KEYWORD_BULLETS: usize = 6;
/// Below this many outlined slides the document is chunked instead.
const MIN_OUTLINED_SLIDES: usize = 3;
const MAX_GENERIC_SLIDES: usize = 10;
const MIN_SENTENCE_CHARS: usize = 20;

/// Produce a deck without calling a model.
pub fn mock_generate(content: &str, max_slides: usize) -> Result<GeneratedDeck> {
    let lowered = content.to_lowercase();
    let mut deck = if lowered.contains("musk ecosystem bank")
        || (lowered.contains("tesla") && lowered.contains("spacex"))
    {
        debug!("using canned ecosystem bank deck");
        serde_json::from_str(ECOSYSTEM_BANK_DECK)?
    } else if lowered.contains("retail")
        && (lowered.contains("e-commerce") || lowered.contains("digital transformation"))
    {
        debug!("using canned retail transformation deck");
        serde_json::from_str(RETAIL_TRANSFORMATION_DECK)?
    } else {
        outline_content(content, max_slides)
    };
    deck.slides.truncate(max_slides);
    Ok(deck)
}

fn content_slide(number: usize, title: &str, bullets: &[String]) -> GeneratedSlide {
    GeneratedSlide {
        slide_number: Some(number),
        slide_type: Some("content".to_string()),
        title: Some(title.to_string()),
        bullet_points: bullets.iter().take(MAX_BULLETS_PER_SLIDE).cloned().collect(),
        chart_data: None,
    }
}

/// Outline a document from its headings (`#...` or lines ending in `:`),
/// bullet lines and keyword sentences.
fn outline_content(content: &str, max_slides: usize) -> GeneratedDeck {
    let mut slides = Vec::new();
    let mut title: Option<String> = None;
    let mut bullets: Vec<String> = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('#') || line.ends_with(':') {
            if let Some(t) = title.as_deref().filter(|t| !t.is_empty())
                && !bullets.is_empty()
                && slides.len() < max_slides
            {
                slides.push(content_slide(slides.len() + 1, t, &bullets));
                bullets.clear();
            }
            title = Some(
                line.trim_start_matches('#')
                    .trim_end_matches(':')
                    .trim()
                    .to_string(),
            );
        } else if line.starts_with(BULLET_MARKERS) {
            let bullet = line
                .trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c == ' ')
                .trim();
            if !bullet.is_empty() {
                bullets.push(bullet.to_string());
            }
        } else if KEYWORDS.iter().any(|kw| line.to_lowercase().contains(kw))
            && bullets.len() < MAX_KEYWORD_BULLETS
        {
            bullets.push(line.to_string());
        }
    }
    if let Some(t) = title.as_deref().filter(|t| !t.is_empty())
        && !bullets.is_empty()
        && slides.len() < max_slides
    {
        slides.push(content_slide(slides.len() + 1, t, &bullets));
    }

    if slides.len() < MIN_OUTLINED_SLIDES {
        slides = generic_slides(content, max_slides);
    }

    GeneratedDeck {
        presentation_title: slides
            .first()
            .and_then(|s| s.title.clone())
            .unwrap_or_else(|| "Presentation".to_string()),
        subtitle: String::new(),
        slides,
    }
}

/// Split the document into equal word chunks, one slide each.
fn generic_slides(content: &str, max_slides: usize) -> Vec<GeneratedSlide> {
    let count = max_slides.min(MAX_GENERIC_SLIDES);
    if count == 0 {
        return Vec::new();
    }
    let words: Vec<&str> = content.split_whitespace().collect();
    let chunk_size = words.len() / count;

    (0..count)
        .map(|i| {
            let start = (i * chunk_size).min(words.len());
            let end = (start + chunk_size).min(words.len());
            let chunk = words[start..end].join(" ");
            let mut sentences: Vec<String> = chunk
                .split('.')
                .map(str::trim)
                .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
                .map(str::to_string)
                .collect();
            if sentences.is_empty() {
                sentences.push("Content from source document".to_string());
            }
            content_slide(i + 1, &format!("Key Points - Part {}", i + 1), &sentences)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotation, ChartKind};

    #[test]
    fn test_ecosystem_bank_deck() {
        let deck = mock_generate("A bank for Tesla and SpaceX fans", 15).unwrap();
        assert_eq!(deck.presentation_title, "Musk Ecosystem Bank");
        assert_eq!(deck.slides.len(), 8);
        assert!(deck.slides.iter().all(|s| s.bullet_points.len() == 4));
    }

    #[test]
    fn test_retail_deck_has_charts() {
        let deck = mock_generate("Retail digital transformation plan", 15).unwrap();
        assert_eq!(deck.slides.len(), 10);
        assert_eq!(deck.subtitle, "BCG Strategy Update");

        let charts: Vec<_> = deck.slides.iter().filter_map(|s| s.chart_data.as_ref()).collect();
        assert_eq!(charts.len(), 8);
        assert!(charts.iter().any(|c| c.kind == ChartKind::Waterfall));
        assert!(charts.iter().any(|c| c.is_comparison()));
        let annotations: Vec<_> = charts.iter().flat_map(|c| c.annotations.iter()).collect();
        assert!(annotations.iter().any(|a| matches!(a, Annotation::CagrArrow { .. })));
        assert!(annotations.iter().any(|a| matches!(a, Annotation::DifferenceLine { .. })));
        assert!(annotations.iter().any(|a| matches!(a, Annotation::LeaderLine { .. })));
        assert!(annotations.iter().any(|a| matches!(a, Annotation::Callout { .. })));
    }

    #[test]
    fn test_canned_decks_truncate() {
        let deck = mock_generate("retail e-commerce", 3).unwrap();
        assert_eq!(deck.slides.len(), 3);
    }

    #[test]
    fn test_outline_from_headings() {
        let doc = "# Problem\n- Slow onboarding\n- Manual checks.\n\
                   # Solution\n• Self-serve flows\nThe key benefit is speed\n\
                   Market:\n* Large and growing\n\
                   # Empty heading\n";
        let deck = mock_generate(doc, 10).unwrap();
        assert_eq!(deck.presentation_title, "Problem");
        let titles: Vec<_> = deck.slides.iter().filter_map(|s| s.title.as_deref()).collect();
        assert_eq!(titles, ["Problem", "Solution", "Market"]);
        assert_eq!(deck.slides[0].bullet_points, ["Slow onboarding", "Manual checks."]);
        assert_eq!(
            deck.slides[1].bullet_points,
            ["Self-serve flows", "The key benefit is speed"]
        );
    }

    #[test]
    fn test_bullets_capped_at_four() {
        let doc = "# A\n- 1\n- 2\n- 3\n- 4\n- 5\n# B\n- x\n# C\n- y\n";
        let deck = mock_generate(doc, 10).unwrap();
        assert_eq!(deck.slides[0].bullet_points.len(), 4);
    }

    #[test]
    fn test_unstructured_text_is_chunked() {
        let sentence = "This sentence is comfortably longer than twenty characters. ";
        let doc = sentence.repeat(30);
        let deck = mock_generate(&doc, 4).unwrap();
        assert_eq!(deck.slides.len(), 4);
        assert_eq!(deck.slides[0].title.as_deref(), Some("Key Points - Part 1"));
        assert_eq!(deck.presentation_title, "Key Points - Part 1");
        assert!(!deck.slides[0].bullet_points.is_empty());
    }

    #[test]
    fn test_tiny_text_gets_placeholder_bullets() {
        let deck = mock_generate("hello", 2).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[1].bullet_points, ["Content from source document"]);
    }
}
