//! Slide skeletons for a topic, and structuring of authored content.
use crate::model::{SlideContent, SlideType};
use serde::{Deserialize, Serialize};

/// Authored deck content: a title, sections and an optional closing slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredContent {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub sections: Vec<ContentSection>,
    pub closing: Option<Closing>,
    pub author: Option<String>,
    pub company: Option<String>,
    pub color_scheme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    /// Adds a section header slide before the section
    pub header: Option<String>,
    pub title: Option<String>,
    pub bullets: Vec<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closing {
    #[serde(default = "default_closing_title")]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

fn default_closing_title() -> String {
    "Thank You".to_string()
}

pub const DEFAULT_MAX_CHARS: usize = 500;

fn with_notes(slide: SlideContent, notes: &str) -> SlideContent {
    SlideContent {
        notes: Some(notes.to_string()),
        ..slide
    }
}

/// A generic ten-slide outline for `topic`, cut to `num_slides`.
pub fn analyze_topic(topic: &str, num_slides: usize) -> Vec<SlideContent> {
    let mut slides = vec![
        with_notes(
            SlideContent::new(SlideType::Title)
                .with_title(topic)
                .with_subtitle("A Comprehensive Overview"),
            "Introduction slide - set the stage for the presentation",
        ),
        with_notes(
            SlideContent::new(SlideType::StandardContent)
                .with_title("Agenda")
                .with_bullets([
                    "Introduction and Background",
                    "Key Concepts and Principles",
                    "Current State and Challenges",
                    "Solutions and Recommendations",
                    "Next Steps and Conclusion",
                ]),
            "Outline what will be covered in the presentation",
        ),
        SlideContent::new(SlideType::SectionHeader).with_title("Introduction & Background"),
        with_notes(
            SlideContent::new(SlideType::StandardContent)
                .with_title("Background")
                .with_content(
                    "Provide context and background information about the topic. \
                     Explain why this topic is important and relevant to the audience.",
                ),
            "Establish foundation and context for the presentation",
        ),
        SlideContent::new(SlideType::SectionHeader).with_title("Key Concepts"),
        with_notes(
            SlideContent {
                left_content: Some(
                    "Concept 1:\nExplain the first key concept or principle that is \
                     fundamental to understanding this topic."
                        .to_string(),
                ),
                right_content: Some(
                    "Concept 2:\nExplain the second key concept or principle that \
                     complements the first one."
                        .to_string(),
                ),
                ..SlideContent::new(SlideType::StandardContent).with_title("Core Principles")
            },
            "Break down complex concepts into digestible parts",
        ),
        with_notes(
            SlideContent::new(SlideType::StandardContent)
                .with_title("Key Points")
                .with_bullets([
                    "First important point about the topic",
                    "Second critical aspect to consider",
                    "Third essential element",
                    "Fourth supporting detail",
                ]),
            "Main content - adjust based on your specific topic",
        ),
        with_notes(
            SlideContent {
                quote_text: Some(
                    "Insert a relevant, impactful quote that reinforces your message".to_string(),
                ),
                quote_author: Some("Author Name".to_string()),
                ..SlideContent::new(SlideType::Quote)
            },
            "Use quotes to add credibility and emphasize key messages",
        ),
        with_notes(
            SlideContent::new(SlideType::StandardContent)
                .with_title("Next Steps")
                .with_bullets([
                    "Immediate action item #1",
                    "Short-term goal #2",
                    "Long-term objective #3",
                ]),
            "Clear actionable items for the audience",
        ),
        with_notes(
            SlideContent::new(SlideType::ThankYou)
                .with_title("Thank You")
                .with_subtitle("Questions & Discussion"),
            "Open floor for questions and discussion",
        ),
    ];
    slides.truncate(num_slides);
    slides
}

/// Lay authored content out as slides.
///
/// Sections become an optional header slide plus a bullet slide, or a text
/// slide when they have no bullets. Empty sections produce no content slide.
pub fn structure_content(content: &StructuredContent) -> Vec<SlideContent> {
    let mut slides = Vec::new();

    if let Some(title) = &content.title {
        slides.push(SlideContent {
            subtitle: content.subtitle.clone(),
            ..SlideContent::new(SlideType::Title).with_title(title)
        });
    }

    for section in &content.sections {
        if let Some(header) = section.header.as_deref().filter(|h| !h.is_empty()) {
            slides.push(SlideContent::new(SlideType::SectionHeader).with_title(header));
        }
        let body = SlideContent {
            title: section.title.clone(),
            ..SlideContent::new(SlideType::StandardContent)
        };
        if !section.bullets.is_empty() {
            slides.push(body.with_bullets(section.bullets.iter().cloned()));
        } else if let Some(text) = section.content.as_deref().filter(|c| !c.is_empty()) {
            slides.push(body.with_content(text));
        }
    }

    if let Some(closing) = &content.closing {
        slides.push(SlideContent {
            subtitle: closing.subtitle.clone(),
            ..SlideContent::new(SlideType::ThankYou).with_title(&closing.title)
        });
    }

    slides
}

/// Break long prose into chunks of roughly `max_chars`, at sentence ends.
///
/// Every sentence is re-terminated with `". "` before the chunk is trimmed.
pub fn split_long_content(content: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in content.split(". ") {
        if current.chars().count() + sentence.chars().count() < max_chars {
            current.push_str(sentence);
            current.push_str(". ");
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = format!("{sentence}. ");
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim().to_string());
    }
    chunks
}

/// One bullet per non-empty line, without list markers or numbering.
pub fn extract_bullet_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            let bullet = if let Some(rest) = ["- ", "* ", "• ", "→ "]
                .iter()
                .find_map(|marker| line.strip_prefix(marker))
            {
                rest.trim()
            } else if line.starts_with(|c: char| c.is_ascii_digit())
                && let Some((_, rest)) = line.split_once(". ")
            {
                rest.trim()
            } else {
                line
            };
            (!bullet.is_empty()).then(|| bullet.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_topic_skeleton() {
        let slides = analyze_topic("Remote Work", 10);
        let types: Vec<_> = slides.iter().map(|s| s.slide_type).collect();
        assert_eq!(
            types,
            [
                SlideType::Title,
                SlideType::StandardContent,
                SlideType::SectionHeader,
                SlideType::StandardContent,
                SlideType::SectionHeader,
                SlideType::StandardContent,
                SlideType::StandardContent,
                SlideType::Quote,
                SlideType::StandardContent,
                SlideType::ThankYou,
            ]
        );
        assert_eq!(slides[0].title.as_deref(), Some("Remote Work"));
        assert!(slides[5].left_content.as_deref().unwrap().starts_with("Concept 1:\n"));
        assert_eq!(slides[7].quote_author.as_deref(), Some("Author Name"));
        assert!(slides[2].notes.is_none());

        assert_eq!(analyze_topic("Remote Work", 4).len(), 4);
        assert_eq!(analyze_topic("Remote Work", 50).len(), 10);
    }

    #[test]
    fn test_structure_content() {
        let content: StructuredContent = serde_json::from_str(
            r#"{
                "title": "My Presentation",
                "subtitle": "Overview",
                "sections": [
                    {"header": "Introduction", "title": "Background", "content": "Some text"},
                    {"title": "Key Points", "bullets": ["One", "Two"]},
                    {"title": "Empty"}
                ],
                "closing": {"subtitle": "Questions?"}
            }"#,
        )
        .unwrap();
        let slides = structure_content(&content);
        assert_eq!(slides.len(), 5);
        assert_eq!(slides[0].subtitle.as_deref(), Some("Overview"));
        assert_eq!(slides[1].slide_type, SlideType::SectionHeader);
        assert_eq!(slides[2].content.as_deref(), Some("Some text"));
        assert_eq!(slides[3].bullet_points.as_ref().unwrap().len(), 2);
        assert_eq!(slides[4].title.as_deref(), Some("Thank You"));
        assert_eq!(slides[4].slide_type, SlideType::ThankYou);
    }

    #[test]
    fn test_structure_without_title_or_closing() {
        let content = StructuredContent {
            sections: vec![ContentSection {
                bullets: vec!["Only".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let slides = structure_content(&content);
        assert_eq!(slides.len(), 1);
        assert!(slides[0].title.is_none());
    }

    #[test]
    fn test_split_long_content() {
        assert_eq!(split_long_content("Short text. Another one.", 500), ["Short text. Another one.."]);

        let text = "First sentence here. Second sentence here. Third sentence here";
        let chunks = split_long_content(text, 30);
        assert_eq!(
            chunks,
            ["First sentence here.", "Second sentence here.", "Third sentence here."]
        );
        assert_eq!(split_long_content("", 10), ["."]);
    }

    #[test]
    fn test_extract_bullet_points() {
        let text = "- dash\n* star\n• dot\n→ arrow\n1. first\n12. twelfth\n\n  plain line  \n-\n";
        assert_eq!(
            extract_bullet_points(text),
            ["dash", "star", "dot", "arrow", "first", "twelfth", "plain line", "-"]
        );
    }
}
