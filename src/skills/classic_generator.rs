//! Deck generator for the classic 4:3 template.
//!
//! Slides are laid out in inches on a 10" x 7.5" canvas and colored from a
//! named [`ColorScheme`]. Unlike the `main` template no title or closing
//! slide is added: the request's slides are rendered as given.
use crate::common::unit::inches_to_emu;
use crate::common::{RGBColor, Result};
use crate::model::{GenerationResult, PresentationRequest, SlideContent, SlideType};
use crate::ooxml::drawing::FontStyle;
use crate::ooxml::pptx::{Alignment, Anchor, Bounds, MutablePresentation, MutableSlide, Paragraph, TextFrame};
use crate::skills::SlideGenerator;
use crate::skills::design_optimizer::{self, ColorScheme};
use crate::template::ClassicTemplate;
use tracing::{info, warn};

const SLIDE_WIDTH_IN: f64 = 10.0;
const SLIDE_HEIGHT_IN: f64 = 7.5;

/// Subtitle grey on colored backgrounds.
const MUTED_WHITE: RGBColor = RGBColor::new(0xE6, 0xE6, 0xE6);

const PARAGRAPH_SPACE_PT: f64 = 12.0;

fn inches(x: f64, y: f64, width: f64, height: f64) -> Bounds {
    Bounds::new(
        inches_to_emu(x),
        inches_to_emu(y),
        inches_to_emu(width),
        inches_to_emu(height),
    )
}

/// Generator for the classic template.
#[derive(Debug, Clone, Default)]
pub struct ClassicSlideGenerator {
    template: ClassicTemplate,
}

impl ClassicSlideGenerator {
    pub fn new(template: ClassicTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &ClassicTemplate {
        &self.template
    }

    /// Build the deck for `request` without saving it.
    pub fn build(&self, request: &PresentationRequest) -> Result<MutablePresentation> {
        let scheme = design_optimizer::scheme_colors(
            request
                .color_scheme
                .as_deref()
                .unwrap_or(design_optimizer::DEFAULT_SCHEME),
        );

        let mut pres = MutablePresentation::new();
        pres.set_slide_size(inches_to_emu(SLIDE_WIDTH_IN), inches_to_emu(SLIDE_HEIGHT_IN));
        let props = pres.core_properties_mut();
        props.title = Some(request.topic.clone());
        props.author = request.author.clone();
        props.category = request.company.clone();

        let painter = Painter {
            scheme,
            typeface: &self.template.font,
        };
        for content in &request.slides {
            let slide = pres.add_slide();
            painter.paint(slide, content);
            if let Some(notes) = content.notes.as_deref().filter(|n| !n.is_empty()) {
                slide.set_notes(notes);
            }
        }
        Ok(pres)
    }
}

impl SlideGenerator for ClassicSlideGenerator {
    fn name(&self) -> &str {
        "classic"
    }

    fn create_presentation(&self, request: &PresentationRequest) -> GenerationResult {
        let written = self.build(request).and_then(|pres| {
            pres.save(&request.output_path)?;
            Ok(())
        });
        match written {
            Ok(()) => {
                info!(
                    "Saved {} slides to {}",
                    request.slides.len(),
                    request.output_path
                );
                let mut result = GenerationResult::succeeded(request.output_path.clone(), request.slides.len())
                    .with_metadata("topic", request.topic.clone())
                    .with_metadata("template", request.template.clone());
                if let Some(author) = &request.author {
                    result = result.with_metadata("author", author.clone());
                }
                result
            },
            Err(e) => {
                warn!("Presentation generation failed: {e}");
                let mut result = GenerationResult::failed(e.to_string(), None);
                if let Ok(json) = request.to_json() {
                    result = result.with_metadata("request", json);
                }
                result
            },
        }
    }
}

/// Draws slide layouts in one color scheme and typeface.
struct Painter<'a> {
    scheme: &'a ColorScheme,
    typeface: &'a str,
}

impl Painter<'_> {
    fn font(&self, size_pt: f64, color: RGBColor) -> FontStyle {
        FontStyle::new(self.typeface, size_pt, color)
    }

    fn paint(&self, slide: &mut MutableSlide, content: &SlideContent) {
        match content.slide_type {
            SlideType::Title => self.title_slide(slide, content),
            SlideType::StandardContent => {
                if content.left_content.is_some() || content.right_content.is_some() {
                    self.two_column_slide(slide, content);
                } else if content.bullet_points.as_ref().is_some_and(|b| !b.is_empty()) {
                    self.bullet_slide(slide, content);
                } else {
                    self.title_content_slide(slide, content);
                }
            },
            SlideType::SectionHeader => self.section_header_slide(slide, content),
            SlideType::Quote => self.quote_slide(slide, content),
            SlideType::ThankYou => self.thank_you_slide(slide, content),
            SlideType::Blank => {},
        }
    }

    fn title_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        slide.set_background(self.scheme.primary);
        let title = content.title.as_deref().unwrap_or("Untitled Presentation");
        let frame = TextFrame::with_text(title, self.font(54.0, RGBColor::WHITE).bold(true))
            .align(Alignment::Center)
            .wrap(true);
        slide.add_text_box(inches(1.0, 2.5, 8.0, 1.5), frame);

        if let Some(subtitle) = &content.subtitle {
            let frame = TextFrame::with_text(subtitle, self.font(24.0, MUTED_WHITE))
                .align(Alignment::Center)
                .wrap(true);
            slide.add_text_box(inches(1.0, 4.2, 8.0, 1.0), frame);
        }
    }

    /// Slide title in the primary color across the top.
    fn heading(&self, slide: &mut MutableSlide, content: &SlideContent) {
        let title = content.title.as_deref().unwrap_or_default();
        let frame = TextFrame::with_text(title, self.font(36.0, self.scheme.primary).bold(true)).wrap(true);
        slide.add_text_box(inches(0.5, 0.5, 9.0, 0.8), frame);
    }

    fn title_content_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        self.heading(slide, content);
        slide.add_rectangle(inches(0.5, 1.4, 9.0, 0.02), self.scheme.secondary);

        let text = content.content.as_deref().unwrap_or_default();
        let frame = TextFrame::new()
            .push(Paragraph::text(text, self.font(18.0, self.scheme.text)).space_after(PARAGRAPH_SPACE_PT))
            .anchor(Anchor::Top)
            .wrap(true);
        slide.add_text_box(inches(0.7, 2.0, 8.6, 5.0), frame);
    }

    fn two_column_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        self.heading(slide, content);
        let font = self.font(16.0, self.scheme.text);
        for (x, text) in [(0.7, &content.left_content), (5.2, &content.right_content)] {
            let frame = TextFrame::with_text(text.as_deref().unwrap_or_default(), font.clone()).wrap(true);
            slide.add_text_box(inches(x, 2.0, 4.1, 5.0), frame);
        }
    }

    fn bullet_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        self.heading(slide, content);
        let font = self.font(20.0, self.scheme.text);
        let frame = content
            .bullet_points
            .iter()
            .flatten()
            .fold(TextFrame::new().wrap(true), |frame, bullet| {
                frame.push(Paragraph::text(bullet.as_str(), font.clone()).space_after(PARAGRAPH_SPACE_PT))
            });
        slide.add_text_box(inches(0.7, 2.0, 8.6, 5.0), frame);
    }

    fn section_header_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        slide.set_background(self.scheme.secondary);
        let title = content.title.as_deref().unwrap_or_default();
        let frame = TextFrame::with_text(title, self.font(48.0, RGBColor::WHITE).bold(true))
            .align(Alignment::Center)
            .wrap(true);
        slide.add_text_box(inches(1.0, 3.0, 8.0, 1.5), frame);
    }

    fn quote_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        let quote = content
            .quote_text
            .as_deref()
            .map(|q| format!("\"{q}\""))
            .unwrap_or_default();
        let frame = TextFrame::with_text(&quote, self.font(28.0, self.scheme.text).italic(true))
            .align(Alignment::Center)
            .wrap(true);
        slide.add_text_box(inches(1.5, 2.5, 7.0, 2.0), frame);

        if let Some(author) = &content.quote_author {
            let frame = TextFrame::with_text(&format!("\u{2014} {author}"), self.font(20.0, self.scheme.secondary))
                .align(Alignment::Center);
            slide.add_text_box(inches(1.5, 5.0, 7.0, 0.5), frame);
        }
    }

    fn thank_you_slide(&self, slide: &mut MutableSlide, content: &SlideContent) {
        slide.set_background(self.scheme.primary);
        let title = content.title.as_deref().unwrap_or("Thank You");
        let frame = TextFrame::with_text(title, self.font(54.0, RGBColor::WHITE).bold(true))
            .align(Alignment::Center)
            .wrap(true);
        slide.add_text_box(inches(1.0, 3.0, 8.0, 1.5), frame);

        if let Some(subtitle) = &content.subtitle {
            let frame = TextFrame::with_text(subtitle, self.font(20.0, MUTED_WHITE))
                .align(Alignment::Center)
                .wrap(true);
            slide.add_text_box(inches(1.0, 5.0, 8.0, 0.8), frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(slides: Vec<SlideContent>) -> PresentationRequest {
        let mut request = PresentationRequest::new("Quarterly Review").with_slides(slides);
        request.template = "default".to_string();
        request.color_scheme = Some("ocean_blue".to_string());
        request
    }

    #[test]
    fn test_layout_dispatch() {
        let mut two_column = SlideContent::new(SlideType::StandardContent).with_title("Compare");
        two_column.left_content = Some("Before".to_string());
        two_column.right_content = Some("After".to_string());
        let slides = vec![
            SlideContent::new(SlideType::Title).with_subtitle("Q3"),
            SlideContent::new(SlideType::StandardContent)
                .with_title("Body")
                .with_content("Plain text"),
            SlideContent::new(SlideType::StandardContent)
                .with_title("List")
                .with_bullets(["A", "B"]),
            two_column,
        ];
        let pres = ClassicSlideGenerator::default().build(&request(slides)).unwrap();

        assert_eq!(pres.slide_count(), 4);
        assert_eq!(pres.slide_width(), 9_144_000);
        let slides = pres.slides();
        assert_eq!(slides[0].texts(), vec!["Untitled Presentation", "Q3"]);
        // Title, rule and body
        assert_eq!(slides[1].shape_count(), 3);
        assert_eq!(slides[1].texts(), vec!["Body", "Plain text"]);
        assert_eq!(slides[2].texts(), vec!["List", "A\nB"]);
        assert_eq!(slides[3].texts(), vec!["Compare", "Before", "After"]);
    }

    #[test]
    fn test_scheme_colors_backgrounds() {
        let slides = vec![
            SlideContent::new(SlideType::Title).with_title("Deck"),
            SlideContent::new(SlideType::SectionHeader).with_title("Part"),
            SlideContent::new(SlideType::ThankYou),
            SlideContent::new(SlideType::Blank),
        ];
        let pres = ClassicSlideGenerator::default().build(&request(slides)).unwrap();
        let ocean = design_optimizer::scheme_colors("ocean_blue");
        let slides = pres.slides();
        assert_eq!(slides[0].background(), Some(ocean.primary));
        assert_eq!(slides[1].background(), Some(ocean.secondary));
        assert_eq!(slides[2].texts(), vec!["Thank You"]);
        assert_eq!(slides[3].shape_count(), 0);
    }

    #[test]
    fn test_quote_attribution() {
        let mut quote = SlideContent::new(SlideType::Quote);
        quote.quote_text = Some("Less is more".to_string());
        quote.quote_author = Some("Mies".to_string());
        quote.notes = Some("Pause here".to_string());
        let pres = ClassicSlideGenerator::default().build(&request(vec![quote])).unwrap();
        let slide = &pres.slides()[0];
        assert_eq!(slide.texts(), vec!["\"Less is more\"", "— Mies"]);
        assert_eq!(slide.notes(), Some("Pause here"));
    }

    #[test]
    fn test_create_presentation_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("classic.pptx");
        let mut request = request(vec![SlideContent::new(SlideType::Title).with_title("Deck")])
            .with_output_path(path.to_string_lossy());
        request.author = Some("Sam".to_string());

        let result = ClassicSlideGenerator::default().create_presentation(&request);
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.slide_count, 1);
        assert!(path.exists());
        assert_eq!(result.metadata["topic"], "Quarterly Review");
        assert_eq!(result.metadata["template"], "default");
        assert_eq!(result.metadata["author"], "Sam");
    }
}
