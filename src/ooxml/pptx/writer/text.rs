/// Text frames, paragraphs and runs for slide shapes.
use crate::common::RGBColor;
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::escape_xml;
use crate::ooxml::drawing::{FontStyle, write_run_props};
use std::fmt::{self, Write};

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn xml_value(&self) -> &'static str {
        match self {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
            Alignment::Justify => "just",
        }
    }
}

/// Vertical anchoring of text inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl Anchor {
    pub fn xml_value(&self) -> &'static str {
        match self {
            Anchor::Top => "t",
            Anchor::Middle => "ctr",
            Anchor::Bottom => "b",
        }
    }
}

/// How the frame reacts to overflowing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoFit {
    /// Resize the shape to fit its text
    #[default]
    ShapeToFit,
    /// Leave the shape size fixed
    None,
}

/// Character bullet (`a:buChar`).
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub character: char,
    /// Bullet size relative to the text, in thousandths of a percent
    pub size_pct: u32,
    pub color: RGBColor,
}

/// Internal margins of a text frame, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Default for Insets {
    /// DrawingML defaults: 0.1" left/right, 0.05" top/bottom.
    fn default() -> Self {
        Self {
            left: 91_440,
            right: 91_440,
            top: 45_720,
            bottom: 45_720,
        }
    }
}

impl Insets {
    pub fn zero() -> Self {
        Self {
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        }
    }

    pub fn horizontal(mut self, emu: i64) -> Self {
        self.left = emu;
        self.right = emu;
        self
    }

    pub fn vertical(mut self, emu: i64) -> Self {
        self.top = emu;
        self.bottom = emu;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: FontStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
    pub bullet: Option<Bullet>,
    /// `(marL, indent)` in EMUs; a negative indent gives a hanging bullet
    pub indent: Option<(i64, i64)>,
    pub space_after_pt: Option<f64>,
    /// Line spacing as a multiple of single spacing
    pub line_spacing: Option<f64>,
}

impl Paragraph {
    /// Paragraph with a single run.
    pub fn text(text: impl Into<String>, font: FontStyle) -> Self {
        Self {
            runs: vec![Run {
                text: text.into(),
                font,
            }],
            ..Default::default()
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn bullet(mut self, bullet: Bullet) -> Self {
        self.bullet = Some(bullet);
        self
    }

    pub fn indent(mut self, margin_left: i64, first_line: i64) -> Self {
        self.indent = Some((margin_left, first_line));
        self
    }

    pub fn space_after(mut self, pt: f64) -> Self {
        self.space_after_pt = Some(pt);
        self
    }

    pub fn line_spacing(mut self, multiple: f64) -> Self {
        self.line_spacing = Some(multiple);
        self
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn has_properties(&self) -> bool {
        self.alignment.is_some()
            || self.bullet.is_some()
            || self.indent.is_some()
            || self.space_after_pt.is_some()
            || self.line_spacing.is_some()
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> fmt::Result {
        xml.push_str("<a:p>");

        if self.has_properties() {
            xml.push_str("<a:pPr");
            if let Some((mar_l, indent)) = self.indent {
                write!(xml, r#" marL="{}" indent="{}""#, mar_l, indent)?;
            }
            if let Some(alignment) = self.alignment {
                write!(xml, r#" algn="{}""#, alignment.xml_value())?;
            }
            xml.push('>');

            if let Some(spacing) = self.line_spacing {
                write!(
                    xml,
                    r#"<a:lnSpc><a:spcPct val="{}"/></a:lnSpc>"#,
                    (spacing * 100_000.0).round() as u32
                )?;
            }
            if let Some(after) = self.space_after_pt {
                write!(
                    xml,
                    r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
                    pt_to_centipoints(after)
                )?;
            }
            match &self.bullet {
                Some(bullet) => {
                    xml.push_str("<a:buClr>");
                    write!(xml, r#"<a:srgbClr val="{}"/>"#, bullet.color.to_hex())?;
                    xml.push_str("</a:buClr>");
                    write!(xml, r#"<a:buSzPct val="{}"/>"#, bullet.size_pct)?;
                    xml.push_str(r#"<a:buFont typeface="Arial"/>"#);
                    write!(
                        xml,
                        r#"<a:buChar char="{}"/>"#,
                        escape_xml(&bullet.character.to_string())
                    )?;
                },
                None => xml.push_str("<a:buNone/>"),
            }
            xml.push_str("</a:pPr>");
        }

        for run in &self.runs {
            xml.push_str("<a:r>");
            write_run_props(xml, "a:rPr", &run.font)?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(&run.text))?;
            xml.push_str("</a:r>");
        }

        if let Some(last) = self.runs.last() {
            write_run_props(xml, "a:endParaRPr", &last.font)?;
        } else {
            xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#);
        }

        xml.push_str("</a:p>");
        Ok(())
    }
}

/// The text body of a shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
    pub anchor: Anchor,
    pub word_wrap: bool,
    pub insets: Option<Insets>,
    pub auto_fit: AutoFit,
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame holding `text`, one paragraph per line, all in `font`.
    pub fn with_text(text: &str, font: FontStyle) -> Self {
        let paragraphs = text
            .split('\n')
            .map(|line| Paragraph::text(line, font.clone()))
            .collect();
        Self {
            paragraphs,
            ..Default::default()
        }
    }

    pub fn push(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = Some(insets);
        self
    }

    pub fn auto_fit(mut self, auto_fit: AutoFit) -> Self {
        self.auto_fit = auto_fit;
        self
    }

    /// Apply an alignment to every paragraph.
    pub fn align(mut self, alignment: Alignment) -> Self {
        for p in &mut self.paragraphs {
            p.alignment = Some(alignment);
        }
        self
    }

    /// Text of the frame with paragraphs joined by newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> fmt::Result {
        xml.push_str("<p:txBody>");
        write!(
            xml,
            r#"<a:bodyPr wrap="{}" rtlCol="0" anchor="{}""#,
            if self.word_wrap { "square" } else { "none" },
            self.anchor.xml_value()
        )?;
        if let Some(insets) = self.insets {
            write!(
                xml,
                r#" lIns="{}" tIns="{}" rIns="{}" bIns="{}""#,
                insets.left, insets.top, insets.right, insets.bottom
            )?;
        }
        xml.push('>');
        match self.auto_fit {
            AutoFit::ShapeToFit => xml.push_str("<a:spAutoFit/>"),
            AutoFit::None => xml.push_str("<a:noAutofit/>"),
        }
        xml.push_str("</a:bodyPr>");
        xml.push_str("<a:lstStyle/>");

        if self.paragraphs.is_empty() {
            xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        }
        for paragraph in &self.paragraphs {
            paragraph.write_xml(xml)?;
        }

        xml.push_str("</p:txBody>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_font() -> FontStyle {
        FontStyle::new("Arial", 18.0, RGBColor::new(74, 74, 74))
    }

    #[test]
    fn test_with_text_splits_lines() {
        let frame = TextFrame::with_text("€28 savings\n(62% reduction)", body_font());
        assert_eq!(frame.paragraphs.len(), 2);
        assert_eq!(frame.plain_text(), "€28 savings\n(62% reduction)");
    }

    #[test]
    fn test_bullet_paragraph_xml() {
        let p = Paragraph::text("Grow online share", body_font())
            .align(Alignment::Justify)
            .indent(304_800, -190_500)
            .space_after(12.0)
            .bullet(Bullet {
                character: '\u{2022}',
                size_pct: 85_000,
                color: RGBColor::new(20, 123, 88),
            });
        let mut xml = String::new();
        p.write_xml(&mut xml).unwrap();

        assert!(xml.contains(r#"<a:pPr marL="304800" indent="-190500" algn="just">"#));
        assert!(xml.contains(r#"<a:spcAft><a:spcPts val="1200"/></a:spcAft>"#));
        assert!(xml.contains(r#"<a:buSzPct val="85000"/>"#));
        assert!(xml.contains("<a:buChar char=\"\u{2022}\"/>"));
        // Bullet color precedes size per the pPr content model
        assert!(xml.find("<a:buClr>").unwrap() < xml.find("<a:buSzPct").unwrap());
    }

    #[test]
    fn test_body_properties() {
        let frame = TextFrame::with_text("Source: Company data", body_font())
            .anchor(Anchor::Middle)
            .insets(Insets::default().horizontal(0))
            .auto_fit(AutoFit::None);
        let mut xml = String::new();
        frame.write_xml(&mut xml).unwrap();

        assert!(xml.contains(r#"wrap="none""#));
        assert!(xml.contains(r#"anchor="ctr""#));
        assert!(xml.contains(r#"lIns="0" tIns="45720" rIns="0" bIns="45720""#));
        assert!(xml.contains("<a:noAutofit/>"));
    }

    #[test]
    fn test_empty_frame_has_paragraph() {
        let mut xml = String::new();
        TextFrame::new().write_xml(&mut xml).unwrap();
        assert!(xml.contains("<a:p><a:endParaRPr"));
    }
}
