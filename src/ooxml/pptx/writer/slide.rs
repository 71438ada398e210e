/// Slide types and implementation for generated presentations.
use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::drawing::{LineStyle, Outline};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::writer::relmap::RelationshipMapper;
use crate::ooxml::pptx::writer::shape::{Bounds, MutableShape, ShapeType};
use crate::ooxml::pptx::writer::text::TextFrame;
use std::fmt::Write as FmtWrite;

/// A slide under construction.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID as listed in `p:sldIdLst`
    pub(crate) slide_id: u32,
    /// Solid background color; `None` inherits the master background
    pub(crate) background: Option<RGBColor>,
    pub(crate) shapes: Vec<MutableShape>,
    pub(crate) notes: Option<String>,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            background: None,
            shapes: Vec::new(),
            notes: None,
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Fill the slide background with a solid color.
    pub fn set_background(&mut self, color: RGBColor) {
        self.background = Some(color);
    }

    pub fn background(&self) -> Option<RGBColor> {
        self.background
    }

    /// Set speaker notes for the slide.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = Some(notes.to_string());
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Text of every text box on the slide, in z-order.
    pub fn texts(&self) -> Vec<String> {
        self.shapes.iter().filter_map(MutableShape::text).collect()
    }

    // IDs: 1 = group shape, user shapes start at 2
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 2) as u32
    }

    fn push(&mut self, shape_type: ShapeType) -> &mut MutableShape {
        let shape = MutableShape::new(self.next_shape_id(), shape_type);
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Add a text box.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deckwright::ooxml::drawing::FontStyle;
    /// use deckwright::ooxml::pptx::{Bounds, MutablePresentation, TextFrame};
    /// use deckwright::common::RGBColor;
    ///
    /// let mut pres = MutablePresentation::new();
    /// let slide = pres.add_slide();
    /// let frame = TextFrame::with_text("Hello", FontStyle::new("Arial", 18.0, RGBColor::BLACK));
    /// slide.add_text_box(Bounds::new(0, 0, 914400, 457200), frame);
    /// assert_eq!(slide.shape_count(), 1);
    /// ```
    pub fn add_text_box(&mut self, bounds: Bounds, frame: TextFrame) -> &mut MutableShape {
        self.push(ShapeType::TextBox {
            bounds,
            frame,
            fill: None,
            outline: Outline::Inherit,
        })
    }

    /// Add a borderless filled rectangle.
    pub fn add_rectangle(&mut self, bounds: Bounds, fill: RGBColor) -> &mut MutableShape {
        self.push(ShapeType::Rectangle {
            bounds,
            fill: Some(fill),
            outline: Outline::None,
        })
    }

    /// Add a straight connector from `begin` to `end`.
    pub fn add_connector(
        &mut self,
        begin: (i64, i64),
        end: (i64, i64),
        line: LineStyle,
    ) -> &mut MutableShape {
        self.push(ShapeType::Connector { begin, end, line })
    }

    /// Add an open, unfilled polyline through `points`.
    pub fn add_freeform(&mut self, points: Vec<(i64, i64)>, line: LineStyle) -> &mut MutableShape {
        self.push(ShapeType::Freeform { points, line })
    }

    /// Add a chart frame for a chart registered with
    /// [`MutablePresentation::add_chart`](super::MutablePresentation::add_chart).
    ///
    /// The relationship ID is assigned when the presentation is saved.
    /// Returns the shape ID.
    pub fn add_chart_shape(&mut self, chart_idx: usize, bounds: Bounds) -> u32 {
        self.push(ShapeType::Chart { bounds, chart_idx }).shape_id
    }

    /// Chart indices referenced by this slide, in shape order.
    pub(crate) fn chart_indices(&self) -> Vec<usize> {
        self.shapes
            .iter()
            .filter_map(|s| match s.shape_type {
                ShapeType::Chart { chart_idx, .. } => Some(chart_idx),
                _ => None,
            })
            .collect()
    }

    /// Generate slide XML with relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: usize,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");

        // Background comes before spTree
        if let Some(color) = self.background {
            write!(
                xml,
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                color.to_hex()
            )
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        xml.push_str("<p:spTree>");
        write_group_properties(&mut xml);

        for shape in &self.shapes {
            let rel_id = match shape.shape_type {
                ShapeType::Chart { chart_idx, .. } => {
                    rel_mapper.get_chart_id(slide_index, chart_idx)
                },
                _ => None,
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Generate notes slide XML, or `None` when the slide has no notes.
    pub(crate) fn generate_notes_xml(&self) -> Option<Result<String>> {
        let notes_text = self.notes.as_ref()?;

        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:notes xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        write_group_properties(&mut xml);

        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="2" name="Notes Placeholder 1"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        xml.push_str(r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr>"#);
        xml.push_str("</p:nvSpPr>");
        xml.push_str("<p:spPr/>");
        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        // One paragraph per line
        for line in notes_text.split('\n') {
            xml.push_str("<a:p>");
            if !line.is_empty() {
                xml.push_str(r#"<a:r><a:rPr lang="en-US" dirty="0"/>"#);
                if let Err(e) = write!(xml, "<a:t>{}</a:t>", escape_xml(line)) {
                    return Some(Err(OoxmlError::Xml(e.to_string())));
                }
                xml.push_str("</a:r>");
            }
            xml.push_str("</a:p>");
        }
        xml.push_str("</p:txBody>");
        xml.push_str("</p:sp>");

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:notes>");

        Some(Ok(xml))
    }
}

fn write_group_properties(xml: &mut String) {
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str("<a:xfrm>");
    xml.push_str(r#"<a:off x="0" y="0"/>"#);
    xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
    xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
    xml.push_str("</a:xfrm>");
    xml.push_str("</p:grpSpPr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::drawing::FontStyle;

    #[test]
    fn test_shape_ids_are_sequential() {
        let mut slide = MutableSlide::new(256);
        let font = FontStyle::new("Arial", 12.0, RGBColor::BLACK);
        let a = slide
            .add_text_box(Bounds::new(0, 0, 10, 10), TextFrame::with_text("a", font))
            .shape_id();
        let b = slide
            .add_connector((0, 0), (5, 5), LineStyle::solid(RGBColor::BLACK, 1.0))
            .shape_id();
        assert_eq!((a, b), (2, 3));
        assert_eq!(slide.texts(), vec!["a".to_string()]);
    }

    #[test]
    fn test_background_precedes_shape_tree() {
        let mut slide = MutableSlide::new(256);
        slide.set_background(RGBColor::new(20, 123, 88));
        let xml = slide
            .to_xml_with_rels(0, &RelationshipMapper::new())
            .unwrap();

        let bg = xml.find("<p:bg>").unwrap();
        let tree = xml.find("<p:spTree>").unwrap();
        assert!(bg < tree);
        assert!(xml.contains(r#"<a:srgbClr val="147B58"/>"#));
    }

    #[test]
    fn test_chart_shape_uses_mapped_rel_id() {
        let mut slide = MutableSlide::new(256);
        slide.add_chart_shape(3, Bounds::new(0, 0, 100, 100));
        assert_eq!(slide.chart_indices(), vec![3]);

        let mut mapper = RelationshipMapper::new();
        mapper.add_chart(1, 3, "rId2".to_string());
        let xml = slide.to_xml_with_rels(1, &mapper).unwrap();
        assert!(xml.contains(r#"r:id="rId2""#));

        // Unmapped chart frames are an error
        assert!(slide.to_xml_with_rels(0, &mapper).is_err());
    }

    #[test]
    fn test_notes_xml() {
        let mut slide = MutableSlide::new(256);
        assert!(slide.generate_notes_xml().is_none());

        slide.set_notes("Talk about Q3 & Q4\nThen pause");
        let xml = slide.generate_notes_xml().unwrap().unwrap();
        assert!(xml.contains("<a:t>Talk about Q3 &amp; Q4</a:t>"));
        assert!(xml.contains("<a:t>Then pause</a:t>"));
    }
}
