/// Shape types and XML serialization for generated slides.
use crate::common::RGBColor;
use crate::ooxml::drawing::{LineStyle, Outline, write_fill, write_line, write_outline};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::writer::text::TextFrame;
use std::fmt::Write as FmtWrite;

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}

/// A shape on a slide.
#[derive(Debug, Clone)]
pub struct MutableShape {
    pub(crate) shape_id: u32,
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        bounds: Bounds,
        frame: TextFrame,
        fill: Option<RGBColor>,
        outline: Outline,
    },
    Rectangle {
        bounds: Bounds,
        fill: Option<RGBColor>,
        outline: Outline,
    },
    /// Straight connector between two points
    Connector {
        begin: (i64, i64),
        end: (i64, i64),
        line: LineStyle,
    },
    /// Open polyline with no fill
    Freeform {
        points: Vec<(i64, i64)>,
        line: LineStyle,
    },
    /// Graphic frame referencing a chart part
    Chart { bounds: Bounds, chart_idx: usize },
}

impl MutableShape {
    pub(crate) fn new(shape_id: u32, shape_type: ShapeType) -> Self {
        Self {
            shape_id,
            shape_type,
        }
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Set a solid fill. Has no effect on lines and charts.
    pub fn fill(&mut self, color: RGBColor) -> &mut Self {
        match &mut self.shape_type {
            ShapeType::TextBox { fill, .. } | ShapeType::Rectangle { fill, .. } => {
                *fill = Some(color);
            },
            _ => {},
        }
        self
    }

    /// Set the border line. Has no effect on lines and charts.
    pub fn outline(&mut self, line: LineStyle) -> &mut Self {
        match &mut self.shape_type {
            ShapeType::TextBox { outline, .. } | ShapeType::Rectangle { outline, .. } => {
                *outline = Outline::Solid(line);
            },
            _ => {},
        }
        self
    }

    /// Text content, for text boxes.
    pub fn text(&self) -> Option<String> {
        match &self.shape_type {
            ShapeType::TextBox { frame, .. } => Some(frame.plain_text()),
            _ => None,
        }
    }

    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.shape_type {
            ShapeType::TextBox { frame, .. } => Some(frame),
            _ => None,
        }
    }

    /// Bounding box of the shape.
    pub fn bounds(&self) -> Bounds {
        match &self.shape_type {
            ShapeType::TextBox { bounds, .. }
            | ShapeType::Rectangle { bounds, .. }
            | ShapeType::Chart { bounds, .. } => *bounds,
            ShapeType::Connector { begin, end, .. } => line_bounds(*begin, *end),
            ShapeType::Freeform { points, .. } => polyline_bounds(points),
        }
    }

    pub fn is_connector(&self) -> bool {
        matches!(self.shape_type, ShapeType::Connector { .. })
    }

    pub fn is_freeform(&self) -> bool {
        matches!(self.shape_type, ShapeType::Freeform { .. })
    }

    pub fn is_chart(&self) -> bool {
        matches!(self.shape_type, ShapeType::Chart { .. })
    }

    /// Write the shape XML.
    ///
    /// `chart_rel_id` is required for chart frames and ignored otherwise.
    pub(crate) fn to_xml(&self, xml: &mut String, chart_rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox {
                bounds,
                frame,
                fill,
                outline,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, bounds, false, false)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                write_fill(xml, *fill).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                write_outline(xml, outline).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</p:spPr>");

                frame
                    .write_xml(xml)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</p:sp>");
            },
            ShapeType::Rectangle {
                bounds,
                fill,
                outline,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Rectangle {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, bounds, false, false)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                write_fill(xml, *fill).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                write_outline(xml, outline).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</p:spPr>");
                xml.push_str("</p:sp>");
            },
            ShapeType::Connector { begin, end, line } => {
                xml.push_str("<p:cxnSp>");
                xml.push_str("<p:nvCxnSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Straight Connector {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<p:cNvCxnSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvCxnSpPr>");

                // Direction is encoded with flips over a normalized box
                let flip_h = begin.0 > end.0;
                let flip_v = begin.1 > end.1;
                xml.push_str("<p:spPr>");
                write_xfrm(xml, &line_bounds(*begin, *end), flip_h, flip_v)?;
                xml.push_str(r#"<a:prstGeom prst="line"><a:avLst/></a:prstGeom>"#);
                write_line(xml, line).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</p:spPr>");
                xml.push_str("</p:cxnSp>");
            },
            ShapeType::Freeform { points, line } => {
                let bounds = polyline_bounds(points);

                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Freeform {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, &bounds, false, false)?;
                xml.push_str("<a:custGeom>");
                xml.push_str("<a:avLst/><a:gdLst/><a:ahLst/><a:cxnLst/>");
                xml.push_str(r#"<a:rect l="l" t="t" r="r" b="b"/>"#);
                xml.push_str("<a:pathLst>");
                write!(
                    xml,
                    r#"<a:path w="{}" h="{}">"#,
                    bounds.width, bounds.height
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                for (i, (px, py)) in points.iter().enumerate() {
                    let tag = if i == 0 { "a:moveTo" } else { "a:lnTo" };
                    write!(
                        xml,
                        r#"<{0}><a:pt x="{1}" y="{2}"/></{0}>"#,
                        tag,
                        px - bounds.x,
                        py - bounds.y
                    )
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                }
                xml.push_str("</a:path>");
                xml.push_str("</a:pathLst>");
                xml.push_str("</a:custGeom>");
                xml.push_str("<a:noFill/>");
                write_line(xml, line).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</p:spPr>");
                xml.push_str("</p:sp>");
            },
            ShapeType::Chart { bounds, .. } => {
                let rel_id = chart_rel_id.ok_or_else(|| {
                    OoxmlError::InvalidRelationship(format!(
                        "chart shape {} has no relationship",
                        self.shape_id
                    ))
                })?;

                xml.push_str("<p:graphicFrame>");
                xml.push_str("<p:nvGraphicFramePr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Chart {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<p:cNvGraphicFramePr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvGraphicFramePr>");

                write!(
                    xml,
                    r#"<p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm>"#,
                    bounds.x, bounds.y, bounds.width, bounds.height
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;

                xml.push_str("<a:graphic>");
                xml.push_str(
                    r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
                );
                write!(
                    xml,
                    r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="{}"/>"#,
                    rel_id
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</a:graphicData>");
                xml.push_str("</a:graphic>");
                xml.push_str("</p:graphicFrame>");
            },
        }

        Ok(())
    }
}

fn write_xfrm(xml: &mut String, bounds: &Bounds, flip_h: bool, flip_v: bool) -> Result<()> {
    xml.push_str("<a:xfrm");
    if flip_h {
        xml.push_str(r#" flipH="1""#);
    }
    if flip_v {
        xml.push_str(r#" flipV="1""#);
    }
    xml.push('>');
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, bounds.x, bounds.y)
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    write!(
        xml,
        r#"<a:ext cx="{}" cy="{}"/>"#,
        bounds.width, bounds.height
    )
    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

fn line_bounds(begin: (i64, i64), end: (i64, i64)) -> Bounds {
    Bounds::new(
        begin.0.min(end.0),
        begin.1.min(end.1),
        (end.0 - begin.0).abs(),
        (end.1 - begin.1).abs(),
    )
}

fn polyline_bounds(points: &[(i64, i64)]) -> Bounds {
    let Some(first) = points.first() else {
        return Bounds::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.0, first.1, first.0, first.1);
    for &(x, y) in &points[1..] {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::drawing::{DashStyle, FontStyle};

    #[test]
    fn test_connector_flips_when_drawn_upward() {
        let shape = MutableShape::new(
            4,
            ShapeType::Connector {
                begin: (1000, 5000),
                end: (1000, 2000),
                line: LineStyle::solid(RGBColor::new(169, 169, 169), 0.75),
            },
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.contains(r#"<a:xfrm flipV="1">"#));
        assert!(xml.contains(r#"<a:off x="1000" y="2000"/><a:ext cx="0" cy="3000"/>"#));
        assert_eq!(shape.bounds(), Bounds::new(1000, 2000, 0, 3000));
    }

    #[test]
    fn test_freeform_path_is_relative() {
        let shape = MutableShape::new(
            5,
            ShapeType::Freeform {
                points: vec![(100, 500), (200, 300), (300, 500)],
                line: LineStyle::dashed(RGBColor::new(230, 81, 102), 1.0, DashStyle::Dash),
            },
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.contains(r#"<a:path w="200" h="200">"#));
        assert!(xml.contains(r#"<a:moveTo><a:pt x="0" y="200"/></a:moveTo>"#));
        assert!(xml.contains(r#"<a:lnTo><a:pt x="100" y="0"/></a:lnTo>"#));
        assert!(xml.contains("<a:noFill/>"));
    }

    #[test]
    fn test_text_box_fill_and_outline() {
        let frame = TextFrame::with_text(
            "Key takeaway",
            FontStyle::new("Arial", 12.0, RGBColor::new(20, 123, 88)).bold(true),
        );
        let mut shape = MutableShape::new(
            3,
            ShapeType::TextBox {
                bounds: Bounds::new(0, 0, 100, 50),
                frame,
                fill: None,
                outline: Outline::Inherit,
            },
        );
        shape
            .fill(RGBColor::new(245, 245, 245))
            .outline(LineStyle::solid(RGBColor::new(20, 123, 88), 2.0));

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"<a:srgbClr val="F5F5F5"/>"#));
        assert!(xml.contains(r#"<a:ln w="25400">"#));
        assert_eq!(shape.text().as_deref(), Some("Key takeaway"));
    }

    #[test]
    fn test_chart_frame_requires_relationship() {
        let shape = MutableShape::new(
            3,
            ShapeType::Chart {
                bounds: Bounds::new(0, 0, 10, 10),
                chart_idx: 0,
            },
        );
        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());

        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"r:id="rId2""#));
    }
}
