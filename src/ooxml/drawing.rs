//! DrawingML formatting primitives shared by slide shapes and charts.
//!
//! Fills, outlines and run fonts serialize to the same `a:` elements whether
//! they sit inside a `p:spPr`, a `c:spPr` or a `c:txPr`.
use crate::common::RGBColor;
use crate::common::unit::{pt_to_centipoints, pt_to_emu};
use crate::common::xml::escape_xml;
use std::fmt::{self, Write};

/// Preset dash patterns (`a:prstDash`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Solid,
    Dash,
    SystemDot,
    LongDash,
}

impl DashStyle {
    pub fn xml_value(&self) -> &'static str {
        match self {
            DashStyle::Solid => "solid",
            DashStyle::Dash => "dash",
            DashStyle::SystemDot => "sysDot",
            DashStyle::LongDash => "lgDash",
        }
    }
}

/// A solid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: RGBColor,
    pub width_pt: f64,
    pub dash: Option<DashStyle>,
}

impl LineStyle {
    pub fn solid(color: RGBColor, width_pt: f64) -> Self {
        Self {
            color,
            width_pt,
            dash: None,
        }
    }

    pub fn dashed(color: RGBColor, width_pt: f64, dash: DashStyle) -> Self {
        Self {
            color,
            width_pt,
            dash: Some(dash),
        }
    }
}

/// Outline of a shape, series or axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Outline {
    /// Inherit from the theme / application default
    #[default]
    Inherit,
    /// Explicitly no line (`a:ln/a:noFill`)
    None,
    Solid(LineStyle),
}

/// Run-level font properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub typeface: String,
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: RGBColor,
}

impl FontStyle {
    pub fn new(typeface: &str, size_pt: f64, color: RGBColor) -> Self {
        Self {
            typeface: typeface.to_string(),
            size_pt,
            bold: false,
            italic: false,
            color,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

pub(crate) fn write_solid_fill(xml: &mut String, color: RGBColor) -> fmt::Result {
    write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color.to_hex())
}

/// Write `a:solidFill`, or `a:noFill` when `color` is `None`.
pub(crate) fn write_fill(xml: &mut String, color: Option<RGBColor>) -> fmt::Result {
    match color {
        Some(c) => write_solid_fill(xml, c),
        None => {
            xml.push_str("<a:noFill/>");
            Ok(())
        },
    }
}

pub(crate) fn write_outline(xml: &mut String, outline: &Outline) -> fmt::Result {
    match outline {
        Outline::Inherit => Ok(()),
        Outline::None => {
            xml.push_str("<a:ln><a:noFill/></a:ln>");
            Ok(())
        },
        Outline::Solid(line) => write_line(xml, line),
    }
}

pub(crate) fn write_line(xml: &mut String, line: &LineStyle) -> fmt::Result {
    write!(xml, r#"<a:ln w="{}">"#, pt_to_emu(line.width_pt))?;
    write_solid_fill(xml, line.color)?;
    if let Some(dash) = line.dash {
        write!(xml, r#"<a:prstDash val="{}"/>"#, dash.xml_value())?;
    }
    xml.push_str("</a:ln>");
    Ok(())
}

/// Write the attributes and children of a run-properties element.
///
/// `tag` is the element name, e.g. `a:rPr`, `a:defRPr` or `a:endParaRPr`.
pub(crate) fn write_run_props(xml: &mut String, tag: &str, font: &FontStyle) -> fmt::Result {
    write!(
        xml,
        r#"<{} lang="en-US" sz="{}" b="{}" i="{}" dirty="0">"#,
        tag,
        pt_to_centipoints(font.size_pt),
        if font.bold { 1 } else { 0 },
        if font.italic { 1 } else { 0 },
    )?;
    write_solid_fill(xml, font.color)?;
    write!(
        xml,
        r#"<a:latin typeface="{0}"/><a:cs typeface="{0}"/>"#,
        escape_xml(&font.typeface)
    )?;
    write!(xml, "</{}>", tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashed_line() {
        let mut xml = String::new();
        let line = LineStyle::dashed(RGBColor::new(230, 81, 102), 1.5, DashStyle::Dash);
        write_line(&mut xml, &line).unwrap();
        assert_eq!(
            xml,
            r#"<a:ln w="19050"><a:solidFill><a:srgbClr val="E65166"/></a:solidFill><a:prstDash val="dash"/></a:ln>"#
        );
    }

    #[test]
    fn test_outline_variants() {
        let mut xml = String::new();
        write_outline(&mut xml, &Outline::Inherit).unwrap();
        assert!(xml.is_empty());
        write_outline(&mut xml, &Outline::None).unwrap();
        assert_eq!(xml, "<a:ln><a:noFill/></a:ln>");
    }

    #[test]
    fn test_run_props() {
        let mut xml = String::new();
        let font = FontStyle::new("Arial", 11.0, RGBColor::new(230, 81, 102)).bold(true);
        write_run_props(&mut xml, "a:rPr", &font).unwrap();
        assert!(xml.starts_with(r#"<a:rPr lang="en-US" sz="1100" b="1" i="0""#));
        assert!(xml.contains(r#"<a:latin typeface="Arial"/>"#));
        assert!(xml.ends_with("</a:rPr>"));
    }
}
