//! Chart XML writer.
//!
//! Generates `c:chartSpace` parts for the models in [`super::model`].

use crate::common::xml::escape_xml;
use crate::ooxml::charts::model::{
    Axis, AxisKind, BarSeries, BubbleSeries, Chart, DataLabels, Legend, Plot, SeriesStyle,
};
use crate::ooxml::constants::namespace;
use crate::ooxml::drawing::{FontStyle, Outline, write_fill, write_line, write_outline, write_run_props};
use std::fmt;
use std::io::Write;

/// Build an XML fragment with the shared DrawingML helpers.
fn fragment(build: impl FnOnce(&mut String) -> fmt::Result) -> std::io::Result<String> {
    let mut xml = String::new();
    build(&mut xml).map_err(std::io::Error::other)?;
    Ok(xml)
}

/// Write a chart to XML.
pub fn write_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(
        writer,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#
    )?;
    write!(
        writer,
        r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
        namespace::DML_CHART,
        namespace::DML,
        namespace::OFC_RELATIONSHIPS
    )?;
    write!(writer, r#"<c:date1904 val="0"/>"#)?;
    write!(writer, r#"<c:lang val="en-US"/>"#)?;
    write!(writer, r#"<c:roundedCorners val="0"/>"#)?;

    write!(writer, "<c:chart>")?;
    write!(writer, r#"<c:autoTitleDeleted val="1"/>"#)?;

    write!(writer, "<c:plotArea><c:layout/>")?;
    match &chart.plot {
        Plot::Bar {
            series,
            gap_width,
            data_labels,
        } => write_bar_chart(writer, series, *gap_width, data_labels.as_ref())?,
        Plot::Bubble {
            series,
            bubble_scale,
        } => write_bubble_chart(writer, series, *bubble_scale)?,
    }
    for axis in &chart.axes {
        write_axis(writer, axis)?;
    }
    write!(writer, "</c:plotArea>")?;

    if let Some(ref legend) = chart.legend {
        write_legend(writer, legend)?;
    }

    write!(writer, r#"<c:plotVisOnly val="1"/>"#)?;
    write!(writer, r#"<c:dispBlanksAs val="gap"/>"#)?;
    write!(writer, "</c:chart>")?;

    if !chart.border {
        write!(writer, "<c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr>")?;
    }

    write!(writer, "</c:chartSpace>")?;

    Ok(())
}

/// Render a chart to an XML string.
pub fn chart_to_xml(chart: &Chart) -> std::io::Result<String> {
    let mut buf = Vec::with_capacity(4096);
    write_chart(&mut buf, chart)?;
    String::from_utf8(buf).map_err(std::io::Error::other)
}

fn write_bar_chart<W: Write>(
    writer: &mut W,
    series: &[BarSeries],
    gap_width: u32,
    data_labels: Option<&DataLabels>,
) -> std::io::Result<()> {
    write!(writer, "<c:barChart>")?;
    write!(writer, r#"<c:barDir val="col"/>"#)?;
    write!(writer, r#"<c:grouping val="clustered"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    for (idx, ser) in series.iter().enumerate() {
        write_bar_series(writer, idx, ser)?;
    }

    match data_labels {
        Some(labels) => write_data_labels(writer, labels)?,
        None => write_data_labels_hidden(writer)?,
    }

    write!(writer, r#"<c:gapWidth val="{}"/>"#, gap_width)?;
    write!(writer, r#"<c:axId val="1"/><c:axId val="2"/>"#)?;
    write!(writer, "</c:barChart>")?;

    Ok(())
}

fn write_bubble_chart<W: Write>(
    writer: &mut W,
    series: &[BubbleSeries],
    bubble_scale: u32,
) -> std::io::Result<()> {
    write!(writer, "<c:bubbleChart>")?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    for (idx, ser) in series.iter().enumerate() {
        write_bubble_series(writer, idx, ser)?;
    }

    write_data_labels_hidden(writer)?;
    write!(writer, r#"<c:bubbleScale val="{}"/>"#, bubble_scale)?;
    write!(writer, r#"<c:showNegBubbles val="0"/>"#)?;
    write!(writer, r#"<c:axId val="1"/><c:axId val="2"/>"#)?;
    write!(writer, "</c:bubbleChart>")?;

    Ok(())
}

fn write_series_header<W: Write>(writer: &mut W, idx: usize, name: &str) -> std::io::Result<()> {
    write!(writer, r#"<c:idx val="{}"/>"#, idx)?;
    write!(writer, r#"<c:order val="{}"/>"#, idx)?;
    write!(writer, "<c:tx><c:v>{}</c:v></c:tx>", escape_xml(name))?;
    Ok(())
}

fn write_series_style<W: Write>(writer: &mut W, style: &SeriesStyle) -> std::io::Result<()> {
    let sp_pr = fragment(|xml| {
        xml.push_str("<c:spPr>");
        write_fill(xml, style.fill)?;
        write_outline(xml, &style.outline)?;
        xml.push_str("</c:spPr>");
        Ok(())
    })?;
    writer.write_all(sp_pr.as_bytes())
}

fn write_bar_series<W: Write>(writer: &mut W, idx: usize, series: &BarSeries) -> std::io::Result<()> {
    write!(writer, "<c:ser>")?;
    write_series_header(writer, idx, &series.name)?;

    if let Some(ref style) = series.style {
        write_series_style(writer, style)?;
    }
    write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;

    for (point_idx, style) in &series.points {
        write!(writer, "<c:dPt>")?;
        write!(writer, r#"<c:idx val="{}"/>"#, point_idx)?;
        write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;
        write!(writer, r#"<c:bubble3D val="0"/>"#)?;
        write_series_style(writer, style)?;
        write!(writer, "</c:dPt>")?;
    }

    write_string_literal(writer, "c:cat", &series.categories)?;
    write_numeric_literal(writer, "c:val", &series.values, "General")?;

    write!(writer, "</c:ser>")?;

    Ok(())
}

fn write_bubble_series<W: Write>(
    writer: &mut W,
    idx: usize,
    series: &BubbleSeries,
) -> std::io::Result<()> {
    write!(writer, "<c:ser>")?;
    write_series_header(writer, idx, &series.name)?;

    if let Some(ref style) = series.style {
        write_series_style(writer, style)?;
    }
    write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;

    write_numeric_literal(writer, "c:xVal", &series.x_values, "General")?;
    write_numeric_literal(writer, "c:yVal", &series.y_values, "General")?;
    write_numeric_literal(writer, "c:bubbleSize", &series.sizes, "General")?;
    write!(writer, r#"<c:bubble3D val="0"/>"#)?;

    write!(writer, "</c:ser>")?;

    Ok(())
}

fn write_string_literal<W: Write>(writer: &mut W, tag: &str, values: &[String]) -> std::io::Result<()> {
    write!(writer, "<{}>", tag)?;
    write!(writer, "<c:strLit>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, values.len())?;
    for (i, val) in values.iter().enumerate() {
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            i,
            escape_xml(val)
        )?;
    }
    write!(writer, "</c:strLit>")?;
    write!(writer, "</{}>", tag)?;

    Ok(())
}

fn write_numeric_literal<W: Write>(
    writer: &mut W,
    tag: &str,
    values: &[f64],
    format_code: &str,
) -> std::io::Result<()> {
    write!(writer, "<{}>", tag)?;
    write!(writer, "<c:numLit>")?;
    write!(
        writer,
        r#"<c:formatCode>{}</c:formatCode>"#,
        escape_xml(format_code)
    )?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, values.len())?;
    for (i, val) in values.iter().enumerate() {
        write!(writer, r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#, i, val)?;
    }
    write!(writer, "</c:numLit>")?;
    write!(writer, "</{}>", tag)?;

    Ok(())
}

fn write_text_props<W: Write>(writer: &mut W, font: &FontStyle) -> std::io::Result<()> {
    let tx_pr = fragment(|xml| {
        xml.push_str("<c:txPr><a:bodyPr/><a:lstStyle/><a:p><a:pPr>");
        write_run_props(xml, "a:defRPr", font)?;
        xml.push_str(r#"</a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#);
        Ok(())
    })?;
    writer.write_all(tx_pr.as_bytes())
}

fn write_data_labels<W: Write>(writer: &mut W, labels: &DataLabels) -> std::io::Result<()> {
    write!(writer, "<c:dLbls>")?;
    write!(
        writer,
        r#"<c:numFmt formatCode="{}" sourceLinked="0"/>"#,
        escape_xml(&labels.number_format)
    )?;
    write!(writer, "<c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr>")?;
    write_text_props(writer, &labels.font)?;
    write!(
        writer,
        r#"<c:dLblPos val="{}"/>"#,
        labels.position.xml_value()
    )?;
    write!(writer, r#"<c:showLegendKey val="0"/>"#)?;
    write!(writer, r#"<c:showVal val="1"/>"#)?;
    write!(writer, r#"<c:showCatName val="0"/>"#)?;
    write!(writer, r#"<c:showSerName val="0"/>"#)?;
    write!(writer, r#"<c:showPercent val="0"/>"#)?;
    write!(writer, r#"<c:showBubbleSize val="0"/>"#)?;
    write!(writer, "</c:dLbls>")?;
    Ok(())
}

fn write_data_labels_hidden<W: Write>(writer: &mut W) -> std::io::Result<()> {
    write!(writer, "<c:dLbls>")?;
    write!(writer, r#"<c:showLegendKey val="0"/>"#)?;
    write!(writer, r#"<c:showVal val="0"/>"#)?;
    write!(writer, r#"<c:showCatName val="0"/>"#)?;
    write!(writer, r#"<c:showSerName val="0"/>"#)?;
    write!(writer, r#"<c:showPercent val="0"/>"#)?;
    write!(writer, r#"<c:showBubbleSize val="0"/>"#)?;
    write!(writer, "</c:dLbls>")?;
    Ok(())
}

fn write_axis_title<W: Write>(writer: &mut W, title: &str, font: Option<&FontStyle>) -> std::io::Result<()> {
    let xml = fragment(|xml| {
        xml.push_str("<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p>");
        if let Some(font) = font {
            xml.push_str("<a:pPr>");
            write_run_props(xml, "a:defRPr", font)?;
            xml.push_str("</a:pPr>");
        }
        xml.push_str("<a:r>");
        if let Some(font) = font {
            write_run_props(xml, "a:rPr", font)?;
        }
        xml.push_str("<a:t>");
        xml.push_str(&escape_xml(title));
        xml.push_str("</a:t></a:r></a:p></c:rich></c:tx>");
        xml.push_str(r#"<c:overlay val="0"/></c:title>"#);
        Ok(())
    })?;
    writer.write_all(xml.as_bytes())
}

fn write_axis<W: Write>(writer: &mut W, axis: &Axis) -> std::io::Result<()> {
    let tag = match axis.kind {
        AxisKind::Category => "c:catAx",
        AxisKind::Value => "c:valAx",
    };
    write!(writer, "<{}>", tag)?;
    write!(writer, r#"<c:axId val="{}"/>"#, axis.id)?;

    write!(writer, "<c:scaling>")?;
    write!(
        writer,
        r#"<c:orientation val="{}"/>"#,
        if axis.reversed { "maxMin" } else { "minMax" }
    )?;
    if let Some(max) = axis.max {
        write!(writer, r#"<c:max val="{}"/>"#, max)?;
    }
    if let Some(min) = axis.min {
        write!(writer, r#"<c:min val="{}"/>"#, min)?;
    }
    write!(writer, "</c:scaling>")?;

    write!(writer, r#"<c:delete val="0"/>"#)?;
    write!(writer, r#"<c:axPos val="{}"/>"#, axis.position.xml_value())?;

    if let Some(ref grid) = axis.major_gridlines {
        let xml = fragment(|xml| {
            xml.push_str("<c:majorGridlines><c:spPr>");
            write_line(xml, grid)?;
            xml.push_str("</c:spPr></c:majorGridlines>");
            Ok(())
        })?;
        writer.write_all(xml.as_bytes())?;
    }

    if let Some(ref title) = axis.title {
        write_axis_title(writer, title, axis.tick_font.as_ref())?;
    }

    write!(writer, r#"<c:majorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;

    if axis.line != Outline::Inherit {
        let xml = fragment(|xml| {
            xml.push_str("<c:spPr>");
            write_outline(xml, &axis.line)?;
            xml.push_str("</c:spPr>");
            Ok(())
        })?;
        writer.write_all(xml.as_bytes())?;
    }

    if let Some(ref font) = axis.tick_font {
        write_text_props(writer, font)?;
    }

    write!(writer, r#"<c:crossAx val="{}"/>"#, axis.cross_id)?;
    write!(writer, r#"<c:crosses val="autoZero"/>"#)?;

    match axis.kind {
        AxisKind::Category => {
            write!(writer, r#"<c:auto val="1"/>"#)?;
            write!(writer, r#"<c:lblAlgn val="ctr"/>"#)?;
            write!(writer, r#"<c:lblOffset val="100"/>"#)?;
            write!(writer, r#"<c:noMultiLvlLbl val="0"/>"#)?;
        },
        AxisKind::Value => {
            write!(writer, r#"<c:crossBetween val="between"/>"#)?;
        },
    }

    write!(writer, "</{}>", tag)?;
    Ok(())
}

fn write_legend<W: Write>(writer: &mut W, legend: &Legend) -> std::io::Result<()> {
    write!(writer, "<c:legend>")?;
    write!(
        writer,
        r#"<c:legendPos val="{}"/>"#,
        legend.position.xml_value()
    )?;
    write!(
        writer,
        r#"<c:overlay val="{}"/>"#,
        if legend.overlay { "1" } else { "0" }
    )?;
    if let Some(ref font) = legend.font {
        write_text_props(writer, font)?;
    }
    write!(writer, "</c:legend>")?;
    Ok(())
}
