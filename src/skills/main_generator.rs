//! Deck generator for the 16:9 `main` template.
//!
//! Every element is positioned on the 1920x1080 px grid from
//! [`main_config`](crate::template::main_config) and converted to EMUs at the
//! 144 DPI reference resolution. A deck is a title slide, one slide per
//! requested slide and a closing slide.
use crate::annotate::{Placement, place_difference_line};
use crate::common::Result;
use crate::common::unit::{inches_to_emu, px_to_emu, px_to_inches};
use crate::layout::geometry::{self, BarLayout, InchRect};
use crate::layout::{BarEdges, ChartTypography, ColorPlan};
use crate::model::{
    Annotation, ChartData, ChartKind, GenerationResult, PresentationRequest, SeriesData,
    SlideContent, SlideType, WaterfallStep,
};
use crate::ooxml::charts::{
    BarSeries, BubbleSeries, Chart, DataLabels, LabelPosition, Legend, LegendPosition, Plot,
    SeriesStyle,
};
use crate::ooxml::drawing::{DashStyle, FontStyle, LineStyle, Outline};
use crate::ooxml::pptx::{
    Alignment, Anchor, AutoFit, Bounds, Bullet, Insets, MutablePresentation, MutableSlide,
    Paragraph, TextFrame,
};
use crate::skills::SlideGenerator;
use crate::template::main_config::{
    self, BULLET_LIST, CALLOUT_BOX, CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX, CHART_INSIGHT_CHART,
    CHART_INSIGHT_TEXT, COLUMN_CHART, CONTENT_REGION, FONT_PRIMARY, FOOTER_REGION, MATRIX_CHART,
    PxRect, Region, SAFE_ZONE, SECTION_DIVIDER_TITLE, SECTION_TITLE_BOX, T1, T2, T4_5, T5,
    TITLE_REGION, TITLE_SLIDE_MAIN, TITLE_SLIDE_SUBTITLE, TITLE_SUBTITLE_SPACING_PX,
    WATERFALL_CHART, colors,
};
use tracing::{debug, info, warn};

/// Height reserved for a chart title, in px.
const CHART_TITLE_HEIGHT_PX: f64 = 40.0;
/// Share of the content height given to the chart body.
const CHART_BODY_HEIGHT_RATIO: f64 = 0.7;
/// Share of the chart column width given to the chart.
const CHART_WIDTH_RATIO: f64 = 0.9;

const SOURCE_WIDTH_IN: f64 = 3.0;
const SOURCE_HEIGHT_IN: f64 = 0.25;
const SOURCE_INSET_PX: f64 = 10.0;

const TAKEAWAY_WIDTH_PX: f64 = 400.0;
const TAKEAWAY_HEIGHT_PX: f64 = 60.0;

/// Bullet glyph size in thousandths of a percent (85%).
const BULLET_SIZE_PCT: u32 = 85_000;
const BULLET_MARGIN_LEFT_PX: f64 = 48.0;
const BULLET_SPACE_AFTER_PT: f64 = 12.0;

const ANNOTATION_FONT_PT: f64 = 10.0;
const DIFFERENCE_LABEL_WIDTH_IN: f64 = 1.0;

const CLOSING_TITLE: &str = "Thank you";
const CLOSING_CREDIT_OFFSET_PX: f64 = 120.0;
const CLOSING_CREDIT_HEIGHT_PX: f64 = 60.0;

/// Canvas, safe zone and regions of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    pub canvas: (f64, f64),
    pub safe_zone: PxRect,
    pub regions: [Region; 3],
}

/// Generator for the grid-based `main` template.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainSlideGenerator;

impl MainSlideGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the deck for `request` without saving it.
    pub fn build(&self, request: &PresentationRequest) -> Result<MutablePresentation> {
        main_config::check_layout_invariants()?;

        let mut pres = MutablePresentation::new();
        pres.set_slide_size(px_to_emu(CANVAS_WIDTH_PX), px_to_emu(CANVAS_HEIGHT_PX));
        let props = pres.core_properties_mut();
        props.title = Some(request.topic.clone());
        props.author = request.author.clone();
        props.category = request.company.clone();

        self.add_title_slide(&mut pres, request);
        for (idx, content) in request.slides.iter().enumerate() {
            debug!("Rendering slide {} ({:?})", idx + 2, content.slide_type);
            self.add_content_slide(&mut pres, content)?;
        }
        self.add_closing_slide(&mut pres, request);
        Ok(pres)
    }

    /// Whether an element lies within the safe zone.
    pub fn validate_element_bounds(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        main_config::validate_bounds(x, y, width, height)
    }

    pub fn grid_info(&self) -> GridInfo {
        GridInfo {
            canvas: (CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX),
            safe_zone: SAFE_ZONE,
            regions: [TITLE_REGION, CONTENT_REGION, FOOTER_REGION],
        }
    }

    // ========================================================================
    // Slides
    // ========================================================================

    fn add_title_slide(&self, pres: &mut MutablePresentation, request: &PresentationRequest) {
        let width = pres.slide_width();
        let slide = pres.add_slide();
        slide.set_background(colors::PRIMARY_GREEN);

        let frame = TextFrame::with_text(&request.topic, TITLE_SLIDE_MAIN.font())
            .align(Alignment::Center)
            .anchor(Anchor::Middle)
            .wrap(true);
        slide.add_text_box(
            Bounds::new(0, inches_to_emu(2.5), width, inches_to_emu(2.0)),
            frame,
        );

        if let Some(company) = request.company.as_deref().filter(|c| !c.is_empty()) {
            let top = inches_to_emu(4.5) + px_to_emu(TITLE_SUBTITLE_SPACING_PX);
            let frame = TextFrame::with_text(company, TITLE_SLIDE_SUBTITLE.font())
                .align(Alignment::Center)
                .anchor(Anchor::Middle)
                .wrap(true);
            slide.add_text_box(Bounds::new(0, top, width, inches_to_emu(1.0)), frame);
        }
    }

    fn add_content_slide(&self, pres: &mut MutablePresentation, content: &SlideContent) -> Result<()> {
        match content.slide_type {
            SlideType::SectionHeader => {
                let slide = pres.add_slide();
                slide.set_background(colors::PRIMARY_GREEN);
                add_divider_title(slide, content.title.as_deref().unwrap_or_default());
                set_notes(slide, content);
                return Ok(());
            },
            SlideType::Blank => {
                let slide = pres.add_slide();
                slide.set_background(colors::WHITE);
                set_notes(slide, content);
                return Ok(());
            },
            _ => {},
        }

        // Charts are registered on the presentation before the slide borrows it.
        let chart = match &content.chart_data {
            Some(data) => Some((data, pres.add_chart(build_chart(data)))),
            None => None,
        };

        let slide = pres.add_slide();
        slide.set_background(colors::WHITE);
        add_slide_title(slide, content.title.as_deref().unwrap_or_default());

        match chart {
            Some((data, chart_idx)) => add_chart_insight_layout(slide, content, data, chart_idx)?,
            None => {
                let bullets = content.bullets_or_content();
                if !bullets.is_empty() {
                    add_bullet_textbox(slide, &bullets, CONTENT_REGION.bounds.to_bounds(), Anchor::Top);
                }
            },
        }

        if let Some(source) = content.source.as_deref().filter(|s| !s.is_empty()) {
            add_footer(slide, source);
        }
        set_notes(slide, content);
        Ok(())
    }

    fn add_closing_slide(&self, pres: &mut MutablePresentation, request: &PresentationRequest) {
        let slide = pres.add_slide();
        slide.set_background(colors::PRIMARY_GREEN);
        add_divider_title(slide, CLOSING_TITLE);

        let credit: Vec<&str> = [request.author.as_deref(), request.company.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if credit.is_empty() {
            return;
        }

        let font = FontStyle::new(FONT_PRIMARY, 18.0, colors::WHITE);
        let frame = TextFrame::with_text(&credit.join(" | "), font)
            .align(Alignment::Left)
            .anchor(Anchor::Middle)
            .insets(Insets::zero());
        let bounds = Bounds::new(
            px_to_emu(SECTION_TITLE_BOX.x1),
            px_to_emu(SECTION_TITLE_BOX.y1 + CLOSING_CREDIT_OFFSET_PX),
            px_to_emu(SECTION_TITLE_BOX.width()),
            px_to_emu(CLOSING_CREDIT_HEIGHT_PX),
        );
        slide.add_text_box(bounds, frame);
    }
}

impl SlideGenerator for MainSlideGenerator {
    fn name(&self) -> &str {
        "main"
    }

    fn create_presentation(&self, request: &PresentationRequest) -> GenerationResult {
        let written = self.build(request).and_then(|pres| {
            pres.save(&request.output_path)?;
            Ok(pres.slide_count())
        });
        match written {
            Ok(slide_count) => {
                info!("Saved {} slides to {}", slide_count, request.output_path);
                let template = format!("{} v{}", main_config::TEMPLATE_NAME, main_config::TEMPLATE_VERSION);
                let dimensions = format!("{CANVAS_WIDTH_PX}x{CANVAS_HEIGHT_PX}px");
                let safe_zone = format!("{}x{}px", SAFE_ZONE.width(), SAFE_ZONE.height());
                GenerationResult::succeeded(request.output_path.clone(), slide_count)
                    .with_metadata("template", template)
                    .with_metadata("aspect_ratio", main_config::ASPECT_RATIO)
                    .with_metadata("dimensions", dimensions)
                    .with_metadata("safe_zone", safe_zone)
                    .with_metadata("grid_system", "enforced")
            },
            Err(e) => {
                warn!("Presentation generation failed: {e}");
                GenerationResult::failed(e.to_string(), Some(request.output_path.clone()))
            },
        }
    }
}

// ============================================================================
// Text elements
// ============================================================================

fn set_notes(slide: &mut MutableSlide, content: &SlideContent) {
    if let Some(notes) = content.notes.as_deref().filter(|n| !n.is_empty()) {
        slide.set_notes(notes);
    }
}

fn add_slide_title(slide: &mut MutableSlide, title: &str) {
    let frame = TextFrame::with_text(title, T1.font())
        .align(Alignment::Left)
        .anchor(Anchor::Middle)
        .insets(Insets::zero())
        .wrap(true);
    slide.add_text_box(TITLE_REGION.bounds.to_bounds(), frame);
}

fn add_divider_title(slide: &mut MutableSlide, title: &str) {
    let frame = TextFrame::with_text(title, SECTION_DIVIDER_TITLE.font())
        .align(Alignment::Left)
        .anchor(Anchor::Middle)
        .insets(Insets::zero())
        .wrap(true);
    slide.add_text_box(SECTION_TITLE_BOX.to_bounds(), frame);
}

fn add_footer(slide: &mut MutableSlide, source: &str) {
    let frame = TextFrame::with_text(&format!("Source: {source}"), T5.font())
        .align(Alignment::Left)
        .anchor(Anchor::Middle)
        .insets(Insets::default().horizontal(0));
    slide.add_text_box(FOOTER_REGION.bounds.to_bounds(), frame);
}

/// Bulleted text box: justified paragraphs with a hanging green bullet.
fn add_bullet_textbox(slide: &mut MutableSlide, bullets: &[String], bounds: Bounds, anchor: Anchor) {
    let mut frame = TextFrame::new()
        .anchor(anchor)
        .wrap(true)
        .insets(Insets {
            left: inches_to_emu(0.2),
            right: inches_to_emu(0.2),
            top: inches_to_emu(0.3),
            bottom: inches_to_emu(0.1),
        });
    for text in bullets {
        frame = frame.push(bullet_paragraph(text, 0));
    }
    slide.add_text_box(bounds, frame);
}

/// A bullet paragraph at `level`; deeper levels step in by the list indent.
fn bullet_paragraph(text: &str, level: usize) -> Paragraph {
    let level_indent = BULLET_LIST.indents_px[level.min(BULLET_LIST.indents_px.len() - 1)];
    let margin_left = BULLET_MARGIN_LEFT_PX + level_indent * 1.5;
    Paragraph::text(text, BULLET_LIST.typography.font())
        .align(Alignment::Justify)
        .bullet(Bullet {
            character: BULLET_LIST.bullet_char,
            size_pct: BULLET_SIZE_PCT,
            color: BULLET_LIST.bullet_color,
        })
        .indent(px_to_emu(margin_left), -px_to_emu(main_config::BULLET_INDENT_PX))
        .space_after(BULLET_SPACE_AFTER_PT)
}

fn add_key_takeaway(slide: &mut MutableSlide, text: &str, chart_area: &PxRect) {
    let x = chart_area.x1 + 0.05 * chart_area.width();
    let y = chart_area.y1 + 0.75 * chart_area.height();
    let font = FontStyle::new(FONT_PRIMARY, 12.0, colors::PRIMARY_GREEN).bold(true);
    let frame = TextFrame::with_text(text, font)
        .align(Alignment::Left)
        .anchor(Anchor::Middle)
        .wrap(true)
        .insets(Insets {
            left: px_to_emu(12.0),
            right: px_to_emu(12.0),
            top: px_to_emu(8.0),
            bottom: px_to_emu(8.0),
        });
    let bounds = Bounds::new(
        px_to_emu(x),
        px_to_emu(y),
        px_to_emu(TAKEAWAY_WIDTH_PX),
        px_to_emu(TAKEAWAY_HEIGHT_PX),
    );
    slide
        .add_text_box(bounds, frame)
        .fill(CALLOUT_BOX.fill)
        .outline(CALLOUT_BOX.border);
}

// ============================================================================
// Chart + insight layout
// ============================================================================

/// Chart on the left, insight bullets on the right.
///
/// The chart block (title plus body) is centred vertically in the chart
/// column; the chart body is centred horizontally at 90% of the column width.
fn add_chart_insight_layout(
    slide: &mut MutableSlide,
    content: &SlideContent,
    data: &ChartData,
    chart_idx: usize,
) -> Result<()> {
    main_config::check_layout_invariants()?;

    let area = CHART_INSIGHT_CHART;
    let (block_top, bounds) = chart_block(data);

    if let Some(title) = data.title.as_deref().filter(|_| data.has_title()) {
        let frame = TextFrame::with_text(title, T2.font())
            .align(Alignment::Left)
            .anchor(Anchor::Middle)
            .insets(Insets::default().horizontal(0));
        slide.add_text_box(
            Bounds::new(
                px_to_emu(area.x1),
                px_to_emu(block_top),
                px_to_emu(area.width()),
                px_to_emu(CHART_TITLE_HEIGHT_PX),
            ),
            frame,
        );
    }
    slide.add_chart_shape(chart_idx, bounds);

    if !data.annotations.is_empty() {
        add_chart_annotations(slide, data, &InchRect::from_bounds(&bounds));
    }

    if let Some(source) = data.source.as_deref().filter(|s| !s.is_empty()) {
        add_chart_source(slide, source, &area);
    }

    if let Some(takeaway) = content.key_takeaway.as_deref().filter(|t| !t.is_empty()) {
        add_key_takeaway(slide, takeaway, &area);
    }

    // The insight column shows bullets only; body text is not promoted here.
    if let Some(bullets) = content.bullet_points.as_deref().filter(|b| !b.is_empty()) {
        add_bullet_textbox(slide, bullets, CHART_INSIGHT_TEXT.to_bounds(), Anchor::Middle);
    }
    Ok(())
}

/// Top of the title-plus-chart block, in px, and the chart bounds. The block
/// is centred vertically in the chart area.
fn chart_block(data: &ChartData) -> (f64, Bounds) {
    let area = CHART_INSIGHT_CHART;
    let title_h = if data.has_title() { CHART_TITLE_HEIGHT_PX } else { 0.0 };
    let body_h = CHART_BODY_HEIGHT_RATIO * area.height();
    let block_top = area.y1 + (area.height() - body_h - title_h) / 2.0;

    let width = CHART_WIDTH_RATIO * area.width();
    let left = area.x1 + (area.width() - width) / 2.0;
    let bounds = Bounds::new(
        px_to_emu(left),
        px_to_emu(block_top + title_h),
        px_to_emu(width),
        px_to_emu(body_h),
    );
    (block_top, bounds)
}

/// Frame a chart's annotations are drawn against, in inches.
pub(crate) fn chart_frame(data: &ChartData) -> InchRect {
    InchRect::from_bounds(&chart_block(data).1)
}

/// Source line in the bottom-left corner of the chart area.
fn add_chart_source(slide: &mut MutableSlide, source: &str, area: &PxRect) {
    let x = px_to_inches(area.x1 + SOURCE_INSET_PX);
    let y = px_to_inches(area.y2 - SOURCE_INSET_PX) - SOURCE_HEIGHT_IN;
    let frame = TextFrame::with_text(source, T5.font())
        .align(Alignment::Left)
        .anchor(Anchor::Bottom);
    slide.add_text_box(
        InchRect::new(x, y, SOURCE_WIDTH_IN, SOURCE_HEIGHT_IN).to_bounds(),
        frame,
    );
}

// ============================================================================
// Charts
// ============================================================================

/// Chart part for `data`, dispatched on its kind.
pub fn build_chart(data: &ChartData) -> Chart {
    match data.kind {
        ChartKind::Waterfall => waterfall_chart(data),
        ChartKind::Matrix => matrix_chart(data),
        ChartKind::Column => column_chart(data),
    }
}

fn column_categories(data: &ChartData) -> Vec<String> {
    match &data.categories {
        Some(categories) if !categories.is_empty() => categories.clone(),
        _ => (1..=3).map(|i| format!("Category {i}")).collect(),
    }
}

fn column_series(data: &ChartData) -> Vec<SeriesData> {
    match &data.series {
        Some(series) if !series.is_empty() => series.clone(),
        _ => vec![SeriesData::new("Series 1", vec![10.0, 20.0, 15.0])],
    }
}

/// Values of every drawn series, as the overlay geometry sees them.
/// Bar heights per series, as annotations see them.
pub(crate) fn chart_series_values(data: &ChartData) -> Vec<Vec<f64>> {
    match data.kind {
        ChartKind::Waterfall => vec![data.values.clone()],
        ChartKind::Matrix => Vec::new(),
        ChartKind::Column => column_series(data).into_iter().map(|s| s.values).collect(),
    }
}

fn column_chart(data: &ChartData) -> Chart {
    let categories = column_categories(data);
    let series = column_series(data);
    let typography = ChartTypography::for_categories(&categories);
    let point_count = series.first().map_or(0, |s| s.values.len());
    let plan = ColorPlan::for_chart(data, series.len(), point_count);
    debug!(
        "Column chart: {} series, {} mode, {} labels",
        series.len(),
        plan.mode(),
        typography.density.name()
    );

    let bars = series
        .into_iter()
        .enumerate()
        .map(|(idx, s)| {
            let mut bar = BarSeries::new(s.name, categories.clone(), s.values);
            if let Some(color) = plan.series_color(idx) {
                bar = bar.with_style(SeriesStyle::borderless(color));
            }
            if idx == 0 {
                for (point, color) in plan.point_colors().iter().enumerate() {
                    bar = bar.with_point(point, SeriesStyle::borderless(*color));
                }
            }
            bar
        })
        .collect();

    let mut chart = Chart::bar(bars);
    style_bar_axes(&mut chart, &typography);
    if plan.shows_legend() {
        chart.legend = Some(Legend {
            position: LegendPosition::Bottom,
            overlay: false,
            font: Some(FontStyle::new(FONT_PRIMARY, typography.legend, T4_5.color)),
        });
    }
    chart
}

fn waterfall_chart(data: &ChartData) -> Chart {
    let categories = data.categories.clone().unwrap_or_default();
    let typography = ChartTypography::for_categories(&categories);

    let mut bar = BarSeries::new("Waterfall", categories, data.values.clone());
    for point in 0..data.values.len() {
        let color = match data.types.get(point) {
            Some(WaterfallStep::Start | WaterfallStep::End) => WATERFALL_CHART.start_end,
            Some(WaterfallStep::Decrease) => WATERFALL_CHART.decrease,
            Some(WaterfallStep::Increase) | None => colors::ACCENT_BLUE,
        };
        bar = bar.with_point(point, SeriesStyle::borderless(color));
    }

    let mut chart = Chart::bar(vec![bar]);
    style_bar_axes(&mut chart, &typography);
    chart
}

/// Shared column styling: gap width, value labels, gridlines and axis lines.
fn style_bar_axes(chart: &mut Chart, typography: &ChartTypography) {
    if let Plot::Bar {
        gap_width,
        data_labels,
        ..
    } = &mut chart.plot
    {
        *gap_width = COLUMN_CHART.gap_width;
        *data_labels = Some(DataLabels {
            position: LabelPosition::OutsideEnd,
            number_format: COLUMN_CHART.data_label_format.to_string(),
            font: FontStyle::new(FONT_PRIMARY, typography.data_labels, colors::BODY_TEXT),
        });
    }

    let tick_font = FontStyle::new(FONT_PRIMARY, typography.axis_labels, T4_5.color);
    let category = chart.horizontal_axis_mut();
    category.line = Outline::Solid(COLUMN_CHART.x_axis_line);
    category.tick_font = Some(tick_font.clone());

    let value = chart.vertical_axis_mut();
    value.line = Outline::None;
    value.major_gridlines = Some(COLUMN_CHART.gridline);
    value.tick_font = Some(tick_font);
}

fn matrix_chart(data: &ChartData) -> Chart {
    let bubbles = data
        .bubbles
        .iter()
        .enumerate()
        .map(|(idx, bubble)| BubbleSeries {
            name: bubble.label.clone(),
            x_values: vec![bubble.x],
            y_values: vec![bubble.y],
            sizes: vec![bubble.size],
            style: Some(SeriesStyle {
                fill: Some(colors::SEQUENTIAL[idx % colors::SEQUENTIAL.len()]),
                outline: Outline::Solid(MATRIX_CHART.bubble_border),
            }),
        })
        .collect();

    let mut chart = Chart::bubble(bubbles);
    let x_axis = chart.horizontal_axis_mut();
    x_axis.reversed = true;
    x_axis.title = Some(MATRIX_CHART.x_axis_title.to_string());
    x_axis.line = Outline::Solid(MATRIX_CHART.axis_line);

    let y_axis = chart.vertical_axis_mut();
    y_axis.title = Some(MATRIX_CHART.y_axis_title.to_string());
    y_axis.line = Outline::Solid(MATRIX_CHART.axis_line);
    chart
}

// ============================================================================
// Annotations
// ============================================================================

fn annotation_font() -> FontStyle {
    FontStyle::new(FONT_PRIMARY, ANNOTATION_FONT_PT, colors::BODY_TEXT)
}

fn to_emu_point((x, y): (f64, f64)) -> (i64, i64) {
    (inches_to_emu(x), inches_to_emu(y))
}

/// Draw `data.annotations` over a chart drawn in `frame` (inches).
fn add_chart_annotations(slide: &mut MutableSlide, data: &ChartData, frame: &InchRect) {
    if data.kind == ChartKind::Matrix {
        warn!(
            "Skipping {} annotation(s) on a matrix chart",
            data.annotations.len()
        );
        return;
    }
    let series_values = chart_series_values(data);

    for annotation in &data.annotations {
        match annotation {
            Annotation::CagrArrow {
                series_index,
                from_category,
                to_category,
                label,
            } => {
                let Some(arc) = geometry::cagr_arc(
                    frame,
                    &series_values,
                    *series_index,
                    *from_category,
                    *to_category,
                ) else {
                    warn!(
                        "Skipping CAGR arrow: series {} or categories {}..{} out of range",
                        series_index, from_category, to_category
                    );
                    continue;
                };
                let points = arc.points.iter().copied().map(to_emu_point).collect();
                slide.add_freeform(points, LineStyle::solid(colors::AXIS_GREY, 1.0));

                let frame = TextFrame::with_text(label, annotation_font())
                    .align(Alignment::Center)
                    .anchor(Anchor::Middle);
                slide.add_text_box(arc.label.to_bounds(), frame);
            },
            Annotation::DifferenceLine {
                series_index,
                from_category,
                to_category,
                label,
                placement,
            } => {
                if !add_difference_line(
                    slide,
                    frame,
                    &series_values,
                    *series_index,
                    (*from_category, *to_category),
                    label,
                    placement.as_ref(),
                ) {
                    warn!(
                        "Skipping difference line: series {} or categories {}..{} out of range",
                        series_index, from_category, to_category
                    );
                }
            },
            Annotation::LeaderLine {
                x,
                y,
                text,
                direction,
                line_length,
            } => {
                let leader = geometry::leader_line(frame, *x, *y, *direction, *line_length);
                slide.add_connector(
                    to_emu_point(leader.start),
                    to_emu_point(leader.end),
                    LineStyle::solid(colors::AXIS_GREY, 0.75),
                );
                let align = if leader.align_right {
                    Alignment::Right
                } else {
                    Alignment::Left
                };
                let frame = TextFrame::with_text(text, annotation_font()).align(align);
                slide.add_text_box(leader.label.to_bounds(), frame);
            },
            Annotation::Callout {
                x,
                y,
                text,
                position,
            } => {
                let rect = geometry::callout_box(frame, *x, *y, *position);
                let frame = TextFrame::with_text(text, annotation_font())
                    .wrap(true)
                    .insets(Insets::default().horizontal(px_to_emu(5.0)).vertical(px_to_emu(3.0)));
                slide
                    .add_text_box(rect.to_bounds(), frame)
                    .fill(colors::NOTE_YELLOW)
                    .outline(LineStyle::solid(colors::PRIMARY_GREEN, 1.0));
            },
            Annotation::Unsupported => debug!("Ignoring unsupported annotation type"),
        }
    }
}

/// Dashed red line between two bar tops with a two-line label beside it.
///
/// A settled `placement` replaces the local gutter rules.
///
/// Returns `false` when the series or a category does not exist.
fn add_difference_line(
    slide: &mut MutableSlide,
    frame: &InchRect,
    series_values: &[Vec<f64>],
    series: usize,
    (from, to): (i64, i64),
    label: &str,
    placement: Option<&Placement>,
) -> bool {
    let Some(layout) = BarLayout::for_series(frame, series_values, series) else {
        return false;
    };
    let (Some(from), Some(to)) = (layout.resolve_category(from), layout.resolve_category(to)) else {
        return false;
    };
    let values = &series_values[series];
    let bar1 = BarEdges::of_bar(&layout, from, series, values[from]);
    let bar2 = BarEdges::of_bar(&layout, to, series, values[to]);
    let placement = match placement {
        Some(placement) => placement.clone(),
        None => place_difference_line(&bar1, &bar2, label),
    };

    let line_x = px_to_emu(placement.line.position_x);
    slide.add_connector(
        (line_x, px_to_emu(placement.line.start_y)),
        (line_x, px_to_emu(placement.line.end_y)),
        LineStyle::dashed(colors::NEGATIVE_RED, 1.5, DashStyle::Dash),
    );

    let (primary, secondary) = split_difference_label(label);
    let height = if secondary.is_some() { 0.5 } else { 0.3 };
    let center_y = px_to_inches(placement.label.vertical_center_y);

    let mut text = TextFrame::new()
        .push(
            Paragraph::text(
                primary,
                FontStyle::new(FONT_PRIMARY, 11.0, colors::NEGATIVE_RED).bold(true),
            )
            .align(Alignment::Center),
        )
        .auto_fit(AutoFit::None);
    if let Some(secondary) = secondary {
        text = text.push(
            Paragraph::text(
                secondary,
                FontStyle::new(FONT_PRIMARY, 10.0, colors::NEGATIVE_RED),
            )
            .align(Alignment::Center),
        );
    }
    let rect = InchRect::new(
        px_to_inches(placement.label.position_x),
        center_y - height / 2.0,
        DIFFERENCE_LABEL_WIDTH_IN,
        height,
    );
    slide.add_text_box(rect.to_bounds(), text);
    true
}

/// Split a difference label into a bold primary line and an optional
/// secondary line, at the first newline or else before the first `(`.
pub fn split_difference_label(label: &str) -> (&str, Option<&str>) {
    if let Some((primary, rest)) = label.split_once('\n') {
        let rest = rest.trim();
        (primary.trim(), (!rest.is_empty()).then_some(rest))
    } else if let Some(idx) = label.find('(') {
        (label[..idx].trim(), Some(label[idx..].trim()))
    } else {
        (label, None)
    }
}
