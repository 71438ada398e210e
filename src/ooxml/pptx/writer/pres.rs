/// Presentation writer for PPTX.
use crate::ooxml::charts::{Chart, chart_to_xml};
use crate::ooxml::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::package::{OpcPackage, PackageWriter, Part};
use crate::ooxml::pptx::parts::{
    CoreProperties, NOTES_MASTER_XML, PRES_PROPS_XML, SLIDE_LAYOUT_XML, SLIDE_MASTER_XML,
    THEME_XML, app_properties_xml,
};
use crate::ooxml::pptx::writer::relmap::RelationshipMapper;
use crate::ooxml::rels::Relationships;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::slide::MutableSlide;

/// A PowerPoint presentation being generated.
///
/// Slides, charts and properties are collected in memory and serialized into
/// a complete package by [`save`](Self::save) or [`to_bytes`](Self::to_bytes).
#[derive(Debug)]
pub struct MutablePresentation {
    pub(crate) slides: Vec<MutableSlide>,
    /// Chart parts, addressed by index from chart frames
    charts: Vec<Chart>,
    /// Slide width in EMUs (914400 EMU = 1 inch)
    slide_width: i64,
    slide_height: i64,
    core_properties: CoreProperties,
}

impl MutablePresentation {
    /// Create an empty presentation.
    ///
    /// Default size is 10" x 7.5" (4:3); use [`set_slide_size`](Self::set_slide_size)
    /// for other canvases.
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            charts: Vec::new(),
            slide_width: 9_144_000,
            slide_height: 6_858_000,
            core_properties: CoreProperties::default(),
        }
    }

    /// Append a blank slide and return it.
    pub fn add_slide(&mut self) -> &mut MutableSlide {
        let slide_id = (self.slides.len() + 256) as u32;
        self.slides.push(MutableSlide::new(slide_id));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Set the slide size in EMUs.
    pub fn set_slide_size(&mut self, width: i64, height: i64) {
        self.slide_width = width;
        self.slide_height = height;
    }

    pub fn core_properties_mut(&mut self) -> &mut CoreProperties {
        &mut self.core_properties
    }

    /// Register a chart part and return its index for
    /// [`MutableSlide::add_chart_shape`].
    pub fn add_chart(&mut self, chart: Chart) -> usize {
        self.charts.push(chart);
        self.charts.len() - 1
    }

    pub fn chart(&self, idx: usize) -> Option<&Chart> {
        self.charts.get(idx)
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Write the presentation to a `.pptx` file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let package = self.to_package()?;
        PackageWriter::write(path, &package)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        PackageWriter::to_bytes(&package)
    }

    /// Assemble every part of the presentation into an OPC package.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();
        let has_notes = self.slides.iter().any(MutableSlide::has_notes);

        package
            .rels
            .add(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");
        package.rels.add(rt::CORE_PROPERTIES, "docProps/core.xml");
        package
            .rels
            .add(rt::EXTENDED_PROPERTIES, "docProps/app.xml");

        // Presentation relationships: master first, then slides
        let mut pres_rels = Relationships::new();
        let master_rel_id =
            pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        let slide_rel_ids: Vec<String> = (1..=self.slides.len())
            .map(|n| pres_rels.add(rt::SLIDE, &format!("slides/slide{}.xml", n)))
            .collect();
        let notes_master_rel_id = has_notes
            .then(|| pres_rels.add(rt::NOTES_MASTER, "notesMasters/notesMaster1.xml"));
        pres_rels.add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");

        let pres_xml = self.generate_presentation_xml(
            &master_rel_id,
            &slide_rel_ids,
            notes_master_rel_id.as_deref(),
        )?;
        package.add_part(
            Part::new("/ppt/presentation.xml", ct::PML_PRESENTATION_MAIN, pres_xml)
                .with_rels(pres_rels),
        );

        self.add_fixed_parts(&mut package, has_notes);

        // Slides, their notes and chart relationships
        let mut rel_mapper = RelationshipMapper::new();
        let mut notes_number = 0;
        for (slide_index, slide) in self.slides.iter().enumerate() {
            let slide_number = slide_index + 1;
            let mut slide_rels = Relationships::new();
            slide_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

            for chart_idx in slide.chart_indices() {
                if chart_idx >= self.charts.len() {
                    return Err(OoxmlError::PartNotFound(format!(
                        "chart {} referenced by slide {}",
                        chart_idx, slide_number
                    )));
                }
                let rel_id =
                    slide_rels.add(rt::CHART, &format!("../charts/chart{}.xml", chart_idx + 1));
                rel_mapper.add_chart(slide_index, chart_idx, rel_id);
            }

            if let Some(notes_xml) = slide.generate_notes_xml() {
                notes_number += 1;
                let notes_target = format!("../notesSlides/notesSlide{}.xml", notes_number);
                let rel_id = slide_rels.add(rt::NOTES_SLIDE, &notes_target);
                rel_mapper.add_notes(slide_index, rel_id);

                let mut notes_rels = Relationships::new();
                notes_rels.add(rt::NOTES_MASTER, "../notesMasters/notesMaster1.xml");
                notes_rels.add(rt::SLIDE, &format!("../slides/slide{}.xml", slide_number));
                package.add_part(
                    Part::new(
                        format!("/ppt/notesSlides/notesSlide{}.xml", notes_number),
                        ct::PML_NOTES_SLIDE,
                        notes_xml?,
                    )
                    .with_rels(notes_rels),
                );
            }

            let slide_xml = slide.to_xml_with_rels(slide_index, &rel_mapper)?;
            package.add_part(
                Part::new(
                    format!("/ppt/slides/slide{}.xml", slide_number),
                    ct::PML_SLIDE,
                    slide_xml,
                )
                .with_rels(slide_rels),
            );
        }

        for (idx, chart) in self.charts.iter().enumerate() {
            let chart_xml = chart_to_xml(chart)?;
            package.add_part(Part::new(
                format!("/ppt/charts/chart{}.xml", idx + 1),
                ct::DML_CHART,
                chart_xml,
            ));
        }

        package.add_part(Part::new(
            "/docProps/core.xml",
            ct::OPC_CORE_PROPERTIES,
            self.core_properties.to_xml(),
        ));
        package.add_part(Part::new(
            "/docProps/app.xml",
            ct::OFC_EXTENDED_PROPERTIES,
            app_properties_xml(self.slides.len(), notes_number),
        ));

        Ok(package)
    }

    fn add_fixed_parts(&self, package: &mut OpcPackage, has_notes: bool) {
        // Relationship order must match the r:id values in the resource XML
        let mut master_rels = Relationships::new();
        master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rt::THEME, "../theme/theme1.xml");
        package.add_part(
            Part::new(
                "/ppt/slideMasters/slideMaster1.xml",
                ct::PML_SLIDE_MASTER,
                SLIDE_MASTER_XML,
            )
            .with_rels(master_rels),
        );

        let mut layout_rels = Relationships::new();
        layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        package.add_part(
            Part::new(
                "/ppt/slideLayouts/slideLayout1.xml",
                ct::PML_SLIDE_LAYOUT,
                SLIDE_LAYOUT_XML,
            )
            .with_rels(layout_rels),
        );

        package.add_part(Part::new("/ppt/theme/theme1.xml", ct::OFC_THEME, THEME_XML));
        package.add_part(Part::new(
            "/ppt/presProps.xml",
            ct::PML_PRES_PROPS,
            PRES_PROPS_XML,
        ));

        if has_notes {
            let mut notes_master_rels = Relationships::new();
            notes_master_rels.add(rt::THEME, "../theme/theme2.xml");
            package.add_part(
                Part::new(
                    "/ppt/notesMasters/notesMaster1.xml",
                    ct::PML_NOTES_MASTER,
                    NOTES_MASTER_XML,
                )
                .with_rels(notes_master_rels),
            );
            package.add_part(Part::new("/ppt/theme/theme2.xml", ct::OFC_THEME, THEME_XML));
        }
    }

    /// Generate presentation.xml with the allocated relationship IDs.
    fn generate_presentation_xml(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
        notes_master_rel_id: Option<&str>,
    ) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#,
            master_rel_id
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:sldMasterIdLst>");

        if let Some(rel_id) = notes_master_rel_id {
            write!(
                xml,
                r#"<p:notesMasterIdLst><p:notesMasterId r:id="{}"/></p:notesMasterIdLst>"#,
                rel_id
            )
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}
