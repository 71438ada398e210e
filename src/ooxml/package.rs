//! Package writer for OPC packages.
//!
//! Serializes a flat list of parts into a ZIP container, writing
//! `[Content_Types].xml` first, then the package relationships, then every
//! part followed by its own `_rels/*.rels` sibling.

use crate::ooxml::constants::{content_type as ct, namespace};
use crate::ooxml::error::Result;
use crate::ooxml::rels::Relationships;
use crate::common::xml::escape_xml;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// A single part in the package.
#[derive(Debug, Clone)]
pub struct Part {
    /// Absolute part name, e.g. `/ppt/slides/slide1.xml`
    pub partname: String,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub rels: Relationships,
}

impl Part {
    pub fn new(partname: impl Into<String>, content_type: &str, blob: impl Into<Vec<u8>>) -> Self {
        Self {
            partname: partname.into(),
            content_type: content_type.to_string(),
            blob: blob.into(),
            rels: Relationships::new(),
        }
    }

    pub fn with_rels(mut self, rels: Relationships) -> Self {
        self.rels = rels;
        self
    }

    /// ZIP member name (part name without the leading slash).
    pub fn membername(&self) -> &str {
        self.partname.trim_start_matches('/')
    }

    /// Part name of this part's relationships, e.g. `/ppt/_rels/presentation.xml.rels`.
    pub fn rels_partname(&self) -> String {
        match self.partname.rfind('/') {
            Some(idx) => format!(
                "{}/_rels/{}.rels",
                &self.partname[..idx],
                &self.partname[idx + 1..]
            ),
            None => format!("/_rels/{}.rels", self.partname),
        }
    }

    fn ext(&self) -> &str {
        self.partname.rsplit('.').next().unwrap_or("")
    }
}

/// An in-memory OPC package ready to be serialized.
#[derive(Debug, Default)]
pub struct OpcPackage {
    /// Package-level relationships (`/_rels/.rels`)
    pub rels: Relationships,
    pub parts: Vec<Part>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn part(&self, partname: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.partname == partname)
    }
}

/// Package writer that serializes an [`OpcPackage`] to ZIP bytes.
pub struct PackageWriter;

impl PackageWriter {
    /// Write a package to a file.
    /// Missing parent directories are created.
    pub fn write<P: AsRef<std::path::Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let path = path.as_ref();
        let bytes = Self::to_bytes(package)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let cti = ContentTypesItem::from_package(package);
        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(cti.to_xml().as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(package.rels.to_xml().as_bytes())?;

        for part in &package.parts {
            zip.start_file(part.membername(), options)?;
            zip.write_all(&part.blob)?;

            if !part.rels.is_empty() {
                let rels_name = part.rels_partname();
                zip.start_file(rels_name.trim_start_matches('/'), options)?;
                zip.write_all(part.rels.to_xml().as_bytes())?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Helper for building [Content_Types].xml content.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: HashMap<String, String>,
    /// Override content types by partname
    overrides: HashMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in &package.parts {
            cti.add_content_type(part);
        }
        cti
    }

    fn add_content_type(&mut self, part: &Part) {
        let ext = part.ext();
        if Self::is_default_content_type(ext, &part.content_type) {
            self.defaults
                .insert(ext.to_string(), part.content_type.clone());
        } else {
            self.overrides
                .insert(part.partname.clone(), part.content_type.clone());
        }
    }

    fn is_default_content_type(ext: &str, content_type: &str) -> bool {
        matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS) | ("xml", ct::XML)
        )
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);

        let mut exts: Vec<_> = self.defaults.keys().collect();
        exts.sort();
        for ext in exts {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(&self.defaults[ext])
            );
        }

        let mut partnames: Vec<_> = self.overrides.keys().collect();
        partnames.sort();
        for partname in partnames {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(&self.overrides[partname])
            );
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::constants::relationship_type as rt;
    use std::io::Read;

    #[test]
    fn test_rels_partname() {
        let part = Part::new("/ppt/slides/slide3.xml", ct::PML_SLIDE, Vec::new());
        assert_eq!(part.rels_partname(), "/ppt/slides/_rels/slide3.xml.rels");
        assert_eq!(part.membername(), "ppt/slides/slide3.xml");
    }

    #[test]
    fn test_content_types_xml() {
        let mut pkg = OpcPackage::new();
        pkg.add_part(Part::new(
            "/ppt/presentation.xml",
            ct::PML_PRESENTATION_MAIN,
            b"<p/>".to_vec(),
        ));
        let xml = ContentTypesItem::from_package(&pkg).to_xml();

        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Override PartName="/ppt/presentation.xml""#));
    }

    #[test]
    fn test_to_bytes_round_trip() {
        let mut pkg = OpcPackage::new();
        pkg.rels.add(rt::OFFICE_DOCUMENT, "ppt/presentation.xml");

        let mut part_rels = Relationships::new();
        part_rels.add(rt::SLIDE, "slides/slide1.xml");
        pkg.add_part(
            Part::new("/ppt/presentation.xml", ct::PML_PRESENTATION_MAIN, b"<x/>".to_vec())
                .with_rels(part_rels),
        );

        let bytes = PackageWriter::to_bytes(&pkg).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut content = String::new();
        archive
            .by_name("ppt/presentation.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<x/>");
        assert!(archive.by_name("[Content_Types].xml").is_ok());
        assert!(archive.by_name("_rels/.rels").is_ok());
        assert!(archive.by_name("ppt/_rels/presentation.xml.rels").is_ok());
    }
}
