//! Fixed package parts and document properties.
//!
//! Every generated deck shares one blank slide master, layout and theme. The
//! properties parts are rendered per deck.
use crate::common::xml::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

pub(crate) const SLIDE_MASTER_XML: &str = include_str!("resources/slideMaster1.xml");
pub(crate) const SLIDE_LAYOUT_XML: &str = include_str!("resources/slideLayout1.xml");
pub(crate) const NOTES_MASTER_XML: &str = include_str!("resources/notesMaster1.xml");
pub(crate) const THEME_XML: &str = include_str!("resources/theme1.xml");
pub(crate) const PRES_PROPS_XML: &str = include_str!("resources/presProps.xml");

/// Dublin Core properties written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// `cp:category`; decks put the company name here
    pub category: Option<String>,
    pub created: DateTime<Utc>,
}

impl Default for CoreProperties {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            category: None,
            created: Utc::now(),
        }
    }
}

impl CoreProperties {
    pub(crate) fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
        ));

        // Writing into a String cannot fail.
        if let Some(title) = &self.title {
            let _ = write!(xml, "<dc:title>{}</dc:title>", escape_xml(title));
        }
        if let Some(subject) = &self.subject {
            let _ = write!(xml, "<dc:subject>{}</dc:subject>", escape_xml(subject));
        }
        if let Some(author) = &self.author {
            let _ = write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(author));
        }
        if let Some(category) = &self.category {
            let _ = write!(xml, "<cp:category>{}</cp:category>", escape_xml(category));
        }
        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        let _ = write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
            stamp
        );
        xml.push_str("</cp:coreProperties>");
        xml
    }
}

/// `docProps/app.xml` for a deck with `slide_count` slides.
pub(crate) fn app_properties_xml(slide_count: usize, notes_count: usize) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    let _ = write!(
        xml,
        "<Application>{} {}</Application>",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    xml.push_str("<PresentationFormat>Custom</PresentationFormat>");
    let _ = write!(
        xml,
        "<Slides>{}</Slides><Notes>{}</Notes>",
        slide_count, notes_count
    );
    xml.push_str("</Properties>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_properties() {
        let props = CoreProperties {
            title: Some("Q3 <Review>".to_string()),
            author: Some("Strategy Team".to_string()),
            subject: None,
            category: Some("Acme & Co".to_string()),
            created: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        };
        let xml = props.to_xml();
        assert!(xml.contains("<dc:title>Q3 &lt;Review&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>Strategy Team</dc:creator>"));
        assert!(xml.contains(">2024-05-01T09:30:00Z</dcterms:created>"));
        assert!(xml.contains("<cp:category>Acme &amp; Co</cp:category>"));
        assert!(!xml.contains("dc:subject"));
    }

    #[test]
    fn test_app_properties() {
        let xml = app_properties_xml(7, 2);
        assert!(xml.contains("<Slides>7</Slides><Notes>2</Notes>"));
    }

    #[test]
    fn test_resources_are_well_formed_roots() {
        assert!(SLIDE_MASTER_XML.contains("<p:sldMaster"));
        assert!(SLIDE_LAYOUT_XML.contains(r#"type="blank""#));
        assert!(NOTES_MASTER_XML.contains("<p:notesMaster"));
        assert!(THEME_XML.contains("<a:clrScheme"));
        assert!(PRES_PROPS_XML.contains("presentationPr"));
    }
}
