//! Relationship collections (`*.rels` parts).
use crate::common::xml::escape_xml;
use crate::ooxml::constants::namespace;
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub r_id: String,
    pub rel_type: String,
    /// Target URI, relative to the source part's directory
    pub target: String,
}

/// Ordered set of relationships belonging to one source part.
///
/// Relationship IDs are allocated sequentially (`rId1`, `rId2`, ...) in the
/// order relationships are added.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its newly allocated ID.
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });
        r_id
    }

    /// Look up the ID of the first relationship with the given type and target.
    pub fn find(&self, rel_type: &str, target: &str) -> Option<&str> {
        self.rels
            .iter()
            .find(|r| r.rel_type == rel_type && r.target == target)
            .map(|r| r.r_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Serialize to a `Relationships` XML document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        // Writing into a String cannot fail.
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS);
        for rel in &self.rels {
            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.r_id,
                escape_xml(&rel.rel_type),
                escape_xml(&rel.target)
            );
        }
        xml.push_str("</Relationships>");
        xml
    }
}
