/// Relationship ID mapper used while assembling the package.
///
/// Slide relationships are created before slide XML is generated, so shapes
/// can reference the real IDs instead of placeholders.
use std::collections::HashMap;

/// Maps slide elements to the relationship IDs allocated for them.
///
/// Organized per slide, since every slide owns its own `.rels` part.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    /// (slide_index, chart_idx) to relationship ID
    chart_ids: HashMap<(usize, usize), String>,
    /// slide_index to notes slide relationship ID
    notes_ids: HashMap<usize, String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the relationship for a chart frame on a slide.
    ///
    /// # Arguments
    /// * `slide_index` - The index of the slide (0-based)
    /// * `chart_idx` - The presentation-wide chart index
    /// * `rel_id` - The relationship ID (e.g., "rId2")
    pub fn add_chart(&mut self, slide_index: usize, chart_idx: usize, rel_id: String) {
        self.chart_ids.insert((slide_index, chart_idx), rel_id);
    }

    pub fn get_chart_id(&self, slide_index: usize, chart_idx: usize) -> Option<&str> {
        self.chart_ids
            .get(&(slide_index, chart_idx))
            .map(|s| s.as_str())
    }

    pub fn add_notes(&mut self, slide_index: usize, rel_id: String) {
        self.notes_ids.insert(slide_index, rel_id);
    }

    pub fn get_notes_id(&self, slide_index: usize) -> Option<&str> {
        self.notes_ids.get(&slide_index).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_per_slide() {
        let mut mapper = RelationshipMapper::new();
        mapper.add_chart(0, 0, "rId2".to_string());
        mapper.add_chart(2, 1, "rId2".to_string());
        mapper.add_notes(2, "rId3".to_string());

        assert_eq!(mapper.get_chart_id(0, 0), Some("rId2"));
        assert_eq!(mapper.get_chart_id(1, 0), None);
        assert_eq!(mapper.get_chart_id(2, 1), Some("rId2"));
        assert_eq!(mapper.get_notes_id(2), Some("rId3"));
        assert_eq!(mapper.get_notes_id(0), None);
    }
}
