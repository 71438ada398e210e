use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("static escape patterns are valid")
});

/// Escape XML special characters in text and attribute values.
///
/// # Examples
///
/// ```
/// use deckwright::common::xml::escape_xml;
/// assert_eq!(escape_xml("R&D <2024>"), "R&amp;D &lt;2024&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_xml(r#"say "hi" it's"#), "say &quot;hi&quot; it&apos;s");
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape_xml("€28 savings"), "€28 savings");
        assert_eq!(escape_xml(""), "");
    }
}
