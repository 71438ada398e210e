//! Source document loading and light text normalisation.
use crate::common::error::{Error, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const SUPPORTED_FORMATS: [&str; 4] = [".txt", ".md", ".markdown", ".pdf"];

/// Sources longer than this that contain a newline are treated as raw text.
const RAW_TEXT_MIN_LEN: usize = 500;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("space run regex"));

/// Document sections in reading order, keyed by normalised heading.
pub type Sections = IndexMap<String, String>;

/// Read `source` as a file path or raw text and return cleaned text.
pub fn parse(source: &str) -> Result<String> {
    if is_file_path(source) {
        parse_file(source)
    } else {
        Ok(clean_text(source))
    }
}

/// Read a supported file and return cleaned text.
///
/// PDF files are recognised but no PDF text extractor is built in, so they
/// fail with [`Error::Unsupported`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let suffix = suffix_of(path);
    match suffix.as_str() {
        ".txt" | ".md" | ".markdown" => {
            debug!(path = %path.display(), "reading text document");
            let content = fs::read_to_string(path)?;
            Ok(clean_text(&content))
        },
        ".pdf" => Err(Error::Unsupported(format!(
            "PDF text extraction is not available: {}",
            path.display()
        ))),
        other => Err(Error::InvalidFormat(format!(
            "Unsupported file format: {other}. Supported formats: {}",
            SUPPORTED_FORMATS.join(", ")
        ))),
    }
}

fn suffix_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn is_file_path(source: &str) -> bool {
    if source.contains('\n') && source.chars().count() > RAW_TEXT_MIN_LEN {
        return false;
    }
    let path = Path::new(source);
    SUPPORTED_FORMATS.contains(&suffix_of(path).as_str()) || path.exists()
}

/// Collapse blank-line runs to one blank line and space runs to one space.
pub fn clean_text(text: &str) -> String {
    let text = BLANK_RUNS.replace_all(text, "\n\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

/// Split markdown-style content into sections at `#` headings.
///
/// Text before the first heading belongs to `introduction`. A heading seen
/// twice keeps its first position and takes the later content.
pub fn extract_sections(content: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current = "introduction".to_string();
    let mut lines: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if let Some(heading) = line.strip_prefix('#') {
            if !lines.is_empty() {
                sections.insert(current, lines.join("\n").trim().to_string());
            }
            current = section_key(heading.trim_start_matches('#'));
            lines.clear();
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        sections.insert(current, lines.join("\n").trim().to_string());
    }
    sections
}

fn section_key(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Slide count suggested by length, between 5 and 20.
pub fn estimated_slides(content: &str, words_per_slide: usize) -> usize {
    (word_count(content) / words_per_slide.max(1)).clamp(5, 20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a\n\n\n\nb   c  "), "a\n\nb c");
        assert_eq!(clean_text("x\n\ny"), "x\n\ny");
    }

    #[test]
    fn test_raw_text_passthrough() {
        let text = format!("Heading\n{}", "word ".repeat(200));
        let parsed = parse(&text).unwrap();
        assert!(parsed.starts_with("Heading\nword word"));
    }

    #[test]
    fn test_raw_text_length_counts_chars() {
        // 600 bytes but only 309 characters
        let short = format!("{}\nnotes.md", "é".repeat(300));
        assert!(is_file_path(&short));

        let long = format!("{}\nnotes.md", "é".repeat(600));
        assert!(!is_file_path(&long));
    }

    #[test]
    fn test_short_text_is_not_a_path() {
        assert_eq!(parse("just a sentence").unwrap(), "just a sentence");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(parse("/no/such/notes.md"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_parse_markdown_file() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        write!(file, "# Problem\n\n\n\nBanks  are slow\n").unwrap();
        let text = parse(file.path().to_str().unwrap()).unwrap();
        assert_eq!(text, "# Problem\n\nBanks are slow");
    }

    #[test]
    fn test_unsupported_suffix() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        match parse_file(file.path()) {
            Err(Error::InvalidFormat(msg)) => assert!(msg.contains(".txt, .md, .markdown, .pdf")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_pdf_is_unsupported() {
        let file = tempfile::Builder::new().suffix(".PDF").tempfile().unwrap();
        assert!(matches!(parse_file(file.path()), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_extract_sections() {
        let content = "Intro line\n# The Problem\nSlow banks\n## Go-To Market!\nDirect sales\n# The Problem\nReplaced";
        let sections = extract_sections(content);
        let keys: Vec<_> = sections.keys().map(String::as_str).collect();
        assert_eq!(keys, ["introduction", "the_problem", "go_to_market_"]);
        assert_eq!(sections["the_problem"], "Replaced");
        assert_eq!(sections["go_to_market_"], "Direct sales");
    }

    #[test]
    fn test_leading_heading_has_no_introduction() {
        let sections = extract_sections("# Team\nFounders");
        assert!(!sections.contains_key("introduction"));
        assert_eq!(sections["team"], "Founders");
    }

    #[test]
    fn test_estimated_slides() {
        assert_eq!(estimated_slides("a b c", 100), 5);
        assert_eq!(estimated_slides(&"w ".repeat(1_000), 100), 10);
        assert_eq!(estimated_slides(&"w ".repeat(5_000), 100), 20);
    }
}
