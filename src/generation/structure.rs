//! Rule-based mapping of document sections onto a presentation outline.
use super::document_parser::Sections;
use super::prompts::{STRUCTURE_TEMPLATES, StructureTemplate, structure_template};
use serde::{Deserialize, Serialize};

/// Section-name keywords that supply content for each slide type.
fn section_keywords(slide_type: &str) -> Option<&'static [&'static str]> {
    let keywords: &'static [&'static str] = match slide_type {
        "problem" => &["problem", "challenge", "pain", "issue", "current_state"],
        "solution" => &["solution", "approach", "answer", "product", "offering"],
        "market" => &["market", "opportunity", "tam", "sam", "som", "size"],
        "value_proposition" => &["value", "proposition", "differentiator", "benefit", "pillar"],
        "product" => &["product", "feature", "capability", "platform", "service"],
        "traction" => &["traction", "milestone", "achievement", "progress", "roadmap"],
        "business_model" => &["business", "model", "revenue", "monetization", "unit_economics"],
        "go_to_market" => &["go_to_market", "gtm", "distribution", "channel", "launch"],
        "competition" => &["competition", "competitive", "moat", "advantage", "differentiation"],
        "team" => &["team", "founder", "leadership", "experience"],
        "financials" => &["financial", "projection", "forecast", "revenue", "growth"],
        "ask" => &["ask", "raise", "funding", "investment", "use_of_funds"],
        "vision" => &["vision", "future", "mission", "long_term"],
        "executive_summary" => &["executive", "summary", "overview", "key_points"],
        "situation" => &["situation", "context", "background", "current"],
        "challenges" => &["challenge", "issue", "problem", "obstacle"],
        "options" => &["option", "alternative", "scenario", "approach"],
        "recommendation" => &["recommendation", "propose", "suggest", "path"],
        "implementation" => &["implementation", "execute", "plan", "action"],
        "timeline" => &["timeline", "roadmap", "phase", "schedule"],
        "risks" => &["risk", "mitigation", "concern", "challenge"],
        "next_steps" => &["next", "step", "action", "follow_up"],
        _ => return None,
    };
    Some(keywords)
}

/// Slide types an outline must cover.
const CRITICAL_TYPES: [&str; 2] = ["problem", "solution"];

/// One recommended slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSlide {
    pub slide_type: String,
    pub purpose: String,
    pub source_content: Option<String>,
    pub has_content: bool,
}

/// Result of [`validate_structure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub total_slides: usize,
    pub slides_with_content: usize,
}

pub fn available_types() -> Vec<&'static str> {
    STRUCTURE_TEMPLATES.iter().map(|t| t.key).collect()
}

pub fn template(presentation_type: &str) -> &'static StructureTemplate {
    structure_template(presentation_type)
}

/// Walk the outline for `presentation_type` and attach the first document
/// section whose name matches each slide type.
pub fn recommend_structure(
    sections: &Sections,
    presentation_type: &str,
    max_slides: usize,
) -> Vec<RecommendedSlide> {
    template(presentation_type)
        .structure
        .iter()
        .take(max_slides)
        .map(|spec| {
            let source_content = matching_content(spec.slide_type, sections);
            RecommendedSlide {
                slide_type: spec.slide_type.to_string(),
                purpose: spec.purpose.to_string(),
                has_content: source_content.is_some(),
                source_content,
            }
        })
        .collect()
}

/// The first section whose name matches wins; a blank body counts as none.
fn matching_content(slide_type: &str, sections: &Sections) -> Option<String> {
    let fallback = [slide_type];
    let keywords: &[&str] = section_keywords(slide_type).unwrap_or(&fallback);
    sections
        .iter()
        .find_map(|(name, content)| {
            let name = name.to_lowercase();
            keywords
                .iter()
                .any(|kw| name.contains(kw))
                .then(|| content.clone())
        })
        .filter(|content| !content.is_empty())
}

/// Check that enough slides have content and the critical slide types are
/// covered.
pub fn validate_structure(structure: &[RecommendedSlide], min_slides: usize) -> StructureReport {
    let slides_with_content = structure.iter().filter(|s| s.has_content).count();
    let mut issues = Vec::new();
    if slides_with_content < min_slides {
        issues.push(format!(
            "Only {slides_with_content} slides have content, minimum required is {min_slides}"
        ));
    }
    for critical in CRITICAL_TYPES {
        if !structure
            .iter()
            .any(|s| s.slide_type == critical && s.has_content)
        {
            issues.push(format!("Missing critical slide type: {critical}"));
        }
    }
    StructureReport {
        is_valid: issues.is_empty(),
        issues,
        total_slides: structure.len(),
        slides_with_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::document_parser::extract_sections;

    #[test]
    fn test_available_types() {
        assert_eq!(
            available_types(),
            ["investor_pitch", "strategy_update", "product_overview", "quarterly_review"]
        );
    }

    #[test]
    fn test_recommend_structure() {
        let sections = extract_sections(
            "# Customer Pain\nSlow onboarding\n# Our Approach\nSelf-serve\n# Founding Team\nEx-bankers",
        );
        let structure = recommend_structure(&sections, "investor_pitch", 15);
        assert_eq!(structure.len(), 13);
        assert_eq!(structure[0].slide_type, "problem");
        assert_eq!(structure[0].source_content.as_deref(), Some("Slow onboarding"));
        assert_eq!(structure[1].source_content.as_deref(), Some("Self-serve"));
        assert!(!structure[2].has_content);
        let team = structure.iter().find(|s| s.slide_type == "team").unwrap();
        assert_eq!(team.source_content.as_deref(), Some("Ex-bankers"));
    }

    #[test]
    fn test_unmapped_type_uses_own_name() {
        let sections = extract_sections("# Pricing Tiers\nThree plans");
        let structure = recommend_structure(&sections, "product_overview", 20);
        let pricing = structure.iter().find(|s| s.slide_type == "pricing").unwrap();
        assert!(pricing.has_content);
    }

    #[test]
    fn test_blank_section_has_no_content() {
        let sections = extract_sections("# Problem\n\n# Solution\nSelf-serve");
        let structure = recommend_structure(&sections, "investor_pitch", 20);
        let problem = structure.iter().find(|s| s.slide_type == "problem").unwrap();
        assert!(!problem.has_content);
        assert!(problem.source_content.is_none());

        let report = validate_structure(&structure, 1);
        assert_eq!(report.issues, ["Missing critical slide type: problem"]);
    }

    #[test]
    fn test_max_slides_truncates() {
        let structure = recommend_structure(&Sections::new(), "strategy_update", 3);
        assert_eq!(structure.len(), 3);
        assert!(structure.iter().all(|s| !s.has_content));
    }

    #[test]
    fn test_validate_structure() {
        let sections = extract_sections("# Problem\nx\n# Solution\ny");
        let structure = recommend_structure(&sections, "investor_pitch", 15);
        let report = validate_structure(&structure, 5);
        assert!(!report.is_valid);
        assert_eq!(report.total_slides, 13);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].starts_with("Only "));

        let report = validate_structure(&structure, 1);
        assert!(report.is_valid);
    }

    #[test]
    fn test_missing_critical_types() {
        let report = validate_structure(&[], 0);
        assert_eq!(
            report.issues,
            ["Missing critical slide type: problem", "Missing critical slide type: solution"]
        );
    }
}
