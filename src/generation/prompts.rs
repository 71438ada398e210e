//! Prompt text for content generation.
//!
//! The presentation structures double as the reference outlines for the
//! rule-based [`crate::generation::structure`] recommender.
use std::fmt::Write;

/// System prompt for every content-generation call.
pub const SYSTEM_PROMPT: &str = "\
You are a senior management consultant with 20 years of experience creating
executive presentations for Fortune 500 companies. You specialize in clear,
insight-driven slide decks that communicate complex ideas simply.

Your presentations follow these principles:
1. TITLES ARE INSIGHTS: every slide title is a complete sentence stating the \"so what\"
2. BULLETS SUPPORT THE TITLE: bullet points give evidence and detail, not new ideas
3. NO FLUFF: every word earns its place
4. PARALLEL STRUCTURE: bullets share one grammatical structure
5. QUANTIFY WHEN POSSIBLE: use the numbers, percentages and timeframes you are given
6. ACTION-ORIENTED: active voice and strong verbs

You ONLY use information from the source material. You NEVER invent statistics,
numbers or facts. Without quantitative data in the source, write qualitative
slides without metrics.";

/// One slot of a presentation outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSpec {
    pub slide_type: &'static str,
    pub purpose: &'static str,
}

const fn spec(slide_type: &'static str, purpose: &'static str) -> SlideSpec {
    SlideSpec {
        slide_type,
        purpose,
    }
}

/// Outline of a presentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub max_slides: usize,
    pub structure: &'static [SlideSpec],
}

pub const DEFAULT_PRESENTATION_TYPE: &str = "investor_pitch";

pub const STRUCTURE_TEMPLATES: [StructureTemplate; 4] = [
    StructureTemplate {
        key: "investor_pitch",
        name: "Investor Pitch (Sequoia/YC Format)",
        max_slides: 15,
        structure: &[
            spec("problem", "Pain point the market faces"),
            spec("solution", "How you solve it"),
            spec("market", "Size and growth of opportunity"),
            spec("value_proposition", "Why customers choose you"),
            spec("product", "What you've built"),
            spec("traction", "Evidence of product-market fit"),
            spec("business_model", "How you make money"),
            spec("go_to_market", "How you acquire customers"),
            spec("competition", "Competitive landscape and moat"),
            spec("team", "Why this team wins"),
            spec("financials", "Projections and metrics"),
            spec("ask", "What you're raising and use of funds"),
            spec("vision", "Where this goes long-term"),
        ],
    },
    StructureTemplate {
        key: "strategy_update",
        name: "Strategy Update (McKinsey Format)",
        max_slides: 20,
        structure: &[
            spec("executive_summary", "Key findings in 3-5 bullets"),
            spec("situation", "Current state assessment"),
            spec("challenges", "Key issues to address"),
            spec("options", "Strategic alternatives considered"),
            spec("recommendation", "Proposed path forward"),
            spec("implementation", "How to execute"),
            spec("timeline", "Phased roadmap"),
            spec("risks", "Key risks and mitigations"),
            spec("next_steps", "Immediate actions required"),
        ],
    },
    StructureTemplate {
        key: "product_overview",
        name: "Product Overview",
        max_slides: 12,
        structure: &[
            spec("problem", "Customer pain point"),
            spec("solution", "Product overview"),
            spec("features", "Key capabilities"),
            spec("benefits", "Value delivered"),
            spec("use_cases", "How customers use it"),
            spec("differentiation", "Why choose us"),
            spec("pricing", "How it's priced"),
            spec("next_steps", "Call to action"),
        ],
    },
    StructureTemplate {
        key: "quarterly_review",
        name: "Quarterly Business Review",
        max_slides: 15,
        structure: &[
            spec("executive_summary", "Quarter highlights"),
            spec("kpi_performance", "Key metrics vs. targets"),
            spec("wins", "Major achievements"),
            spec("challenges", "Issues encountered"),
            spec("learnings", "What we learned"),
            spec("next_quarter", "Priorities ahead"),
            spec("asks", "Support needed"),
        ],
    },
];

/// Outline for `presentation_type`; unknown types get the investor pitch.
pub fn structure_template(presentation_type: &str) -> &'static StructureTemplate {
    STRUCTURE_TEMPLATES
        .iter()
        .find(|t| t.key == presentation_type)
        .unwrap_or(&STRUCTURE_TEMPLATES[0])
}

fn reference_structure(template: &StructureTemplate) -> String {
    template
        .structure
        .iter()
        .map(|s| format!("- {}: {}", s.slide_type, s.purpose))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ask for a slide-by-slide outline of `document`.
pub fn structure_analysis_prompt(document: &str, presentation_type: &str, max_slides: usize) -> String {
    let template = structure_template(presentation_type);
    format!(
        r#"Analyze the following source document and recommend a slide structure.

SOURCE DOCUMENT:
{document}

PRESENTATION TYPE: {name}
MAXIMUM SLIDES: {max_slides}

REFERENCE STRUCTURE:
{reference}

TASK:
1. Read the source document carefully
2. Identify which sections from the reference structure apply to this content
3. Recommend a slide-by-slide structure
4. For each slide, note what content from the source supports it

OUTPUT FORMAT (JSON):
{{
    "recommended_slides": [
        {{
            "slide_number": 1,
            "type": "problem",
            "working_title": "Brief title idea",
            "source_content": "Relevant quotes/facts from source"
        }}
    ],
    "omitted_sections": ["section_type1", "section_type2"],
    "reasoning": "Brief explanation of structure choices"
}}

Only include slides that have supporting content in the source document.
Do NOT include slides for topics not covered in the source."#,
        name = template.name,
        reference = reference_structure(template),
    )
}

/// Ask for the title and bullets of one slide.
pub fn slide_generation_prompt(
    slide_type: &str,
    source_content: &str,
    slide_number: usize,
    total_slides: usize,
    previous_title: Option<&str>,
) -> String {
    let context = previous_title
        .map(|t| {
            format!("\nPREVIOUS SLIDE TITLE: {t}\nEnsure this slide flows logically from the previous one.")
        })
        .unwrap_or_default();
    format!(
        r#"Create content for slide {slide_number} of {total_slides}.

SLIDE TYPE: {slide_type}
{context}

SOURCE CONTENT TO USE:
{source_content}

REQUIREMENTS:
1. TITLE: an insight-driven title (complete sentence, states the "so what")
   - Bad: "Market Overview"
   - Good: "The $4.7T digital banking market is growing 13% annually"
2. BULLET POINTS: 3-4 bullets that support the title
   - Each bullet is a complete thought in parallel structure
   - Be specific and use only the source content
3. NO FABRICATION: if a number is not in the source, do not invent it

OUTPUT FORMAT (JSON):
{{
    "title": "Insight-driven slide title as complete sentence",
    "bullet_points": ["First point", "Second point", "Third point"],
    "notes": "Any presenter notes or caveats"
}}"#
    )
}

/// Ask for a more insight-driven version of a draft title.
pub fn title_refinement_prompt(draft_title: &str, slide_type: &str) -> String {
    format!(
        r#"Refine this slide title to be more insight-driven.

CURRENT TITLE: {draft_title}
SLIDE TYPE: {slide_type}

RULES FOR GOOD TITLES:
1. Complete sentence (subject + verb + object)
2. States the "so what"
3. Specific, not generic
4. Active voice
5. Under 15 words if possible

BAD: "Market Overview", "Our Solution", "Financial Projections"
GOOD: "Our AI-first platform reduces customer acquisition cost by 75%"

OUTPUT FORMAT (JSON):
{{
    "refined_title": "Your improved title here",
    "reasoning": "Brief explanation of improvement"
}}"#
    )
}

/// Ask for tighter bullets under `title`.
pub fn bullet_refinement_prompt(bullets: &[String], title: &str) -> String {
    let mut bullets_text = String::new();
    for (i, bullet) in bullets.iter().enumerate() {
        if i > 0 {
            bullets_text.push('\n');
        }
        let _ = write!(bullets_text, "- {bullet}");
    }
    format!(
        r#"Refine these bullet points to better support the slide title.

SLIDE TITLE: {title}

CURRENT BULLETS:
{bullets_text}

RULES FOR GOOD BULLETS:
1. Support the title's claim with evidence or detail
2. Parallel grammatical structure
3. Specific, not generic
4. Start with strong verbs or key nouns
5. One complete thought per bullet, 10-20 words

OUTPUT FORMAT (JSON):
{{
    "refined_bullets": ["Improved bullet 1", "Improved bullet 2", "Improved bullet 3"],
    "changes_made": "Brief summary of improvements"
}}"#
    )
}

/// Ask for a whole deck, including chart data and annotations where the
/// source has numbers.
pub fn full_presentation_prompt(
    document: &str,
    presentation_type: &str,
    max_slides: usize,
    audience: &str,
    duration_minutes: u32,
) -> String {
    let template = structure_template(presentation_type);
    format!(
        r#"Create a {max_slides}-slide presentation from the following source document.

SOURCE DOCUMENT:
{document}

PRESENTATION PARAMETERS:
- Type: {name}
- Audience: {audience}
- Duration: {duration_minutes} minutes (~1 minute per slide)
- Maximum slides: {max_slides}

REFERENCE STRUCTURE:
{reference}

CRITICAL RULES:
1. ONLY use information from the source document; NO fabricated statistics or numbers
2. If the source has no numbers, create qualitative slides without metrics
3. Every title is an insight (complete sentence stating the "so what")
4. 3-4 bullet points per slide that support the title
5. Parallel structure within each slide's bullets
6. Flow logically from slide to slide

CHART DATA RULES:
When the source contains QUANTITATIVE DATA (numbers, percentages, trends, comparisons),
include a chart_data object for that slide with the exact numbers from the source.

Chart types:
- "column": comparing categories or trends over time (most common)
- "waterfall": components adding up to a total

Chart data fields:
- "type": "column" or "waterfall"
- "title": descriptive chart title, e.g. "Revenue by Channel (€M)"
- "categories": X-axis labels
- "series": column charts; each series has "name" and "values"
- "values": waterfall charts; a single array of values
- "types": waterfall charts; "start", "increase", "decrease" or "end" per value
- "highlight_index": series to highlight (0-indexed, column charts with 2+ series)
- "color_mode": "comparison" when comparing series without a highlight
- "source": data source attribution

Chart annotations (in "annotations" when helpful):
- cagr_arrow: growth rate between two points
  {{"type": "cagr_arrow", "series_index": 0, "from_category": 0, "to_category": 4, "label": "45% CAGR"}}
- difference_line: difference between two bars
  {{"type": "difference_line", "series_index": 0, "from_category": 0, "to_category": 1, "label": "€28 savings"}}
- leader_line: a labelled pointer to one data point
  {{"type": "leader_line", "x": 0.8, "y": 0.9, "text": "Key insight", "direction": "right"}}

OUTPUT FORMAT (JSON):
{{
    "presentation_title": "Main title for the deck",
    "subtitle": "Subtitle or company name",
    "slides": [
        {{
            "slide_number": 1,
            "slide_type": "problem",
            "title": "Insight-driven title as complete sentence",
            "bullet_points": ["Supporting point 1", "Supporting point 2", "Supporting point 3"],
            "chart_data": {{
                "type": "column",
                "title": "Chart Title (Units)",
                "categories": ["Cat1", "Cat2", "Cat3"],
                "series": [
                    {{"name": "Series 1", "values": [10, 20, 30]}},
                    {{"name": "Series 2", "values": [15, 25, 35]}}
                ],
                "highlight_index": 1,
                "source": "Source: Data source",
                "annotations": [
                    {{"type": "cagr_arrow", "series_index": 1, "from_category": 0, "to_category": 2, "label": "50% CAGR"}}
                ]
            }}
        }},
        {{
            "slide_number": 2,
            "slide_type": "situation",
            "title": "Another insight-driven title",
            "bullet_points": ["Point 1", "Point 2", "Point 3"]
        }}
    ]
}}

IMPORTANT:
- Include chart_data ONLY when the source has specific numbers to visualize
- Extract EXACT numbers from the source
- For qualitative content, omit chart_data entirely

Generate exactly {max_slides} content slides (title and closing slides are added automatically)."#,
        name = template.name,
        reference = reference_structure(template),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_sizes() {
        assert_eq!(structure_template("investor_pitch").structure.len(), 13);
        assert_eq!(structure_template("strategy_update").structure.len(), 9);
        assert_eq!(structure_template("product_overview").max_slides, 12);
        assert_eq!(structure_template("quarterly_review").structure.len(), 7);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        assert_eq!(structure_template("keynote").key, "investor_pitch");
    }

    #[test]
    fn test_full_prompt_contents() {
        let prompt = full_presentation_prompt("Revenue grew 40%.", "strategy_update", 8, "board", 20);
        assert!(prompt.starts_with("Create a 8-slide presentation"));
        assert!(prompt.contains("Revenue grew 40%."));
        assert!(prompt.contains("- Type: Strategy Update (McKinsey Format)"));
        assert!(prompt.contains("- executive_summary: Key findings in 3-5 bullets"));
        assert!(prompt.contains("\"type\": \"difference_line\""));
        assert!(prompt.contains("Generate exactly 8 content slides"));
    }

    #[test]
    fn test_slide_prompt_context() {
        let with = slide_generation_prompt("market", "TAM is $4B", 3, 10, Some("Problem title"));
        assert!(with.contains("PREVIOUS SLIDE TITLE: Problem title"));
        let without = slide_generation_prompt("market", "TAM is $4B", 3, 10, None);
        assert!(!without.contains("PREVIOUS SLIDE TITLE"));
        assert!(without.contains("slide 3 of 10"));
    }

    #[test]
    fn test_bullet_prompt_lists_bullets() {
        let prompt = bullet_refinement_prompt(&["one".to_string(), "two".to_string()], "T");
        assert!(prompt.contains("CURRENT BULLETS:\n- one\n- two\n"));
    }
}
