// Extraction prompt templates.
// All prompts for the extraction module are defined here.

use crate::llm_client::prompts::{FIDELITY_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::models::CareerFocus;

pub const EXTRACTION_PROMPT: &str = "\
You are an expert recruitment assistant. Extract all professional details from this document \
and structure them into the provided JSON schema.

Guidelines:
1. Professional Summary: Create a compelling 2-3 sentence summary if one isn't clearly provided.
2. Experience: Extract job title, company, location, dates, and convert descriptions into an \
array of clear, impact-oriented bullet points.
3. Skills: Categorize skills (e.g., \"Technical\", \"Soft Skills\", \"Tools\").
4. Education: Extract institution, degree, and dates.
5. Projects: Extract project name, a one-sentence description, and any link.
6. Certifications and Awards: List all professional certifications and honors found.

CAREER FOCUS: {focus_hint}";

/// How each career focus should bias phrasing and grouping.
pub fn focus_hint(focus: CareerFocus) -> &'static str {
    match focus {
        CareerFocus::General => {
            "Keep phrasing neutral and broadly applicable across industries."
        }
        CareerFocus::Developer => {
            "Frame the profile for software engineering roles. Group skills into languages, \
             frameworks, infrastructure and tooling, and surface technical scope in bullets."
        }
        CareerFocus::Creator => {
            "Frame the profile for content creators. Emphasize audience growth, channels, \
             publishing cadence and collaborations."
        }
        CareerFocus::Data => {
            "Frame the profile for data roles. Group skills into analysis, modeling, data \
             engineering and visualization, and surface datasets and measurable outcomes."
        }
        CareerFocus::Product => {
            "Frame the profile for product management. Emphasize roadmap ownership, launches, \
             discovery and cross-functional leadership."
        }
        CareerFocus::Marketing => {
            "Frame the profile for marketing roles. Emphasize campaigns, channels, conversion \
             and brand metrics."
        }
        CareerFocus::Sales => {
            "Frame the profile for sales roles. Emphasize quota attainment, pipeline, deal \
             sizes and account growth."
        }
        CareerFocus::Design => {
            "Frame the profile for creative and design roles. Emphasize portfolio pieces, \
             design systems, tools and user research."
        }
    }
}

/// Full instruction text for one extraction request.
pub fn build_extraction_prompt(focus: CareerFocus) -> String {
    format!(
        "{}\n\n{}\n{}",
        EXTRACTION_PROMPT.replace("{focus_hint}", focus_hint(focus)),
        FIDELITY_INSTRUCTION,
        JSON_ONLY_INSTRUCTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_focus_hint() {
        let prompt = build_extraction_prompt(CareerFocus::Sales);
        assert!(prompt.contains("quota attainment"));
        assert!(!prompt.contains("{focus_hint}"));
    }

    #[test]
    fn test_every_focus_has_distinct_hint() {
        let mut hints: Vec<&str> = CareerFocus::ALL.into_iter().map(focus_hint).collect();
        hints.sort_unstable();
        hints.dedup();
        assert_eq!(hints.len(), CareerFocus::ALL.len());
    }
}
