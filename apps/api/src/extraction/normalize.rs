//! Turns the model's text answer into a clean `ResumeData`.

use chrono::Utc;

use crate::llm_client::strip_json_fences;
use crate::models::ResumeData;

/// Parses the response text and back-fills ids.
///
/// An empty answer is read as `{}` and yields an empty record. Anything that
/// is not a JSON object matching the record shape is an error.
pub fn parse_resume_response(text: &str) -> Result<ResumeData, serde_json::Error> {
    let body = strip_json_fences(text);
    let body = if body.is_empty() { "{}" } else { body };
    let mut data: ResumeData = serde_json::from_str(body)?;
    normalize(&mut data, Utc::now().timestamp_millis());
    Ok(data)
}

/// Tidies a freshly parsed record in place. `stamp` seeds generated ids.
pub fn normalize(data: &mut ResumeData, stamp: i64) {
    let info = &mut data.personal_info;
    trim_in_place(&mut info.full_name);
    trim_in_place(&mut info.email);
    trim_in_place(&mut info.phone);
    trim_in_place(&mut info.location);
    trim_in_place(&mut info.summary);
    info.linkedin = non_empty(info.linkedin.take());
    info.website = non_empty(info.website.take());

    for (idx, exp) in data.experience.iter_mut().enumerate() {
        backfill_id(&mut exp.id, stamp, idx);
        clean_list(&mut exp.description);
    }
    for (idx, edu) in data.education.iter_mut().enumerate() {
        backfill_id(&mut edu.id, stamp, idx);
        edu.description = non_empty(edu.description.take());
    }
    for (idx, skill) in data.skills.iter_mut().enumerate() {
        backfill_id(&mut skill.id, stamp, idx);
        clean_list(&mut skill.items);
    }
    for (idx, project) in data.projects.iter_mut().enumerate() {
        backfill_id(&mut project.id, stamp, idx);
        project.link = non_empty(project.link.take());
    }
    clean_list(&mut data.awards);
    clean_list(&mut data.certifications);
}

fn backfill_id(id: &mut String, stamp: i64, idx: usize) {
    if id.trim().is_empty() {
        *id = format!("item-{stamp}-{idx}");
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(items: &mut Vec<String>) {
    items.iter_mut().for_each(trim_in_place);
    items.retain(|i| !i.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_n_experience_entries_get_n_non_empty_ids() {
        let json = r#"{
            "personalInfo": {"fullName": "Sam Lee", "email": "sam@example.com", "summary": "Builder."},
            "experience": [
                {"company": "A", "position": "Eng", "description": ["Shipped X"]},
                {"company": "B", "position": "Eng"},
                {"id": "keep-me", "company": "C", "position": "Lead"}
            ]
        }"#;
        let data = parse_resume_response(json).unwrap();
        assert_eq!(data.experience.len(), 3);
        assert!(data.experience.iter().all(|e| !e.id.is_empty()));
        assert_eq!(data.experience[2].id, "keep-me");
        assert_ne!(data.experience[0].id, data.experience[1].id);
    }

    #[test]
    fn test_missing_optional_sections_become_empty_lists() {
        let data = parse_resume_response(r#"{"personalInfo": {"fullName": "Sam"}}"#).unwrap();
        assert!(data.projects.is_empty());
        assert!(data.education.is_empty());
        assert!(data.awards.is_empty());
        assert!(data.certifications.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_resume_response("Sorry, I cannot read this file.").is_err());
        assert!(parse_resume_response("[1, 2, 3]").is_err());
        assert!(parse_resume_response("{\"experience\": \"lots\"}").is_err());
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        let data = parse_resume_response("   ").unwrap();
        assert_eq!(data, ResumeData::empty());
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let text = "```json\n{\"skills\": [{\"category\": \"Tools\", \"items\": [\" Git \", \"\"]}]}\n```";
        let data = parse_resume_response(text).unwrap();
        assert_eq!(data.skills[0].items, vec!["Git".to_string()]);
        assert!(data.skills[0].id.starts_with("item-"));
    }

    #[test]
    fn test_blank_optional_links_become_none() {
        let mut data: ResumeData = serde_json::from_str(
            r#"{"personalInfo": {"linkedin": "  ", "website": "ada.dev"},
                "projects": [{"name": "P", "link": ""}]}"#,
        )
        .unwrap();
        normalize(&mut data, 42);
        assert!(data.personal_info.linkedin.is_none());
        assert_eq!(data.personal_info.website.as_deref(), Some("ada.dev"));
        assert!(data.projects[0].link.is_none());
        assert_eq!(data.projects[0].id, "item-42-0");
    }
}
