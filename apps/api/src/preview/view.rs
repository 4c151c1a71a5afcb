//! Flattened, display-ready copy of a `ResumeData`.
//!
//! Templates only see plain strings and lists: blank entries are already
//! gone, dates are already joined, optional links are empty strings.

use crate::models::ResumeData;

#[derive(Debug, Clone)]
pub struct ContactView {
    pub label: &'static str,
    pub value: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct ExperienceView {
    pub position: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EducationView {
    pub institution: String,
    pub degree: String,
    pub location: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct SkillView {
    pub category: String,
    pub items: String,
}

#[derive(Debug, Clone)]
pub struct ProjectView {
    pub name: String,
    pub description: String,
    pub link: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct ResumeView {
    pub full_name: String,
    pub contacts: Vec<ContactView>,
    pub summary: String,
    pub experience: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub skills: Vec<SkillView>,
    pub projects: Vec<ProjectView>,
    pub certifications: Vec<String>,
    pub awards: Vec<String>,
}

/// `start – end`, or whichever side is present.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} – {e}"),
    }
}

/// Adds a scheme to bare links like `linkedin.com/in/x`.
pub fn href_for(link: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        String::new()
    } else if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

fn owned(lines: Vec<&str>) -> Vec<String> {
    lines.into_iter().map(str::to_string).collect()
}

impl ResumeView {
    pub fn from_data(data: &ResumeData) -> Self {
        let info = &data.personal_info;
        let mut contacts = Vec::new();
        for (label, value) in [
            ("Email", info.email.as_str()),
            ("Phone", info.phone.as_str()),
            ("Location", info.location.as_str()),
        ] {
            if !value.trim().is_empty() {
                let href = if label == "Email" {
                    format!("mailto:{}", value.trim())
                } else {
                    String::new()
                };
                contacts.push(ContactView {
                    label,
                    value: value.trim().to_string(),
                    href,
                });
            }
        }
        for (label, value) in [("LinkedIn", &info.linkedin), ("Website", &info.website)] {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                contacts.push(ContactView {
                    label,
                    value: value.trim().to_string(),
                    href: href_for(value),
                });
            }
        }

        Self {
            full_name: info.full_name.trim().to_string(),
            contacts,
            summary: info.summary.trim().to_string(),
            experience: data
                .experience
                .iter()
                .map(|e| ExperienceView {
                    position: e.position.clone(),
                    company: e.company.clone(),
                    location: e.location.clone(),
                    dates: date_range(&e.start_date, &e.end_date),
                    bullets: owned(e.visible_bullets()),
                })
                .collect(),
            education: data
                .education
                .iter()
                .map(|e| EducationView {
                    institution: e.institution.clone(),
                    degree: e.degree.clone(),
                    location: e.location.clone(),
                    dates: date_range(&e.start_date, &e.end_date),
                    description: e.description.clone().unwrap_or_default(),
                })
                .collect(),
            skills: data
                .skills
                .iter()
                .map(|s| SkillView {
                    category: s.category.clone(),
                    items: s
                        .items
                        .iter()
                        .map(|i| i.trim())
                        .filter(|i| !i.is_empty())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect(),
            projects: data
                .projects
                .iter()
                .map(|p| {
                    let link = p.link.clone().unwrap_or_default();
                    ProjectView {
                        name: p.name.clone(),
                        description: p.description.clone(),
                        href: href_for(&link),
                        link,
                    }
                })
                .collect(),
            certifications: owned(data.visible_certifications()),
            awards: owned(data.visible_awards()),
        }
    }
}
