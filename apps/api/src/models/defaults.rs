//! Seed records and the preset tables the editor offers.

use serde::Serialize;

use crate::models::career::CareerFocus;
use crate::models::{Education, Experience, PersonalInfo, Project, ResumeData, Skill};
use crate::models::style::{FontSize, ResumeFont, ResumeLayout};

#[derive(Debug, Clone, Serialize)]
pub struct AccentPreset {
    pub name: &'static str,
    pub value: &'static str,
}

pub const ACCENT_COLORS: [AccentPreset; 5] = [
    AccentPreset { name: "Professional Black", value: "#1a1a1a" },
    AccentPreset { name: "Classic Blue", value: "#1e40af" },
    AccentPreset { name: "Success Green", value: "#166534" },
    AccentPreset { name: "Corporate Slate", value: "#334155" },
    AccentPreset { name: "Modern Indigo", value: "#4338ca" },
];

#[derive(Debug, Clone, Serialize)]
pub struct LayoutPreset {
    pub id: ResumeLayout,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontPreset {
    pub id: ResumeFont,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FocusPreset {
    pub id: CareerFocus,
    pub label: &'static str,
}

/// Everything the editor needs to draw its pickers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presets {
    pub accent_colors: Vec<AccentPreset>,
    pub layouts: Vec<LayoutPreset>,
    pub fonts: Vec<FontPreset>,
    pub font_sizes: Vec<FontSize>,
    pub career_focuses: Vec<FocusPreset>,
}

pub fn presets() -> Presets {
    Presets {
        accent_colors: ACCENT_COLORS.to_vec(),
        layouts: ResumeLayout::ALL
            .into_iter()
            .map(|id| LayoutPreset {
                id,
                label: id.label(),
                description: id.description(),
            })
            .collect(),
        fonts: ResumeFont::ALL
            .into_iter()
            .map(|id| FontPreset { id, label: id.label() })
            .collect(),
        font_sizes: FontSize::ALL.to_vec(),
        career_focuses: CareerFocus::ALL
            .into_iter()
            .map(|id| FocusPreset { id, label: id.label() })
            .collect(),
    }
}

/// The demo resume a fresh session opens with.
pub fn sample_resume() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Alex Rivera".into(),
            email: "alex.rivera@example.com".into(),
            phone: "+1 (555) 012-3456".into(),
            location: "New York, NY".into(),
            linkedin: Some("linkedin.com/in/alexrivera".into()),
            website: None,
            summary: "Dedicated software engineer with over 5 years of experience building \
                      scalable web applications. Expert in React, Node.js, and cloud architecture \
                      with a focus on delivering high-performance user experiences."
                .into(),
        },
        experience: vec![
            Experience {
                id: "1".into(),
                company: "TechNova Solutions".into(),
                position: "Senior Frontend Engineer".into(),
                location: "San Francisco, CA".into(),
                start_date: "2021-01".into(),
                end_date: "Present".into(),
                description: vec![
                    "Led the migration of a legacy monolithic frontend to a modern micro-frontend \
                     architecture using React and Module Federation."
                        .into(),
                    "Optimized application performance, reducing initial load time by 40% through \
                     code-splitting and asset optimization."
                        .into(),
                    "Mentored a team of 4 junior developers and established code quality standards \
                     with automated linting and testing."
                        .into(),
                ],
            },
            Experience {
                id: "2".into(),
                company: "DataStream Systems".into(),
                position: "Full Stack Developer".into(),
                location: "Austin, TX".into(),
                start_date: "2018-06".into(),
                end_date: "2020-12".into(),
                description: vec![
                    "Developed and maintained RESTful APIs using Node.js and Express, serving over \
                     100k daily active users."
                        .into(),
                    "Optimized database queries in PostgreSQL, reducing average response time by 25%."
                        .into(),
                    "Configured CI/CD pipelines using GitHub Actions, decreasing deployment time by 50%."
                        .into(),
                ],
            },
        ],
        education: vec![Education {
            id: "edu-1".into(),
            institution: "State University of Technology".into(),
            degree: "B.S. in Computer Science".into(),
            location: "Austin, TX".into(),
            start_date: "2014-08".into(),
            end_date: "2018-05".into(),
            description: None,
        }],
        skills: vec![
            Skill {
                id: "s1".into(),
                category: "Frontend Stack".into(),
                items: ["React", "TypeScript", "Next.js", "Tailwind CSS", "Redux", "GraphQL"]
                    .map(String::from)
                    .to_vec(),
            },
            Skill {
                id: "s2".into(),
                category: "Backend & DevOps".into(),
                items: ["Node.js", "Express", "PostgreSQL", "AWS", "Docker", "Kubernetes"]
                    .map(String::from)
                    .to_vec(),
            },
            Skill {
                id: "s3".into(),
                category: "Tools & Workflow".into(),
                items: ["Git", "Jest", "Cypress", "Agile/Scrum", "Figma", "Jira"]
                    .map(String::from)
                    .to_vec(),
            },
        ],
        projects: vec![
            Project {
                id: "p1".into(),
                name: "Open-Source UI Library".into(),
                description: "A lightweight, accessible UI component library built with React and \
                              Tailwind CSS, currently used by 500+ developers."
                    .into(),
                link: Some("github.com/alexr/ui-kit".into()),
            },
            Project {
                id: "p2".into(),
                name: "AI Portfolio Generator".into(),
                description: "Generates custom portfolios from LinkedIn profiles using a hosted \
                              language model."
                    .into(),
                link: Some("portfoliogen.ai".into()),
            },
        ],
        awards: vec![
            "Employee of the Year (2022) - TechNova Solutions".into(),
            "First Place, State Hackathon for Social Good (2019)".into(),
        ],
        certifications: vec![
            "AWS Certified Solutions Architect".into(),
            "Professional Scrum Master I".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::parse_accent_color;

    #[test]
    fn test_sample_resume_has_ids_everywhere() {
        let sample = sample_resume();
        assert!(sample.experience.iter().all(|e| !e.id.is_empty()));
        assert!(sample.education.iter().all(|e| !e.id.is_empty()));
        assert!(sample.skills.iter().all(|s| !s.id.is_empty()));
        assert!(sample.projects.iter().all(|p| !p.id.is_empty()));
    }

    #[test]
    fn test_accent_presets_are_valid_colors() {
        for preset in ACCENT_COLORS {
            assert!(
                parse_accent_color(preset.value).is_some(),
                "preset {} must be a valid hex colour",
                preset.name
            );
        }
    }

    #[test]
    fn test_presets_cover_every_variant() {
        let p = presets();
        assert_eq!(p.layouts.len(), 3);
        assert_eq!(p.fonts.len(), 3);
        assert_eq!(p.career_focuses.len(), 8);
    }
}
