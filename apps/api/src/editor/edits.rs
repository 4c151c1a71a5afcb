//! Editor operations.
//!
//! Every function takes the current record by reference and returns the
//! replacement record. Nothing is mutated in place, so a failed edit leaves
//! the caller's record untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::style::{parse_accent_color, snap_line_spacing, snap_section_spacing};
use crate::models::{
    Education, Experience, FontSize, Project, ResumeData, ResumeFont, ResumeLayout, ResumeStyle,
    Skill,
};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("No {section} entry with id '{id}'")]
    ItemNotFound { section: Section, id: String },

    #[error("Invalid {section} update: {source}")]
    InvalidUpdate {
        section: Section,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid accent colour '{0}'. Use #rgb or #rrggbb.")]
    InvalidAccentColor(String),
}

// ────────────────────────────────────────────────────────────────────────────
// List sections
// ────────────────────────────────────────────────────────────────────────────

/// The editable list sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Experience,
    Education,
    Skills,
    Projects,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
    ];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
        };
        f.write_str(name)
    }
}

trait Keyed {
    fn id(&self) -> &str;
}

impl Keyed for Experience {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Education {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Skill {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

/// `exp-…`, `edu-…` style id for manually added items.
pub fn new_item_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

fn replace_item<T: Keyed + Clone>(
    items: &[T],
    section: Section,
    id: &str,
    edit: impl FnOnce(&mut T),
) -> Result<Vec<T>, EditError> {
    let pos = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| EditError::ItemNotFound {
            section,
            id: id.to_string(),
        })?;
    let mut next = items.to_vec();
    edit(&mut next[pos]);
    Ok(next)
}

fn without_item<T: Keyed + Clone>(
    items: &[T],
    section: Section,
    id: &str,
) -> Result<Vec<T>, EditError> {
    if !items.iter().any(|item| item.id() == id) {
        return Err(EditError::ItemNotFound {
            section,
            id: id.to_string(),
        });
    }
    Ok(items.iter().filter(|item| item.id() != id).cloned().collect())
}

/// Adds a placeholder entry. Experience and education go first, skills and
/// projects go last. Returns the new record and the new item's id.
pub fn add_item(data: &ResumeData, section: Section) -> (ResumeData, String) {
    let mut next = data.clone();
    let id = match section {
        Section::Experience => {
            let exp = Experience {
                id: new_item_id("exp"),
                company: "New Company".to_string(),
                position: "Position".to_string(),
                description: vec!["Bullet point 1".to_string()],
                ..Default::default()
            };
            let id = exp.id.clone();
            next.experience.insert(0, exp);
            id
        }
        Section::Education => {
            let edu = Education {
                id: new_item_id("edu"),
                institution: "University".to_string(),
                degree: "Degree".to_string(),
                ..Default::default()
            };
            let id = edu.id.clone();
            next.education.insert(0, edu);
            id
        }
        Section::Skills => {
            let skill = Skill {
                id: new_item_id("skill"),
                category: "Category".to_string(),
                items: vec!["Skill".to_string()],
            };
            let id = skill.id.clone();
            next.skills.push(skill);
            id
        }
        Section::Projects => {
            let project = Project {
                id: new_item_id("proj"),
                name: "New Project".to_string(),
                ..Default::default()
            };
            let id = project.id.clone();
            next.projects.push(project);
            id
        }
    };
    (next, id)
}

pub fn remove_item(data: &ResumeData, section: Section, id: &str) -> Result<ResumeData, EditError> {
    let mut next = data.clone();
    match section {
        Section::Experience => next.experience = without_item(&data.experience, section, id)?,
        Section::Education => next.education = without_item(&data.education, section, id)?,
        Section::Skills => next.skills = without_item(&data.skills, section, id)?,
        Section::Projects => next.projects = without_item(&data.projects, section, id)?,
    }
    Ok(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Partial updates
// ────────────────────────────────────────────────────────────────────────────

/// Fields of an experience entry to overwrite. `descriptionText` is the
/// textarea form: one bullet per line.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExperienceUpdate {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<Vec<String>>,
    pub description_text: Option<String>,
}

impl ExperienceUpdate {
    fn apply(self, exp: &mut Experience) {
        set_if(&mut exp.company, self.company);
        set_if(&mut exp.position, self.position);
        set_if(&mut exp.location, self.location);
        set_if(&mut exp.start_date, self.start_date);
        set_if(&mut exp.end_date, self.end_date);
        if let Some(bullets) = self.description {
            exp.description = bullets;
        }
        if let Some(text) = self.description_text {
            exp.description = text.split('\n').map(str::to_string).collect();
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EducationUpdate {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl EducationUpdate {
    fn apply(self, edu: &mut Education) {
        set_if(&mut edu.institution, self.institution);
        set_if(&mut edu.degree, self.degree);
        set_if(&mut edu.location, self.location);
        set_if(&mut edu.start_date, self.start_date);
        set_if(&mut edu.end_date, self.end_date);
        if let Some(description) = self.description {
            edu.description = optional_text(description);
        }
    }
}

/// `itemsText` is the comma-separated input form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkillUpdate {
    pub category: Option<String>,
    pub items: Option<Vec<String>>,
    pub items_text: Option<String>,
}

impl SkillUpdate {
    fn apply(self, skill: &mut Skill) {
        set_if(&mut skill.category, self.category);
        if let Some(items) = self.items {
            skill.items = items;
        }
        if let Some(text) = self.items_text {
            skill.items = split_skills(&text);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl ProjectUpdate {
    fn apply(self, project: &mut Project) {
        set_if(&mut project.name, self.name);
        set_if(&mut project.description, self.description);
        if let Some(link) = self.link {
            project.link = optional_text(link);
        }
    }
}

fn set_if(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Splits the comma-separated skills input, trimming each entry.
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a textarea into lines, dropping blank ones.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies a JSON partial update to one item. The body shape depends on the
/// section; unknown fields are rejected.
pub fn update_item(
    data: &ResumeData,
    section: Section,
    id: &str,
    body: Value,
) -> Result<ResumeData, EditError> {
    let invalid = |source| EditError::InvalidUpdate { section, source };
    let mut next = data.clone();
    match section {
        Section::Experience => {
            let update: ExperienceUpdate = serde_json::from_value(body).map_err(invalid)?;
            next.experience = replace_item(&data.experience, section, id, |e| update.apply(e))?;
        }
        Section::Education => {
            let update: EducationUpdate = serde_json::from_value(body).map_err(invalid)?;
            next.education = replace_item(&data.education, section, id, |e| update.apply(e))?;
        }
        Section::Skills => {
            let update: SkillUpdate = serde_json::from_value(body).map_err(invalid)?;
            next.skills = replace_item(&data.skills, section, id, |s| update.apply(s))?;
        }
        Section::Projects => {
            let update: ProjectUpdate = serde_json::from_value(body).map_err(invalid)?;
            next.projects = replace_item(&data.projects, section, id, |p| update.apply(p))?;
        }
    }
    Ok(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info and flat lists
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalInfoUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

pub fn update_personal_info(data: &ResumeData, update: PersonalInfoUpdate) -> ResumeData {
    let mut next = data.clone();
    let info = &mut next.personal_info;
    set_if(&mut info.full_name, update.full_name);
    set_if(&mut info.email, update.email);
    set_if(&mut info.phone, update.phone);
    set_if(&mut info.location, update.location);
    set_if(&mut info.summary, update.summary);
    if let Some(linkedin) = update.linkedin {
        info.linkedin = optional_text(linkedin);
    }
    if let Some(website) = update.website {
        info.website = optional_text(website);
    }
    next
}

pub fn set_certifications(data: &ResumeData, text: &str) -> ResumeData {
    ResumeData {
        certifications: lines_from_text(text),
        ..data.clone()
    }
}

pub fn set_awards(data: &ResumeData, text: &str) -> ResumeData {
    ResumeData {
        awards: lines_from_text(text),
        ..data.clone()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleUpdate {
    pub font: Option<ResumeFont>,
    pub font_size: Option<FontSize>,
    pub line_spacing: Option<f32>,
    pub section_spacing: Option<f32>,
    pub layout: Option<ResumeLayout>,
    pub accent_color: Option<String>,
}

/// Merges `update` into `style`, snapping spacings onto their sliders.
pub fn update_style(style: &ResumeStyle, update: StyleUpdate) -> Result<ResumeStyle, EditError> {
    let mut next = style.clone();
    if let Some(font) = update.font {
        next.font = font;
    }
    if let Some(size) = update.font_size {
        next.font_size = size;
    }
    if let Some(spacing) = update.line_spacing {
        next.line_spacing = snap_line_spacing(spacing);
    }
    if let Some(spacing) = update.section_spacing {
        next.section_spacing = snap_section_spacing(spacing);
    }
    if let Some(layout) = update.layout {
        next.layout = layout;
    }
    if let Some(color) = update.accent_color {
        next.accent_color = validated_accent(&color)?;
    }
    Ok(next)
}

/// Validates a whole replacement style.
pub fn replace_style(style: ResumeStyle) -> Result<ResumeStyle, EditError> {
    Ok(ResumeStyle {
        line_spacing: snap_line_spacing(style.line_spacing),
        section_spacing: snap_section_spacing(style.section_spacing),
        accent_color: validated_accent(&style.accent_color)?,
        ..style
    })
}

fn validated_accent(color: &str) -> Result<String, EditError> {
    parse_accent_color(color).ok_or_else(|| EditError::InvalidAccentColor(color.to_string()))
}
