use serde::{Deserialize, Deserializer, Serialize};

/// Treats a missing or `null` field as `T::default()`.
///
/// The extraction service frequently omits fields or sends explicit nulls;
/// both collapse to the empty value instead of failing the whole record.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "or_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "or_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "or_default")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub company: String,
    #[serde(default, deserialize_with = "or_default")]
    pub position: String,
    #[serde(default, deserialize_with = "or_default")]
    pub location: String,
    /// Free text as written on the source document ("2021-01", "Present").
    #[serde(default, deserialize_with = "or_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "or_default")]
    pub end_date: String,
    /// Ordered bullet points.
    #[serde(default, deserialize_with = "or_default")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "or_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "or_default")]
    pub location: String,
    #[serde(default, deserialize_with = "or_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "or_default")]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "or_default")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The whole editable resume. Replaced wholesale on every edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default, deserialize_with = "or_default")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "or_default")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "or_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "or_default")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "or_default")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "or_default")]
    pub awards: Vec<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub certifications: Vec<String>,
}

impl ResumeData {
    /// A blank record, used when the user starts without an upload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Certifications with blank lines dropped, in display order.
    pub fn visible_certifications(&self) -> Vec<&str> {
        non_blank(&self.certifications)
    }

    /// Awards with blank lines dropped, in display order.
    pub fn visible_awards(&self) -> Vec<&str> {
        non_blank(&self.awards)
    }
}

impl Experience {
    pub fn visible_bullets(&self) -> Vec<&str> {
        non_blank(&self.description)
    }
}

fn non_blank(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_default() {
        let json = r#"{
            "personalInfo": {"fullName": "Ada", "email": null},
            "experience": null,
            "skills": [{"category": "Lang", "items": null}]
        }"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.personal_info.full_name, "Ada");
        assert_eq!(data.personal_info.email, "");
        assert!(data.experience.is_empty());
        assert!(data.projects.is_empty(), "absent projects must be an empty list");
        assert_eq!(data.skills.len(), 1);
        assert!(data.skills[0].items.is_empty());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_links() {
        let data = ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["personalInfo"]["fullName"], "Ada Lovelace");
        assert!(value["personalInfo"].get("linkedin").is_none());
    }

    #[test]
    fn test_visible_lists_skip_blank_lines() {
        let data = ResumeData {
            certifications: vec!["AWS".into(), "   ".into(), "".into(), "CKA".into()],
            ..Default::default()
        };
        assert_eq!(data.visible_certifications(), vec!["AWS", "CKA"]);
    }
}
