//! The response schema sent with every extraction request.
//!
//! Uses the OpenAPI-subset type names the Gemini `responseSchema` field
//! expects (`OBJECT`, `ARRAY`, `STRING`). Identifiers are not requested;
//! they are assigned locally after parsing.

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

fn object_array(properties: Value) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "OBJECT", "properties": properties }
    })
}

/// Builds the JSON schema matching `ResumeData` minus ids.
pub fn resume_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "personalInfo": {
                "type": "OBJECT",
                "properties": {
                    "fullName": string(),
                    "email": string(),
                    "phone": string(),
                    "location": string(),
                    "linkedin": string(),
                    "website": string(),
                    "summary": string(),
                },
                "required": ["fullName", "email", "summary"]
            },
            "experience": object_array(json!({
                "company": string(),
                "position": string(),
                "location": string(),
                "startDate": string(),
                "endDate": string(),
                "description": string_array(),
            })),
            "education": object_array(json!({
                "institution": string(),
                "degree": string(),
                "location": string(),
                "startDate": string(),
                "endDate": string(),
            })),
            "skills": object_array(json!({
                "category": string(),
                "items": string_array(),
            })),
            "projects": object_array(json!({
                "name": string(),
                "description": string(),
                "link": string(),
            })),
            "awards": string_array(),
            "certifications": string_array(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_section() {
        let schema = resume_response_schema();
        let props = schema["properties"].as_object().unwrap();
        for key in [
            "personalInfo",
            "experience",
            "education",
            "skills",
            "projects",
            "awards",
            "certifications",
        ] {
            assert!(props.contains_key(key), "schema missing {key}");
        }
    }

    #[test]
    fn test_schema_requires_core_personal_fields() {
        let schema = resume_response_schema();
        let required = schema["properties"]["personalInfo"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 3);
        assert!(required.contains(&json!("summary")));
    }

    #[test]
    fn test_experience_bullets_are_string_arrays() {
        let schema = resume_response_schema();
        let description =
            &schema["properties"]["experience"]["items"]["properties"]["description"];
        assert_eq!(description["type"], "ARRAY");
        assert_eq!(description["items"]["type"], "STRING");
    }
}
