//! The portfolio document, the canonical structured form of a resume.
//!
//! Every field is optional on input and always present on output: a missing
//! key or `null` decodes to `""` / `[]`, and serialization never skips a key.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::llm_client::normalize::{NormalizeError, MAX_SNIPPET_CHARS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal: Personal,
    #[serde(default, deserialize_with = "lenient_string")]
    pub about: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub github: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub tech: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub emoji: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gpa: String,
}

/// Decodes a structured completion into a `PortfolioDocument`.
///
/// Coercion is limited to defaults for missing/null fields and numbers where
/// strings are expected (`"gpa": 3.8`). Anything else is a malformed response.
pub fn decode_portfolio(value: &Value) -> Result<PortfolioDocument, NormalizeError> {
    PortfolioDocument::deserialize(value).map_err(|e| {
        tracing::warn!("Structured completion does not match portfolio schema: {e}");
        NormalizeError::Malformed {
            snippet: value.to_string().chars().take(MAX_SNIPPET_CHARS).collect(),
        }
    })
}

/// Scalars the model may emit where the schema wants a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Num(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Num(n) => n.to_string(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .unwrap_or_default())
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Option<Scalar>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(Scalar::into_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_become_empty() {
        let doc = decode_portfolio(&json!({ "personal": { "name": "Ada Lovelace" } })).unwrap();
        assert_eq!(doc.personal.name, "Ada Lovelace");
        assert_eq!(doc.personal.github, "");
        assert_eq!(doc.about, "");
        assert!(doc.skills.is_empty());
        assert!(doc.experience.is_empty());
    }

    #[test]
    fn test_nulls_become_empty() {
        let doc = decode_portfolio(&json!({
            "personal": null,
            "about": null,
            "skills": null,
            "experience": [{ "title": "Engineer", "points": null, "location": null }]
        }))
        .unwrap();
        assert_eq!(doc.personal, Personal::default());
        assert_eq!(doc.experience[0].title, "Engineer");
        assert!(doc.experience[0].points.is_empty());
    }

    #[test]
    fn test_numbers_coerced_to_strings() {
        let doc = decode_portfolio(&json!({
            "education": [{ "degree": "BSc", "year": 2020, "gpa": 3.8 }],
            "skills": ["Rust", 42]
        }))
        .unwrap();
        assert_eq!(doc.education[0].year, "2020");
        assert_eq!(doc.education[0].gpa, "3.8");
        assert_eq!(doc.skills, vec!["Rust".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        let err = decode_portfolio(&json!({ "skills": { "languages": ["Rust"] } })).unwrap_err();
        let NormalizeError::Malformed { snippet } = err;
        assert!(snippet.contains("languages"));
    }

    #[test]
    fn test_serialization_emits_every_key() {
        let value = serde_json::to_value(PortfolioDocument::default()).unwrap();
        for key in ["personal", "about", "skills", "experience", "projects", "education"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        for key in ["name", "title", "email", "phone", "location", "linkedin", "github", "website"] {
            assert_eq!(value["personal"][key], "");
        }
    }
}
