use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// The three kinds of content the enhancer can rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancementKind {
    Bio,
    BulletPoint,
    ProjectDescription,
}

impl EnhancementKind {
    pub const ALL: [EnhancementKind; 3] = [
        EnhancementKind::Bio,
        EnhancementKind::BulletPoint,
        EnhancementKind::ProjectDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnhancementKind::Bio => "bio",
            EnhancementKind::BulletPoint => "bullet-point",
            EnhancementKind::ProjectDescription => "project-description",
        }
    }
}

impl fmt::Display for EnhancementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnhancementKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                AppError::Validation(format!("type must be one of: {}", valid.join(", ")))
            })
    }
}

/// Kind-specific auxiliary fields that steer an enhancement prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum EnhancementContext {
    Bio {
        experience: Option<Value>,
    },
    BulletPoint {
        title: Option<String>,
        company: Option<String>,
    },
    ProjectDescription {
        name: Option<String>,
        tech: Vec<String>,
    },
}

impl EnhancementContext {
    /// Reads the fields relevant to `kind` out of a loosely-typed context object.
    /// Unknown keys are ignored; blank strings count as absent.
    pub fn from_value(kind: EnhancementKind, context: &Value) -> Self {
        let text = |key: &str| {
            context
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        match kind {
            EnhancementKind::Bio => EnhancementContext::Bio {
                experience: context.get("experience").filter(|v| !v.is_null()).cloned(),
            },
            EnhancementKind::BulletPoint => EnhancementContext::BulletPoint {
                title: text("title"),
                company: text("company"),
            },
            EnhancementKind::ProjectDescription => EnhancementContext::ProjectDescription {
                name: text("name"),
                tech: match context.get("tech") {
                    Some(Value::Array(items)) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect(),
                    Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
                    _ => Vec::new(),
                },
            },
        }
    }

    pub fn kind(&self) -> EnhancementKind {
        match self {
            EnhancementContext::Bio { .. } => EnhancementKind::Bio,
            EnhancementContext::BulletPoint { .. } => EnhancementKind::BulletPoint,
            EnhancementContext::ProjectDescription { .. } => EnhancementKind::ProjectDescription,
        }
    }
}

/// One field to rewrite, plus the context the prompt needs.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementRequest {
    pub original_text: String,
    pub context: EnhancementContext,
}

impl EnhancementRequest {
    pub fn kind(&self) -> EnhancementKind {
        self.context.kind()
    }
}

/// An original/enhanced pair. `enhanced` is always markdown-free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementResult {
    pub original: String,
    pub enhanced: String,
}
