//! Completion normalizer. Turns free-form model output into something typed.
//!
//! Structured completions are fence-stripped and decoded as a JSON object.
//! Schema conformance is not checked here; see `models::portfolio::decode_portfolio`.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Upper bound on the diagnostic snippet carried by a decode failure.
pub const MAX_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("failed to parse JSON response from AI: {snippet}")]
    Malformed { snippet: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    Structured,
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Structured(Value),
    Plain(String),
}

impl Normalized {
    /// A plain completion becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Normalized::Structured(value) => value,
            Normalized::Plain(text) => Value::String(text),
        }
    }

    /// A structured completion is re-serialized compactly.
    pub fn into_text(self) -> String {
        match self {
            Normalized::Structured(value) => value.to_string(),
            Normalized::Plain(text) => text,
        }
    }
}

pub fn normalize(raw: &str, mode: CompletionMode) -> Result<Normalized, NormalizeError> {
    match mode {
        CompletionMode::Structured => decode_structured(raw).map(Normalized::Structured),
        CompletionMode::Plain => Ok(Normalized::Plain(normalize_plain(raw))),
    }
}

/// Plain completions are trimmed and otherwise returned verbatim.
pub fn normalize_plain(raw: &str) -> String {
    raw.trim().to_string()
}

/// Strips code fences and decodes the remainder as a JSON object.
pub fn decode_structured(raw: &str) -> Result<Value, NormalizeError> {
    let text = strip_json_fences(raw);
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(NormalizeError::Malformed {
            snippet: text.chars().take(MAX_SNIPPET_CHARS).collect(),
        }),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Any single-word language tag after the opening fence is dropped with it.
/// A `json` tag is dropped even when the body follows it directly.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let (tag, after_tag) = rest.split_at(tag_len);
    let body = if after_tag.is_empty()
        || after_tag.starts_with(char::is_whitespace)
        || tag.eq_ignore_ascii_case("json")
    {
        after_tag
    } else {
        rest
    };

    let body = body.trim_start();
    body.strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(body)
}

fn emphasis_patterns() -> &'static [(Regex, &'static str); 4] {
    static PATTERNS: OnceLock<[(Regex, &'static str); 4]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"), "$1"),
            (Regex::new(r"\*([^*]+)\*").expect("valid regex"), "$1"),
            (Regex::new(r"__([^_]+)__").expect("valid regex"), "$1"),
            (Regex::new(r"_([^_]+)_").expect("valid regex"), "$1"),
        ]
    })
}

/// Removes `**bold**`, `*italic*`, `__bold__` and `_italic_` markers and trims.
///
/// Passes repeat until nothing changes, so the result is a fixpoint:
/// `strip_markdown(strip_markdown(s)) == strip_markdown(s)`.
pub fn strip_markdown(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let mut next = current.clone();
        for (pattern, replacement) in emphasis_patterns() {
            next = pattern.replace_all(&next, *replacement).into_owned();
        }
        let next = next.trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_inline_bare_fence() {
        assert_eq!(strip_json_fences("```{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_json_fences_json_tag_glued_to_body() {
        assert_eq!(strip_json_fences("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```JSON{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(
            decode_structured("```json{\"a\":1}```").unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        assert_eq!(strip_json_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_fenced_and_bare_decode_identically() {
        let bare = r#"{"personal": {"name": "Ada"}, "skills": ["Rust"]}"#;
        let expected = decode_structured(bare).unwrap();

        for wrapped in [
            format!("```json\n{bare}\n```"),
            format!("```\n{bare}\n```"),
            format!("  ```JSON\n{bare}\n```  \n"),
        ] {
            assert_eq!(decode_structured(&wrapped).unwrap(), expected);
        }
        assert_eq!(expected["skills"], json!(["Rust"]));
    }

    #[test]
    fn test_non_json_is_malformed_with_bounded_snippet() {
        let chatter = format!("Sure! Here is the resume you asked for. {}", "x".repeat(500));
        let err = decode_structured(&chatter).unwrap_err();
        let NormalizeError::Malformed { snippet } = err;
        assert_eq!(snippet.chars().count(), MAX_SNIPPET_CHARS);
        assert!(snippet.starts_with("Sure! Here is"));
    }

    #[test]
    fn test_short_garbage_snippet_is_whole_text() {
        let err = decode_structured("```\nnot json\n```").unwrap_err();
        assert_eq!(
            err,
            NormalizeError::Malformed {
                snippet: "not json".to_string()
            }
        );
    }

    #[test]
    fn test_json_array_is_not_an_object() {
        assert!(decode_structured("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        let err = decode_structured(&"é".repeat(300)).unwrap_err();
        let NormalizeError::Malformed { snippet } = err;
        assert_eq!(snippet.chars().count(), MAX_SNIPPET_CHARS);
    }

    #[test]
    fn test_plain_mode_trims_only() {
        assert_eq!(
            normalize("  **Led** a team.\n", CompletionMode::Plain).unwrap(),
            Normalized::Plain("**Led** a team.".to_string())
        );
    }

    #[test]
    fn test_strip_markdown_basic_markers() {
        assert_eq!(strip_markdown("**Led** a *great* team"), "Led a great team");
        assert_eq!(strip_markdown("__Bold__ and _soft_ words"), "Bold and soft words");
        assert_eq!(strip_markdown("  plain  "), "plain");
    }

    #[test]
    fn test_strip_markdown_is_idempotent() {
        let cases = [
            "",
            "no markers here",
            "***triple***",
            "**a*",
            "*_a_*",
            "_*a*_",
            "*a_*_b*",
            "__*a*__",
            "snake_case_name and another_one",
            "*__nested__* with **_mixed_** emphasis",
            "  * bullet-ish * line  ",
            "____",
            "**",
            "a*b*c*d*e",
        ];
        for case in cases {
            let once = strip_markdown(case);
            assert_eq!(strip_markdown(&once), once, "not idempotent for {case:?}");
        }
    }
}
