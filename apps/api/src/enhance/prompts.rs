// Enhancement LLM prompt templates, one per content kind.
// Every prompt ends with the shared plain-text directive.

use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::models::enhancement::{EnhancementContext, EnhancementRequest};

const BIO_PROMPT: &str = r#"Generate a compelling 2-3 sentence professional bio/summary based on this work experience:

Work Experience:
{experience}
{current_bio}
Requirements:
- Write in first person ("I am...") or third person ("Jane is...")
- Highlight key achievements and skills
- Make it engaging and professional
- Keep it concise (2-3 sentences max)
- Focus on value and impact

Return ONLY the bio text as plain text. {plain_text}"#;

const BULLET_POINT_PROMPT: &str = r#"Rewrite this job responsibility into a powerful, achievement-focused bullet point:

Original: "{content}"
Job Context: {title} at {company}

Requirements:
- Start with a strong action verb (Led, Developed, Implemented, Increased, etc.)
- Include quantifiable results or impact where possible
- Use the STAR method (Situation, Task, Action, Result) if applicable
- Keep it concise (1-2 lines)
- Make it achievement-oriented, not task-oriented
- Focus on the value delivered

Return ONLY the improved bullet point as plain text. {plain_text}"#;

const PROJECT_DESCRIPTION_PROMPT: &str = r#"Improve this project description to be more engaging and highlight its impact:

Project Name: {name}
Current Description: "{content}"
Technologies Used: {tech}

Requirements:
- Make it clear and engaging
- Highlight the problem solved and impact
- Mention key technologies naturally
- Keep it concise (2-3 sentences)
- Focus on value and outcomes
- Make it interesting to potential employers

Return ONLY the improved description as plain text. {plain_text}"#;

pub fn build_enhancement_prompt(request: &EnhancementRequest) -> String {
    let content = request.original_text.as_str();
    match &request.context {
        EnhancementContext::Bio { experience } => {
            let experience = experience
                .as_ref()
                .and_then(|v| serde_json::to_string_pretty(v).ok())
                .unwrap_or_else(|| "No experience data provided".to_string());
            let current_bio = if content.trim().is_empty() {
                String::new()
            } else {
                format!("\nCurrent Bio: \"{content}\"\n")
            };
            fill(
                BIO_PROMPT,
                &[
                    ("experience", experience.as_str()),
                    ("current_bio", current_bio.as_str()),
                    ("plain_text", PLAIN_TEXT_INSTRUCTION),
                ],
            )
        }
        EnhancementContext::BulletPoint { title, company } => fill(
            BULLET_POINT_PROMPT,
            &[
                ("content", content),
                ("title", title.as_deref().unwrap_or("this role")),
                ("company", company.as_deref().unwrap_or("the company")),
                ("plain_text", PLAIN_TEXT_INSTRUCTION),
            ],
        ),
        EnhancementContext::ProjectDescription { name, tech } => {
            let tech = tech.join(", ");
            fill(
                PROJECT_DESCRIPTION_PROMPT,
                &[
                    ("content", content),
                    ("name", name.as_deref().unwrap_or("This project")),
                    ("tech", tech.as_str()),
                    ("plain_text", PLAIN_TEXT_INSTRUCTION),
                ],
            )
        }
    }
}

/// Replaces `{key}` placeholders in a single left-to-right pass. Inserted
/// values are never rescanned, so user text that looks like a placeholder
/// stays literal. Unknown `{...}` sequences are kept as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (end, *v))
        });
        match value {
            Some((end, v)) => {
                out.push_str(v);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(original: &str, context: EnhancementContext) -> EnhancementRequest {
        EnhancementRequest {
            original_text: original.to_string(),
            context,
        }
    }

    #[test]
    fn test_bullet_prompt_uses_context_and_fallbacks() {
        let prompt = build_enhancement_prompt(&request(
            "Worked on billing",
            EnhancementContext::BulletPoint {
                title: Some("Backend Engineer".into()),
                company: None,
            },
        ));
        assert!(prompt.contains("Original: \"Worked on billing\""));
        assert!(prompt.contains("Job Context: Backend Engineer at the company"));
        assert!(prompt.ends_with(PLAIN_TEXT_INSTRUCTION));
    }

    #[test]
    fn test_project_prompt_joins_tech() {
        let prompt = build_enhancement_prompt(&request(
            "A chat app",
            EnhancementContext::ProjectDescription {
                name: None,
                tech: vec!["Rust".into(), "WebSockets".into()],
            },
        ));
        assert!(prompt.contains("Project Name: This project"));
        assert!(prompt.contains("Technologies Used: Rust, WebSockets"));
    }

    #[test]
    fn test_bio_prompt_without_experience() {
        let prompt = build_enhancement_prompt(&request(
            "",
            EnhancementContext::Bio { experience: None },
        ));
        assert!(prompt.contains("No experience data provided"));
        assert!(!prompt.contains("Current Bio"));
    }

    #[test]
    fn test_bio_prompt_pretty_prints_experience() {
        let prompt = build_enhancement_prompt(&request(
            "Engineer who ships.",
            EnhancementContext::Bio {
                experience: Some(json!([{ "title": "SRE", "company": "Globex" }])),
            },
        ));
        assert!(prompt.contains("\"company\": \"Globex\""));
        assert!(prompt.contains("Current Bio: \"Engineer who ships.\""));
    }

    #[test]
    fn test_placeholders_in_user_text_are_left_alone() {
        let prompt = build_enhancement_prompt(&request(
            "Built the {title} service",
            EnhancementContext::BulletPoint {
                title: Some("SRE".into()),
                company: Some("Globex".into()),
            },
        ));
        assert!(prompt.contains("Original: \"Built the {title} service\""));
    }

    #[test]
    fn test_user_text_that_looks_like_a_placeholder_stays_literal() {
        let prompt = build_enhancement_prompt(&request(
            "Owned {company} billing",
            EnhancementContext::BulletPoint {
                title: Some("{plain_text}".into()),
                company: Some("Acme".into()),
            },
        ));
        assert!(prompt.contains("Original: \"Owned {company} billing\""));
        assert!(prompt.contains("Job Context: {plain_text} at Acme"));

        let prompt = build_enhancement_prompt(&request(
            "Mentions {experience}",
            EnhancementContext::Bio {
                experience: Some(json!([{ "title": "{current_bio}" }])),
            },
        ));
        assert!(prompt.contains("\"{current_bio}\""));
        assert!(prompt.contains("Current Bio: \"Mentions {experience}\""));
    }
}
