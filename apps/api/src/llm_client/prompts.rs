// Shared prompt constants.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the system prompts the gateway adds to every call.

/// System prompt for structured extraction calls.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for content rewriting calls.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a professional resume writer. \
    You MUST respond with the rewritten text only, as plain text. \
    Do NOT use markdown, bold text, asterisks, or bullet characters. \
    Do NOT add a preamble, quotes, or explanations.";

/// Closing directive appended to every enhancement prompt.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Do not use markdown formatting, bold text, \
    asterisks, or any special formatting. Just plain text.";
