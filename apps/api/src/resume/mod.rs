// Resume parsing: the structured-extraction half of the AI gateway.

pub mod handlers;
pub mod parser;
pub mod prompts;
