// Content enhancement: single-field rewrites and the batch review workflow.

pub mod handlers;
pub mod prompts;
pub mod service;
pub mod workflow;
