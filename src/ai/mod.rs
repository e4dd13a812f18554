pub mod client;
pub mod generator;

// Public API exports
pub use client::{DEFAULT_MODEL, ModelConfig, OpenRouterClient};
pub use generator::{OpenRouterQuestionSource, QuestionSource, build_prompt, parse_questions};
