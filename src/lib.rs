pub mod ai;
pub mod app;
pub mod card;
pub mod config;
pub mod content;
pub mod cue;
pub mod error;
pub mod generation_worker;
pub mod logger;
pub mod models;
pub mod session;
pub mod tier;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{ModelConfig, OpenRouterClient, OpenRouterQuestionSource, QuestionSource};
pub use app::{Action, App};
pub use card::{ResultCard, compose_card, render_png};
pub use config::{Cli, Settings};
pub use error::{QuizError, RenderError, ShareError};
pub use models::{AppState, Difficulty, Question, QuizConfig, QuizResult};
pub use session::{QuizSession, SessionEvent, Transition};
pub use tier::{ResultTier, tier};
pub use utils::truncate_string;
