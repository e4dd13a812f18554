use serde::{Deserialize, Serialize};

use crate::error::QuizError;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Label shown on the setup screen and interpolated into the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Médio",
            Difficulty::Hard => "Difícil",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryFont {
    Sans,
    #[default]
    Serif,
}

/// Input handed to a question source. `theme_color` and `primary_font` are
/// presentational metadata and do not influence generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub source_text: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub theme_color: String,
    pub primary_font: PrimaryFont,
}

impl QuizConfig {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.source_text.trim().is_empty() {
            return Err(QuizError::Configuration("source text is empty".into()));
        }
        if self.question_count == 0 {
            return Err(QuizError::Configuration(
                "question count must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Final outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub answers: Vec<usize>,
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    Loading,
    Quiz,
    Results,
}

#[derive(Debug)]
pub enum GenerationRequest {
    Generate { config: QuizConfig },
}

#[derive(Debug)]
pub enum GenerationResponse {
    Ready { questions: Vec<Question> },
    Failed { error: QuizError },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize, text: &str) -> QuizConfig {
        QuizConfig {
            source_text: text.to_string(),
            difficulty: Difficulty::Medium,
            question_count: count,
            theme_color: "tarkia".to_string(),
            primary_font: PrimaryFont::Serif,
        }
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        assert_eq!(Difficulty::Medium.label(), "Médio");
    }

    #[test]
    fn test_config_validation() {
        assert!(config(10, "texto").validate().is_ok());
        assert!(matches!(
            config(0, "texto").validate(),
            Err(QuizError::Configuration(_))
        ));
        assert!(matches!(
            config(10, "   ").validate(),
            Err(QuizError::Configuration(_))
        ));
    }

    #[test]
    fn test_difficulty_serializes_by_name() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"Hard\"");
        let font: PrimaryFont = serde_json::from_str("\"sans\"").unwrap();
        assert_eq!(font, PrimaryFont::Sans);
    }
}
