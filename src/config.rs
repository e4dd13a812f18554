//! Command line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::ai::client::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ModelConfig};
use crate::card::measure::FontPaths;
use crate::content;
use crate::error::QuizError;
use crate::logger::DEFAULT_LOG_FILE;
use crate::models::{Difficulty, PrimaryFont, QuizConfig};

/// CLI arguments for tarkia-quiz
#[derive(Parser, Debug)]
#[command(name = "tarkia-quiz")]
#[command(author, version, about = "Quiz de investimento Tarkia no terminal")]
#[command(long_about = r#"
Generates a multiple-choice quiz from the Tarkia eBook (or any text file)
with an OpenRouter model, scores it, and exports a shareable result card.

The API key is read from OPENROUTER_API_KEY (a .env file is honoured).

Example:
  tarkia-quiz --difficulty hard --questions 5
  tarkia-quiz --source notas.txt --share-command ./share.sh
"#)]
pub struct Cli {
    /// Source text file; defaults to the embedded eBook excerpt
    #[arg(long, value_name = "FILE", env = "TARKIA_SOURCE")]
    pub source: Option<PathBuf>,

    /// Initial difficulty on the setup screen
    #[arg(long, value_enum, default_value = "medium", env = "TARKIA_DIFFICULTY")]
    pub difficulty: Difficulty,

    /// Number of questions to generate
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u16).range(1..=50),
        env = "TARKIA_QUESTIONS"
    )]
    pub questions: u16,

    /// OpenRouter model id
    #[arg(long, value_name = "MODEL", default_value = DEFAULT_MODEL, env = "TARKIA_MODEL")]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, env = "TARKIA_TEMPERATURE")]
    pub temperature: f32,

    /// Completion token limit
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS, env = "TARKIA_MAX_TOKENS")]
    pub max_tokens: u32,

    /// Where the result card is saved when no share command is available
    #[arg(long, value_name = "DIR", default_value = ".", env = "TARKIA_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Serif font file (regular)
    #[arg(long, value_name = "FILE", env = "TARKIA_SERIF_FONT")]
    pub serif_font: Option<PathBuf>,

    #[arg(long, value_name = "FILE", env = "TARKIA_SERIF_BOLD_FONT")]
    pub serif_bold_font: Option<PathBuf>,

    #[arg(long, value_name = "FILE", env = "TARKIA_SERIF_ITALIC_FONT")]
    pub serif_italic_font: Option<PathBuf>,

    /// Sans-serif font file (regular)
    #[arg(long, value_name = "FILE", env = "TARKIA_SANS_FONT")]
    pub sans_font: Option<PathBuf>,

    #[arg(long, value_name = "FILE", env = "TARKIA_SANS_BOLD_FONT")]
    pub sans_bold_font: Option<PathBuf>,

    /// Program invoked as `<program> <png> <title> <caption>` to share the card
    #[arg(long, value_name = "PROGRAM", env = "TARKIA_SHARE_COMMAND")]
    pub share_command: Option<PathBuf>,

    /// Disable the answer bell
    #[arg(long, env = "TARKIA_MUTE")]
    pub mute: bool,

    /// Log file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE, env = "TARKIA_LOG_FILE")]
    pub log_file: PathBuf,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Runtime settings resolved from [`Cli`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_text: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub model: ModelConfig,
    pub output_dir: PathBuf,
    pub fonts: FontPaths,
    pub share_command: Option<PathBuf>,
    pub muted: bool,
}

impl Cli {
    pub fn settings(&self) -> Result<Settings, QuizError> {
        let source_text = match &self.source {
            Some(path) => std::fs::read_to_string(path)?,
            None => content::TARKIA_EBOOK_TEXT.to_string(),
        };
        if source_text.trim().is_empty() {
            return Err(QuizError::Configuration("source text is empty".into()));
        }

        Ok(Settings {
            source_text,
            difficulty: self.difficulty,
            question_count: usize::from(self.questions),
            model: ModelConfig {
                model: self.model.clone(),
                temperature: Some(self.temperature),
                max_tokens: Some(self.max_tokens),
            },
            output_dir: self.output_dir.clone(),
            fonts: FontPaths {
                serif_regular: self.serif_font.clone(),
                serif_bold: self.serif_bold_font.clone(),
                serif_italic: self.serif_italic_font.clone(),
                sans_regular: self.sans_font.clone(),
                sans_bold: self.sans_bold_font.clone(),
            },
            share_command: self.share_command.clone(),
            muted: self.mute,
        })
    }
}

impl Settings {
    pub fn quiz_config(&self, difficulty: Difficulty) -> QuizConfig {
        QuizConfig {
            source_text: self.source_text.clone(),
            difficulty,
            question_count: self.question_count,
            theme_color: content::THEME_COLOR.to_string(),
            primary_font: PrimaryFont::Serif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tarkia-quiz").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.difficulty, Difficulty::Medium);
        assert_eq!(cli.questions, 10);
        assert_eq!(cli.model, DEFAULT_MODEL);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.log_file, PathBuf::from("quiz_debug.log"));
        assert!(!cli.mute);

        let settings = cli.settings().unwrap();
        assert_eq!(settings.source_text, content::TARKIA_EBOOK_TEXT);
        assert_eq!(settings.question_count, 10);
        assert_eq!(settings.model.temperature, Some(DEFAULT_TEMPERATURE));
    }

    #[test]
    fn test_question_count_range() {
        assert!(parse(&["--questions", "0"]).is_err());
        assert!(parse(&["--questions", "51"]).is_err());
        assert_eq!(parse(&["--questions", "50"]).unwrap().questions, 50);
    }

    #[test]
    fn test_difficulty_values() {
        assert_eq!(
            parse(&["--difficulty", "hard"]).unwrap().difficulty,
            Difficulty::Hard
        );
        assert!(parse(&["--difficulty", "impossible"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        assert_eq!(parse(&["-vvv"]).unwrap().verbose, 3);
    }

    #[test]
    fn test_source_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notas.txt");
        std::fs::write(&path, "Holding patrimonial nos EAU.").unwrap();

        let cli = parse(&["--source", path.to_str().unwrap()]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.source_text, "Holding patrimonial nos EAU.");

        let config = settings.quiz_config(Difficulty::Easy);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.theme_color, "tarkia");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_or_missing_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("vazio.txt");
        std::fs::write(&empty, "  \n").unwrap();
        let cli = parse(&["--source", empty.to_str().unwrap()]).unwrap();
        assert!(matches!(cli.settings(), Err(QuizError::Configuration(_))));

        let missing = dir.path().join("nada.txt");
        let cli = parse(&["--source", missing.to_str().unwrap()]).unwrap();
        assert!(matches!(cli.settings(), Err(QuizError::Io(_))));
    }

    #[test]
    fn test_font_paths_are_forwarded() {
        let cli = parse(&["--serif-font", "/fonts/serif.ttf", "--sans-bold-font", "/fonts/sb.ttf"])
            .unwrap();
        let fonts = cli.settings().unwrap().fonts;
        assert_eq!(fonts.serif_regular, Some(PathBuf::from("/fonts/serif.ttf")));
        assert_eq!(fonts.sans_bold, Some(PathBuf::from("/fonts/sb.ttf")));
        assert!(fonts.serif_bold.is_none());
    }
}
