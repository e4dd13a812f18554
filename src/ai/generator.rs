use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::ai::client::{ModelConfig, OpenRouterClient, ensure_api_key};
use crate::error::QuizError;
use crate::models::{OPTIONS_PER_QUESTION, Question, QuizConfig};

/// Only this many characters of source text are sent to the model.
pub const MAX_SOURCE_CHARS: usize = 25_000;

/// Produces the question list for a quiz.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn generate(&self, config: &QuizConfig) -> Result<Vec<Question>, QuizError>;
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn build_prompt(config: &QuizConfig) -> String {
    let source = truncate_chars(&config.source_text, MAX_SOURCE_CHARS);
    format!(
        r#"Atue como um consultor sênior de negócios internacionais e estruturação patrimonial (foco Brasil-Dubai).
Crie um quiz de {count} perguntas de nível {level} em PORTUGUÊS (Brasil) com base no texto abaixo.

ESTILO:
- O tom deve ser sofisticado, direto e profissional (Business Luxury).
- Evite linguagem infantil ou "escolar". Use termos como "Investidor", "Estrutura", "Holding", "Compliance".
- O objetivo é testar o conhecimento do usuário sobre os riscos fiscais no Brasil e as vantagens de estruturar em Dubai.

FORMATO:
- Responda SOMENTE com um array JSON (sem markdown, sem texto extra) com exatamente {count} objetos:
[
  {{
    "text": "A pergunta do quiz. Deve ser desafiadora.",
    "options": ["opção 1", "opção 2", "opção 3", "opção 4"],
    "correctIndex": 0,
    "explanation": "Explicação técnica e concisa do porquê, reforçando a autoridade da Tarkia."
  }}
]
- Cada pergunta tem exatamente {options} opções e apenas uma correta; "correctIndex" vai de 0 a {last}.

TEXTO BASE (Do eBook "Tarkia"):
"{source}""#,
        count = config.question_count,
        level = config.difficulty.label(),
        options = OPTIONS_PER_QUESTION,
        last = OPTIONS_PER_QUESTION - 1,
        source = source,
    )
}

/// Strip code fences and surrounding prose, keeping the outermost JSON array.
fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('[')
        && let Some(end) = cleaned.rfind(']')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    text: String,
    options: Vec<String>,
    correct_index: i64,
    explanation: String,
}

/// Check shape and count, then assign ids `q-{index}-{stamp}`.
fn validate_questions(
    raw: Vec<RawQuestion>,
    expected: usize,
    stamp: i64,
) -> Result<Vec<Question>, QuizError> {
    if raw.len() != expected {
        return Err(QuizError::Generation(format!(
            "expected {} questions, got {}",
            expected,
            raw.len()
        )));
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, q)| {
            if q.options.len() != OPTIONS_PER_QUESTION {
                return Err(QuizError::Generation(format!(
                    "question {} has {} options",
                    index,
                    q.options.len()
                )));
            }
            let correct_index = usize::try_from(q.correct_index)
                .ok()
                .filter(|&i| i < OPTIONS_PER_QUESTION)
                .ok_or_else(|| {
                    QuizError::Generation(format!(
                        "question {} has correctIndex {}",
                        index, q.correct_index
                    ))
                })?;
            if q.text.trim().is_empty() {
                return Err(QuizError::Generation(format!(
                    "question {} has no text",
                    index
                )));
            }
            Ok(Question {
                id: format!("q-{}-{}", index, stamp),
                text: q.text,
                options: q.options,
                correct_index,
                explanation: q.explanation,
            })
        })
        .collect()
}

pub fn parse_questions(
    response: &str,
    expected: usize,
    stamp: i64,
) -> Result<Vec<Question>, QuizError> {
    let cleaned = clean_json_response(response);
    debug!(cleaned_len = cleaned.len(), "cleaned model response");
    let raw: Vec<RawQuestion> = serde_json::from_str(&cleaned)
        .map_err(|e| QuizError::Generation(format!("Failed to parse quiz JSON: {}", e)))?;
    validate_questions(raw, expected, stamp)
}

/// Question source backed by an OpenRouter chat model.
#[derive(Debug, Clone, Default)]
pub struct OpenRouterQuestionSource {
    model: ModelConfig,
}

impl OpenRouterQuestionSource {
    pub fn new(model: ModelConfig) -> Self {
        Self { model }
    }
}

#[async_trait]
impl QuestionSource for OpenRouterQuestionSource {
    async fn generate(&self, config: &QuizConfig) -> Result<Vec<Question>, QuizError> {
        config.validate()?;
        ensure_api_key()?;

        let client = OpenRouterClient::new()?;
        let prompt = build_prompt(config);
        info!(
            count = config.question_count,
            difficulty = config.difficulty.label(),
            model = %self.model.model,
            "requesting quiz"
        );

        let response = client.generate_quiz(&prompt, &self.model).await?;
        let stamp = chrono::Utc::now().timestamp_millis();
        parse_questions(&response, config.question_count, stamp).inspect_err(|e| {
            warn!(error = %e, "model response rejected");
        })
    }
}

/// Canned source for tests: returns a fixed result after validating input.
#[cfg(test)]
pub(crate) struct MockQuestionSource {
    pub result: fn(&QuizConfig) -> Result<Vec<Question>, QuizError>,
}

#[cfg(test)]
#[async_trait]
impl QuestionSource for MockQuestionSource {
    async fn generate(&self, config: &QuizConfig) -> Result<Vec<Question>, QuizError> {
        config.validate()?;
        (self.result)(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, PrimaryFont};

    fn config(count: usize, source: &str) -> QuizConfig {
        QuizConfig {
            source_text: source.to_string(),
            difficulty: Difficulty::Hard,
            question_count: count,
            theme_color: "tarkia".into(),
            primary_font: PrimaryFont::Serif,
        }
    }

    fn question_json(correct: i64) -> String {
        format!(
            r#"{{"text":"Qual a taxa?","options":["0%","5%","9%","15%"],"correctIndex":{},"explanation":"9% acima de AED 375.000."}}"#,
            correct
        )
    }

    fn array_of(items: &[String]) -> String {
        format!("[{}]", items.join(","))
    }

    #[test]
    fn test_prompt_interpolates_count_and_level() {
        let prompt = build_prompt(&config(10, "Holding nos EAU."));
        assert!(prompt.contains("Crie um quiz de 10 perguntas de nível Difícil"));
        assert!(prompt.contains("\"Holding nos EAU.\""));
        assert!(prompt.contains("correctIndex"));
    }

    #[test]
    fn test_prompt_truncates_source_on_char_boundary() {
        let source = "ã".repeat(MAX_SOURCE_CHARS + 10);
        let prompt = build_prompt(&config(3, &source));
        let template_only = build_prompt(&config(3, "x")).matches('ã').count();
        let embedded = prompt.matches('ã').count() - template_only;
        assert_eq!(embedded, MAX_SOURCE_CHARS);
    }

    #[test]
    fn test_clean_json_response_markdown() {
        let response = "```json\n[{\"a\":1}]\n```";
        assert_eq!(clean_json_response(response), r#"[{"a":1}]"#);
    }

    #[test]
    fn test_clean_json_response_with_prose() {
        let response = r#"Aqui está o quiz: [{"a":[1,2]}] Boa sorte!"#;
        assert_eq!(clean_json_response(response), r#"[{"a":[1,2]}]"#);
    }

    #[test]
    fn test_parse_assigns_ids_in_order() {
        let response = array_of(&[question_json(2), question_json(0)]);
        let questions = parse_questions(&response, 2, 1700000000000).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "q-0-1700000000000");
        assert_eq!(questions[1].id, "q-1-1700000000000");
        assert_eq!(questions[0].correct_index, 2);
        assert_eq!(questions[1].correct_index, 0);
    }

    #[test]
    fn test_short_list_is_a_generation_error() {
        let response = array_of(&[question_json(1)]);
        let err = parse_questions(&response, 10, 0).unwrap_err();
        assert!(matches!(err, QuizError::Generation(msg) if msg.contains("expected 10")));
    }

    #[test]
    fn test_out_of_range_correct_index_is_rejected() {
        for bad in [4, -1] {
            let response = array_of(&[question_json(bad)]);
            assert!(matches!(
                parse_questions(&response, 1, 0),
                Err(QuizError::Generation(_))
            ));
        }
    }

    #[test]
    fn test_wrong_option_count_is_rejected() {
        let response =
            r#"[{"text":"?","options":["a","b","c"],"correctIndex":0,"explanation":""}]"#;
        assert!(matches!(
            parse_questions(response, 1, 0),
            Err(QuizError::Generation(_))
        ));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let response = r#"[{"text":"?","options":["a","b","c","d"],"explanation":""}]"#;
        assert!(matches!(
            parse_questions(response, 1, 0),
            Err(QuizError::Generation(_))
        ));
    }

    #[test]
    fn test_not_json_is_rejected() {
        assert!(matches!(
            parse_questions("Desculpe, não posso ajudar.", 1, 0),
            Err(QuizError::Generation(_))
        ));
    }

    #[tokio::test]
    async fn test_source_rejects_invalid_config_before_request() {
        let source = OpenRouterQuestionSource::default();
        let err = source.generate(&config(0, "texto")).await.unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)));
    }
}
