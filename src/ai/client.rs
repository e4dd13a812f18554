use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;
use tracing::debug;

use crate::error::QuizError;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

const SYSTEM_PROMPT: &str =
    "Você gera quizzes de múltipla escolha e responde somente com JSON válido.";

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

fn check_api_key(value: Option<&str>) -> Result<(), QuizError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(QuizError::Configuration(format!("{} not set", API_KEY_VAR))),
    }
}

/// The credential must be present and non-blank before any request is built.
pub fn ensure_api_key() -> Result<(), QuizError> {
    check_api_key(std::env::var(API_KEY_VAR).ok().as_deref())
}

impl OpenRouterClient {
    pub fn new() -> Result<Self, QuizError> {
        ensure_api_key()?;
        let client = openrouter_api::OpenRouterClient::quick().map_err(|e| {
            QuizError::Configuration(format!("Failed to create OpenRouter client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Send one chat completion and return the text of the first choice.
    pub async fn generate_quiz(
        &self,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<String, QuizError> {
        let messages = vec![
            Message::text("system", SYSTEM_PROMPT),
            Message::text("user", prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        debug!(
            model = %config.model,
            prompt_chars = prompt.chars().count(),
            "chat completion request"
        );

        let response = self
            .client
            .chat()
            .map_err(|e| QuizError::Configuration(format!("OpenRouter client error: {}", e)))?
            .chat_completion(request)
            .await
            .map_err(|e| QuizError::Generation(format!("OpenRouter API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| QuizError::Generation("Sem resposta do modelo.".into()))?;

        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| {
                    if let openrouter_api::ContentPart::Text(tc) = p {
                        Some(tc.text.clone())
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        if text.trim().is_empty() {
            return Err(QuizError::Generation("Sem resposta do modelo.".into()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(config.max_tokens, Some(DEFAULT_MAX_TOKENS));
    }

    #[test]
    fn test_blank_api_key_is_a_configuration_error() {
        assert!(check_api_key(Some("sk-or-123")).is_ok());
        assert!(matches!(check_api_key(None), Err(QuizError::Configuration(_))));
        assert!(matches!(
            check_api_key(Some("  ")),
            Err(QuizError::Configuration(_))
        ));
    }

    #[test]
    fn test_model_config_skips_unset_fields() {
        let config = ModelConfig {
            model: "m".into(),
            temperature: None,
            max_tokens: Some(100),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"model":"m","max_tokens":100}"#);
    }
}
