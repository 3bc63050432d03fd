//! OpenAI-compatible chat-completions client

use crate::error::{ExplainError, Result};
use crate::prompt::build_explain_prompt;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a risk analyst.";

/// Fallback text when the model returns an empty completion
const EMPTY_RESPONSE_PLACEHOLDER: &str = "[Model returned an empty response]";

/// Explanation client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Bearer token for the endpoint
    pub api_key: String,

    /// Chat-completions base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "deepseek/deepseek-r1-0528:free".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    stream: bool,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// VaR-change explanation client
pub struct Explainer {
    config: ExplainConfig,
    http: reqwest::Client,
}

impl Explainer {
    pub fn new(config: ExplainConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ExplainError::Config("api_key must not be empty".to_string()));
        }
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    /// Ask the model why today's VaR differs from yesterday's
    pub async fn explain_var(
        &self,
        var_today: f64,
        var_yesterday: f64,
        drivers: &[String],
        date: Option<&str>,
    ) -> Result<String> {
        let prompt = build_explain_prompt(var_today, var_yesterday, drivers, date);
        debug!(model = %self.config.model, "Requesting VaR explanation");

        let request = ChatRequest {
            model: self.config.model.clone(),
            stream: false,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Api(format!("{status}: {body}")));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("")
            .trim()
            .to_string();

        if content.is_empty() {
            return Ok(EMPTY_RESPONSE_PLACEHOLDER.to_string());
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let config = ExplainConfig {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: 0.7,
            max_tokens: 100,
        };
        assert!(matches!(
            Explainer::new(config),
            Err(ExplainError::Config(_))
        ));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: ExplainConfig =
            serde_json::from_str(r#"{"api_key":"sk-test"}"#).unwrap();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn test_response_parsing_shape() {
        let raw = r#"{"choices":[{"message":{"content":"🔹 because"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("🔹 because")
        );
    }
}
