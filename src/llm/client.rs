//! Chat-completion client
//!
//! Talks to an OpenAI-compatible `POST /v1/chat/completions` endpoint and
//! returns the text of the first choice.

use crate::config::LlmConfig;
use crate::crawler::build_http_client;
use crate::LlmsError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// One completion call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Anything that can answer a completion request
#[async_trait]
pub trait Completion: Send + Sync {
    /// Returns the generated text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmsError>;

    /// Model name, for logging
    fn model_name(&self) -> &str;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI chat-completions client
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client from validated configuration
    pub fn new(config: &LlmConfig) -> Result<Self, LlmsError> {
        let client = build_http_client(config.request_timeout())?;
        let api_key = config
            .api_key
            .clone()
            .ok_or(crate::ConfigError::MissingCredential("OPENAI_API_KEY"))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1/chat/completions",
                config.api_base.trim_end_matches('/')
            ),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Completion for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmsError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmsError::Http {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LlmsError::Api {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| LlmsError::Decode {
            endpoint: self.endpoint.clone(),
            message: e.to_string(),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LlmsError::Decode {
                endpoint: self.endpoint.clone(),
                message: "response had no choices".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
