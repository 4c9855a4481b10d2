use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Provider, join_endpoint, status_error};
use crate::errors::ProviderError;

/// Prompt used when none is configured
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional translator. Translate the following text from {source_language} to {target_language}. Preserve all formatting and special characters. Return ONLY the translated text without any explanations.";

/// OpenAI client for chat-completion based translation
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API base URL, e.g. `https://api.openai.com/v1`
    endpoint: String,
    /// Model name
    model: String,
    /// System prompt template with `{source_language}`/`{target_language}` placeholders
    system_prompt: String,
    temperature: f32,
    max_tokens: u32,
}

/// Chat-completion request body
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat-completion response body
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl Default for OpenAIRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl OpenAIRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn messages(&self) -> &[OpenAIMessage] {
        &self.messages
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            model: model.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.3,
            max_tokens: 1000,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Build the request body for one text
    pub fn build_request(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> OpenAIRequest {
        let system = self
            .system_prompt
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language);

        OpenAIRequest::new(self.model.clone())
            .add_message("system", system)
            .add_message("user", text)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
    }

    /// Interpret a raw HTTP response
    pub fn parse_response(status: StatusCode, body: &str) -> Result<String, ProviderError> {
        if !status.is_success() {
            return Err(status_error("OpenAI", status, body));
        }

        let response: OpenAIResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_text(&response)
            .ok_or_else(|| ProviderError::EmptyResponse("no completion in response".to_string()))
    }

    /// First completion's content, trimmed
    pub fn extract_text(response: &OpenAIResponse) -> Option<String> {
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(|content| content.trim().to_string())
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        api_key: &str,
    ) -> Result<String, ProviderError> {
        let url = join_endpoint(&self.endpoint, "chat/completions");
        let request = self.build_request(text, source_language, target_language);
        debug!("OpenAI request to {} with model {}", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::parse_response(status, &body)
    }
}
