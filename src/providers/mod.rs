/*!
 * Provider implementations for the supported translation services.
 *
 * This module contains client implementations for:
 * - OpenAI: chat-completion based translation
 * - Google: Cloud Translation v2 batch translate
 * - Azure: Azure AI Translator (regional endpoint)
 * - Mock: scripted backend for tests
 */

use async_trait::async_trait;
use log::error;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Fallback message when a failed response carries no usable explanation
pub const GENERIC_ERROR_MESSAGE: &str = "Unknown error occurred during translation";

/// Common trait for all translation backends
///
/// This trait defines the interface that all backend implementations must follow,
/// allowing them to be used interchangeably by the provider adapter.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Translate one piece of text
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_language` - Language identifier of `text`
    /// * `target_language` - Language identifier to translate into
    /// * `api_key` - Credential for the remote service
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        api_key: &str,
    ) -> Result<String, ProviderError>;
}

/// Error envelope shared by the services: `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Message carried by an error body, if any
pub(crate) fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
}

/// Map a non-success HTTP status and its body to a provider error
pub(crate) fn status_error(service: &str, status: StatusCode, body: &str) -> ProviderError {
    let message = server_message(body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
    error!("{} API error ({}): {}", service, status, message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::AuthenticationError(message)
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    }
}

/// Join a base endpoint and a route without doubling slashes
pub(crate) fn join_endpoint(endpoint: &str, route: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

pub mod azure;
pub mod google;
pub mod mock;
pub mod openai;
