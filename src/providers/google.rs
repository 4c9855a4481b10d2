use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{Provider, status_error};
use crate::errors::ProviderError;

/// Google Cloud Translation (v2) client
#[derive(Debug)]
pub struct Google {
    /// HTTP client for API requests
    client: Client,
    /// Full translate URL, e.g. `https://translation.googleapis.com/language/translate/v2`
    endpoint: String,
}

/// Translate request body
#[derive(Debug, Serialize)]
pub struct GoogleRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'static str,
}

/// Translate response body
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    pub data: Option<GoogleData>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleData {
    #[serde(default)]
    pub translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleTranslation {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl Google {
    /// Create a new Google Translate client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Translate URL with the credential as the `key` query parameter
    pub fn request_url(&self, api_key: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    pub fn build_request<'a>(
        text: &'a str,
        source_language: &'a str,
        target_language: &'a str,
    ) -> GoogleRequest<'a> {
        GoogleRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
        }
    }

    /// Interpret a raw HTTP response
    pub fn parse_response(status: StatusCode, body: &str) -> Result<String, ProviderError> {
        if !status.is_success() {
            return Err(status_error("Google", status, body));
        }

        let response: GoogleResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_text(&response)
            .ok_or_else(|| ProviderError::EmptyResponse("translations array is empty".to_string()))
    }

    /// `translatedText` of the first translation
    pub fn extract_text(response: &GoogleResponse) -> Option<String> {
        response
            .data
            .as_ref()
            .and_then(|data| data.translations.first())
            .map(|translation| translation.translated_text.clone())
    }
}

#[async_trait]
impl Provider for Google {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        api_key: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(api_key)?;
        debug!("Google translate request {} -> {}", source_language, target_language);

        let response = self
            .client
            .post(url)
            .json(&Self::build_request(text, source_language, target_language))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::parse_response(status, &body)
    }
}
