use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{Provider, join_endpoint, status_error};
use crate::errors::ProviderError;

const API_VERSION: &str = "3.0";

/// Azure AI Translator client
#[derive(Debug)]
pub struct Azure {
    /// HTTP client for API requests
    client: Client,
    /// Service base URL, e.g. `https://api.cognitive.microsofttranslator.com`
    endpoint: String,
    /// Resource region sent with every request
    region: String,
}

/// One element of the request array
#[derive(Debug, Serialize)]
pub struct AzureRequestItem<'a> {
    pub text: &'a str,
}

/// One element of the response array
#[derive(Debug, Deserialize)]
pub struct AzureResult {
    #[serde(default)]
    pub translations: Vec<AzureTranslation>,
}

#[derive(Debug, Deserialize)]
pub struct AzureTranslation {
    pub text: String,
}

impl Azure {
    /// Create a new Azure Translator client
    pub fn new(endpoint: impl Into<String>, region: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Translate URL with API version and language pair as query parameters
    pub fn request_url(
        &self,
        source_language: &str,
        target_language: &str,
    ) -> Result<Url, ProviderError> {
        let base = join_endpoint(&self.endpoint, "translate");
        let mut url = Url::parse(&base)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", base, e)))?;
        url.query_pairs_mut()
            .append_pair("api-version", API_VERSION)
            .append_pair("from", source_language)
            .append_pair("to", target_language);
        Ok(url)
    }

    /// Interpret a raw HTTP response
    pub fn parse_response(status: StatusCode, body: &str) -> Result<String, ProviderError> {
        if !status.is_success() {
            return Err(status_error("Azure", status, body));
        }

        let results: Vec<AzureResult> = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_text(&results)
            .ok_or_else(|| ProviderError::EmptyResponse("result array is empty".to_string()))
    }

    /// `text` of the first translation of the first result
    pub fn extract_text(results: &[AzureResult]) -> Option<String> {
        results
            .first()
            .and_then(|result| result.translations.first())
            .map(|translation| translation.text.clone())
    }
}

#[async_trait]
impl Provider for Azure {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        api_key: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(source_language, target_language)?;
        debug!("Azure translate request to {} (region {})", url, self.region);

        let response = self
            .client
            .post(url)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(&[AzureRequestItem { text }])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::parse_response(status, &body)
    }
}
