/*!
 * Uniform translate operation over the configured backends.
 *
 * The adapter never returns an error: missing credentials, unknown services,
 * transport failures, error statuses and malformed bodies all become a
 * `ProviderOutcome::Failed` carrying a readable message.
 */

use log::{debug, warn};
use std::collections::HashMap;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, ValidationError};
use crate::providers::Provider;
use crate::providers::azure::Azure;
use crate::providers::google::Google;
use crate::providers::openai::OpenAI;

/// Inputs of one translate call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub api_key: String,
    pub service: TranslationProvider,
}

/// Normalized result of one translate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Translated(String),
    Failed(String),
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Translated(_))
    }

    pub fn translated_text(&self) -> Option<&str> {
        match self {
            Self::Translated(text) => Some(text.as_str()),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Translated(_) => None,
            Self::Failed(message) => Some(message.as_str()),
        }
    }
}

/// Dispatches translate calls to the backend named by the request.
/// There is no fallback between services.
#[derive(Debug, Default)]
pub struct ProviderAdapter {
    backends: HashMap<TranslationProvider, Box<dyn Provider>>,
}

impl ProviderAdapter {
    /// Adapter without any backend
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adapter with all three HTTP backends built from configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        let timeout = |service| Duration::from_secs(config.get_timeout_secs(&service));

        let openai = OpenAI::new(
            config.get_endpoint(&TranslationProvider::OpenAI),
            config.get_model(&TranslationProvider::OpenAI),
            timeout(TranslationProvider::OpenAI),
        )
        .with_system_prompt(config.common.system_prompt.clone())
        .with_sampling(config.common.temperature, config.common.max_tokens);

        let google = Google::new(
            config.get_endpoint(&TranslationProvider::Google),
            timeout(TranslationProvider::Google),
        );

        let azure = Azure::new(
            config.get_endpoint(&TranslationProvider::Azure),
            config.get_region(),
            timeout(TranslationProvider::Azure),
        );

        Self::empty()
            .with_provider(TranslationProvider::OpenAI, openai)
            .with_provider(TranslationProvider::Google, google)
            .with_provider(TranslationProvider::Azure, azure)
    }

    /// Register or replace the backend for one service
    pub fn with_provider(mut self, service: TranslationProvider, backend: impl Provider + 'static) -> Self {
        self.backends.insert(service, Box::new(backend));
        self
    }

    pub fn supports(&self, service: TranslationProvider) -> bool {
        self.backends.contains_key(&service)
    }

    /// Translate one text. Never fails; errors are folded into the outcome.
    pub async fn translate(&self, request: &TranslationRequest) -> ProviderOutcome {
        if request.api_key.trim().is_empty() {
            return ProviderOutcome::Failed(ValidationError::MissingCredential.to_string());
        }

        let Some(backend) = self.backends.get(&request.service) else {
            return ProviderOutcome::Failed(
                ProviderError::UnknownService(request.service.to_string()).to_string(),
            );
        };

        debug!(
            "Translating {} chars {} -> {} via {}",
            request.text.chars().count(),
            request.source_language,
            request.target_language,
            backend.name()
        );

        match backend
            .translate(
                &request.text,
                &request.source_language,
                &request.target_language,
                &request.api_key,
            )
            .await
        {
            Ok(text) => ProviderOutcome::Translated(text),
            Err(e) => {
                warn!("{} translation failed: {}", request.service.display_name(), e);
                ProviderOutcome::Failed(e.to_string())
            }
        }
    }
}
