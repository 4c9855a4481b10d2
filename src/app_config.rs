use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::document::DEFAULT_MAX_DEPTH;
use crate::language_utils::language_ids_match;
use crate::providers::openai::DEFAULT_SYSTEM_PROMPT;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language whose values are translated
    pub source_language: String,

    /// Languages that receive translations
    #[serde(default)]
    pub target_languages: Vec<String>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Comparison config
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI chat completions
    #[default]
    OpenAI,
    // @provider: Google Cloud Translation
    Google,
    // @provider: Azure AI Translator
    Azure,
}

impl TranslationProvider {
    /// All supported services
    pub const ALL: [TranslationProvider; 3] = [Self::OpenAI, Self::Google, Self::Azure];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Google => "Google Translate",
            Self::Azure => "Azure Translator",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Google => "google".to_string(),
            Self::Azure => "azure".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "google" => Ok(Self::Google),
            "azure" => Ok(Self::Azure),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (chat-completion services only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Resource region (Azure only)
    #[serde(default = "String::new")]
    pub region: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                region: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_google_endpoint(),
                region: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Azure => Self {
                provider_type: "azure".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_azure_endpoint(),
                region: default_azure_region(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for chat-completion translation
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Pause in milliseconds between consecutive requests of a batch
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token limit per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            request_delay_ms: default_request_delay_ms(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Comparison settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Deepest key nesting accepted in a document
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Only show entries that are not Ok
    #[serde(default)]
    pub issues_only: bool,

    /// Report intermediate mappings in N-way mode as well
    #[serde(default)]
    pub include_intermediate: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            issues_only: false,
            include_intermediate: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    0
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_google_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_azure_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com".to_string()
}

fn default_azure_region() -> String {
    "westeurope".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language is required"));
        }

        if self.target_languages.iter().any(|lang| lang.trim().is_empty()) {
            return Err(anyhow!("Target languages must not be empty strings"));
        }

        if self
            .target_languages
            .iter()
            .any(|target| language_ids_match(target, &self.source_language))
        {
            return Err(anyhow!(
                "Source language '{}' cannot also be a target language",
                self.source_language
            ));
        }

        if self.comparison.max_depth == 0 {
            return Err(anyhow!("Maximum depth must be at least 1"));
        }

        let temperature = self.translation.common.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", temperature));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_languages: Vec::new(),
            translation: TranslationConfig::default(),
            comparison: ComparisonConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to a provider configuration, created with defaults when absent
    pub fn provider_config_mut(&mut self, provider_type: TranslationProvider) -> &mut ProviderConfig {
        let provider_str = provider_type.to_lowercase_string();
        let position = match self
            .available_providers
            .iter()
            .position(|p| p.provider_type == provider_str)
        {
            Some(position) => position,
            None => {
                self.available_providers.push(ProviderConfig::new(provider_type));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[position]
    }

    /// Get the model for a provider
    pub fn get_model(&self, provider_type: &TranslationProvider) -> String {
        match self.get_provider_config(provider_type) {
            Some(provider_config) if !provider_config.model.is_empty() => provider_config.model.clone(),
            _ => match provider_type {
                TranslationProvider::OpenAI => default_openai_model(),
                TranslationProvider::Google | TranslationProvider::Azure => String::new(),
            },
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|provider_config| provider_config.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for a provider
    pub fn get_endpoint(&self, provider_type: &TranslationProvider) -> String {
        if let Some(provider_config) = self.get_provider_config(provider_type) {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match provider_type {
            TranslationProvider::OpenAI => default_openai_endpoint(),
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Azure => default_azure_endpoint(),
        }
    }

    /// Get the Azure region, falling back to the default region
    pub fn get_region(&self) -> String {
        match self.get_provider_config(&TranslationProvider::Azure) {
            Some(provider_config) if !provider_config.region.is_empty() => provider_config.region.clone(),
            _ => default_azure_region(),
        }
    }

    /// Get the request timeout for a provider
    pub fn get_timeout_secs(&self, provider_type: &TranslationProvider) -> u64 {
        self.get_provider_config(provider_type)
            .map(|provider_config| provider_config.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: TranslationProvider::ALL
                .iter()
                .map(|provider| ProviderConfig::new(*provider))
                .collect(),
            common: TranslationCommonConfig::default(),
        }
    }
}
