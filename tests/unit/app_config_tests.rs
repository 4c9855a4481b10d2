/*!
 * Tests for application configuration functionality
 */

use langtree::app_config::{
    ComparisonConfig, Config, LogLevel, TranslationCommonConfig, TranslationConfig, TranslationProvider,
};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert!(config.target_languages.is_empty());
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.comparison, ComparisonConfig::default());
    assert_eq!(config.comparison.max_depth, 20);

    let openai = config
        .translation
        .get_provider_config(&TranslationProvider::OpenAI)
        .expect("OpenAI provider config should exist");
    assert_eq!(openai.model, "gpt-3.5-turbo");
    assert_eq!(openai.endpoint, "https://api.openai.com/v1");
    assert_eq!(openai.timeout_secs, 30);
}

#[test]
fn test_commonConfigDefaults_shouldProvideReasonableValues() {
    let common = TranslationCommonConfig::default();

    assert!((common.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(common.max_tokens, 1000);
    assert_eq!(common.request_delay_ms, 0);
    assert!(common.system_prompt.contains("{source_language}"));
    assert!(common.system_prompt.contains("{target_language}"));
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "  ".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    config.target_languages = vec!["fr".to_string(), "".to_string()];
    assert!(config.validate().is_err());

    config.target_languages = vec!["fr".to_string(), "en".to_string()];
    assert!(config.validate().is_err());
    config.target_languages = vec!["EN".to_string()];
    assert!(config.validate().is_err());
    config.target_languages = vec!["eng".to_string()];
    assert!(config.validate().is_err());
    config.target_languages = vec!["fr".to_string()];
    assert!(config.validate().is_ok());

    config.comparison.max_depth = 0;
    assert!(config.validate().is_err());
    config.comparison.max_depth = 20;

    config.translation.common.temperature = 2.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "source_language": "de",
        "target_languages": ["pl"],
        "translation": {
            "provider": "azure",
            "available_providers": [
                {"type": "azure", "api_key": "secret", "region": "northeurope"}
            ]
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.source_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::Azure);
    assert_eq!(config.translation.get_api_key(), "secret");
    assert_eq!(config.translation.get_region(), "northeurope");
    assert_eq!(
        config.translation.get_endpoint(&TranslationProvider::Azure),
        "https://api.cognitive.microsofttranslator.com"
    );
    assert_eq!(config.translation.get_timeout_secs(&TranslationProvider::Azure), 30);
    assert_eq!(config.translation.common.max_tokens, 1000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_providerConfigMut_withMissingProvider_shouldCreateIt() {
    let mut translation = TranslationConfig {
        available_providers: Vec::new(),
        ..TranslationConfig::default()
    };
    translation.provider = TranslationProvider::Google;

    translation.provider_config_mut(TranslationProvider::Google).api_key = "g-key".to_string();

    assert_eq!(translation.available_providers.len(), 1);
    assert_eq!(translation.get_api_key(), "g-key");
    assert_eq!(
        translation.get_endpoint(&TranslationProvider::Google),
        "https://translation.googleapis.com/language/translate/v2"
    );
}

#[test]
fn test_translationProvider_fromStr_shouldAcceptAnyCase() {
    assert_eq!("OpenAI".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert_eq!("GOOGLE".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert!("deepl".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Azure.to_string(), "azure");
    assert_eq!(TranslationProvider::Google.display_name(), "Google Translate");
}
