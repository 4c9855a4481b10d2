/*!
 * End-to-end tests: load a folder, compare, translate, re-compare, export
 */

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value as Json, json};
use std::fs;

use langtree::app_config::{Config, TranslationProvider};
use langtree::app_controller::Controller;
use langtree::compare::EntryStatus;
use langtree::document::KeyPath;
use langtree::providers::mock::MockProvider;
use crate::common;

fn config_with_key(targets: &[&str]) -> Config {
    let mut config = Config::default();
    config.target_languages = targets.iter().map(|target| target.to_string()).collect();
    config.translation.provider = TranslationProvider::OpenAI;
    config.translation.common.request_delay_ms = 0;
    config.translation.provider_config_mut(TranslationProvider::OpenAI).api_key = "test-key".to_string();
    config
}

fn read_json(path: &std::path::Path) -> Result<Json> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[tokio::test]
async fn test_translateWorkflow_shouldFillGapsAndExportChangedFiles() -> Result<()> {
    common::init_logging();
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_file(
        input.path(),
        "en.json",
        r#"{"title": "Hello", "menu": {"open": "Open", "close": "Close"}, "count": 2}"#,
    )?;
    common::create_test_file(input.path(), "fr/translate.json", r#"{"title": "Bonjour", "count": 2}"#)?;
    common::create_test_file(input.path(), "de.json", r#"{"title": "Hallo", "menu": {"open": "Öffnen"}, "count": 2}"#)?;
    common::create_test_file(input.path(), "broken.json", "{")?;

    let controller = Controller::with_config(config_with_key(&["fr", "de"]))?;
    let session = controller.load(input.path())?;
    let before = controller.compare(&session, None, None)?;
    assert_eq!(
        before.find(&KeyPath::parse("menu.open")?).map(|entry| entry.status),
        Some(EntryStatus::MissingInSome(1))
    );

    let mock = MockProvider::working();
    let summary = controller
        .run_translate_with(common::mock_adapter(&mock), input.path(), Some(output.path()))
        .await?;

    assert_eq!(summary.outcome.success_count, 3);
    assert_eq!(summary.outcome.failed_count, 0);
    assert_eq!(summary.remaining_issues, 0);
    assert_eq!(mock.max_in_flight(), 1);

    let requested: Vec<(String, String)> = mock
        .calls()
        .into_iter()
        .map(|call| (call.text, call.target_language))
        .collect();
    assert_eq!(
        requested,
        vec![
            ("Open".to_string(), "fr".to_string()),
            ("Close".to_string(), "fr".to_string()),
            ("Close".to_string(), "de".to_string()),
        ]
    );

    assert_eq!(summary.exported.len(), 2);
    assert_eq!(
        read_json(&output.path().join("fr").join("translate.json"))?,
        json!({
            "title": "Bonjour",
            "count": 2,
            "menu": {"open": "[fr] Open", "close": "[fr] Close"}
        })
    );
    assert_eq!(
        read_json(&output.path().join("de.json"))?,
        json!({
            "title": "Hallo",
            "menu": {"open": "Öffnen", "close": "[de] Close"},
            "count": 2
        })
    );
    assert!(!output.path().join("en.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_translateWorkflow_withFailingProvider_shouldLeaveFilesUntouched() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_file(input.path(), "en.json", r#"{"a": "A", "b": "B"}"#)?;
    common::create_test_file(input.path(), "fr.json", r#"{}"#)?;

    let controller = Controller::with_config(config_with_key(&["fr"]))?;
    let mock = MockProvider::failing();
    let summary = controller
        .run_translate_with(common::mock_adapter(&mock), input.path(), None)
        .await?;

    assert_eq!(summary.outcome.failed_count, 2);
    assert_eq!(summary.remaining_issues, 2);
    assert!(summary.exported.is_empty());
    assert_eq!(fs::read_to_string(input.path().join("fr.json"))?, "{}");
    Ok(())
}

#[tokio::test]
async fn test_translateWorkflow_withoutApiKey_shouldNotStart() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_file(input.path(), "en.json", r#"{"a": "A"}"#)?;
    common::create_test_file(input.path(), "fr.json", r#"{}"#)?;

    let controller = Controller::with_config(Config {
        target_languages: vec!["fr".to_string()],
        ..Config::default()
    })?;
    let mock = MockProvider::working();

    let result = controller
        .run_translate_with(common::mock_adapter(&mock), input.path(), None)
        .await;

    let error = result.expect_err("batch should not start without a credential");
    assert!(format!("{:#}", error).contains("API key is required"));
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translateWorkflow_withTargetNotLoaded_shouldFailBeforeAnyCall() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_file(input.path(), "en.json", r#"{"a": "A"}"#)?;
    common::create_test_file(input.path(), "fr.json", r#"{}"#)?;

    let controller = Controller::with_config(config_with_key(&["fr", "de"]))?;
    let mock = MockProvider::working();

    let result = controller
        .run_translate_with(common::mock_adapter(&mock), input.path(), None)
        .await;

    let error = result.expect_err("an unloaded target must be reported");
    assert!(format!("{:#}", error).contains("Language 'de' is not loaded"));
    assert_eq!(mock.call_count(), 0);
    assert_eq!(fs::read_to_string(input.path().join("fr.json"))?, "{}");
    Ok(())
}

#[tokio::test]
async fn test_translateWorkflow_withSourceNotLoaded_shouldFail() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_file(input.path(), "fr.json", r#"{"a": "A"}"#)?;
    common::create_test_file(input.path(), "de.json", r#"{}"#)?;

    let controller = Controller::with_config(config_with_key(&["de"]))?;
    let mock = MockProvider::working();

    let result = controller
        .run_translate_with(common::mock_adapter(&mock), input.path(), None)
        .await;

    assert!(format!("{:#}", result.expect_err("source is not loaded")).contains("Language 'en' is not loaded"));
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_translateWorkflow_withNoGaps_shouldDoNothing() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_file(input.path(), "en.json", r#"{"a": "A"}"#)?;
    common::create_test_file(input.path(), "fr.json", r#"{"a": "Á"}"#)?;

    let controller = Controller::with_config(config_with_key(&[]))?;
    let mock = MockProvider::working();
    let summary = controller
        .run_translate_with(common::mock_adapter(&mock), input.path(), None)
        .await?;

    assert_eq!(summary.outcome.attempted(), 0);
    assert_eq!(summary.remaining_issues, 0);
    assert_eq!(mock.call_count(), 0);
    Ok(())
}
