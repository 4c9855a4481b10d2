/*!
 * Tests for the application controller
 */

use anyhow::Result;
use serde_json::json;
use std::time::Duration;

use langtree::app_config::Config;
use langtree::app_controller::Controller;
use langtree::compare::ComparisonEngine;
use langtree::session::Session;
use crate::common;

#[test]
fn test_new_for_test_shouldCreateController() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().source_language, "en");
    assert_eq!(controller.engine().max_depth(), 20);
    Ok(())
}

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.comparison.max_depth = 0;

    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_compare_withOnlyOneSide_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let session = Session::new(common::language_set(&[("en", json!({}))]));

    assert!(controller.compare(&session, Some("en"), None).is_err());
    Ok(())
}

#[test]
fn test_renderReport_withIssuesOnly_shouldListOnlyIssues() {
    let set = common::language_set(&[
        ("en", json!({"ok": "1", "gap": "2"})),
        ("fr", json!({"ok": "1"})),
    ]);
    let report = ComparisonEngine::standard().compare_all(&set).unwrap();

    let all = Controller::render_report(&report, false);
    let issues = Controller::render_report(&report, true);

    let all_lines: Vec<&str> = all.lines().collect();
    assert_eq!(all_lines.len(), 3);
    assert!(all_lines[0].starts_with("PATH"));
    assert!(all_lines[0].ends_with("STATUS"));

    let issue_lines: Vec<&str> = issues.lines().collect();
    assert_eq!(issue_lines.len(), 2);
    assert!(issue_lines[1].starts_with("gap"));
    assert!(issue_lines[1].contains("string"));
    assert!(issue_lines[1].contains(" - "));
    assert!(issue_lines[1].ends_with("Missing in 1 language (fr)"));
}

#[test]
fn test_formatDuration_withVariousLengths_shouldPickUnits() {
    assert_eq!(Controller::format_duration(Duration::from_millis(1500)), "1.500s");
    assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}
