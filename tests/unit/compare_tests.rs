/*!
 * Tests for path extraction and the comparison engine
 */

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use langtree::compare::{
    CompareMode, ComparisonEngine, EntryStatus, NWayOptions, NodeKind, PathExtractor,
};
use langtree::document::{Document, KeyPath, ValueType};
use langtree::errors::DocumentError;
use crate::common;

fn path(dotted: &str) -> KeyPath {
    KeyPath::parse(dotted).unwrap()
}

fn canonical_paths(report: &langtree::ReconciliationReport) -> Vec<String> {
    report.entries.iter().map(|entry| entry.path.canonical()).collect()
}

#[test]
fn test_extract_shouldVisitInPreOrderWithoutDescendingIntoArrays() {
    let document = common::doc(json!({
        "a": {"b": "x", "c": {"d": 1}},
        "list": [{"hidden": "y"}],
        "empty": {}
    }));

    let extracted = PathExtractor::default().extract(&document).unwrap();
    let visited: Vec<(String, NodeKind)> = extracted
        .iter()
        .map(|item| (item.path.canonical(), item.kind))
        .collect();

    assert_eq!(
        visited,
        vec![
            ("a".to_string(), NodeKind::Branch),
            ("a.b".to_string(), NodeKind::Leaf),
            ("a.c".to_string(), NodeKind::Branch),
            ("a.c.d".to_string(), NodeKind::Leaf),
            ("list".to_string(), NodeKind::Leaf),
            ("empty".to_string(), NodeKind::EmptyMapping),
        ]
    );

    let leaves = PathExtractor::default().leaf_paths(&document).unwrap();
    assert_eq!(leaves, vec![path("a.b"), path("a.c.d"), path("list"), path("empty")]);
}

#[test]
fn test_extract_withDepthAboveGuard_shouldFailInsteadOfTruncating() {
    let document = Document::parse(r#"{"a": {"b": {"c": "deep"}}}"#, 50).unwrap();

    let result = PathExtractor::new(2).extract(&document);
    assert_eq!(
        result,
        Err(DocumentError::TooDeep {
            max_depth: 2,
            path: "a.b.c".to_string(),
        })
    );
}

#[test]
fn test_compareAll_withEmptyMappingSibling_shouldReportLeafOnly() {
    let set = common::language_set(&[
        ("en", json!({"a": {"b": "hi"}})),
        ("fr", json!({"a": {}})),
    ]);

    let report = ComparisonEngine::standard().compare_all(&set).unwrap();

    assert_eq!(report.mode, CompareMode::NWay);
    assert_eq!(canonical_paths(&report), vec!["a.b"]);

    let entry = report.find(&path("a.b")).unwrap();
    assert_eq!(
        entry.exists_by_language,
        IndexMap::from([("en".to_string(), true), ("fr".to_string(), false)])
    );
    assert_eq!(entry.type_in("en"), ValueType::String);
    assert_eq!(entry.type_in("fr"), ValueType::Undefined);
    assert_eq!(entry.status, EntryStatus::MissingInSome(1));
    assert_eq!(entry.missing_languages(), vec!["fr"]);
}

#[test]
fn test_compareAll_withIncludeIntermediate_shouldReportEveryVisitedPath() {
    let set = common::language_set(&[
        ("en", json!({"a": {"b": "hi"}})),
        ("fr", json!({"a": {}})),
    ]);
    let engine = ComparisonEngine::standard().with_options(NWayOptions {
        include_intermediate: true,
    });

    let report = engine.compare_all(&set).unwrap();

    assert_eq!(canonical_paths(&report), vec!["a", "a.b"]);
    assert_eq!(report.find(&path("a")).unwrap().status, EntryStatus::Ok);
}

#[test]
fn test_compareAll_withScalarAgainstMapping_shouldReportBothPaths() {
    let set = common::language_set(&[
        ("en", json!({"a": {"b": "hi"}})),
        ("fr", json!({"a": "flat"})),
    ]);

    let report = ComparisonEngine::standard().compare_all(&set).unwrap();

    assert_eq!(canonical_paths(&report), vec!["a", "a.b"]);
    assert_eq!(report.find(&path("a")).unwrap().status, EntryStatus::TypeMismatch);
    assert_eq!(
        report.find(&path("a.b")).unwrap().status,
        EntryStatus::MissingInSome(1)
    );
}

#[test]
fn test_compareAll_withEmptyMappingsEverywhere_shouldReportThemAsLeaves() {
    let set = common::language_set(&[
        ("en", json!({"a": {}, "n": null})),
        ("fr", json!({"a": {}, "n": {}})),
        ("de", json!({})),
    ]);

    let report = ComparisonEngine::standard().compare_all(&set).unwrap();

    assert_eq!(canonical_paths(&report), vec!["a", "n"]);
    let a = report.find(&path("a")).unwrap();
    assert_eq!(a.type_in("fr"), ValueType::Object);
    assert_eq!(a.status, EntryStatus::MissingInSome(1));
    // null and {} share the object tag
    let n = report.find(&path("n")).unwrap();
    assert_eq!(n.type_in("en"), n.type_in("fr"));
}

#[test]
fn test_compareAll_shouldContainEveryLeafPathExactlyOnce() {
    let languages = [
        ("en", json!({"a": {"b": "1", "c": [1]}, "d": true, "e": {"f": {"g": 2}}})),
        ("fr", json!({"a": {"b": 1}, "x": {"y": "z"}, "e": {"f": {}}})),
        ("de", json!({"d": "oui", "e": "flat", "a.b": "dotted"})),
    ];
    let set = common::language_set(&languages);

    let report = ComparisonEngine::standard().compare_all(&set).unwrap();

    let extractor = PathExtractor::default();
    for (language, json) in &languages {
        for leaf in extractor.leaf_paths(&common::doc(json.clone())).unwrap() {
            let hits = report.entries.iter().filter(|entry| entry.path == leaf).count();
            // An empty mapping where another language has children is a branch
            let empty_mapping_shadowed = leaf == path("e.f") && *language == "fr";
            if !empty_mapping_shadowed {
                assert_eq!(hits, 1, "{} from {} should appear once", leaf, language);
            }
        }
    }

    // The dotted key and the nested path stay distinct entries
    assert!(report.find(&KeyPath::single("a.b")).is_some());
    assert!(report.find(&path("a.b")).is_some());
}

#[test]
fn test_compareAll_twice_shouldProduceIdenticalReports() {
    let set = common::language_set(&[
        ("en", json!({"a": {"b": "hi", "c": 3}, "z": [1]})),
        ("fr", json!({"a": {"b": true}, "y": "only fr"})),
        ("pl", json!({"z": {}})),
    ]);
    let engine = ComparisonEngine::standard();

    let first = engine.compare_all(&set).unwrap();
    let second = engine.compare_all(&set).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_comparePair_withStringAndNumber_shouldReportTypeMismatch() {
    let en = common::doc(json!({"x": "1"}));
    let fr = common::doc(json!({"x": 1}));

    let report = ComparisonEngine::standard().compare_pair("en", &en, "fr", &fr).unwrap();

    assert_eq!(report.mode, CompareMode::Pairwise);
    assert_eq!(report.entries.len(), 1);
    let entry = &report.entries[0];
    assert_eq!(entry.path, path("x"));
    assert_eq!(entry.type_in("en"), ValueType::String);
    assert_eq!(entry.type_in("fr"), ValueType::Number);
    assert_eq!(entry.status, EntryStatus::TypeMismatch);
}

#[test]
fn test_comparePair_withMappingAgainstScalar_shouldNotDescend() {
    let a = common::doc(json!({"a": {"b": "x"}, "only_a": "1"}));
    let b = common::doc(json!({"a": "y", "only_b": "2"}));

    let report = ComparisonEngine::standard().compare_pair("a", &a, "b", &b).unwrap();

    assert_eq!(canonical_paths(&report), vec!["a", "only_a", "only_b"]);
    assert_eq!(report.entries[0].status, EntryStatus::TypeMismatch);
    assert_eq!(report.entries[1].status, EntryStatus::MissingInB);
    assert_eq!(report.entries[2].status, EntryStatus::MissingInA);
}

#[test]
fn test_comparePair_withTwoEmptyMappings_shouldEmitOkObjectEntry() {
    let a = common::doc(json!({"settings": {}}));
    let b = common::doc(json!({"settings": {}}));

    let report = ComparisonEngine::standard().compare_pair("en", &a, "fr", &b).unwrap();

    assert_eq!(canonical_paths(&report), vec!["settings"]);
    assert_eq!(report.entries[0].status, EntryStatus::Ok);
    assert_eq!(report.entries[0].type_in("en"), ValueType::Object);
}

#[test]
fn test_comparePair_withEqualLabels_shouldUseFileLabels() {
    let a = common::doc(json!({"k": "v"}));

    let report = ComparisonEngine::standard().compare_pair("en", &a, "en", &a).unwrap();

    assert_eq!(report.languages, vec!["file1", "file2"]);
    assert!(report.entries[0].exists_in("file1"));
    assert!(report.entries[0].exists_in("file2"));
}

#[test]
fn test_comparePair_swapped_shouldMirrorStatuses() {
    let a = common::doc(json!({"a": {"b": "x", "c": 1}, "d": [1], "e": "only a"}));
    let b = common::doc(json!({"a": {"b": 2}, "d": [2], "f": {"g": "only b"}}));
    let engine = ComparisonEngine::standard();

    let forward = engine.compare_pair("A", &a, "B", &b).unwrap();
    let backward = engine.compare_pair("B", &b, "A", &a).unwrap();

    assert_eq!(forward.entries.len(), backward.entries.len());
    for entry in &forward.entries {
        let mirrored = backward.find(&entry.path).unwrap();
        assert_eq!(mirrored.status, entry.status.mirrored(), "at {}", entry.path);
    }
}

#[test]
fn test_comparePair_withDepthAboveGuard_shouldFail() {
    let a = Document::parse(r#"{"a": {"b": {"c": "deep"}}}"#, 50).unwrap();
    let b = a.clone();

    let result = ComparisonEngine::new(2).compare_pair("a", &a, "b", &b);
    assert!(matches!(result, Err(DocumentError::TooDeep { .. })));
}

#[test]
fn test_entryStatus_nWay_withEveryLanguageMissing_shouldBeMissingInAll() {
    let exists = IndexMap::from([("en".to_string(), false), ("fr".to_string(), false)]);
    let types = IndexMap::from([
        ("en".to_string(), ValueType::Undefined),
        ("fr".to_string(), ValueType::Undefined),
    ]);

    assert_eq!(EntryStatus::n_way(&exists, &types), EntryStatus::MissingInAll);
    assert_eq!(EntryStatus::MissingInAll.to_string(), "Missing in all languages");
    assert_eq!(EntryStatus::MissingInSome(2).to_string(), "Missing in 2 languages");
}

#[test]
fn test_issues_shouldFilterWithoutChangingReport() {
    let set = common::language_set(&[
        ("en", json!({"ok": "1", "gap": "2", "kind": "3"})),
        ("fr", json!({"ok": "1", "kind": 3})),
    ]);
    let report = ComparisonEngine::standard().compare_all(&set).unwrap();
    let before = report.clone();

    let issues: Vec<String> = report.issues().map(|entry| entry.path.canonical()).collect();

    assert_eq!(issues, vec!["gap", "kind"]);
    assert_eq!(report.visible(true).len(), 2);
    assert_eq!(report.visible(false).len(), 3);
    assert_eq!(report, before);
    assert!(!report.is_converged());

    let summary = report.summary();
    assert_eq!((summary.total, summary.ok, summary.missing, summary.type_mismatch), (3, 1, 1, 1));
}

#[test]
fn test_missingItems_shouldOnlyTakeStringSourceValuesPerTarget() {
    let set = common::language_set(&[
        ("en", json!({"title": "Hello", "count": 3, "nested": {"bye": "Bye"}})),
        ("fr", json!({"title": "Bonjour"})),
        ("de", json!({})),
    ]);
    let report = ComparisonEngine::standard().compare_all(&set).unwrap();
    let targets = vec!["fr".to_string(), "de".to_string(), "xx".to_string()];

    let items = report.missing_items(&set, "en", &targets);
    let listed: Vec<(String, &str, &str)> = items
        .iter()
        .map(|item| (item.path.canonical(), item.source_text.as_str(), item.target_language.as_str()))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("title".to_string(), "Hello", "de"),
            ("nested.bye".to_string(), "Bye", "fr"),
            ("nested.bye".to_string(), "Bye", "de"),
        ]
    );
}

#[test]
fn test_compareAll_withDottedKeyAndNestedPath_shouldKeepBothEntries() {
    let set = common::language_set(&[
        ("en", json!({"a.b": "x"})),
        ("fr", json!({"a": {"b": "y"}})),
    ]);

    let report = ComparisonEngine::standard().compare_all(&set).unwrap();

    assert_eq!(canonical_paths(&report), vec!["a.b", "a.b"]);
    assert_eq!(report.entries[0].path.segments(), ["a.b".to_string()]);
    assert_eq!(report.entries[1].path.segments(), ["a".to_string(), "b".to_string()]);
    assert_eq!(report.entries[0].missing_languages(), vec!["fr"]);
    assert_eq!(report.entries[1].missing_languages(), vec!["en"]);
}
