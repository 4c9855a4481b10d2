/*!
 * Tests for language id utilities
 */

use langtree::language_utils::{
    display_label, get_language_name, is_known_language, language_ids_match, primary_subtag,
};

#[test]
fn test_primarySubtag_withRegionSuffix_shouldStripIt() {
    assert_eq!(primary_subtag("pt-BR"), "pt");
    assert_eq!(primary_subtag("zh_CN"), "zh");
    assert_eq!(primary_subtag(" FR "), "fr");
}

#[test]
fn test_getLanguageName_withVariousCodes_shouldResolveNames() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert_eq!(get_language_name("ger").unwrap(), "German");
    assert_eq!(get_language_name("pt-BR").unwrap(), "Portuguese");
    assert!(get_language_name("translate").is_err());
}

#[test]
fn test_displayLabel_shouldFallBackToBareId() {
    assert_eq!(display_label("pl"), "pl (Polish)");
    assert_eq!(display_label("custom"), "custom");
    assert!(is_known_language("en"));
    assert!(!is_known_language("xx"));
}

#[test]
fn test_languageIdsMatch_shouldIgnoreCaseSeparatorAndCodeLength() {
    assert!(language_ids_match("pt-BR", "pt_br"));
    assert!(language_ids_match("fre", "fr"));
    assert!(language_ids_match("de", "deu"));
    assert!(!language_ids_match("pt-BR", "pt-PT"));
    assert!(!language_ids_match("en", "fr"));
    assert!(!language_ids_match("xx", "yy"));
}
