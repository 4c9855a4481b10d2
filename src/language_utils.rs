use anyhow::{Result, anyhow};
use isolang::Language;

/// Language id helpers
///
/// Language ids come from file and folder names (`fr`, `pt-BR`, `zh_CN`,
/// `deu`). These helpers resolve the primary subtag against ISO 639 so ids
/// can be shown with a readable name and compared loosely.
///
/// ISO 639-2/B codes that differ from their 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Primary language subtag of an id: `pt-BR` -> `pt`, `zh_CN` -> `zh`
pub fn primary_subtag(id: &str) -> String {
    id.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Resolve an id to an ISO language
pub fn resolve_language(id: &str) -> Option<Language> {
    let code = primary_subtag(id);
    match code.len() {
        2 => Language::from_639_1(&code),
        3 => {
            let part2t = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == code)
                .map_or(code.as_str(), |(_, terminologic)| *terminologic);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// True when the id's primary subtag is an ISO 639 code
pub fn is_known_language(id: &str) -> bool {
    resolve_language(id).is_some()
}

/// Get the language name from an id
pub fn get_language_name(id: &str) -> Result<String> {
    resolve_language(id)
        .map(|language| language.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language id: {}", id))
}

/// `fr (French)`, or the bare id when it is not an ISO code
pub fn display_label(id: &str) -> String {
    match get_language_name(id) {
        Ok(name) => format!("{} ({})", id, name),
        Err(_) => id.to_string(),
    }
}

/// Check whether two ids name the same language and region.
/// Case and the `-`/`_` separator are ignored; `fre` matches `fr`.
pub fn language_ids_match(id1: &str, id2: &str) -> bool {
    let normalize = |id: &str| id.trim().to_lowercase().replace('_', "-");
    if normalize(id1) == normalize(id2) {
        return true;
    }

    let region = |id: &str| {
        let normalized = normalize(id);
        normalized.split_once('-').map(|(_, rest)| rest.to_string())
    };

    match (resolve_language(id1), resolve_language(id2)) {
        (Some(left), Some(right)) => left == right && region(id1) == region(id2),
        _ => false,
    }
}
