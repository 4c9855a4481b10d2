/*!
 * Reconciliation report types and status derivation.
 */

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::document::{KeyPath, LanguageSet, ValueType};
use crate::translation::JobItem;

/// How a report was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Two documents walked in lock-step
    Pairwise,
    /// Any number of documents resolved against a shared path union
    NWay,
}

/// Reconciliation status of a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "missing", rename_all = "snake_case")]
pub enum EntryStatus {
    Ok,
    /// Pairwise: absent from the left document
    MissingInA,
    /// Pairwise: absent from the right document
    MissingInB,
    /// N-way: absent from every language
    MissingInAll,
    /// N-way: absent from this many languages
    MissingInSome(usize),
    TypeMismatch,
}

impl EntryStatus {
    /// Pairwise status from each side's existence and type
    pub fn pairwise(
        exists_a: bool,
        exists_b: bool,
        type_a: ValueType,
        type_b: ValueType,
    ) -> Self {
        if !exists_a {
            Self::MissingInA
        } else if !exists_b {
            Self::MissingInB
        } else if type_a != type_b {
            Self::TypeMismatch
        } else {
            Self::Ok
        }
    }

    /// N-way status from the existence and type tables of one path
    pub fn n_way(
        exists_by_language: &IndexMap<String, bool>,
        type_by_language: &IndexMap<String, ValueType>,
    ) -> Self {
        let total = exists_by_language.len();
        let missing = exists_by_language.values().filter(|exists| !**exists).count();
        if missing == total {
            return Self::MissingInAll;
        }
        if missing > 0 {
            return Self::MissingInSome(missing);
        }

        let observed: HashSet<ValueType> = type_by_language
            .values()
            .copied()
            .filter(|value_type| *value_type != ValueType::Undefined)
            .collect();
        if observed.len() > 1 {
            Self::TypeMismatch
        } else {
            Self::Ok
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::MissingInA | Self::MissingInB | Self::MissingInAll | Self::MissingInSome(_)
        )
    }

    /// The status seen from the other side of a pairwise comparison
    pub fn mirrored(&self) -> Self {
        match self {
            Self::MissingInA => Self::MissingInB,
            Self::MissingInB => Self::MissingInA,
            other => *other,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "Ok"),
            Self::MissingInA => write!(f, "Missing in A"),
            Self::MissingInB => write!(f, "Missing in B"),
            Self::MissingInAll => write!(f, "Missing in all languages"),
            Self::MissingInSome(1) => write!(f, "Missing in 1 language"),
            Self::MissingInSome(count) => write!(f, "Missing in {} languages", count),
            Self::TypeMismatch => write!(f, "Type mismatch"),
        }
    }
}

/// Existence and type of one path across languages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationEntry {
    pub path: KeyPath,
    pub exists_by_language: IndexMap<String, bool>,
    pub type_by_language: IndexMap<String, ValueType>,
    pub status: EntryStatus,
}

impl ReconciliationEntry {
    pub fn exists_in(&self, language: &str) -> bool {
        self.exists_by_language.get(language).copied().unwrap_or(false)
    }

    pub fn type_in(&self, language: &str) -> ValueType {
        self.type_by_language
            .get(language)
            .copied()
            .unwrap_or(ValueType::Undefined)
    }

    /// Languages in which the path is absent
    pub fn missing_languages(&self) -> Vec<&str> {
        self.exists_by_language
            .iter()
            .filter(|(_, exists)| !**exists)
            .map(|(language, _)| language.as_str())
            .collect()
    }
}

/// Counts per status family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub ok: usize,
    pub missing: usize,
    pub type_mismatch: usize,
}

/// Output of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    pub mode: CompareMode,
    /// Column labels, in the order the languages were compared
    pub languages: Vec<String>,
    /// Entries in path-discovery order
    pub entries: Vec<ReconciliationEntry>,
}

impl ReconciliationReport {
    /// Entries whose status is not `Ok`. The report itself is unchanged.
    pub fn issues(&self) -> impl Iterator<Item = &ReconciliationEntry> {
        self.entries.iter().filter(|entry| !entry.status.is_ok())
    }

    /// Entries to display: everything, or only the issues
    pub fn visible(&self, issues_only: bool) -> Vec<&ReconciliationEntry> {
        self.entries
            .iter()
            .filter(|entry| !issues_only || !entry.status.is_ok())
            .collect()
    }

    pub fn find(&self, path: &KeyPath) -> Option<&ReconciliationEntry> {
        self.entries.iter().find(|entry| &entry.path == path)
    }

    /// True when no entry reports an issue
    pub fn is_converged(&self) -> bool {
        self.issues().next().is_none()
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total: self.entries.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            if entry.status.is_ok() {
                summary.ok += 1;
            } else if entry.status.is_missing() {
                summary.missing += 1;
            } else {
                summary.type_mismatch += 1;
            }
        }
        summary
    }

    /// Job items for every string value of `source` that is missing in a
    /// target language, entries first, then targets in the given order
    pub fn missing_items(
        &self,
        set: &LanguageSet,
        source: &str,
        targets: &[String],
    ) -> Vec<JobItem> {
        let Some(source_document) = set.document(source) else {
            return Vec::new();
        };

        // Languages that are not columns of this report are never targeted
        let targets: Vec<&String> = targets
            .iter()
            .filter(|target| target.as_str() != source && self.languages.contains(*target))
            .collect();

        let mut items = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.exists_in(source)) {
            let Some(text) = source_document.get(&entry.path).and_then(|value| value.as_str()) else {
                continue;
            };
            for target in &targets {
                if !entry.exists_in(target) {
                    items.push(JobItem {
                        path: entry.path.clone(),
                        source_text: text.to_string(),
                        target_language: (*target).clone(),
                    });
                }
            }
        }
        items
    }
}
