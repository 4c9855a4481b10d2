/*!
 * Pairwise and N-way reconciliation of language documents.
 *
 * The two modes intentionally differ in which paths they report:
 * - pairwise walks both trees in lock-step and only emits a path when the
 *   two sides are not both mappings;
 * - N-way builds the union of every visited path over all languages and
 *   resolves each path independently against each document.
 */

use indexmap::IndexMap;
use log::debug;

use super::extractor::{NodeKind, PathExtractor};
use super::report::{CompareMode, EntryStatus, ReconciliationEntry, ReconciliationReport};
use crate::document::{DEFAULT_MAX_DEPTH, Document, Fields, KeyPath, LanguageSet, ValueType};
use crate::errors::DocumentError;

/// Options for N-way comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NWayOptions {
    /// Also report paths that are a non-empty mapping in some language
    pub include_intermediate: bool,
}

/// What the union walk saw at one path across all languages
#[derive(Debug, Clone, Copy, Default)]
struct PathShape {
    /// Some language holds a non-mapping value here
    scalar: bool,
    /// Some language holds a mapping with children here
    branch: bool,
}

impl PathShape {
    fn record(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Leaf => self.scalar = true,
            NodeKind::Branch => self.branch = true,
            NodeKind::EmptyMapping => {}
        }
    }

    /// An empty mapping only counts as a leaf where no language has children
    fn is_leaf_somewhere(&self) -> bool {
        self.scalar || !self.branch
    }
}

/// Read-only comparison over documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine {
    extractor: PathExtractor,
    options: NWayOptions,
}

impl ComparisonEngine {
    pub fn new(max_depth: usize) -> Self {
        Self {
            extractor: PathExtractor::new(max_depth),
            options: NWayOptions::default(),
        }
    }

    /// Engine with the default depth guard
    pub fn standard() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }

    pub fn with_options(mut self, options: NWayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.extractor.max_depth()
    }

    /// Compare exactly two documents.
    ///
    /// Labels name the two sides in the existence and type tables; when both
    /// labels are equal the sides are labelled `file1` and `file2`.
    pub fn compare_pair(
        &self,
        left_label: &str,
        left: &Document,
        right_label: &str,
        right: &Document,
    ) -> Result<ReconciliationReport, DocumentError> {
        let (left_label, right_label) = if left_label == right_label {
            ("file1", "file2")
        } else {
            (left_label, right_label)
        };

        let mut entries = Vec::new();
        self.walk_pair(
            left.root(),
            right.root(),
            None,
            (left_label, right_label),
            &mut entries,
        )?;

        debug!(
            "Pairwise comparison of {} and {} produced {} entries",
            left_label,
            right_label,
            entries.len()
        );

        Ok(ReconciliationReport {
            mode: CompareMode::Pairwise,
            languages: vec![left_label.to_string(), right_label.to_string()],
            entries,
        })
    }

    fn walk_pair(
        &self,
        left: &Fields,
        right: &Fields,
        prefix: Option<&KeyPath>,
        labels: (&str, &str),
        out: &mut Vec<ReconciliationEntry>,
    ) -> Result<(), DocumentError> {
        let keys = left
            .keys()
            .chain(right.keys().filter(|key| !left.contains_key(*key)));

        for key in keys {
            let path = KeyPath::under(prefix, key);
            self.extractor.check_depth(&path)?;

            let left_value = left.get(key);
            let right_value = right.get(key);

            let both_mappings = (
                left_value.and_then(|value| value.as_fields()),
                right_value.and_then(|value| value.as_fields()),
            );
            if let (Some(left_fields), Some(right_fields)) = both_mappings {
                // Two empty mappings have nothing to recurse into but must not vanish
                if !(left_fields.is_empty() && right_fields.is_empty()) {
                    self.walk_pair(left_fields, right_fields, Some(&path), labels, out)?;
                    continue;
                }
            }

            let left_type = ValueType::of(left_value);
            let right_type = ValueType::of(right_value);
            let status = EntryStatus::pairwise(
                left_value.is_some(),
                right_value.is_some(),
                left_type,
                right_type,
            );

            out.push(ReconciliationEntry {
                path,
                exists_by_language: IndexMap::from([
                    (labels.0.to_string(), left_value.is_some()),
                    (labels.1.to_string(), right_value.is_some()),
                ]),
                type_by_language: IndexMap::from([
                    (labels.0.to_string(), left_type),
                    (labels.1.to_string(), right_type),
                ]),
                status,
            });
        }
        Ok(())
    }

    /// Compare every language of the set against the union of all paths
    /// Paths from different languages are merged by segment sequence, so
    /// `{"a.b": 1}` and `{"a": {"b": 1}}` give two entries.
    pub fn compare_all(&self, set: &LanguageSet) -> Result<ReconciliationReport, DocumentError> {
        let mut union: IndexMap<KeyPath, PathShape> = IndexMap::new();
        for (_, entry) in set.iter() {
            for extracted in self.extractor.extract(&entry.document)? {
                union.entry(extracted.path).or_default().record(extracted.kind);
            }
        }

        let languages: Vec<String> = set.languages().map(str::to_string).collect();
        let mut entries = Vec::with_capacity(union.len());

        for (path, shape) in union {
            if !self.options.include_intermediate && !shape.is_leaf_somewhere() {
                continue;
            }

            let mut exists_by_language = IndexMap::with_capacity(languages.len());
            let mut type_by_language = IndexMap::with_capacity(languages.len());
            for (language, entry) in set.iter() {
                let value = entry.document.get(&path);
                exists_by_language.insert(language.to_string(), value.is_some());
                type_by_language.insert(language.to_string(), ValueType::of(value));
            }

            let status = EntryStatus::n_way(&exists_by_language, &type_by_language);
            entries.push(ReconciliationEntry {
                path,
                exists_by_language,
                type_by_language,
                status,
            });
        }

        debug!(
            "N-way comparison of {} languages produced {} entries",
            languages.len(),
            entries.len()
        );

        Ok(ReconciliationReport {
            mode: CompareMode::NWay,
            languages,
            entries,
        })
    }
}
