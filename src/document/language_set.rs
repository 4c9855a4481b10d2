/*!
 * The set of loaded languages and their documents.
 */

use indexmap::IndexMap;

use super::model::{Document, Value};
use super::path::KeyPath;

/// One loaded language
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageEntry {
    /// Where the document came from, relative to the loaded folder
    pub origin: String,
    /// Current tree
    pub document: Document,
    /// Changed since it was loaded or last exported
    pub dirty: bool,
}

impl LanguageEntry {
    pub fn new(origin: impl Into<String>, document: Document) -> Self {
        Self {
            origin: origin.into(),
            document,
            dirty: false,
        }
    }
}

/// Language identifier → (origin, document)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageSet {
    entries: IndexMap<String, LanguageEntry>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a language, returning the previous entry
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        origin: impl Into<String>,
        document: Document,
    ) -> Option<LanguageEntry> {
        self.entries
            .insert(language.into(), LanguageEntry::new(origin, document))
    }

    /// Builder-style insert, handy for tests and samples
    pub fn with(
        mut self,
        language: impl Into<String>,
        origin: impl Into<String>,
        document: Document,
    ) -> Self {
        self.insert(language, origin, document);
        self
    }

    pub fn get(&self, language: &str) -> Option<&LanguageEntry> {
        self.entries.get(language)
    }

    pub fn document(&self, language: &str) -> Option<&Document> {
        self.entries.get(language).map(|entry| &entry.document)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.entries.contains_key(language)
    }

    /// Language identifiers in load order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageEntry)> {
        self.entries
            .iter()
            .map(|(language, entry)| (language.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` at `path` in one language's document.
    ///
    /// The new tree is built copy-on-write from the current one and then
    /// swapped in with a single assignment. Returns false when the language
    /// is not loaded.
    pub fn set_value(&mut self, language: &str, path: &KeyPath, value: Value) -> bool {
        match self.entries.get_mut(language) {
            Some(entry) => {
                let updated = entry.document.with_value(path, value);
                entry.document = updated;
                entry.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Languages with unsaved changes
    pub fn dirty_languages(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.dirty)
            .map(|(language, _)| language.clone())
            .collect()
    }

    /// Clear the dirty flag of every language
    pub fn mark_clean(&mut self) {
        for entry in self.entries.values_mut() {
            entry.dirty = false;
        }
    }
}
