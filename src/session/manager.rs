/*!
 * In-memory editing session over the loaded languages.
 *
 * The session is the only place where document mutations are committed.
 * Writers build the new tree copy-on-write and swap it in under the write
 * lock; readers take a snapshot, which shares every node with the live set,
 * and always observe either the tree before or after a given write.
 */

use log::{debug, info};
use parking_lot::RwLock;

use crate::compare::{ComparisonEngine, ReconciliationReport};
use crate::document::{Document, KeyPath, LanguageSet, Value};
use crate::errors::{AppError, DocumentError, ValidationError};

/// Loaded languages plus their dirty state
#[derive(Debug, Default)]
pub struct Session {
    languages: RwLock<LanguageSet>,
}

impl Session {
    pub fn new(languages: LanguageSet) -> Self {
        Self {
            languages: RwLock::new(languages),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Cheap copy of the current set; documents are shared, not cloned
    pub fn snapshot(&self) -> LanguageSet {
        self.languages.read().clone()
    }

    /// Current document of one language
    pub fn document(&self, language: &str) -> Option<Document> {
        self.languages.read().document(language).cloned()
    }

    pub fn contains(&self, language: &str) -> bool {
        self.languages.read().contains(language)
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.read().languages().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.read().is_empty()
    }

    /// Fail with the first language that is not loaded
    pub fn check_languages<'a>(
        &self,
        languages: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ValidationError> {
        let set = self.languages.read();
        match languages.into_iter().find(|language| !set.contains(language)) {
            Some(unknown) => Err(ValidationError::UnknownLanguage(unknown.to_string())),
            None => Ok(()),
        }
    }

    /// Discard the current set and start over with `languages`
    pub fn replace(&self, languages: LanguageSet) -> LanguageSet {
        info!("Session now holds {} language(s)", languages.len());
        std::mem::replace(&mut *self.languages.write(), languages)
    }

    /// Manual edit of one value
    pub fn set_value(
        &self,
        language: &str,
        path: &KeyPath,
        value: Value,
    ) -> Result<(), ValidationError> {
        if self.languages.write().set_value(language, path, value) {
            debug!("Set {} in {}", path, language);
            Ok(())
        } else {
            Err(ValidationError::UnknownLanguage(language.to_string()))
        }
    }

    /// Commit one translated string
    pub fn apply_translation(
        &self,
        language: &str,
        path: &KeyPath,
        text: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.set_value(language, path, Value::from(text.into()))
    }

    pub fn dirty_languages(&self) -> Vec<String> {
        self.languages.read().dirty_languages()
    }

    pub fn mark_clean(&self) {
        self.languages.write().mark_clean();
    }

    /// N-way comparison over a snapshot of the current set
    pub fn compare_all(
        &self,
        engine: &ComparisonEngine,
    ) -> Result<ReconciliationReport, DocumentError> {
        engine.compare_all(&self.snapshot())
    }

    /// Pairwise comparison of two loaded languages
    pub fn compare_pair(
        &self,
        engine: &ComparisonEngine,
        left: &str,
        right: &str,
    ) -> Result<ReconciliationReport, AppError> {
        let set = self.snapshot();
        let left_document = set
            .document(left)
            .ok_or_else(|| ValidationError::UnknownLanguage(left.to_string()))?;
        let right_document = set
            .document(right)
            .ok_or_else(|| ValidationError::UnknownLanguage(right.to_string()))?;
        Ok(engine.compare_pair(left, left_document, right, right_document)?)
    }
}
