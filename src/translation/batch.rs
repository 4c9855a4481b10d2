/*!
 * Batch translation processing.
 *
 * A batch is an ordered list of (path, source text, target language) items.
 * Items are translated strictly one after another: the call for the next item
 * is only issued once the previous outcome is known. A failed item is counted
 * and skipped, it never aborts the batch.
 */

use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;

use super::adapter::{ProviderAdapter, ProviderOutcome, TranslationRequest};
use super::concurrency::CancellationFlag;
use crate::app_config::TranslationProvider;
use crate::compare::ReconciliationReport;
use crate::document::{KeyPath, LanguageSet};
use crate::errors::ValidationError;
use crate::session::Session;

/// One value to fill in one target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobItem {
    pub path: KeyPath,
    pub source_text: String,
    pub target_language: String,
}

/// Ordered work list for one orchestrator run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTranslationJob {
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub items: Vec<JobItem>,
    pub service: TranslationProvider,
    pub api_key: String,
}

impl BatchTranslationJob {
    /// Empty job; duplicate target languages are dropped, order is kept
    pub fn new(
        source_language: impl Into<String>,
        target_languages: &[String],
        service: TranslationProvider,
        api_key: impl Into<String>,
    ) -> Self {
        let mut targets: Vec<String> = Vec::with_capacity(target_languages.len());
        for language in target_languages {
            if !targets.contains(language) {
                targets.push(language.clone());
            }
        }

        Self {
            source_language: source_language.into(),
            target_languages: targets,
            items: Vec::new(),
            service,
            api_key: api_key.into(),
        }
    }

    pub fn push(&mut self, path: KeyPath, source_text: impl Into<String>, target_language: impl Into<String>) {
        self.items.push(JobItem {
            path,
            source_text: source_text.into(),
            target_language: target_language.into(),
        });
    }

    /// Every string value of `source` that the report shows missing in a target
    pub fn from_report(
        report: &ReconciliationReport,
        set: &LanguageSet,
        source_language: &str,
        target_languages: &[String],
        service: TranslationProvider,
        api_key: impl Into<String>,
    ) -> Self {
        let mut job = Self::new(source_language, target_languages, service, api_key);
        job.items = report.missing_items(set, source_language, &job.target_languages);
        job
    }

    /// One path fanned out to several target languages.
    /// Yields no items when the source value at `path` is not a string.
    pub fn for_path(
        set: &LanguageSet,
        source_language: &str,
        path: &KeyPath,
        target_languages: &[String],
        service: TranslationProvider,
        api_key: impl Into<String>,
    ) -> Self {
        let mut job = Self::new(source_language, target_languages, service, api_key);
        let source_text = set
            .document(source_language)
            .and_then(|document| document.get(path))
            .and_then(|value| value.as_str())
            .map(str::to_string);

        if let Some(text) = source_text {
            for target in job.target_languages.clone() {
                job.push(path.clone(), text.clone(), target);
            }
        }
        job
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Preconditions, checked in order before any network call
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingCredential);
        }
        if self.source_language.trim().is_empty() {
            return Err(ValidationError::MissingSourceLanguage);
        }
        if self.target_languages.iter().all(|language| language.trim().is_empty()) {
            return Err(ValidationError::MissingTargetLanguage);
        }
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        Ok(())
    }
}

/// Progress notification, delivered once per completed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    pub success_count: usize,
    pub failed_count: usize,
}

/// An item whose translation did not land
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: KeyPath,
    pub target_language: String,
    pub message: String,
}

/// Final counts of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    pub success_count: usize,
    pub failed_count: usize,
    /// The run stopped before every item was attempted
    pub cancelled: bool,
    pub failures: Vec<ItemFailure>,
}

impl TranslationOutcome {
    pub fn attempted(&self) -> usize {
        self.success_count + self.failed_count
    }
}

/// `round(100 * completed / total)`, and 100 for an empty batch
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

/// Sequential orchestrator over a provider adapter
#[derive(Debug)]
pub struct BatchTranslator {
    adapter: ProviderAdapter,
    request_delay: Duration,
    cancel: CancellationFlag,
}

impl BatchTranslator {
    pub fn new(adapter: ProviderAdapter) -> Self {
        Self {
            adapter,
            request_delay: Duration::ZERO,
            cancel: CancellationFlag::new(),
        }
    }

    /// Pause between two consecutive calls
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Share a cancellation flag with the caller
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn adapter(&self) -> &ProviderAdapter {
        &self.adapter
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancel
    }

    /// Run every item of `job` against `session`.
    ///
    /// Fails only when a precondition is unmet, before any call is issued.
    /// Successful items are committed to the session one path at a time.
    pub async fn run_batch<F>(
        &self,
        job: &BatchTranslationJob,
        session: &Session,
        mut on_progress: F,
    ) -> Result<TranslationOutcome, ValidationError>
    where
        F: FnMut(&BatchProgress),
    {
        job.validate()?;
        session.check_languages(
            std::iter::once(job.source_language.as_str())
                .chain(job.items.iter().map(|item| item.target_language.as_str())),
        )?;

        let total = job.items.len();
        info!(
            "Translating {} item(s) from {} via {}",
            total,
            job.source_language,
            job.service.display_name()
        );

        let mut outcome = TranslationOutcome::default();

        for (index, item) in job.items.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("Batch cancelled after {} of {} item(s)", index, total);
                outcome.cancelled = true;
                break;
            }

            if index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            debug!("[{}/{}] {} -> {}", index + 1, total, item.path, item.target_language);

            let request = TranslationRequest {
                text: item.source_text.clone(),
                source_language: job.source_language.clone(),
                target_language: item.target_language.clone(),
                api_key: job.api_key.clone(),
                service: job.service,
            };

            let failure = match self.adapter.translate(&request).await {
                ProviderOutcome::Translated(text) => session
                    .apply_translation(&item.target_language, &item.path, text)
                    .err()
                    .map(|e| e.to_string()),
                ProviderOutcome::Failed(message) => Some(message),
            };

            match failure {
                None => outcome.success_count += 1,
                Some(message) => {
                    warn!("Failed to translate {} into {}: {}", item.path, item.target_language, message);
                    outcome.failed_count += 1;
                    outcome.failures.push(ItemFailure {
                        path: item.path.clone(),
                        target_language: item.target_language.clone(),
                        message,
                    });
                }
            }

            let completed = outcome.attempted();
            on_progress(&BatchProgress {
                completed,
                total,
                percent: progress_percent(completed, total),
                success_count: outcome.success_count,
                failed_count: outcome.failed_count,
            });
        }

        info!(
            "Batch finished: {} succeeded, {} failed{}",
            outcome.success_count,
            outcome.failed_count,
            if outcome.cancelled { " (cancelled)" } else { "" }
        );

        Ok(outcome)
    }
}
