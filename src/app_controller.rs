use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::compare::{ComparisonEngine, EntryStatus, NWayOptions, ReconciliationReport};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::session::Session;
use crate::translation::{BatchTranslationJob, BatchTranslator, ProviderAdapter, TranslationOutcome};

// @module: Application controller for the load, compare, translate, export workflow

/// What one translate run did
#[derive(Debug, Clone, Default)]
pub struct TranslateSummary {
    pub outcome: TranslationOutcome,
    /// Issues still reported by the comparison after the batch
    pub remaining_issues: usize,
    /// Files written by the export step
    pub exported: Vec<PathBuf>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Comparison engine configured from the comparison settings
    pub fn engine(&self) -> ComparisonEngine {
        ComparisonEngine::new(self.config.comparison.max_depth).with_options(NWayOptions {
            include_intermediate: self.config.comparison.include_intermediate,
        })
    }

    /// Load every translation file of `dir` into a new session
    pub fn load(&self, dir: &Path) -> Result<Session> {
        let loaded = FileManager::load_language_set(dir, self.config.comparison.max_depth)
            .with_context(|| format!("Failed to load translations from {:?}", dir))?;

        for skipped in &loaded.skipped {
            warn!("Skipped {}: {}", skipped.path.display(), skipped.error);
        }
        info!(
            "Loaded {} language(s): {}",
            loaded.set.len(),
            loaded
                .set
                .languages()
                .map(language_utils::display_label)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Session::new(loaded.set))
    }

    /// N-way report, or a pairwise one when both sides are named
    pub fn compare(
        &self,
        session: &Session,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Result<ReconciliationReport> {
        let engine = self.engine();
        let report = match (left, right) {
            (Some(left), Some(right)) => session.compare_pair(&engine, left, right)?,
            (None, None) => session.compare_all(&engine)?,
            _ => return Err(anyhow::anyhow!("Pairwise comparison needs both --left and --right")),
        };
        Ok(report)
    }

    /// Load `dir`, compare it and print the report to stdout
    pub fn run_compare(
        &self,
        dir: &Path,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Result<ReconciliationReport> {
        let session = self.load(dir)?;
        let report = self.compare(&session, left, right)?;
        print!("{}", Self::render_report(&report, self.config.comparison.issues_only));

        let summary = report.summary();
        info!(
            "{} path(s): {} ok, {} missing, {} type mismatch",
            summary.total, summary.ok, summary.missing, summary.type_mismatch
        );
        Ok(report)
    }

    /// Plain-text table of a report, one line per visible entry
    pub fn render_report(report: &ReconciliationReport, issues_only: bool) -> String {
        let entries = report.visible(issues_only);

        let path_width = entries
            .iter()
            .map(|entry| entry.path.canonical().chars().count())
            .chain(std::iter::once(4))
            .max()
            .unwrap_or(4);
        let column_widths: Vec<usize> = report
            .languages
            .iter()
            .map(|language| language.chars().count().max("undefined".len()))
            .collect();

        let mut out = format!("{:<width$}", "PATH", width = path_width);
        for (language, width) in report.languages.iter().zip(&column_widths) {
            out.push_str(&format!("  {:<width$}", language, width = *width));
        }
        out.push_str("  STATUS\n");

        for entry in entries {
            out.push_str(&format!("{:<width$}", entry.path.canonical(), width = path_width));
            for (language, width) in report.languages.iter().zip(&column_widths) {
                let cell = if entry.exists_in(language) {
                    entry.type_in(language).as_str()
                } else {
                    "-"
                };
                out.push_str(&format!("  {:<width$}", cell, width = *width));
            }
            match entry.status {
                EntryStatus::MissingInSome(_) => out.push_str(&format!(
                    "  {} ({})\n",
                    entry.status,
                    entry.missing_languages().join(", ")
                )),
                status => out.push_str(&format!("  {}\n", status)),
            }
        }
        out
    }

    /// Targets from config, or every loaded language except the source
    fn resolve_targets(&self, session: &Session) -> Vec<String> {
        if !self.config.target_languages.is_empty() {
            return self.config.target_languages.clone();
        }
        session
            .languages()
            .into_iter()
            .filter(|language| *language != self.config.source_language)
            .collect()
    }

    /// Translate with the backends built from configuration
    pub async fn run_translate(&self, dir: &Path, output_dir: Option<&Path>) -> Result<TranslateSummary> {
        let adapter = ProviderAdapter::from_config(&self.config.translation);
        self.run_translate_with(adapter, dir, output_dir).await
    }

    /// Fill missing string values, re-compare, then export changed documents
    pub async fn run_translate_with(
        &self,
        adapter: ProviderAdapter,
        dir: &Path,
        output_dir: Option<&Path>,
    ) -> Result<TranslateSummary> {
        let start_time = Instant::now();
        let session = self.load(dir)?;
        let report = session.compare_all(&self.engine())?;

        let targets = self.resolve_targets(&session);
        session
            .check_languages(
                std::iter::once(self.config.source_language.as_str())
                    .chain(targets.iter().map(String::as_str)),
            )
            .context("Cannot translate")?;
        let job = BatchTranslationJob::from_report(
            &report,
            &session.snapshot(),
            &self.config.source_language,
            &targets,
            self.config.translation.provider,
            self.config.translation.get_api_key(),
        );

        if job.is_empty() {
            info!("No missing translations found");
            return Ok(TranslateSummary {
                remaining_issues: report.issues().count(),
                ..Default::default()
            });
        }

        info!(
            "{}: {} missing value(s) from {} into {}",
            self.config.translation.provider.display_name(),
            job.len(),
            self.config.source_language,
            job.target_languages.join(", ")
        );

        let translator = BatchTranslator::new(adapter)
            .with_request_delay(Duration::from_millis(self.config.translation.common.request_delay_ms));

        let progress_bar = ProgressBar::new(job.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} values ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let outcome = translator
            .run_batch(&job, &session, |progress| {
                progress_bar.set_position(progress.completed as u64);
                progress_bar.set_message(format!(
                    "{} ok, {} failed",
                    progress.success_count, progress.failed_count
                ));
            })
            .await
            .context("Translation batch did not start")?;
        progress_bar.finish_and_clear();

        for failure in &outcome.failures {
            warn!("{} [{}]: {}", failure.path, failure.target_language, failure.message);
        }

        let after = session.compare_all(&self.engine())?;
        let remaining_issues = after.issues().count();

        let out_dir = output_dir.unwrap_or(dir);
        let exported = FileManager::export_language_set(&session.snapshot(), out_dir, true)?;
        session.mark_clean();

        info!(
            "Translated {} of {} value(s) in {}, {} issue(s) left, {} file(s) written",
            outcome.success_count,
            job.len(),
            Self::format_duration(start_time.elapsed()),
            remaining_issues,
            exported.len()
        );

        Ok(TranslateSummary {
            outcome,
            remaining_issues,
            exported,
        })
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
