use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::{Document, LanguageSet};
use crate::errors::DocumentError;

// @module: File and directory utilities, language set ingestion and export

/// A file that could not be loaded as a translation document
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: DocumentError,
}

/// Result of loading a folder of translation files
#[derive(Debug, Clone, Default)]
pub struct LoadedLanguages {
    pub set: LanguageSet,
    /// Files that were skipped because they are malformed
    pub skipped: Vec<SkippedFile>,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, sorted by path.
    /// The extension is matched ignoring ASCII case (`a.JSON` counts).
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref())
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @returns: Language id of a file found under `root`
    // `pl/translate.json` -> `pl`, `fr.json` -> `fr`
    pub fn language_id<P1: AsRef<Path>, P2: AsRef<Path>>(root: P1, file: P2) -> Option<String> {
        let file = file.as_ref();
        let relative = file.strip_prefix(root.as_ref()).unwrap_or(file);

        let in_subdir = relative
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty());

        let id = if in_subdir {
            relative.parent()?.file_name()?
        } else {
            relative.file_stem()?
        };
        Some(id.to_string_lossy().to_string())
    }

    /// Load every `*.json` file under `dir` into a language set.
    ///
    /// Files that cannot be read or parsed are skipped and listed in the
    /// result. Only a missing or unwalkable `dir` is an error.
    pub fn load_language_set<P: AsRef<Path>>(dir: P, max_depth: usize) -> Result<LoadedLanguages> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(anyhow::anyhow!("Directory does not exist: {:?}", dir));
        }

        let mut loaded = LoadedLanguages::default();

        for file in Self::find_files(dir, "json")? {
            let Some(language) = Self::language_id(dir, &file) else {
                warn!("Cannot derive a language id for {:?}, skipping", file);
                continue;
            };

            let parsed = fs::read_to_string(&file)
                .map_err(|error| DocumentError::Unreadable(error.to_string()))
                .and_then(|text| Document::parse(&text, max_depth));
            let document = match parsed {
                Ok(document) => document,
                Err(error) => {
                    warn!("Skipping {:?}: {}", file, error);
                    loaded.skipped.push(SkippedFile { path: file, error });
                    continue;
                }
            };

            let origin = file
                .strip_prefix(dir)
                .unwrap_or(&file)
                .to_string_lossy()
                .to_string();

            if let Some(previous) = loaded.set.insert(language.as_str(), origin.as_str(), document) {
                warn!(
                    "Language '{}' loaded twice: {} replaces {}",
                    language, origin, previous.origin
                );
            }
            debug!("Loaded language '{}' from {}", language, origin);
        }

        Ok(loaded)
    }

    /// Write documents back under `out_dir` at their origin locators.
    /// Returns the written paths, in set order.
    pub fn export_language_set<P: AsRef<Path>>(
        set: &LanguageSet,
        out_dir: P,
        dirty_only: bool,
    ) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        let mut written = Vec::new();

        for (language, entry) in set.iter() {
            if dirty_only && !entry.dirty {
                continue;
            }

            let target = out_dir.join(&entry.origin);
            let content = entry
                .document
                .to_pretty_string()
                .with_context(|| format!("Failed to serialize language '{}'", language))?;
            Self::write_to_file(&target, &format!("{}\n", content))?;

            debug!("Exported language '{}' to {:?}", language, target);
            written.push(target);
        }

        Ok(written)
    }
}
