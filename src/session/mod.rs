/*!
 * Session holding the loaded language set.
 *
 * This module provides:
 * - Cheap snapshots for comparison runs
 * - Copy-on-write value edits and translation commits
 * - Per-language dirty tracking for export
 */

pub mod manager;

pub use manager::Session;
