/*!
 * Document model for translation trees.
 *
 * This module provides:
 * - `Value`/`ValueType`: closed variant type for tree nodes and their type tags
 * - `Document`: persistent, copy-on-write translation tree
 * - `KeyPath`: dotted address of a node
 * - `LanguageSet`: all loaded languages of a session
 */

pub mod language_set;
pub mod model;
pub mod path;

pub use language_set::{LanguageEntry, LanguageSet};
pub use model::{DEFAULT_MAX_DEPTH, Document, Fields, Value, ValueType};
pub use path::KeyPath;
