/*!
 * Key paths addressing nodes inside a document.
 */

use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::DocumentError;

/// Ordered, non-empty sequence of key segments.
///
/// Two paths are equal when their segment sequences are equal. The canonical
/// string form joins segments with `.`; a segment that itself contains a dot
/// therefore shares its canonical form with a different path, but the two
/// paths still compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Create a path from its segments
    pub fn new<I, S>(segments: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(DocumentError::EmptyPath);
        }
        Ok(Self { segments })
    }

    /// Parse a dotted path such as `common.buttons.save`
    pub fn parse(dotted: &str) -> Result<Self, DocumentError> {
        if dotted.is_empty() {
            return Err(DocumentError::EmptyPath);
        }
        Self::new(dotted.split('.'))
    }

    /// Path consisting of a single top-level key
    pub fn single(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Path to a child key of this path
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Path under `prefix`, or a top-level path when there is no prefix
    pub(crate) fn under(prefix: Option<&KeyPath>, segment: &str) -> Self {
        match prefix {
            Some(parent) => parent.child(segment),
            None => Self::single(segment),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments, which is also the nesting depth of the addressed node
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The final segment
    pub fn key(&self) -> &str {
        // Non-empty by construction
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Dot-joined form
    pub fn canonical(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}
