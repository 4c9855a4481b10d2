/*!
 * Flattening a document into dotted key paths.
 */

use crate::document::{DEFAULT_MAX_DEPTH, Document, Fields, KeyPath, Value, ValueType};
use crate::errors::DocumentError;

/// Shape of the node found at an extracted path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// String, number, boolean, null or array
    Leaf,
    /// A mapping without keys; a leaf of type `object`
    EmptyMapping,
    /// A mapping with at least one key; it is descended into
    Branch,
}

impl NodeKind {
    fn of(value: &Value) -> Self {
        match value.as_fields() {
            Some(fields) if fields.is_empty() => Self::EmptyMapping,
            Some(_) => Self::Branch,
            None => Self::Leaf,
        }
    }

    /// True for anything that is not descended into
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::Branch)
    }
}

/// One visited node
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPath {
    pub path: KeyPath,
    pub kind: NodeKind,
    pub value_type: ValueType,
}

/// Depth-first path extraction with a nesting guard.
///
/// Extraction is a pure function of the document, so it can be repeated any
/// number of times with identical output.
#[derive(Debug, Clone, Copy)]
pub struct PathExtractor {
    max_depth: usize,
}

impl Default for PathExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl PathExtractor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every visited path in pre-order: each mapping key is emitted before
    /// the keys nested under it. Arrays are never descended into.
    pub fn extract(&self, document: &Document) -> Result<Vec<ExtractedPath>, DocumentError> {
        let mut out = Vec::new();
        self.walk(document.root(), None, &mut out)?;
        Ok(out)
    }

    /// Only the paths that are not descended into, empty mappings included
    pub fn leaf_paths(&self, document: &Document) -> Result<Vec<KeyPath>, DocumentError> {
        Ok(self
            .extract(document)?
            .into_iter()
            .filter(|extracted| extracted.kind.is_leaf())
            .map(|extracted| extracted.path)
            .collect())
    }

    /// Fail when `path` is nested deeper than the guard allows
    pub(crate) fn check_depth(&self, path: &KeyPath) -> Result<(), DocumentError> {
        if path.depth() > self.max_depth {
            return Err(DocumentError::TooDeep {
                max_depth: self.max_depth,
                path: path.canonical(),
            });
        }
        Ok(())
    }

    fn walk(
        &self,
        fields: &Fields,
        prefix: Option<&KeyPath>,
        out: &mut Vec<ExtractedPath>,
    ) -> Result<(), DocumentError> {
        for (key, value) in fields {
            let path = KeyPath::under(prefix, key);
            self.check_depth(&path)?;

            let kind = NodeKind::of(value);
            out.push(ExtractedPath {
                path: path.clone(),
                kind,
                value_type: value.value_type(),
            });

            if let (NodeKind::Branch, Some(children)) = (kind, value.as_fields()) {
                self.walk(children, Some(&path), out)?;
            }
        }
        Ok(())
    }
}
