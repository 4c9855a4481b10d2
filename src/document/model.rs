/*!
 * Persistent translation tree.
 *
 * Documents are immutable from a reader's point of view. Every nested mapping
 * and every string sits behind an `Arc`, so cloning a document is cheap and a
 * write only copies the mappings along the written path.
 */

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::path::KeyPath;
use crate::errors::DocumentError;

/// Default nesting limit for documents and traversals
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Keys of one mapping level, in document order
pub type Fields = IndexMap<String, Value>;

/// A node of a translation tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(Arc<str>),
    /// Sequences are opaque leaves and are never descended into
    Array(Arc<Vec<serde_json::Value>>),
    Object(Arc<Fields>),
}

/// Runtime type tag reported by the comparison engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Undefined,
}

impl ValueType {
    /// Tag for an optional value, `Undefined` when absent
    pub fn of(value: Option<&Value>) -> Self {
        value.map_or(Self::Undefined, Value::value_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Type tag of this value. `null` reports as `object`.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Number(_) => ValueType::Number,
            Self::Bool(_) => ValueType::Boolean,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) | Self::Null => ValueType::Object,
        }
    }

    /// The mapping behind this value, if it is one
    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Self::Object(fields) => Some(&**fields),
            _ => None,
        }
    }

    /// True for a mapping that has at least one key
    pub fn is_branch(&self) -> bool {
        self.as_fields().is_some_and(|fields| !fields.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(&**text),
            _ => None,
        }
    }

    fn from_json(
        json: serde_json::Value,
        trail: &mut Vec<String>,
        max_depth: usize,
    ) -> Result<Self, DocumentError> {
        Ok(match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::String(text.into()),
            serde_json::Value::Array(items) => Self::Array(Arc::new(items)),
            serde_json::Value::Object(map) => {
                Self::Object(Arc::new(fields_from_json(map, trail, max_depth)?))
            }
        })
    }

    /// Plain JSON form of this value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(flag) => serde_json::Value::Bool(*flag),
            Self::Number(number) => serde_json::Value::Number(number.clone()),
            Self::String(text) => serde_json::Value::String(text.to_string()),
            Self::Array(items) => serde_json::Value::Array(items.as_ref().clone()),
            Self::Object(fields) => serde_json::Value::Object(fields_to_json(fields)),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.into())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text.into())
    }
}

fn fields_from_json(
    map: serde_json::Map<String, serde_json::Value>,
    trail: &mut Vec<String>,
    max_depth: usize,
) -> Result<Fields, DocumentError> {
    let mut fields = Fields::with_capacity(map.len());
    for (key, json) in map {
        trail.push(key);
        if trail.len() > max_depth {
            return Err(DocumentError::TooDeep {
                max_depth,
                path: trail.join("."),
            });
        }
        let value = Value::from_json(json, trail, max_depth)?;
        let key = trail.pop().unwrap_or_default();
        fields.insert(key, value);
    }
    Ok(fields)
}

fn fields_to_json(fields: &Fields) -> serde_json::Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect()
}

/// One language's translation tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Arc<Fields>,
}

impl Document {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Fields) -> Self {
        Self {
            root: Arc::new(fields),
        }
    }

    /// Convert parsed JSON, enforcing that the root is a mapping and that
    /// no key sits deeper than `max_depth`
    pub fn from_json(json: serde_json::Value, max_depth: usize) -> Result<Self, DocumentError> {
        match json {
            serde_json::Value::Object(map) => {
                let fields = fields_from_json(map, &mut Vec::new(), max_depth)?;
                Ok(Self::from_fields(fields))
            }
            serde_json::Value::Null => Err(DocumentError::NotAnObject("null")),
            serde_json::Value::Bool(_) => Err(DocumentError::NotAnObject("boolean")),
            serde_json::Value::Number(_) => Err(DocumentError::NotAnObject("number")),
            serde_json::Value::String(_) => Err(DocumentError::NotAnObject("string")),
            serde_json::Value::Array(_) => Err(DocumentError::NotAnObject("array")),
        }
    }

    /// Parse JSON text into a document
    pub fn parse(text: &str, max_depth: usize) -> Result<Self, DocumentError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DocumentError::InvalidJson(e.to_string()))?;
        Self::from_json(json, max_depth)
    }

    pub fn root(&self) -> &Fields {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// True when both handles point at the same root allocation
    pub fn same_root(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Resolve a path segment by segment. Absent when any intermediate
    /// segment is missing or is not a mapping.
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut fields: &Fields = &self.root;
        for segment in parents {
            fields = fields.get(segment)?.as_fields()?;
        }
        fields.get(last)
    }

    /// New document with `value` stored at `path`.
    ///
    /// Only the mappings along the path are copied; every other node is
    /// shared with `self`. Missing or non-mapping ancestors are replaced by
    /// fresh mappings. The receiver is left untouched.
    pub fn with_value(&self, path: &KeyPath, value: Value) -> Document {
        Self {
            root: Arc::new(write_path(&self.root, path.segments(), value)),
        }
    }

    /// Plain JSON form of the whole document
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(fields_to_json(&self.root))
    }

    /// Pretty-printed JSON with two-space indentation, key order preserved
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_json())
    }
}

fn write_path(fields: &Fields, segments: &[String], value: Value) -> Fields {
    let mut copy = fields.clone();
    match segments.split_first() {
        None => {}
        Some((head, [])) => {
            copy.insert(head.clone(), value);
        }
        Some((head, rest)) => {
            let child = match fields.get(head) {
                Some(Value::Object(child)) => write_path(child, rest, value),
                _ => write_path(&Fields::new(), rest, value),
            };
            copy.insert(head.clone(), Value::Object(Arc::new(child)));
        }
    }
    copy
}
