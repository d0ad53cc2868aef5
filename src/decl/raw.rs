// Raw declaration trees as emitted by `sourcekitten doc`
//
// The tool prints a JSON array with one single-entry object per source
// file, mapping the file path to a SourceKit response. Keys carry a
// `key.` namespace that is stripped before interpretation.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Namespace prefix SourceKit puts on every key
pub const KEY_PREFIX: &str = "key.";

const CONTEXT: &str = "sourcekitten output";

/// Strip the SourceKit namespace from a key
pub fn clean_key(key: &str) -> &str {
    key.strip_prefix(KEY_PREFIX).unwrap_or(key)
}

/// One declaration from the introspection tool, before normalization
///
/// Only the keys we interpret are kept; offsets, attributes and the
/// rest of the SourceKit response are dropped while decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    pub accessibility: Option<String>,
    pub name: Option<String>,
    pub doc_name: Option<String>,
    pub doc_comment: Option<String>,
    pub parsed_declaration: Option<String>,
    pub typename: Option<String>,
    pub kind: Option<String>,
    pub substructure: Option<Vec<RawNode>>,
}

impl RawNode {
    /// Decode a node from a JSON value, which must be an object
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(Error::decode(
                CONTEXT,
                format!("expected a declaration object, found {}", type_name(other)),
            )),
        }
    }

    /// Decode a node from an already-unwrapped JSON object
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut node = RawNode::default();

        for (key, value) in map {
            let key = clean_key(key);
            match key {
                "accessibility" => node.accessibility = Some(text(key, value)?),
                "name" => node.name = Some(text(key, value)?),
                "doc.name" => node.doc_name = Some(text(key, value)?),
                "doc.comment" => node.doc_comment = Some(text(key, value)?),
                "parsed_declaration" => node.parsed_declaration = Some(text(key, value)?),
                "typename" => node.typename = Some(text(key, value)?),
                "kind" => node.kind = Some(text(key, value)?),
                "substructure" => node.substructure = Some(node_list(value)?),
                _ => {}
            }
        }

        Ok(node)
    }
}

/// Declarations reported for one source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// File path exactly as reported by the tool
    pub path: String,
    /// Top-level declarations, absent when the tool reported none
    pub substructure: Option<Vec<RawNode>>,
}

/// Decode the complete stdout of `sourcekitten doc`
pub fn decode_module_docs(text: &str) -> Result<Vec<SourceFile>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(entries) = &value else {
        return Err(Error::decode(
            CONTEXT,
            format!("expected a top-level array, found {}", type_name(&value)),
        ));
    };

    let mut files = Vec::new();
    for entry in entries {
        let Value::Object(entry) = entry else {
            return Err(Error::decode(
                CONTEXT,
                format!("expected a file entry object, found {}", type_name(entry)),
            ));
        };

        for (path, info) in entry {
            let Value::Object(info) = info else {
                return Err(Error::decode(
                    CONTEXT,
                    format!("expected an object describing {}", path),
                ));
            };

            let substructure = info
                .iter()
                .find(|(key, _)| clean_key(key) == "substructure")
                .map(|(_, value)| node_list(value))
                .transpose()?;

            files.push(SourceFile {
                path: path.clone(),
                substructure,
            });
        }
    }

    Ok(files)
}

fn text(key: &str, value: &Value) -> Result<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        Error::decode(
            CONTEXT,
            format!("expected a string for `{}`, found {}", key, type_name(value)),
        )
    })
}

fn node_list(value: &Value) -> Result<Vec<RawNode>> {
    match value {
        Value::Array(items) => items.iter().map(RawNode::from_value).collect(),
        other => Err(Error::decode(
            CONTEXT,
            format!("expected a substructure array, found {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
