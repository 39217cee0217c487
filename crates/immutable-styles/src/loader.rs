//! Style tree documents
//!
//! Loads style trees from JSON. A document is one node or an array of
//! nodes; each node is `{ "element", "attrs"?, "children"? }` where
//! `children` mixes declaration strings and nested nodes.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use immutable_styles_style::{AttrValue, Attrs, Item, SourceLocation, StyleError, StyleNode, ALLOWED_ATTRIBUTES};

/// Document loading result type
pub type LoadResult<T> = Result<T, LoadError>;

/// Document loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid style document {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Attribute `{attribute}` in {path} cannot be {found}")]
    AttributeType {
        path: String,
        attribute: String,
        found: &'static str,
    },

    #[error(transparent)]
    Style(#[from] StyleError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Forest(Vec<NodeDoc>),
    Tree(NodeDoc),
}

#[derive(Debug, Deserialize)]
struct NodeDoc {
    element: String,
    #[serde(default)]
    attrs: Map<String, Value>,
    #[serde(default)]
    children: Vec<ChildDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChildDoc {
    Text(String),
    Node(NodeDoc),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceDoc {
    file_name: Option<String>,
    #[serde(default)]
    line_number: u32,
    #[serde(default)]
    column_number: u32,
}

/// Read the document text at `path`
pub fn read_document(path: &str) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

/// Parse document text; `path` stamps nodes that carry no `__source`
pub fn parse_document(text: &str, path: &str) -> LoadResult<Vec<StyleNode>> {
    let document: Document = serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: path.to_string(),
        source,
    })?;

    let docs = match document {
        Document::Forest(docs) => docs,
        Document::Tree(doc) => vec![doc],
    };

    docs.into_iter().map(|doc| build_node(doc, path)).collect()
}

fn build_node(doc: NodeDoc, path: &str) -> LoadResult<StyleNode> {
    let attrs = build_attrs(doc.attrs, path)?;

    let items = doc
        .children
        .into_iter()
        .map(|child| match child {
            ChildDoc::Text(text) => Ok(Item::Text(text)),
            ChildDoc::Node(node) => build_node(node, path).map(Item::Node),
        })
        .collect::<LoadResult<Vec<_>>>()?;

    Ok(StyleNode::build(doc.element, attrs, items))
}

fn build_attrs(mut map: Map<String, Value>, path: &str) -> LoadResult<Attrs> {
    let source = match map.remove("__source") {
        Some(Value::Object(source)) => source_location(source, path)?,
        None | Some(Value::Null) => SourceLocation::new(path, 0, 0),
        Some(other) => return Err(attribute_type(path, "__source", json_type(&other))),
    };

    if let Some(key) = map.keys().find(|k| !ALLOWED_ATTRIBUTES.contains(&k.as_str())) {
        return Err(StyleError::InvalidAttribute {
            attribute: key.clone(),
            allowed: ALLOWED_ATTRIBUTES,
            location: Some(source),
        }
        .into());
    }

    let mut pairs = Vec::with_capacity(map.len() + 1);
    pairs.push(("__source".to_string(), AttrValue::Source(source)));

    for (key, value) in map {
        let value = match value {
            Value::String(text) => AttrValue::Text(text),
            Value::Number(number) => match number.as_f64() {
                Some(n) => AttrValue::Number(n),
                None => return Err(attribute_type(path, &key, "a number out of range")),
            },
            Value::Null => continue,
            other => return Err(attribute_type(path, &key, json_type(&other))),
        };
        pairs.push((key, value));
    }

    Ok(Attrs::from_pairs(pairs)?)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn source_location(source: Map<String, Value>, path: &str) -> LoadResult<SourceLocation> {
    let doc: SourceDoc = serde_json::from_value(Value::Object(source)).map_err(|source| LoadError::Json {
        path: path.to_string(),
        source,
    })?;

    Ok(SourceLocation::new(
        doc.file_name.unwrap_or_else(|| path.to_string()),
        doc.line_number,
        doc.column_number,
    ))
}

fn attribute_type(path: &str, attribute: &str, found: &'static str) -> LoadError {
    LoadError::AttributeType {
        path: path.to_string(),
        attribute: attribute.to_string(),
        found,
    }
}
