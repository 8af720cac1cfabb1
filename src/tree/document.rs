//! Decomposition of parsed YAML/JSON documents into trees.

use serde_yaml::Value;

use super::{sort_tree, NodeId, Tree, TreePayload};
use crate::error::Result;

const EMPTY_KEY_LABEL: &str = "\"\"";

/// Shape of a document entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Object,
    Array,
    Scalar,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Object => "object",
            DocumentKind::Array => "array",
            DocumentKind::Scalar => "scalar",
        }
    }
}

/// Descriptor for one document entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    /// Field key, or the label derived for an array item.
    pub name: String,
    pub value: Value,
    pub kind: DocumentKind,
    pub is_container: bool,
}

impl DocumentNode {
    fn new(name: impl Into<String>, value: &Value, kind: DocumentKind, is_container: bool) -> Self {
        Self {
            name: name.into(),
            value: value.clone(),
            kind,
            is_container,
        }
    }

    /// Textual form of a scalar value; `None` for mappings and sequences.
    pub fn value_text(&self) -> Option<String> {
        match untag(&self.value) {
            Value::Mapping(_) | Value::Sequence(_) => None,
            other => Some(scalar_text(other)),
        }
    }
}

impl TreePayload for DocumentNode {
    fn is_container(&self) -> bool {
        self.is_container
    }
}

/// Build a tree from an already-parsed document.
///
/// The root is a synthetic object node named `root`. A top-level mapping
/// contributes one child per key, a top-level sequence one child per item,
/// and a top-level scalar a single leaf. A null document yields a bare root.
/// The returned tree is not sorted; key order follows the source.
pub fn build_document_tree(document: &Value) -> Tree<DocumentNode> {
    let mut tree = Tree::new(
        "root",
        DocumentNode::new("root", document, DocumentKind::Object, true),
    );

    match untag(document) {
        Value::Null => {}
        Value::Mapping(map) => {
            for (key, value) in map {
                decompose(&mut tree, NodeId::ROOT, key_label(key), value);
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                add_array_item(&mut tree, NodeId::ROOT, index, item);
            }
        }
        scalar => {
            let label = key_label(scalar);
            tree.add_child(
                NodeId::ROOT,
                label.as_str(),
                DocumentNode::new(label.as_str(), scalar, DocumentKind::Scalar, false),
            );
        }
    }

    tree
}

/// Parse raw YAML (or JSON) bytes and build a sorted document tree.
///
/// Empty or whitespace-only input produces a root with no children. Input
/// that fails to parse is rejected before any tree is built.
pub fn parse_document_tree(bytes: &[u8]) -> Result<Tree<DocumentNode>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(build_document_tree(&Value::Null));
    }

    let document: Value = serde_yaml::from_slice(bytes)?;
    let mut tree = build_document_tree(&document);
    sort_tree(&mut tree);
    tracing::debug!(nodes = tree.size(), "built document tree");
    Ok(tree)
}

fn decompose(tree: &mut Tree<DocumentNode>, parent: NodeId, name: String, value: &Value) {
    match untag(value) {
        Value::Mapping(map) => {
            let id = tree.add_child(
                parent,
                name.as_str(),
                DocumentNode::new(name.as_str(), value, DocumentKind::Object, true),
            );
            for (key, child) in map {
                decompose(tree, id, key_label(key), child);
            }
        }
        Value::Sequence(items) => {
            let id = tree.add_child(
                parent,
                name.as_str(),
                DocumentNode::new(name.as_str(), value, DocumentKind::Array, true),
            );
            for (index, item) in items.iter().enumerate() {
                add_array_item(tree, id, index, item);
            }
        }
        scalar => {
            tree.add_child(
                parent,
                name.as_str(),
                DocumentNode::new(name.as_str(), scalar, DocumentKind::Scalar, false),
            );
        }
    }
}

/// Scalar items are labelled by their own text; nested containers and empty
/// strings get `[index]`.
fn add_array_item(tree: &mut Tree<DocumentNode>, parent: NodeId, index: usize, item: &Value) {
    match untag(item) {
        Value::Mapping(_) | Value::Sequence(_) => {
            decompose(tree, parent, format!("[{index}]"), item);
        }
        scalar => {
            let mut label = scalar_text(scalar);
            if label.is_empty() {
                label = format!("[{index}]");
            }
            tree.add_child(
                parent,
                label.as_str(),
                DocumentNode::new(label.as_str(), scalar, DocumentKind::Array, false),
            );
        }
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn scalar_text(value: &Value) -> String {
    match untag(value) {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        complex => serde_yaml::to_string(complex)
            .map(|s| s.trim().replace('\n', " "))
            .unwrap_or_default(),
    }
}

/// Empty keys are shown as `""` so every node keeps a visible name.
fn key_label(key: &Value) -> String {
    let label = scalar_text(key);
    if label.is_empty() {
        EMPTY_KEY_LABEL.to_string()
    } else {
        label
    }
}
