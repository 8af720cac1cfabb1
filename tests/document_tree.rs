mod common;

use common::{no_color, plain_lines};
use std::fs;
use tempfile::TempDir;
use termshow::hierarchy::{show_document_hierarchy, show_document_hierarchy_from_file};
use termshow::render::tree_to_lines;
use termshow::tree::{parse_document_tree, DocumentKind};
use termshow::{DocumentStyler, Error, NodeId, RenderOutcome};

#[test]
fn test_mapping_with_array_decomposes() {
    let tree = parse_document_tree(br#"{"a": 1, "b": ["x", "y"]}"#).unwrap();

    let a = tree.node(tree.find(&["a"]).unwrap());
    assert_eq!(a.payload.kind, DocumentKind::Scalar);
    assert!(!a.payload.is_container);
    assert_eq!(a.payload.value_text().as_deref(), Some("1"));

    let b_id = tree.find(&["b"]).unwrap();
    let b = tree.node(b_id);
    assert_eq!(b.payload.kind, DocumentKind::Array);
    assert!(b.payload.is_container);
    assert_eq!(tree.children(b_id).len(), 2);
    assert!(tree.find(&["b", "x"]).is_some());
    assert!(tree.find(&["b", "y"]).is_some());

    // containers first
    let names: Vec<&str> = tree
        .children(NodeId::ROOT)
        .iter()
        .map(|&c| tree.node(c).name.as_str())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_root_is_object_container() {
    let tree = parse_document_tree(b"k: v\n").unwrap();
    assert_eq!(tree.root().name, "root");
    assert_eq!(tree.root().payload.kind, DocumentKind::Object);
    assert!(tree.root().payload.is_container);
}

#[test]
fn test_nested_mappings_are_objects() {
    let tree = parse_document_tree(b"db:\n  credentials:\n    user: admin\n").unwrap();
    let creds = tree.node(tree.find(&["db", "credentials"]).unwrap());
    assert_eq!(creds.payload.kind, DocumentKind::Object);
    let user = tree.node(tree.find(&["db", "credentials", "user"]).unwrap());
    assert_eq!(user.payload.kind, DocumentKind::Scalar);
    assert_eq!(user.payload.value_text().as_deref(), Some("admin"));
}

#[test]
fn test_malformed_input_is_parse_error() {
    let err = parse_document_tree(b"invalid: [unclosed array").unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    assert!(!err.is_filesystem());
}

#[test]
fn test_empty_and_blank_input_give_bare_root() {
    for input in [&b""[..], b"   \n\t\n"] {
        let tree = parse_document_tree(input).unwrap();
        assert_eq!(tree.size(), 1);
    }
}

#[test]
fn test_explicit_null_document_gives_bare_root() {
    let tree = parse_document_tree(b"~\n").unwrap();
    assert_eq!(tree.size(), 1);
}

#[test]
fn test_render_plain_document() {
    let tree = parse_document_tree(br#"{"a": 1, "b": ["x", "y"]}"#).unwrap();
    let lines = tree_to_lines(&tree, &DocumentStyler::new(no_color()));
    assert_eq!(
        plain_lines(&lines),
        vec!["├── b", "│   ├── x", "│   └── y", "└── a"]
    );
}

#[test]
fn test_empty_keys_and_items_keep_visible_names() {
    let tree = parse_document_tree(b"\"\": 1\nlist: [\"\", x]\n").unwrap();
    tree.traverse(|id, node| {
        if id != NodeId::ROOT {
            assert!(!node.name.is_empty(), "empty name at {:?}", tree.path(id));
        }
        true
    });
    assert!(tree.find(&["\"\""]).is_some());
    assert!(tree.find(&["list", "[0]"]).is_some());

    let lines = tree_to_lines(&tree, &DocumentStyler::new(no_color()));
    assert_eq!(
        plain_lines(&lines),
        vec!["├── list", "│   ├── [0]", "│   └── x", "└── \"\""]
    );
}

#[test]
fn test_render_with_values() {
    let tree = parse_document_tree(b"server:\n  port: 8080\n  debug: true\n").unwrap();
    let styler = DocumentStyler::new(no_color()).with_values();
    let lines = tree_to_lines(&tree, &styler);
    assert_eq!(
        plain_lines(&lines),
        vec!["└── server", "    ├── debug: true", "    └── port: 8080"]
    );
}

#[test]
fn test_single_scalar_field_is_suppressed() {
    let mut out = Vec::new();
    let outcome = show_document_hierarchy(b"only: 1\n", no_color(), &mut out).unwrap();
    assert_eq!(outcome, RenderOutcome::SuppressedSingleFile);
    assert!(out.is_empty());
}

#[test]
fn test_empty_document_renders_nothing() {
    let mut out = Vec::new();
    let outcome = show_document_hierarchy(b"", no_color(), &mut out).unwrap();
    assert_eq!(outcome, RenderOutcome::Rendered { lines: 0 });
    assert!(out.is_empty());
}

#[test]
fn test_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "app:\n  name: demo\n  tags: [a, b]\n").unwrap();

    let mut out = Vec::new();
    let outcome = show_document_hierarchy_from_file(&path, no_color(), &mut out).unwrap();
    assert_eq!(outcome, RenderOutcome::Rendered { lines: 5 });
    assert_eq!(
        String::from_utf8(out).unwrap(),
        concat!(
            "└── app\n",
            "    ├── tags\n",
            "    │   ├── a\n",
            "    │   └── b\n",
            "    └── name\n",
        )
    );
}

#[test]
fn test_from_missing_file() {
    let tmp = TempDir::new().unwrap();
    let mut out = Vec::new();
    let missing = tmp.path().join("absent.yaml");
    let err = show_document_hierarchy_from_file(&missing, no_color(), &mut out).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {:?}", err);
}
