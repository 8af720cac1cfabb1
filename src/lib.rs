#![forbid(unsafe_code)]
//! Leveled terminal messages plus styled filesystem and document trees.

pub mod error;
pub mod hierarchy;
pub mod output;
pub mod render;
pub mod style;
pub mod terminal;
pub mod tree;

pub use error::{Error, Result};
pub use render::{render_tree, RenderOutcome};
pub use style::{DocumentStyler, FileStyler, NodeStyler, RenderConfig};
pub use tree::{
    build_document_tree, build_filesystem_tree, parse_document_tree, sort_tree, Node, NodeId,
    Tree, TreePayload,
};
