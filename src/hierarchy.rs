//! One-call conveniences: build, sort, and render a hierarchy.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::render::{render_tree, RenderOutcome};
use crate::style::{DocumentStyler, FileStyler, RenderConfig};
use crate::tree::{build_filesystem_tree, parse_document_tree, WalkOptions};

/// Draw the directory tree under `path`.
///
/// Returns `false` when there was no hierarchy to show (a single regular
/// file at the top level), so the caller can show that file directly.
pub fn show_hierarchy<W: Write>(
    path: &Path,
    config: RenderConfig,
    writer: &mut W,
) -> Result<bool> {
    let tree = build_filesystem_tree(path, &WalkOptions::default())?;
    let outcome = render_tree(&tree, &FileStyler::new(config), writer)?;
    Ok(outcome != RenderOutcome::SuppressedSingleFile)
}

/// Parse YAML/JSON `bytes` and draw the resulting document tree.
pub fn show_document_hierarchy<W: Write>(
    bytes: &[u8],
    config: RenderConfig,
    writer: &mut W,
) -> Result<RenderOutcome> {
    let tree = parse_document_tree(bytes)?;
    render_tree(&tree, &DocumentStyler::new(config), writer)
}

/// Read a YAML/JSON file and draw its document tree.
pub fn show_document_hierarchy_from_file<W: Write>(
    path: &Path,
    config: RenderConfig,
    writer: &mut W,
) -> Result<RenderOutcome> {
    let bytes = std::fs::read(path).map_err(|e| Error::from_io(path, e))?;
    show_document_hierarchy(&bytes, config, writer)
}
