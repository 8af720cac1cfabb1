//! Tree rendering into ratatui `Line`s and onto any writer.

use ratatui::text::{Line, Span};
use std::io::Write;

use crate::error::{Error, Result};
use crate::style::NodeStyler;
use crate::terminal::write_lines;
use crate::tree::{NodeId, Tree, TreePayload};

/// What a call to [`render_tree`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The tree was drawn with this many lines.
    Rendered { lines: usize },
    /// The root held a single non-container child; nothing was drawn.
    SuppressedSingleFile,
}

/// True when the root has exactly one child and that child is a leaf-type
/// payload, i.e. there is no hierarchy worth drawing.
pub fn is_single_file<T: TreePayload>(tree: &Tree<T>) -> bool {
    match tree.root().children() {
        [only] => !tree.node(*only).payload.is_container(),
        _ => false,
    }
}

/// Render every non-root node as `<prefix><glyph><name>` in pre-order.
///
/// Sibling order is taken as-is; sort the tree first.
pub fn tree_to_lines<T, S>(tree: &Tree<T>, styler: &S) -> Vec<Line<'static>>
where
    S: NodeStyler<T> + ?Sized,
{
    let mut lines = Vec::with_capacity(tree.size().saturating_sub(1));
    push_lines(tree, styler, NodeId::ROOT, "", true, true, &mut lines);
    lines
}

fn push_lines<T, S>(
    tree: &Tree<T>,
    styler: &S,
    id: NodeId,
    prefix: &str,
    is_last: bool,
    is_root: bool,
    lines: &mut Vec<Line<'static>>,
) where
    S: NodeStyler<T> + ?Sized,
{
    let node = tree.node(id);
    if !is_root {
        let lead = format!("{}{}", prefix, styler.branch_glyph(node, is_last));
        lines.push(Line::from(vec![Span::raw(lead), styler.style(node)]));
    }

    let children = node.children();
    if children.is_empty() {
        return;
    }
    let child_prefix = format!("{}{}", prefix, styler.continuation(node, is_last, is_root));
    for (i, &child) in children.iter().enumerate() {
        let child_is_last = i + 1 == children.len();
        push_lines(tree, styler, child, &child_prefix, child_is_last, false, lines);
    }
}

/// Render `tree` to `writer`, or report suppression for single-file trees.
pub fn render_tree<T, S, W>(tree: &Tree<T>, styler: &S, writer: &mut W) -> Result<RenderOutcome>
where
    T: TreePayload,
    S: NodeStyler<T> + ?Sized,
    W: Write,
{
    if is_single_file(tree) {
        tracing::debug!("single non-container child, tree render suppressed");
        return Ok(RenderOutcome::SuppressedSingleFile);
    }

    let lines = tree_to_lines(tree, styler);
    write_lines(writer, &lines).map_err(Error::Render)?;
    Ok(RenderOutcome::Rendered { lines: lines.len() })
}

/// Extract plain text from a `Line` (useful for testing).
pub fn line_to_plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
