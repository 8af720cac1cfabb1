//! Node styling: display text, branch glyphs, and continuation fragments.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tree::{DocumentKind, DocumentNode, FileNode, Node};

/// Branch glyph for the last child of a node.
pub const LAST_BRANCH: &str = "\u{2514}\u{2500}\u{2500} "; // └──
/// Branch glyph for every other child.
pub const MID_BRANCH: &str = "\u{251c}\u{2500}\u{2500} "; // ├──
/// Continuation under a last sibling.
pub const BLANK_CONTINUATION: &str = "    ";
/// Continuation under a non-last sibling.
pub const BAR_CONTINUATION: &str = "\u{2502}   "; // │

/// Read-only style settings for the tree engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Whether to emit color styling.
    pub use_color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { use_color: true }
    }
}

const DIR_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const DATA_STYLE: Style = Style::new().fg(Color::Green);
const TEXT_STYLE: Style = Style::new().fg(Color::Cyan);
const SHELL_STYLE: Style = Style::new().fg(Color::Yellow);
const SOURCE_STYLE: Style = Style::new().fg(Color::Magenta);

const OBJECT_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const ARRAY_STYLE: Style = Style::new().fg(Color::Cyan);
const SCALAR_STYLE: Style = Style::new().fg(Color::Green);

const EXTENSION_STYLES: &[(&[&str], Style)] = &[
    (&["json", "yaml", "yml", "toml"], DATA_STYLE),
    (&["md", "txt", "log"], TEXT_STYLE),
    (&["sh", "zsh", "bash"], SHELL_STYLE),
    (&["rs", "go"], SOURCE_STYLE),
];

/// Maps nodes of one payload type to display text and tree-drawing fragments.
pub trait NodeStyler<T> {
    /// Styled display text for `node`.
    fn style(&self, node: &Node<T>) -> Span<'static>;

    /// Connector placed before the node's name.
    fn branch_glyph(&self, _node: &Node<T>, is_last: bool) -> &'static str {
        if is_last {
            LAST_BRANCH
        } else {
            MID_BRANCH
        }
    }

    /// Fragment prepended to every descendant line of `node`.
    fn continuation(&self, _node: &Node<T>, is_last: bool, is_root: bool) -> &'static str {
        if is_root {
            ""
        } else if is_last {
            BLANK_CONTINUATION
        } else {
            BAR_CONTINUATION
        }
    }
}

/// Styler for filesystem trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStyler {
    config: RenderConfig,
}

impl FileStyler {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl NodeStyler<FileNode> for FileStyler {
    fn style(&self, node: &Node<FileNode>) -> Span<'static> {
        let name = sanitize_terminal_text(&node.name);
        if !self.config.use_color {
            return Span::raw(name);
        }
        if node.payload.is_dir {
            return Span::styled(name, DIR_STYLE);
        }
        match node.payload.extension().and_then(|ext| extension_style(&ext)) {
            Some(style) => Span::styled(name, style),
            None => Span::raw(name),
        }
    }
}

fn extension_style(ext: &str) -> Option<Style> {
    EXTENSION_STYLES
        .iter()
        .find(|(exts, _)| exts.contains(&ext))
        .map(|(_, style)| *style)
}

/// Styler for document trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStyler {
    config: RenderConfig,
    show_values: bool,
}

impl DocumentStyler {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            show_values: false,
        }
    }

    /// Append `: value` to scalar fields of mappings.
    pub fn with_values(mut self) -> Self {
        self.show_values = true;
        self
    }
}

impl NodeStyler<DocumentNode> for DocumentStyler {
    fn style(&self, node: &Node<DocumentNode>) -> Span<'static> {
        let mut text = node.name.clone();
        if self.show_values && node.payload.kind == DocumentKind::Scalar {
            if let Some(value) = node.payload.value_text() {
                text = format!("{}: {}", text, value);
            }
        }
        let text = sanitize_terminal_text(&text);
        if !self.config.use_color {
            return Span::raw(text);
        }
        let style = match node.payload.kind {
            DocumentKind::Object => OBJECT_STYLE,
            DocumentKind::Array => ARRAY_STYLE,
            DocumentKind::Scalar => SCALAR_STYLE,
        };
        Span::styled(text, style)
    }
}

/// Escape control characters so names cannot inject terminal sequences.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}
