#![allow(dead_code)]

use ratatui::text::Line;
use std::fs;
use tempfile::TempDir;
use termshow::render::line_to_plain_text;
use termshow::RenderConfig;

/// RenderConfig with color disabled.
pub fn no_color() -> RenderConfig {
    RenderConfig { use_color: false }
}

/// RenderConfig with color enabled.
pub fn color() -> RenderConfig {
    RenderConfig { use_color: true }
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Plain text of every rendered line.
pub fn plain_lines(lines: &[Line<'_>]) -> Vec<String> {
    lines.iter().map(line_to_plain_text).collect()
}

/// Strip CSI escape sequences from rendered output.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
