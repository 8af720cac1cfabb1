//! Terminal glue: ANSI emission for styled lines and stdout helpers.

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::io::{self, Stdout, Write};

const ATTRIBUTES: &[(Modifier, Attribute)] = &[
    (Modifier::BOLD, Attribute::Bold),
    (Modifier::DIM, Attribute::Dim),
    (Modifier::ITALIC, Attribute::Italic),
    (Modifier::UNDERLINED, Attribute::Underlined),
    (Modifier::REVERSED, Attribute::Reverse),
];

/// Whether the terminal only handles plain text (`TERM=dumb`).
pub fn is_plain_terminal() -> bool {
    std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false)
}

/// Write each line followed by `\n`. Unstyled spans are written verbatim;
/// styled spans are wrapped in SGR sequences and reset afterwards.
pub fn write_lines<W: Write>(writer: &mut W, lines: &[Line<'_>]) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            write_span(writer, span)?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

fn write_span<W: Write>(writer: &mut W, span: &Span<'_>) -> io::Result<()> {
    if span.style == Style::default() {
        return write!(writer, "{}", span.content);
    }

    for (modifier, attribute) in ATTRIBUTES {
        if span.style.add_modifier.contains(*modifier) {
            queue!(writer, SetAttribute(*attribute))?;
        }
    }
    if let Some(fg) = span.style.fg {
        queue!(writer, SetForegroundColor(TermColor::from(fg)))?;
    }
    if let Some(bg) = span.style.bg {
        queue!(writer, SetBackgroundColor(TermColor::from(bg)))?;
    }
    queue!(
        writer,
        Print(span.content.as_ref()),
        ResetColor,
        SetAttribute(Attribute::Reset)
    )
}

/// Create a BufWriter wrapping stdout with a generous buffer.
pub fn buffered_stdout() -> io::BufWriter<Stdout> {
    io::BufWriter::with_capacity(64 * 1024, io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn plain_spans_have_no_escapes() {
        let line = Line::from(vec![Span::raw("├── "), Span::raw("file.txt")]);
        let mut out = Vec::new();
        write_lines(&mut out, &[line]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "├── file.txt\n");
    }

    #[test]
    fn styled_spans_are_wrapped_and_reset() {
        let style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::styled("src", style)]);
        let mut out = Vec::new();
        write_lines(&mut out, &[line]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\u{1b}["), "got {:?}", text);
        assert!(text.contains("src"));
        assert!(text.ends_with("\u{1b}[0m\n"), "got {:?}", text);
    }
}
