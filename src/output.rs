//! Leveled messages, progress lines, and yes/no confirmation.
//!
//! Formatting is split from printing: the `format_*` functions are pure and
//! return the exact text (escape sequences included) that a
//! [`TerminalOutput`] writes.

use crossterm::style::{style, Attribute, Color, Stylize};
use once_cell::sync::Lazy;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;

use crate::style::RenderConfig;
use crate::terminal::is_plain_terminal;

/// Severity of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLevel {
    Info,
    Warning,
    Error,
    Success,
    Stage,
    Header,
}

impl OutputLevel {
    pub fn color(self) -> Option<Color> {
        match self {
            OutputLevel::Header => Some(Color::Cyan),
            OutputLevel::Stage => Some(Color::Blue),
            OutputLevel::Success => Some(Color::Green),
            OutputLevel::Error => Some(Color::Red),
            OutputLevel::Warning => Some(Color::Yellow),
            OutputLevel::Info => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            OutputLevel::Stage => "🔧 ",
            OutputLevel::Success => "✅ ",
            OutputLevel::Error => "❌ ",
            OutputLevel::Warning => "⚠️  ",
            OutputLevel::Header | OutputLevel::Info => "",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            OutputLevel::Stage => "[STAGE] ",
            OutputLevel::Success => "[SUCCESS] ",
            OutputLevel::Error => "[ERROR] ",
            OutputLevel::Warning => "[WARNING] ",
            OutputLevel::Header | OutputLevel::Info => "",
        }
    }
}

/// Formatting switches for message output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_colors: bool,
    pub use_emojis: bool,
    pub use_formatting: bool,
    pub disable_output: bool,
    pub verbose: bool,
    /// Color only the level indicator, not the whole message.
    pub colorize_level_only: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            use_emojis: true,
            use_formatting: true,
            disable_output: false,
            verbose: false,
            colorize_level_only: false,
        }
    }
}

impl OutputConfig {
    /// No colors, emojis, or formatting.
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            use_emojis: false,
            use_formatting: false,
            ..Self::default()
        }
    }

    /// Defaults, with colors turned off under `NO_COLOR` or a plain terminal.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if std::env::var_os("NO_COLOR").is_some() || is_plain_terminal() {
            config.use_colors = false;
        }
        config
    }

    /// The tree engine's view of these settings.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            use_color: self.use_colors && !self.disable_output,
        }
    }

    fn colored(&self) -> bool {
        self.use_colors && self.use_formatting
    }
}

fn paint(text: &str, color: Option<Color>) -> String {
    let styled = style(text).attribute(Attribute::Bold);
    match color {
        Some(color) => styled.with(color).to_string(),
        None => styled.to_string(),
    }
}

/// Format `message` at `level`. Returns an empty string when output is disabled.
pub fn format_message(
    config: &OutputConfig,
    level: OutputLevel,
    message: &str,
    plain_terminal: bool,
) -> String {
    if config.disable_output {
        return String::new();
    }
    if plain_terminal {
        return format!("{}\n", message);
    }

    if level == OutputLevel::Header {
        let banner = format!("=== {} ===", message);
        return if config.use_colors {
            format!("\n{}\n", paint(&banner, level.color()))
        } else {
            format!("\n{}\n", banner)
        };
    }

    let (prefix, color) = if config.use_colors && config.use_emojis && config.use_formatting {
        (level.emoji(), level.color())
    } else {
        (level.prefix(), level.color().filter(|_| config.use_colors))
    };

    if config.colored() {
        if config.colorize_level_only && color.is_some() && !prefix.is_empty() {
            return format!("{}{}\n", paint(prefix, color), message);
        }
        return format!("{}\n", paint(&format!("{}{}", prefix, message), color));
    }

    format!("{}{}\n", prefix, message)
}

/// `\r[current/total] P% - message`. A zero total reports 0%.
pub fn format_progress(
    config: &OutputConfig,
    current: usize,
    total: usize,
    message: &str,
) -> String {
    if config.disable_output {
        return String::new();
    }
    let percentage = if total == 0 {
        0.0
    } else {
        current as f64 / total as f64 * 100.0
    };
    let head = format!("[{}/{}] {:.0}% - ", current, total, percentage);

    if config.colored() {
        if config.colorize_level_only {
            return format!("\r{}{}\n", paint(&head, Some(Color::Cyan)), message);
        }
        return format!("\r{}\n", paint(&format!("{}{}", head, message), Some(Color::Cyan)));
    }
    format!("\r{}{}\n", head, message)
}

/// Message for something that is already present.
pub fn format_already_available(config: &OutputConfig, message: &str) -> String {
    if config.disable_output {
        return String::new();
    }
    if !config.use_colors {
        return format!("[AVAILABLE] {}\n", message);
    }

    let prefix = if config.use_emojis && config.use_formatting {
        "💙 "
    } else {
        "[AVAILABLE] "
    };
    if config.colorize_level_only {
        format!("{}{}\n", paint(prefix, Some(Color::Blue)), message)
    } else {
        format!("{}\n", paint(&format!("{}{}", prefix, message), Some(Color::Blue)))
    }
}

/// The `? message (y/N): ` prompt, without a trailing newline.
pub fn format_prompt(config: &OutputConfig, message: &str) -> String {
    if config.colored() {
        if config.colorize_level_only {
            return format!("{} {} (y/N): ", paint("?", Some(Color::Yellow)), message);
        }
        return paint(&format!("? {} (y/N): ", message), Some(Color::Yellow));
    }
    format!("? {} (y/N): ", message)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
}

/// Terminal output operations.
pub trait OutputHandler {
    fn print_header(&mut self, message: &str);
    fn print_stage(&mut self, message: &str);
    fn print_success(&mut self, message: &str);
    fn print_error(&mut self, message: &str);
    fn print_warning(&mut self, message: &str);
    fn print_info(&mut self, message: &str);
    fn print_already_available(&mut self, message: &str);
    fn print_progress(&mut self, current: usize, total: usize, message: &str);
    /// Ask a yes/no question; anything but an explicit yes is a no.
    fn confirm(&mut self, message: &str) -> bool;
    fn is_supported(&self) -> bool;
    /// Silence all further output.
    fn disable(&mut self);
    fn config(&self) -> &OutputConfig;
}

/// [`OutputHandler`] over any writer and line reader.
pub struct TerminalOutput<W, R> {
    config: OutputConfig,
    writer: W,
    reader: R,
    plain_terminal: bool,
}

impl TerminalOutput<Stdout, BufReader<Stdin>> {
    /// Handler writing to stdout and reading answers from stdin.
    pub fn stdout(config: OutputConfig) -> Self {
        // One-byte buffer: unread answers stay in stdin's shared buffer for
        // other handlers.
        Self::new(config, io::stdout(), BufReader::with_capacity(1, io::stdin()))
    }
}

impl<W: Write, R: BufRead> TerminalOutput<W, R> {
    pub fn new(config: OutputConfig, writer: W, reader: R) -> Self {
        Self {
            config,
            writer,
            reader,
            plain_terminal: is_plain_terminal(),
        }
    }

    /// Override terminal detection.
    pub fn with_plain_terminal(mut self, plain: bool) -> Self {
        self.plain_terminal = plain;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Message output is best-effort; a closed stdout is not worth aborting over.
        let _ = self.writer.write_all(text.as_bytes());
        let _ = self.writer.flush();
    }

    fn print_level(&mut self, level: OutputLevel, message: &str) {
        let text = format_message(&self.config, level, message, self.plain_terminal);
        self.emit(&text);
    }
}

impl<W: Write, R: BufRead> OutputHandler for TerminalOutput<W, R> {
    fn print_header(&mut self, message: &str) {
        self.print_level(OutputLevel::Header, message);
    }

    fn print_stage(&mut self, message: &str) {
        self.print_level(OutputLevel::Stage, message);
    }

    fn print_success(&mut self, message: &str) {
        self.print_level(OutputLevel::Success, message);
    }

    fn print_error(&mut self, message: &str) {
        self.print_level(OutputLevel::Error, message);
    }

    fn print_warning(&mut self, message: &str) {
        self.print_level(OutputLevel::Warning, message);
    }

    fn print_info(&mut self, message: &str) {
        self.print_level(OutputLevel::Info, message);
    }

    fn print_already_available(&mut self, message: &str) {
        let text = format_already_available(&self.config, message);
        self.emit(&text);
    }

    fn print_progress(&mut self, current: usize, total: usize, message: &str) {
        let text = format_progress(&self.config, current, total, message);
        self.emit(&text);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.config.disable_output {
            return false;
        }
        let prompt = format_prompt(&self.config, message);
        self.emit(&prompt);

        let mut answer = String::new();
        match self.reader.read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read confirmation");
                false
            }
        }
    }

    fn is_supported(&self) -> bool {
        !self.plain_terminal
    }

    fn disable(&mut self) {
        self.config.disable_output = true;
    }

    fn config(&self) -> &OutputConfig {
        &self.config
    }
}

type SharedHandler = Box<dyn OutputHandler + Send>;

static GLOBAL_OUTPUT: Lazy<Mutex<SharedHandler>> =
    Lazy::new(|| Mutex::new(Box::new(TerminalOutput::stdout(OutputConfig::from_env()))));

/// Replace the process-wide handler.
pub fn set_global_output(handler: SharedHandler) {
    let mut guard = GLOBAL_OUTPUT.lock().unwrap_or_else(|e| e.into_inner());
    *guard = handler;
}

/// Run `f` with the process-wide handler.
pub fn with_global_output<F, T>(f: F) -> T
where
    F: FnOnce(&mut dyn OutputHandler) -> T,
{
    let mut guard = GLOBAL_OUTPUT.lock().unwrap_or_else(|e| e.into_inner());
    f(&mut **guard)
}
