#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use termshow::hierarchy::{show_document_hierarchy, show_hierarchy};
use termshow::output::{OutputConfig, OutputHandler, TerminalOutput};
use termshow::terminal::buffered_stdout;
use termshow::RenderOutcome;
use tracing_subscriber::EnvFilter;

const SAMPLE_YAML: &[u8] = b"
database:
  host: localhost
  port: 5432
  credentials:
    username: admin
    password: secret
  tables:
    - users
    - posts
    - comments
server:
  host: 0.0.0.0
  port: 8080
  debug: true
  features:
    - authentication
    - logging
    - monitoring
";

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = run_app() {
        eprintln!("termshow: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let base = OutputConfig::from_env();

    let mut handler = TerminalOutput::stdout(base.clone());
    showcase(&mut handler, "Default");

    let level_only = OutputConfig {
        use_emojis: false,
        colorize_level_only: true,
        ..base.clone()
    };
    showcase(&mut TerminalOutput::stdout(level_only), "Level Colours Only");

    let colours_only = OutputConfig {
        use_emojis: false,
        ..base.clone()
    };
    showcase(&mut TerminalOutput::stdout(colours_only), "Colours Only");
    showcase(&mut TerminalOutput::stdout(OutputConfig::plain()), "Without Colours");

    handler.print_header("File/Directory Tree Visualization");
    handler.print_info("Displaying tree structure of current directory:");
    let mut out = buffered_stdout();
    let drawn = show_hierarchy(Path::new("."), base.render_config(), &mut out)
        .context("failed to display tree")?;
    out.flush()?;
    if drawn {
        handler.print_success("Tree displayed successfully!");
    } else {
        handler.print_info("No hierarchy to display (single file)");
    }

    handler.print_info("Tree with colours disabled:");
    show_hierarchy(Path::new("."), OutputConfig::plain().render_config(), &mut out)
        .context("failed to display tree")?;
    out.flush()?;

    handler.print_header("YAML Tree Visualization");
    match show_document_hierarchy(SAMPLE_YAML, base.render_config(), &mut out)
        .context("failed to display YAML tree")?
    {
        RenderOutcome::Rendered { lines } => {
            out.flush()?;
            handler.print_success(&format!("YAML tree displayed successfully ({} lines)", lines));
        }
        RenderOutcome::SuppressedSingleFile => handler.print_info("No hierarchy to display"),
    }

    handler.print_success("Tree system demonstration completed!");
    Ok(())
}

fn showcase(handler: &mut dyn OutputHandler, title: &str) {
    handler.print_header(&format!("Demo ({})", title));
    handler.print_info("This is an info message");
    handler.print_success("Operation completed successfully!");
    handler.print_warning("This is a warning message");
    handler.print_error("This is an error message");
    handler.print_stage("Processing stage 1");
    handler.print_already_available("Feature is already available");
    handler.print_progress(3, 10, "Processing items");

    if handler.confirm("Do you want to continue?") {
        handler.print_success("User confirmed!");
    } else {
        handler.print_info("User declined");
    }
}
