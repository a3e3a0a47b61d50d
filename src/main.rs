//! Lanote - a versioned note edited with a mnemonic command language.
//!
//! # Usage
//!
//! ```bash
//! lanote hello world .a1 !
//! lanote --caret -- groceries .o milk .o eggs
//! lanote            # read commands from stdin, one line at a time
//! ```

use std::io::{BufWriter, stdin, stdout};

use anyhow::{Context, Result};
use clap::Parser;

use lanote::app::{App, DEFAULT_CARET_MARKER};
use lanote::clipboard;
use lanote::config::{
    ClipboardMode, ConfigFlags, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use lanote::editor::DEFAULT_CAPACITY;

/// A versioned note edited with a mnemonic command language
#[derive(Parser, Debug)]
#[command(name = "lanote", version, about, long_about = None)]
struct Cli {
    /// Command arguments; read from stdin when none are given
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,

    /// Show the caret position in the output
    #[arg(long)]
    caret: bool,

    /// Number of versions kept for undo
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,

    /// Glyph drawn at the caret
    #[arg(long, value_name = "CHAR")]
    marker: Option<char>,

    /// Where copy and cut send text
    #[arg(long, value_enum)]
    clipboard: Option<ClipboardMode>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().skip(1).collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective config");

    let mut app = App::new()
        .with_capacity(effective.capacity.unwrap_or(DEFAULT_CAPACITY))
        .with_show_caret(effective.caret)
        .with_caret_marker(effective.marker.unwrap_or(DEFAULT_CARET_MARKER))
        .with_clipboard(clipboard::for_mode(
            effective.clipboard.unwrap_or(ClipboardMode::Auto),
        ));

    if cli.tokens.is_empty() {
        let out = BufWriter::new(stdout().lock());
        return app.run_repl(stdin().lock(), out).context("Session error");
    }

    app.run_args(&cli.tokens);
    println!("{}", app.render());
    Ok(())
}
