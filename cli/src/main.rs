//! askline CLI: ask one question in the terminal and print the answer.
//!
//! # Usage
//!
//! ```text
//! askline "What is your name?" --default "Johnny Appleseed"
//! askline "Month?" --suggest January,February,March
//! askline "Where to save it?" --suggest-paths --json
//! askline --list-keys
//! ```
//!
//! The prompt is drawn on stderr, so `name=$(askline "Name?")` captures only
//! the answer.

mod args;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use askline_core::config::{self, PromptSettings};
use askline_core::{sources, ConfigError, PromptConfig};
use askline_tui::{KeyMap, PromptError};
use tracing_subscriber::EnvFilter;

use crate::args::{parse_args, Invocation, SuggestSource};


fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let arg_refs: Vec<&str> = argv.iter().map(|s| s.as_str()).collect();

    let inv = match parse_args(&arg_refs) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("askline: {}", e);
            process::exit(1);
        }
    };

    init_logging();

    let settings = match load_settings(&inv) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("askline: {}", e);
            process::exit(1);
        }
    };

    if inv.list_keys {
        match KeyMap::from_settings(&settings) {
            Ok(keymap) => println!("{}", keymap.help_text()),
            Err(e) => {
                eprintln!("askline: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let json = inv.json;
    let config = match build_config(inv, settings) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("askline: {}", e);
            process::exit(1);
        }
    };

    match askline_tui::ask(config) {
        Ok(answer) => println!("{}", format_answer(&answer, json)),
        Err(PromptError::Interrupted) => process::exit(130),
        Err(e) => {
            eprintln!("askline: {}", e);
            process::exit(1);
        }
    }
}


/// Send tracing output to the file named by `ASKLINE_LOG`, if set. The
/// terminal belongs to the prompt, so nothing is logged there.
fn init_logging() {
    let Ok(path) = std::env::var("ASKLINE_LOG") else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("askline: cannot open log file {}: {}", path, e);
            return;
        }
    };
    let filter = EnvFilter::try_from_env("ASKLINE_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    tracing::debug!("logging to {}", path);
}


fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(dir) = std::env::var("ASKLINE_CONFIG_DIR") {
        return PathBuf::from(dir).join("config.yaml");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("askline").join("config.yaml")
}


/// The settings file with command-line overrides applied on top.
fn load_settings(inv: &Invocation) -> Result<PromptSettings, ConfigError> {
    let path = resolve_config_path(inv.config.as_deref());
    let mut settings = config::load(&path)?;
    if let Some(n) = inv.page_size {
        settings.page_size = n;
    }
    if inv.no_color {
        settings.color = false;
    }
    if let Some(theme) = &inv.theme {
        settings.theme = theme.clone();
    }
    settings.validate()?;
    Ok(settings)
}


fn build_config(inv: Invocation, settings: PromptSettings) -> Result<PromptConfig, ConfigError> {
    let mut cfg = PromptConfig::new(inv.message).with_settings(settings);
    if let Some(default) = inv.default {
        cfg = cfg.with_default(default);
    }
    if let Some(help) = inv.help {
        cfg = cfg.with_help(help);
    }
    cfg = match inv.suggest {
        Some(SuggestSource::List(values)) => cfg.with_suggest(sources::prefix_filter(values)),
        Some(SuggestSource::File(path)) => {
            cfg.with_suggest(sources::prefix_filter(sources::read_lines(&path)?))
        }
        Some(SuggestSource::Paths) => {
            let root = std::env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?;
            cfg.with_suggest(sources::path_completer(root))
        }
        None => cfg,
    };
    Ok(cfg)
}


fn format_answer(answer: &str, json: bool) -> String {
    if json {
        serde_json::json!({ "answer": answer }).to_string()
    } else {
        answer.to_string()
    }
}
