//! Command-line argument parsing.
//!
//! Turns `askline <message> [flags]` into an [`Invocation`]. Errors are plain
//! messages that `main` prints after an `askline:` prefix.

use std::path::PathBuf;


/// Where the prompt's suggestions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestSource {
    /// A fixed comma-separated list, filtered by prefix.
    List(Vec<String>),
    /// One candidate per line of a file, filtered by prefix.
    File(PathBuf),
    /// Filesystem paths relative to the working directory.
    Paths,
}


/// Everything the command line asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub message: String,
    pub default: Option<String>,
    pub help: Option<String>,
    pub suggest: Option<SuggestSource>,
    pub page_size: Option<usize>,
    pub no_color: bool,
    pub theme: Option<String>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub list_keys: bool,
}


pub const USAGE: &str = "Usage: askline <message> [--default <text>] [--help <text>] \
[--suggest <a,b,c> | --suggest-file <path> | --suggest-paths] [--page-size <n>] \
[--no-color] [--theme <name>] [--config <path>] [--json] [--list-keys]";


/// Parse CLI arguments into an [`Invocation`].
///
/// Arguments are expected WITHOUT the program name. The message is the one
/// positional argument; it may be omitted only with `--list-keys`.
pub fn parse_args(args: &[&str]) -> Result<Invocation, String> {
    let mut inv = Invocation::default();
    let mut message = None;

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--default" => {
                i += 1;
                inv.default = Some(take_arg(args, i, "--default")?);
            }
            "--help" => {
                i += 1;
                inv.help = Some(take_arg(args, i, "--help")?);
            }
            "--suggest" => {
                i += 1;
                let list = take_arg(args, i, "--suggest")?;
                let values = askline_core::sources::split_list(&list);
                set_source(&mut inv, SuggestSource::List(values))?;
            }
            "--suggest-file" => {
                i += 1;
                let path = take_arg(args, i, "--suggest-file")?;
                set_source(&mut inv, SuggestSource::File(PathBuf::from(path)))?;
            }
            "--suggest-paths" => set_source(&mut inv, SuggestSource::Paths)?,
            "--page-size" => {
                i += 1;
                let raw = take_arg(args, i, "--page-size")?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--page-size expects a number, got '{}'", raw))?;
                inv.page_size = Some(n);
            }
            "--no-color" => inv.no_color = true,
            "--theme" => {
                i += 1;
                inv.theme = Some(take_arg(args, i, "--theme")?);
            }
            "--config" => {
                i += 1;
                inv.config = Some(PathBuf::from(take_arg(args, i, "--config")?));
            }
            "--json" => inv.json = true,
            "--list-keys" => inv.list_keys = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown flag: '{}'", flag)),
            text => {
                if message.is_some() {
                    return Err(format!("Unexpected argument: '{}'", text));
                }
                message = Some(text.to_string());
            }
        }
        i += 1;
    }

    match message {
        Some(m) => inv.message = m,
        None if inv.list_keys => {}
        None => return Err(format!("No question given. {}", USAGE)),
    }
    Ok(inv)
}


fn set_source(inv: &mut Invocation, source: SuggestSource) -> Result<(), String> {
    if inv.suggest.is_some() {
        return Err("Only one of --suggest, --suggest-file, --suggest-paths may be given".into());
    }
    inv.suggest = Some(source);
    Ok(())
}


fn take_arg(args: &[&str], index: usize, flag: &str) -> Result<String, String> {
    if index >= args.len() {
        return Err(format!("{} requires a value", flag));
    }
    Ok(args[index].into())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
