// celledit CLI - drive the date cell editor headlessly
// Replays keystrokes against an edit session and reports the outcome.

mod exit_codes;
mod replay;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use celledit_config::{ConfigError, EditorsConfig};
use celledit_engine::date::{format_date, MAX_VALUE_OPTION, MIN_VALUE_OPTION};
use celledit_engine::{DateCellEditor, EditParams, EditorError, EditorOptions, GridCellEditor, Key};

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "celledit")]
#[command(about = "In-place cell editing, headless")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a date edit session against a scripted key sequence
    #[command(after_help = "\
Examples:
  celledit replay --value 3/4/2024 --keys '1 / 2 / 2 0 2 5 Enter'
  celledit replay --trigger 1 --keys '2 / 2 5 / 2 0 2 3 Tab' --json
  celledit replay --value 6/1/2020 --keys 'Delete Enter' --max 12/31/2020
  celledit replay --config editors.json --column due --keys '1 / 1 / 2 0 2 4 Enter'")]
    Replay {
        /// Cell value the edit starts from (omit for an empty cell)
        #[arg(long, allow_hyphen_values = true)]
        value: Option<String>,

        /// Printable key that started the edit (omit for a grid-started edit)
        #[arg(long)]
        trigger: Option<char>,

        /// Whitespace-separated keys, e.g. "1 / ArrowLeft Backspace Enter"
        #[arg(long, default_value = "")]
        keys: String,

        #[command(flatten)]
        bounds: BoundArgs,

        /// Editor config file (.json or .toml)
        #[arg(long, requires = "column")]
        config: Option<PathBuf>,

        /// Column whose editor options to use (default config when --config is omitted)
        #[arg(long)]
        column: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how the date editor treats each key
    #[command(after_help = "\
Examples:
  celledit classify 5 / a ArrowLeft Tab Backspace
  celledit classify Home F2 --json")]
    Classify {
        /// Key identifiers (single characters or names like ArrowLeft, Tab, Space)
        #[arg(required = true)]
        keys: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert text to a date the way a committed edit would
    Parse {
        /// Month/day/year text
        text: String,

        #[command(flatten)]
        bounds: BoundArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct BoundArgs {
    /// Earliest accepted date (inclusive)
    #[arg(long, value_name = "DATE")]
    min: Option<String>,

    /// Latest accepted date (inclusive)
    #[arg(long, value_name = "DATE")]
    max: Option<String>,
}

impl BoundArgs {
    /// Layer `--min` / `--max` over options from config.
    pub fn apply(&self, mut options: EditorOptions) -> EditorOptions {
        if let Some(min) = &self.min {
            options.set(MIN_VALUE_OPTION, min.as_str());
        }
        if let Some(max) = &self.max {
            options.set(MAX_VALUE_OPTION, max.as_str());
        }
        options
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay { value, trigger, keys, bounds, config, column, json } => {
            resolve_options(config, column, &bounds)
                .and_then(|options| replay::cmd_replay(value, trigger, &keys, &options, json))
        }
        Commands::Classify { keys, json } => cmd_classify(&keys, json),
        Commands::Parse { text, bounds, json } => cmd_parse(&text, &bounds.apply(EditorOptions::new()), json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    /// Create error from config error with proper exit code.
    pub fn config(err: ConfigError) -> Self {
        match &err {
            ConfigError::UnknownColumn(_) => {
                Self::args(err.to_string()).with_hint("columns are keys of the \"columns\" table in the config file")
            }
            ConfigError::Io(_) | ConfigError::Parse(_) | ConfigError::Serialize(_) => Self::io(err.to_string()),
        }
    }

    pub fn editor(err: EditorError) -> Self {
        Self { code: EXIT_ERROR, message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Editor options for a replay: column config first, then bound flags.
fn resolve_options(
    config: Option<PathBuf>,
    column: Option<String>,
    bounds: &BoundArgs,
) -> Result<EditorOptions, CliError> {
    let Some(column) = column else {
        return Ok(bounds.apply(EditorOptions::new()));
    };

    let editors = match &config {
        Some(path) => EditorsConfig::load(path).map_err(CliError::config)?,
        None => EditorsConfig::load_or_default(),
    };

    let editor = editors.column(&column).map_err(|e| {
        let err = CliError::config(e);
        if config.is_some() {
            return err;
        }
        err.with_hint(format!("looked in {}; pass --config <FILE>", EditorsConfig::default_path().display()))
    })?;
    log::debug!("column {} uses the {} editor", column, editor.editor);
    Ok(bounds.apply(editor.options.clone()))
}

fn parse_keys(keys: &[String]) -> Result<Vec<Key>, CliError> {
    keys.iter()
        .map(|k| {
            k.parse::<Key>()
                .map_err(|e| CliError::args(e.to_string()).with_hint("use Space for the space bar"))
        })
        .collect()
}

// ============================================================================
// classify
// ============================================================================

fn cmd_classify(keys: &[String], json: bool) -> Result<(), CliError> {
    let keys = parse_keys(keys)?;

    let mut editor = DateCellEditor::new();
    editor.activate(EditParams::new(celledit_engine::CellInput::Absent), &EditorOptions::new());

    let mut rows = Vec::with_capacity(keys.len());
    for key in &keys {
        let action = editor.classify_key(key).map_err(CliError::editor)?;
        rows.push((key, action));
    }

    if json {
        let out: Vec<_> = rows
            .iter()
            .map(|(key, action)| serde_json::json!({ "key": key, "action": action }))
            .collect();
        print_json(&out)?;
    } else {
        let width = rows.iter().map(|(key, _)| key.to_string().len()).max().unwrap_or(0);
        for (key, action) in rows {
            println!("{:<width$}  {}", key.to_string(), action, width = width);
        }
    }
    Ok(())
}

// ============================================================================
// parse
// ============================================================================

fn cmd_parse(text: &str, options: &EditorOptions, json: bool) -> Result<(), CliError> {
    let mut editor = DateCellEditor::new();
    editor.activate(EditParams::new(text), options);
    let value = editor.value();

    if json {
        print_json(&serde_json::json!({
            "input": text,
            "value": value,
            "display": value.map(format_date),
        }))?;
    } else {
        match value {
            Some(date) => println!("{}", date),
            None => println!("absent"),
        }
    }
    Ok(())
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::io(e.to_string()))?;
    println!("{}", out);
    Ok(())
}
