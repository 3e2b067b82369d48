//! Keystroke replay: run one date edit session through the headless host.
//!
//! Usage: celledit replay --value 3/4/2024 --keys "1 / 2 / 2 0 2 5 Enter"
//!
//! The session is activated with the trigger (if any), shown, then fed the
//! keys in order. Keys after the edit finishes (Enter, Tab, Escape) are
//! dropped, the same way a grid stops routing keys to a closed editor.

use chrono::NaiveDate;
use serde::Serialize;

use celledit_engine::date::{format_date, PLACEHOLDER};
use celledit_engine::{
    CellInput, DateCellEditor, EditHost, EditParams, EditorOptions, HostOutcome, Key, KeyRecord,
};

use crate::{print_json, CliError};

/// Result of replaying one edit session.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub outcome: HostOutcome<NaiveDate>,
    /// Text in the input when replay stopped (None if never shown).
    pub text: Option<String>,
    pub keys: Vec<KeyRecord>,
    /// Keys delivered after the edit finished.
    pub dropped: usize,
}

pub fn replay(
    value: Option<String>,
    trigger: Option<char>,
    keys: &[Key],
    options: &EditorOptions,
) -> Result<ReplayReport, CliError> {
    let mut params = EditParams::new(CellInput::from(value));
    if let Some(c) = trigger {
        params = params.with_char_press(c);
    }

    let mut editor = DateCellEditor::new();
    editor.activate(params, options);

    let mut host = EditHost::start(editor).map_err(CliError::editor)?;

    let delivered = host.press_all(keys).map_err(CliError::editor)?;
    let dropped = keys.len() - delivered;
    if dropped > 0 {
        log::debug!("{} key(s) arrived after the edit finished", dropped);
    }

    Ok(ReplayReport {
        text: host.field().map(|f| f.text()),
        keys: host.key_log().to_vec(),
        dropped,
        outcome: host.into_outcome(),
    })
}

pub fn cmd_replay(
    value: Option<String>,
    trigger: Option<char>,
    keys: &str,
    options: &EditorOptions,
    json: bool,
) -> Result<(), CliError> {
    let keys = Key::parse_sequence(keys);
    let report = replay(value, trigger, &keys, options)?;

    if json {
        return print_json(&report);
    }

    for record in &report.keys {
        println!(
            "{:<12} {:<18} {:<4} {}",
            record.key.to_string(),
            record.action,
            if record.grid_saw { "grid" } else { "-" },
            record.text_after
        );
    }
    if report.dropped > 0 {
        println!("dropped: {}", report.dropped);
    }
    match report.text.as_deref() {
        Some("") => println!("text: ({})", PLACEHOLDER),
        Some(text) => println!("text: {}", text),
        None => {}
    }
    println!("outcome: {}", describe(&report.outcome));
    Ok(())
}

fn describe(outcome: &HostOutcome<NaiveDate>) -> String {
    match outcome {
        HostOutcome::Editing => "editing".to_string(),
        HostOutcome::CancelledBeforeStart => "cancelled before start".to_string(),
        HostOutcome::Discarded => "discarded".to_string(),
        HostOutcome::Unchanged => "unchanged".to_string(),
        HostOutcome::Committed(Some(date)) => format!("committed {}", format_date(*date)),
        HostOutcome::Committed(None) => "committed absent".to_string(),
    }
}
