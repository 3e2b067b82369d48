// End-to-end date editing through the headless host.
// Run with: cargo test -p celledit-engine --test date_editing

use chrono::NaiveDate;
use celledit_engine::{
    CellInput, DateCellEditor, DeferredQueue, EditHost, EditParams, EditorError, EditorOptions,
    FieldAction, GridCellEditor, HostOutcome, Key, KeyAction, TextField,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn date_editor(params: EditParams<NaiveDate>, options: &EditorOptions) -> DateCellEditor {
    let mut editor = DateCellEditor::new();
    editor.activate(params, options);
    editor
}

fn host(params: EditParams<NaiveDate>) -> EditHost<DateCellEditor> {
    EditHost::start(date_editor(params, &EditorOptions::new())).unwrap()
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

#[test]
fn start_char_seeds_value() {
    let editor = date_editor(EditParams::new(CellInput::Absent).with_char_press('5'), &EditorOptions::new());
    assert!(!editor.is_cancel_before_start());
    assert_eq!(editor.text(), "5");
}

#[test]
fn letter_cannot_start_edit() {
    let editor = date_editor(EditParams::new(CellInput::Absent).with_char_press('a'), &EditorOptions::new());
    assert!(editor.is_cancel_before_start());
    assert_eq!(editor.inner().raw_value(), Some(&CellInput::Absent));
}

#[test]
fn separator_cannot_start_edit() {
    let editor = date_editor(EditParams::new("3/4/2024").with_char_press('/'), &EditorOptions::new());
    assert!(editor.is_cancel_before_start());
    assert_eq!(editor.text(), "3/4/2024");
}

#[test]
fn cancelled_session_is_never_shown() {
    let host = host(EditParams::new("3/4/2024").with_char_press('x'));
    assert_eq!(host.outcome(), &HostOutcome::CancelledBeforeStart);
    assert!(host.field().is_none());
    assert!(!host.editor().is_active());
}

#[test]
fn host_refuses_inactive_editor() {
    let result = EditHost::start(DateCellEditor::new());
    assert!(matches!(result, Err(EditorError::NoActiveSession)));
}

// ---------------------------------------------------------------------------
// Focus and selection
// ---------------------------------------------------------------------------

#[test]
fn grid_started_edit_selects_all() {
    let host = host(EditParams::new("3/4/2024"));
    let field = host.field().unwrap();
    assert!(field.is_focused());
    assert_eq!(field.selected_text().as_deref(), Some("3/4/2024"));
}

#[test]
fn typing_started_edit_keeps_caret() {
    let mut host = host(EditParams::new("3/4/2024").with_char_press('1'));
    let field = host.field().unwrap();
    assert!(field.is_focused());
    assert!(field.selection().is_none());
    assert_eq!(field.caret(), 1);

    host.type_text("2/25/2023").unwrap();
    assert_eq!(host.field().unwrap().text(), "12/25/2023");
}

#[test]
fn first_key_replaces_selected_text() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.type_text("1/2/2025").unwrap();
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Committed(Some(ymd(2025, 1, 2))));
}

#[test]
fn focus_task_runs_after_discard() {
    let mut editor = date_editor(EditParams::new("3/4/2024"), &EditorOptions::new());
    let mut queue: DeferredQueue<TextField> = DeferredQueue::new();
    queue.push_focus(editor.on_shown().unwrap());
    editor.discard();

    let mut field = TextField::new("3/4/2024");
    assert_eq!(queue.run_pending(&mut field), 1);
    assert!(field.is_focused());
    assert_eq!(field.selected_text().as_deref(), Some("3/4/2024"));
    assert_eq!(field.text(), "3/4/2024");
    assert!(!editor.is_active());
    assert!(queue.is_empty());
}

#[test]
fn focus_task_runs_after_end_edit() {
    let mut editor = date_editor(EditParams::new(CellInput::Absent).with_char_press('7'), &EditorOptions::new());
    let mut queue: DeferredQueue<TextField> = DeferredQueue::new();
    queue.push_focus(editor.on_shown().unwrap());
    let outcome = editor.end_edit().unwrap();
    assert_eq!(outcome.value, None);

    let mut field = TextField::new("7");
    assert_eq!(queue.run_pending(&mut field), 1);
    assert!(field.is_focused());
    assert!(field.selection().is_none());
    assert_eq!(field.text(), "7");
}

// ---------------------------------------------------------------------------
// Keystrokes
// ---------------------------------------------------------------------------

#[test]
fn rejected_keys_are_swallowed() {
    let mut host = host(EditParams::new(CellInput::Absent).with_char_press('1'));
    assert_eq!(host.press(&Key::Char('a')).unwrap(), Some(KeyAction::Reject));
    assert_eq!(host.press(&Key::Char('-')).unwrap(), Some(KeyAction::Reject));
    assert_eq!(host.press(&Key::Home).unwrap(), Some(KeyAction::Reject));
    assert_eq!(host.field().unwrap().text(), "1");
    assert!(host.key_log().iter().all(|r| !r.grid_saw && r.text_after == "1"));
}

#[test]
fn arrows_move_caret_without_reaching_grid() {
    let mut host = host(EditParams::new(CellInput::Absent).with_char_press('0'));
    host.type_text("32024").unwrap();
    for _ in 0..4 {
        assert_eq!(host.press(&Key::ArrowLeft).unwrap(), Some(KeyAction::RedirectToField));
    }
    host.press(&Key::Char('/')).unwrap();
    host.press(&Key::Char('4')).unwrap();
    host.press(&Key::Char('/')).unwrap();
    assert_eq!(host.field().unwrap().text(), "03/4/2024");
    assert_eq!(host.outcome(), &HostOutcome::Editing);
    assert!(host.key_log().iter().filter(|r| r.key == Key::ArrowLeft).all(|r| !r.grid_saw));

    host.press(&Key::Tab).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Committed(Some(ymd(2024, 3, 4))));
}

#[test]
fn backspace_edits_without_validation() {
    let mut host = host(EditParams::new("3/4/2024").with_char_press('1'));
    assert_eq!(host.press(&Key::Backspace).unwrap(), Some(KeyAction::AllowSpecial));
    assert_eq!(host.field().unwrap().text(), "");
    assert_eq!(host.editor().text(), "");
}

#[test]
fn escape_discards_edit() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.type_text("1/1/2000").unwrap();
    assert_eq!(host.press(&Key::Escape).unwrap(), Some(KeyAction::AllowSpecial));
    assert_eq!(host.outcome(), &HostOutcome::Discarded);
    assert!(!host.editor().is_active());
    // Nothing more is delivered once the edit has finished
    assert_eq!(host.press(&Key::Char('1')).unwrap(), None);
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

#[test]
fn untouched_edit_is_unchanged() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Unchanged);
}

#[test]
fn reformatted_same_date_is_unchanged() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.type_text("03/04/2024").unwrap();
    host.press(&Key::Tab).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Unchanged);
}

#[test]
fn typed_date_round_trips_unchanged() {
    let mut host = host(EditParams::new(CellInput::Typed(ymd(2024, 3, 4))));
    assert_eq!(host.field().unwrap().text(), "03/04/2024");
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Unchanged);
}

#[test]
fn timestamp_is_seeded_as_date() {
    let ts = ymd(2024, 3, 4).and_hms_opt(9, 15, 0).unwrap();
    let mut host = host(EditParams::new(CellInput::Timestamp(ts)));
    assert_eq!(host.field().unwrap().text(), "03/04/2024");
    host.stop_editing().unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Unchanged);
}

#[test]
fn cleared_cell_commits_absent() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.press(&Key::Delete).unwrap();
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Committed(None));
}

#[test]
fn unparsable_text_commits_absent() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.type_text("2/30/2024").unwrap();
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Committed(None));
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[test]
fn below_min_is_absent() {
    let options = EditorOptions::new().with("minValue", "01/01/2020");
    let editor = date_editor(EditParams::new("12/31/2019"), &options);
    assert_eq!(editor.value(), None);
}

#[test]
fn above_max_is_absent() {
    let options = EditorOptions::new().with("maxValue", "12/31/2020");
    let editor = date_editor(EditParams::new("1/1/2021"), &options);
    assert_eq!(editor.value(), None);

    let editor = date_editor(EditParams::new("12/31/2020"), &options);
    assert_eq!(editor.value(), Some(ymd(2020, 12, 31)));
}

#[test]
fn out_of_range_edit_of_empty_cell_reads_as_unchanged() {
    // Known quirk: out-of-range converts to absent, which equals the empty
    // cell the edit started from, so the host sees "no change".
    let options = EditorOptions::new().with("minValue", "1/1/2020");
    let mut host = EditHost::start(date_editor(EditParams::new(CellInput::Absent).with_char_press('1'), &options)).unwrap();
    host.type_text("/1/2019").unwrap();
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Unchanged);
}

#[test]
fn out_of_range_edit_of_filled_cell_clears_it() {
    let options = EditorOptions::new().with("maxValue", "12/31/2020");
    let mut host = EditHost::start(date_editor(EditParams::new("6/1/2020"), &options)).unwrap();
    host.type_text("6/1/2021").unwrap();
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Committed(None));
}

#[test]
fn options_from_host_params() {
    let options = EditorOptions::from_json(serde_json::json!({
        "minValue": "1/1/2020",
        "maxValue": "12/31/2020",
        "colId": "due_date"
    }));
    let editor = date_editor(EditParams::new("7/4/2020"), &options);
    assert_eq!(editor.value(), Some(ymd(2020, 7, 4)));
    assert_eq!(editor.bounds().min, Some(ymd(2020, 1, 1)));
}

// ---------------------------------------------------------------------------
// Paste and key scripts
// ---------------------------------------------------------------------------

#[test]
fn paste_replaces_selection_and_syncs_editor() {
    let mut host = host(EditParams::new("3/4/2024"));
    assert_eq!(host.paste("12/25/2023\n").unwrap(), Some(FieldAction::Changed));
    assert_eq!(host.field().unwrap().text(), "12/25/2023");
    assert_eq!(host.editor().text(), "12/25/2023");
    host.press(&Key::Enter).unwrap();
    assert_eq!(host.outcome(), &HostOutcome::Committed(Some(ymd(2023, 12, 25))));
}

#[test]
fn paste_is_not_filtered_by_alphabet() {
    let mut host = host(EditParams::new(CellInput::Absent).with_char_press('1'));
    host.paste("x").unwrap();
    assert_eq!(host.editor().text(), "1x");
    assert_eq!(host.editor().value(), None);
}

#[test]
fn paste_after_finish_is_ignored() {
    let mut host = host(EditParams::new("3/4/2024"));
    host.press(&Key::Escape).unwrap();
    assert_eq!(host.paste("1/1/2000").unwrap(), None);

    let mut cancelled = host_cancelled();
    assert_eq!(cancelled.paste("1/1/2000").unwrap(), None);
}

fn host_cancelled() -> EditHost<DateCellEditor> {
    host(EditParams::new("3/4/2024").with_char_press('/'))
}

#[test]
fn press_all_counts_delivered_keys() {
    let mut host = host(EditParams::new("3/4/2024"));
    let keys = Key::parse_sequence("5 / 5 / 2 0 2 4 Tab 1 2");
    assert_eq!(host.press_all(&keys).unwrap(), 9);
    assert_eq!(host.outcome(), &HostOutcome::Committed(Some(ymd(2024, 5, 5))));
    assert_eq!(host.key_log().len(), 9);
}

#[test]
fn empty_field_shows_placeholder() {
    let editor = date_editor(EditParams::new(CellInput::Absent), &EditorOptions::new());
    assert_eq!(editor.text(), "");
    assert_eq!(editor.placeholder(), "MM/DD/YYYY");
}
