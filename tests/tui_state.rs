#![cfg(feature = "tui")]

use running_order::config::Config;
use running_order::session::Session;
use running_order::tui::action::Action;
use running_order::tui::state::{AppState, InputMode};
use std::io::Write;
use tempfile::NamedTempFile;

const LINEUP: &str = "\
Killswitch Engage,03.08.2023,19:30,20:45,Faster
Aborted,03.08.2023,12:00,12:45,Wasteland
";

fn app(config: Config) -> (AppState, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(LINEUP.as_bytes()).unwrap();
    let mut session = Session::new();
    session.load_lineup(file.path()).unwrap();
    (AppState::new(session, config), file)
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        assert!(state.apply(Action::TextInput(c)));
    }
}

#[test]
fn test_alias_edit_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let alias_path = dir.path().join("aliases.paf");
    let config = Config {
        alias_path: Some(alias_path.clone()),
        ..Config::default()
    };
    let (mut state, _file) = app(config);

    // Rows are sorted by name, so the cursor starts on Aborted.
    state.apply(Action::Next);
    assert_eq!(state.selected_event().unwrap().name, "Killswitch Engage");

    state.apply(Action::StartAlias);
    assert_eq!(state.mode, InputMode::EditingAlias);
    type_text(&mut state, "KSE");
    state.apply(Action::Submit);

    assert_eq!(state.mode, InputMode::Normal);
    assert_eq!(state.session.aliases().get("Killswitch Engage"), Some("KSE"));
    assert!(state.input_buffer.is_empty());

    state.apply(Action::SaveAliases);
    let text = std::fs::read_to_string(&alias_path).unwrap();
    assert_eq!(text.lines().nth(1), Some("Killswitch Engage,KSE"));
}

#[test]
fn test_empty_alias_removes_entry() {
    let (mut state, _file) = app(Config::default());
    state.apply(Action::StartAlias);
    type_text(&mut state, "Abo");
    state.apply(Action::Submit);
    assert_eq!(state.session.aliases().get("Aborted"), Some("Abo"));

    state.apply(Action::StartAlias);
    assert_eq!(state.alias_buffer, "Abo");
    for _ in 0..3 {
        state.apply(Action::TextBackspace);
    }
    state.apply(Action::Submit);
    assert!(state.session.aliases().is_empty());
}

#[test]
fn test_cancelled_alias_leaves_table_alone() {
    let (mut state, _file) = app(Config::default());
    state.apply(Action::StartAlias);
    type_text(&mut state, "zzz");
    state.apply(Action::Cancel);

    assert_eq!(state.mode, InputMode::Normal);
    assert!(state.session.aliases().is_empty());
    assert_eq!(state.view_indices.len(), 2);
}

#[test]
fn test_saving_aliases_without_a_path_reports_error() {
    let (mut state, _file) = app(Config::default());
    state.apply(Action::SaveAliases);
    assert!(state.message.starts_with("Error"));
}
