use running_order::alias::AliasTable;
use running_order::config::{CONFIG_DIR_ENV, Config};
use running_order::error::Error;
use running_order::model::{Schedule, parse_lineup};
use running_order::selection::{Selection, SelectionFormat};

const LINEUP: &str = "\
Band,Date,Start,End,Stage
Heaven Shall Burn,03.08.2023,21:00,22:15,Harder
Killswitch Engage,03.08.2023,19:30,20:45,Faster
Aborted,03.08.2023,12:00,12:45,Wasteland
Aborted,04.08.2023,16:00,16:45,Headbangers
";

fn schedule() -> Schedule {
    parse_lineup(LINEUP).unwrap().schedule
}

#[test]
fn test_extended_export_round_trips() {
    let schedule = schedule();
    let selection: Selection = schedule
        .events()
        .iter()
        .filter(|e| e.name == "Aborted" || e.name == "Heaven Shall Burn")
        .cloned()
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mine.prot");
    selection.export_to(&path, SelectionFormat::Extended).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Aborted,04.08.2023,16:00"));

    let report = Selection::import_from(&path, &schedule).unwrap();
    assert_eq!(report.selection, selection);
    assert!(report.unknown.is_empty());
    assert!(report.unresolved.is_empty());
}

#[test]
fn test_simple_form_resolves_first_slot() {
    let schedule = schedule();
    let report = Selection::import("Aborted,Killswitch Engage", &schedule);

    assert_eq!(report.selection.len(), 2);
    let aborted = report
        .selection
        .iter()
        .find(|e| e.name == "Aborted")
        .unwrap();
    assert_eq!(aborted.stage, "Wasteland");
}

#[test]
fn test_simple_export_lists_each_name_once() {
    let schedule = schedule();
    let selection: Selection = schedule.events().iter().cloned().collect();
    assert_eq!(
        selection.to_text(SelectionFormat::Simple),
        "Aborted,Heaven Shall Burn,Killswitch Engage"
    );
}

#[test]
fn test_unknown_acts_are_dropped_and_reported() {
    let schedule = schedule();
    let report = Selection::import("Aborted,Slayer,Heaven Shall Burn", &schedule);

    assert_eq!(report.selection.len(), 2);
    assert_eq!(report.unknown, vec!["Slayer".to_string()]);
    match report.check() {
        Err(Error::UnknownEventInSelection { names }) => assert_eq!(names, ["Slayer"]),
        other => panic!("expected UnknownEventInSelection, got {:?}", other),
    }
}

#[test]
fn test_extended_line_at_wrong_time_is_unresolved() {
    let schedule = schedule();
    let text = "Aborted,04.08.2023,16:00\nAborted,05.08.2023,16:00\nSlayer,04.08.2023,20:00\n";
    let report = Selection::import(text, &schedule);

    assert_eq!(report.selection.len(), 1);
    assert_eq!(report.unresolved, vec!["Aborted,05.08.2023,16:00".to_string()]);
    assert_eq!(report.unknown, vec!["Slayer".to_string()]);
}

#[test]
fn test_bad_date_in_extended_file_keeps_other_slots() {
    let schedule = schedule();
    let text = "Aborted,04.08.2023,16:00\nHeaven Shall Burn,03/08/2023,21:00\n";
    let report = Selection::import(text, &schedule);

    let picked: Vec<_> = report.selection.iter().collect();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].name, "Aborted");
    assert_eq!(picked[0].stage, "Headbangers");
    assert!(report.unknown.is_empty());
    assert_eq!(
        report.unresolved,
        vec!["Heaven Shall Burn,03/08/2023,21:00".to_string()]
    );
}

#[test]
fn test_single_extended_line_is_not_read_as_names() {
    let schedule = schedule();
    let report = Selection::import("Aborted,04.8.23,16:00\n", &schedule);

    assert!(report.selection.is_empty());
    assert!(report.unknown.is_empty());
    assert_eq!(report.unresolved, vec!["Aborted,04.8.23,16:00".to_string()]);
}

#[test]
fn test_missing_selection_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Selection::import_from(dir.path().join("gone.prot"), &schedule()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_alias_table_round_trip() {
    let mut table = AliasTable::new();
    table.set("Heaven Shall Burn", "HSB");
    table.set("Killswitch Engage", "Killswitch");
    table.set("Killswitch Engage", "KSE");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aliases.paf");
    table.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Band name,Band alias\n"));

    let loaded = AliasTable::load(&path).unwrap();
    assert_eq!(loaded, table);
    assert_eq!(loaded.display_name("Killswitch Engage"), "KSE");
    assert_eq!(loaded.display_name("Aborted"), "Aborted");
}

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    // SAFETY: only this test touches the variable.
    unsafe { std::env::set_var(CONFIG_DIR_ENV, dir.path()) };

    assert_eq!(Config::load().unwrap(), Config::default());

    let config = Config {
        lineup_path: Some("wacken.csv".into()),
        selection_format: SelectionFormat::Simple,
        disabled_stages: vec!["Wasteland".to_string()],
        ..Config::default()
    };
    config.save().unwrap();

    let content = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(content.contains("selection_format = \"simple\""));
    assert_eq!(Config::load().unwrap(), config);
}
