use crate::{Config, ShowMode, TogglePolicy, load_from_str};

fn load(text: &str) -> Config {
    load_from_str(text).expect("valid config")
}

#[test]
fn sections_preserve_document_order() {
    let cfg = load(
        r#"{
            "hotkey": [
                {"key": "ctrl-alt-n", "exec": "notepad.exe", "note": "Notepad"},
                {"key": "f2", "kill": "calc.exe"}
            ],
            "systray": [{"name": "Screens", "screenshot": "all"}],
            "init": [{"resolution": "1920x1080"}]
        }"#,
    );
    assert_eq!(cfg.hotkey.len(), 2);
    assert_eq!(cfg.hotkey[0].note.as_deref(), Some("Notepad"));
    assert_eq!(cfg.hotkey[1].kill.as_deref(), Some("calc.exe"));
    assert_eq!(cfg.systray[0].name.as_deref(), Some("Screens"));
    assert_eq!(cfg.init[0].resolution.as_deref(), Some("1920x1080"));
    assert_eq!(cfg.toggle, TogglePolicy::Binding);
}

#[test]
fn member_names_match_case_insensitively() {
    let cfg = load(r#"{"HotKey": [{"KEY": "F1", "Exec": "a.exe"}]}"#);
    assert_eq!(cfg.hotkey.len(), 1);
    assert_eq!(cfg.hotkey[0].key.as_deref(), Some("F1"));
    assert_eq!(cfg.hotkey[0].exec.as_deref(), Some("a.exe"));
}

#[test]
fn first_duplicate_member_wins() {
    let cfg = load(r#"{"hotkey": [{"exec": "first.exe", "EXEC": "second.exe"}]}"#);
    assert_eq!(cfg.hotkey[0].exec.as_deref(), Some("first.exe"));
}

#[test]
fn non_string_fields_are_absent() {
    let cfg = load(r#"{"hotkey": [{"key": 112, "exec": ["a.exe"], "note": null}]}"#);
    let e = &cfg.hotkey[0];
    assert_eq!(e.key, None);
    assert_eq!(e.exec, None);
    assert_eq!(e.note, None);
}

#[test]
fn non_object_items_keep_their_slot() {
    let cfg = load(r#"{"hotkey": ["junk", 4, {"key": "f3", "exec": "c.exe"}]}"#);
    assert_eq!(cfg.hotkey.len(), 3);
    assert_eq!(cfg.hotkey[0], Default::default());
    assert_eq!(cfg.hotkey[2].exec.as_deref(), Some("c.exe"));
}

#[test]
fn non_array_sections_are_empty() {
    let cfg = load(r#"{"hotkey": {"key": "f1"}, "systray": "x", "init": 3}"#);
    assert!(cfg.hotkey.is_empty());
    assert!(cfg.systray.is_empty());
    assert!(cfg.init.is_empty());
}

#[test]
fn non_object_root_is_empty_config() {
    assert_eq!(load("[1, 2, 3]"), Config::default());
}

#[test]
fn id_accepts_any_number() {
    let cfg = load(r#"{"systray": [{"id": 3.7}, {"id": "2"}, {"id": -1}]}"#);
    assert_eq!(cfg.systray[0].id, Some(3.7));
    assert_eq!(cfg.systray[1].id, None);
    assert_eq!(cfg.systray[2].id, Some(-1.0));
}

#[test]
fn toggle_policy_is_read_from_root() {
    assert_eq!(load(r#"{"toggle": "Global"}"#).toggle, TogglePolicy::Global);
    assert_eq!(load(r#"{"toggle": "binding"}"#).toggle, TogglePolicy::Binding);
    assert_eq!(load(r#"{"toggle": 1}"#).toggle, TogglePolicy::Binding);
}

#[test]
fn menu_label_falls_back_to_position() {
    let cfg = load(r#"{"systray": [{"name": "Reboot"}, {"exec": "a.exe"}]}"#);
    assert_eq!(cfg.menu_label(0).as_deref(), Some("Reboot"));
    assert_eq!(cfg.menu_label(1).as_deref(), Some("Item 2"));
    assert_eq!(cfg.menu_label(2), None);
}

#[test]
fn show_mode_names() {
    assert_eq!(ShowMode::from_spec(Some("MAX")), ShowMode::Max);
    assert_eq!(ShowMode::from_spec(Some("restore")), ShowMode::Restore);
    assert_eq!(ShowMode::from_spec(Some("bogus")), ShowMode::Normal);
    assert_eq!(ShowMode::from_spec(None), ShowMode::Normal);
    assert_eq!(ShowMode::Min.as_str(), "min");
}

#[test]
fn entry_chord_parses_key() {
    let cfg = load(r#"{"hotkey": [{"key": "Ctrl-Alt-N"}, {"key": "hyper-q"}]}"#);
    let chord = cfg.hotkey[0].chord().expect("chord");
    assert_eq!(chord.to_string(), "ctrl-alt-n");
    assert_eq!(cfg.hotkey[1].chord(), None);
}
