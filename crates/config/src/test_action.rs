use serde_json::json;

use crate::{
    Action, ActionError, ActionKind, Entry, KillTarget, Region, SaveSpec, ShowMode,
    parse_resolution,
};

fn entry(v: serde_json::Value) -> Entry {
    Entry::from_value(&v)
}

fn action(v: serde_json::Value) -> Result<Action, ActionError> {
    Action::from_entry(&entry(v))
}

#[test]
fn exec_beats_every_other_field() {
    let a = action(json!({
        "exec": "notepad.exe",
        "kill": "calc.exe",
        "shell": "open",
        "file": "x.txt"
    }))
    .expect("exec");
    assert_eq!(
        a,
        Action::Exec {
            command: "notepad.exe".into(),
            window: ShowMode::Normal,
        }
    );
}

#[test]
fn priority_order_is_fixed() {
    let a = action(json!({"shortcut": "s", "file": "t", "find": "Notepad"})).expect("find");
    assert_eq!(a.kind(), ActionKind::Find);
    let a = action(json!({"shell": "open", "file": "f", "screenshot": "all"})).expect("shot");
    assert_eq!(a.kind(), ActionKind::Screenshot);
}

#[test]
fn selected_kind_does_not_fall_through() {
    // shell wins over shortcut, and its missing file is not rescued.
    let err = action(json!({"shell": "open", "shortcut": "link"})).expect_err("missing file");
    assert_eq!(
        err,
        ActionError::MissingField {
            kind: ActionKind::Shell,
            field: "file",
        }
    );
    let err = action(json!({"resolution": "wide", "exec_": "a.exe", "find": "x"}))
        .expect_err("bad resolution");
    assert_eq!(err.kind(), Some(ActionKind::Resolution));
}

#[test]
fn no_action_fields() {
    assert_eq!(
        action(json!({"key": "f1", "note": "nothing"})),
        Err(ActionError::NoAction)
    );
}

#[test]
fn exec_window_mode() {
    let a = action(json!({"exec": "cmd.exe", "window": "MAX"})).expect("exec");
    assert_eq!(
        a,
        Action::Exec {
            command: "cmd.exe".into(),
            window: ShowMode::Max,
        }
    );
}

#[test]
fn kill_targets() {
    assert_eq!(
        action(json!({"kill": "PID=0x10"})),
        Ok(Action::Kill(KillTarget::Pid(16)))
    );
    assert_eq!(
        action(json!({"kill": "pid=1234"})),
        Ok(Action::Kill(KillTarget::Pid(1234)))
    );
    assert_eq!(
        action(json!({"kill": "Calc.exe"})),
        Ok(Action::Kill(KillTarget::Name("Calc.exe".into())))
    );
    let err = action(json!({"kill": "pid=abc"})).expect_err("bad pid");
    assert_eq!(err.kind(), Some(ActionKind::Kill));
}

#[test]
fn resolution_parsing() {
    assert_eq!(parse_resolution("1920x1080"), Some((1920, 1080)));
    assert_eq!(parse_resolution(" 800 x 600 "), Some((800, 600)));
    assert_eq!(parse_resolution("1920"), None);
    assert_eq!(parse_resolution("1920x"), None);
    assert_eq!(parse_resolution("ax600"), None);
    assert_eq!(parse_resolution("1x2x3"), None);
    assert_eq!(
        action(json!({"resolution": "1280x720", "monitor": "\\\\.\\DISPLAY2"})),
        Ok(Action::Resolution {
            width: 1280,
            height: 720,
            monitor: Some("\\\\.\\DISPLAY2".into()),
        })
    );
}

#[test]
fn find_defaults_to_hide_and_restore() {
    assert_eq!(
        action(json!({"find": "Notepad"})),
        Ok(Action::Find {
            pattern: "Notepad".into(),
            hide: ShowMode::Hide,
            show: ShowMode::Restore,
        })
    );
    assert_eq!(
        action(json!({"find": "Notepad", "hide": "min", "show": "weird"})),
        Ok(Action::Find {
            pattern: "Notepad".into(),
            hide: ShowMode::Min,
            show: ShowMode::Normal,
        })
    );
}

#[test]
fn screenshot_region_and_save() {
    assert_eq!(
        action(json!({"screenshot": "ALL"})),
        Ok(Action::Screenshot {
            region: Region::All,
            save: SaveSpec::Clipboard,
        })
    );
    assert_eq!(
        action(json!({"screenshot": "current", "save": "Ask"})),
        Ok(Action::Screenshot {
            region: Region::Current,
            save: SaveSpec::Ask,
        })
    );
    assert_eq!(
        action(json!({"screenshot": "whatever", "save": "C:\\shots\\desk"})),
        Ok(Action::Screenshot {
            region: Region::Primary,
            save: SaveSpec::Prefix("C:\\shots\\desk".into()),
        })
    );
}

#[test]
fn shell_fields() {
    assert_eq!(
        action(json!({
            "shell": "open",
            "file": "readme.txt",
            "args": "-x",
            "directory": "C:\\",
            "window": "min"
        })),
        Ok(Action::Shell {
            verb: "open".into(),
            file: "readme.txt".into(),
            args: Some("-x".into()),
            directory: Some("C:\\".into()),
            window: ShowMode::Min,
        })
    );
}

#[test]
fn shortcut_icon_index_coercion() {
    let icon = |id: serde_json::Value| match action(json!({"shortcut": "l", "file": "t", "id": id}))
    {
        Ok(Action::Shortcut { icon_index, .. }) => icon_index,
        other => panic!("unexpected: {:?}", other),
    };
    assert_eq!(icon(json!(3.9)), 3);
    assert_eq!(icon(json!(-2)), -2);
    assert_eq!(icon(json!("5")), 0);
    assert_eq!(icon(json!(null)), 0);
    assert_eq!(icon(json!(1e12)), i32::MAX);
}

#[test]
fn shortcut_requires_file() {
    assert_eq!(
        action(json!({"shortcut": "desktop\\app"})),
        Err(ActionError::MissingField {
            kind: ActionKind::Shortcut,
            field: "file",
        })
    );
}

#[test]
fn display_lines() {
    let a = action(json!({"exec": "notepad.exe"})).expect("exec");
    assert_eq!(a.to_string(), "Exec: notepad.exe");
    let a = action(json!({"kill": "pid=7"})).expect("kill");
    assert_eq!(a.to_string(), "Kill: pid=7");
    let a = action(json!({"resolution": "800x600"})).expect("res");
    assert_eq!(a.to_string(), "Resolution: 800x600");
}
