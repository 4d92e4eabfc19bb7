use std::{collections::HashMap, path::Path};

use config::{Action, Config, Entry};

/// Action summary for one entry, or why it would be skipped.
fn action_text(entry: &Entry) -> String {
    match Action::from_entry(entry) {
        Ok(action) => action.to_string(),
        Err(e) => format!("skipped ({})", e),
    }
}

/// One line per entry, in section order, as the daemon would read them.
///
/// Hotkey lines carry the canonical combination and flag combinations the OS
/// would refuse because an earlier entry already claims them.
pub(crate) fn report(config: &Config) -> Vec<String> {
    let mut lines = Vec::new();
    let mut claimed = HashMap::new();
    for (i, entry) in config.hotkey.iter().enumerate() {
        let key = match (&entry.key, entry.chord()) {
            (None, _) => "no key".to_string(),
            (Some(raw), None) => format!("invalid key {:?}", raw),
            (Some(_), Some(chord)) => {
                let pair = (chord.registration_modifiers(), chord.key);
                match claimed.get(&pair) {
                    Some(first) => format!("{} (duplicate of hotkey[{}])", chord, first),
                    None => {
                        claimed.insert(pair, i);
                        chord.to_string()
                    }
                }
            }
        };
        lines.push(format!("hotkey[{}] {}: {}", i, key, action_text(entry)));
    }
    for (i, entry) in config.systray.iter().enumerate() {
        let label = config.menu_label(i).unwrap_or_default();
        lines.push(format!("systray[{}] {}: {}", i, label, action_text(entry)));
    }
    for (i, entry) in config.init.iter().enumerate() {
        lines.push(format!("init[{}] {}", i, action_text(entry)));
    }
    lines
}

/// Load `path` and print either the report or, with `dump`, the tree as JSON.
/// Returns the process exit status.
pub(crate) fn run(path: &Path, dump: bool) -> i32 {
    let cfg = match config::load_from_path(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return 1;
        }
    };
    if dump {
        match serde_json::to_string_pretty(&cfg) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize config: {e}");
                return 1;
            }
        }
    } else {
        for line in report(&cfg) {
            println!("{}", line);
        }
        println!("OK");
    }
    0
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn cfg(text: &str) -> Config {
        config::load_from_str(text).expect("config")
    }

    #[test]
    fn report_covers_every_section() {
        let c = cfg(r#"{
            "hotkey": [
                {"key": "alt-ctrl-T", "exec": "notepad.exe"},
                {"key": "ctrl-alt-t", "kill": "pid=4"},
                {"key": "ctrl-nosuchkey", "exec": "x"},
                {"exec": "y"}
            ],
            "systray": [{"name": "Calc", "exec": "calc.exe"}, {"resolution": "800"}],
            "init": [{"note": "nothing"}]
        }"#);
        assert_eq!(
            report(&c),
            vec![
                "hotkey[0] ctrl-alt-t: Exec: notepad.exe",
                "hotkey[1] ctrl-alt-t (duplicate of hotkey[0]): Kill: pid=4",
                "hotkey[2] invalid key \"ctrl-nosuchkey\": Exec: x",
                "hotkey[3] no key: Exec: y",
                "systray[0] Calc: Exec: calc.exe",
                "systray[1] Item 2: skipped (resolution: invalid resolution `800`)",
                "init[0] skipped (entry has no action field)",
            ]
        );
    }

    #[test]
    fn run_exit_status_follows_load_result() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"hotkey": [{"key": "f1", "exec": "a.exe"}]}"#).expect("write");
        assert_eq!(run(&good, false), 0);
        assert_eq!(run(&good, true), 0);

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{").expect("write");
        assert_eq!(run(&bad, false), 1);
        assert_eq!(run(&dir.path().join("missing.json"), false), 1);
    }
}
