//! Configuration tree types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use win_keycode::Chord;

use crate::raw;

/// Window visibility command used when launching programs or toggling windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowMode {
    /// Activate and display in the default position and size.
    #[default]
    Normal,
    /// Hide the window.
    Hide,
    /// Minimize, even if the owning thread is not responding.
    Min,
    /// Maximize.
    Max,
    /// Restore from minimized or maximized.
    Restore,
    /// Activate and display in the current position and size.
    Show,
}

impl ShowMode {
    /// Parse a show mode name case-insensitively; absent or unrecognized
    /// names yield [`ShowMode::Normal`].
    pub fn from_spec(s: Option<&str>) -> Self {
        let Some(s) = s else {
            return Self::Normal;
        };
        [
            ("normal", Self::Normal),
            ("hide", Self::Hide),
            ("min", Self::Min),
            ("max", Self::Max),
            ("restore", Self::Restore),
            ("show", Self::Show),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map_or(Self::Normal, |(_, m)| m)
    }

    /// Lowercase spec name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hide => "hide",
            Self::Min => "min",
            Self::Max => "max",
            Self::Restore => "restore",
            Self::Show => "show",
        }
    }
}

/// How the `find` action alternates between its hide and show states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TogglePolicy {
    /// Each trigger source (hotkey id, menu entry, init entry) has its own state.
    #[default]
    Binding,
    /// One process-wide state shared by every `find` action.
    Global,
}

impl TogglePolicy {
    /// Parse a policy name; `global` (or `shared`) selects the process-wide
    /// flag, anything else the per-binding map.
    pub fn from_spec(s: Option<&str>) -> Self {
        match s {
            Some(s) if s.eq_ignore_ascii_case("global") || s.eq_ignore_ascii_case("shared") => {
                Self::Global
            }
            _ => Self::Binding,
        }
    }
}

/// One configuration node: a hotkey binding, a tray menu entry or an init step.
///
/// All fields are optional; which ones matter depends on the action selected
/// by [`crate::Action::from_entry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    /// Key combination for hotkey entries, e.g. `"ctrl-alt-r"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display label for hotkey listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Menu label for tray entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Command line to launch; selects the `exec` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,
    /// Show mode for launched programs and shell verbs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,

    /// Process image name, or `pid=<n>`; selects the `kill` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kill: Option<String>,

    /// Display mode as `<width>x<height>`; selects the `resolution` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Device name of the monitor to change; the primary when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,

    /// Window title substring; selects the `find` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub find: Option<String>,
    /// Show mode for the hiding half of a `find` toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<String>,
    /// Show mode for the showing half of a `find` toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,

    /// Region to capture (`all`, `current` or `primary`); selects the `screenshot` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Screenshot destination: `clipboard`, `ask` or a file name prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<String>,

    /// Shell verb such as `open`; selects the `shell` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Target file of a shell verb or shortcut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Arguments passed to the shell verb or stored in the shortcut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Working directory for the shell verb.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Path of the `.lnk` file to create; selects the `shortcut` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    /// Icon file for the shortcut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Icon index within `icon`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<f64>,
}

impl Entry {
    /// Build an entry from a JSON value. Non-objects produce an empty entry so
    /// that array positions stay stable.
    pub fn from_value(v: &Value) -> Self {
        let Value::Object(o) = v else {
            return Self::default();
        };
        let s = |name: &str| raw::string(o, name);
        Self {
            key: s("key"),
            note: s("note"),
            name: s("name"),
            exec: s("exec"),
            window: s("window"),
            kill: s("kill"),
            resolution: s("resolution"),
            monitor: s("monitor"),
            find: s("find"),
            hide: s("hide"),
            show: s("show"),
            screenshot: s("screenshot"),
            save: s("save"),
            shell: s("shell"),
            file: s("file"),
            args: s("args"),
            directory: s("directory"),
            shortcut: s("shortcut"),
            icon: s("icon"),
            id: raw::number(o, "id"),
        }
    }

    /// Parse the `key` field into a chord, if present and valid.
    pub fn chord(&self) -> Option<Chord> {
        self.key.as_deref().and_then(Chord::parse)
    }
}

/// The parsed configuration tree for one session.
///
/// Sequences preserve document order; for `hotkey`, the index of an entry is
/// its binding id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global hotkey bindings.
    pub hotkey: Vec<Entry>,
    /// Tray menu entries.
    pub systray: Vec<Entry>,
    /// Entries run once, at the first successful load of the process.
    pub init: Vec<Entry>,
    /// Policy for the `find` toggle state.
    pub toggle: TogglePolicy,
}

impl Config {
    /// Build a configuration tree from a parsed JSON document.
    ///
    /// A document that is not an object yields an empty configuration.
    pub fn from_value(v: &Value) -> Self {
        let Value::Object(o) = v else {
            tracing::warn!("config root is not an object; nothing to load");
            return Self::default();
        };
        let entries = |name: &str| -> Vec<Entry> {
            raw::items(o, name).iter().map(Entry::from_value).collect()
        };
        Self {
            hotkey: entries("hotkey"),
            systray: entries("systray"),
            init: entries("init"),
            toggle: TogglePolicy::from_spec(raw::string(o, "toggle").as_deref()),
        }
    }

    /// Label for tray entry `index`, falling back to a positional name.
    pub fn menu_label(&self, index: usize) -> Option<String> {
        let entry = self.systray.get(index)?;
        Some(
            entry
                .name
                .clone()
                .unwrap_or_else(|| format!("Item {}", index + 1)),
        )
    }
}
