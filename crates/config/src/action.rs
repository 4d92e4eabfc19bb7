//! The action model: which single operation an entry describes.

use std::fmt;

use serde::{Deserialize, Serialize};
use win_keycode::parse_unsigned;

use crate::{ActionError, Entry, ShowMode};

/// The seven action kinds, in selection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Launch a program.
    Exec,
    /// Terminate processes.
    Kill,
    /// Change a display mode.
    Resolution,
    /// Toggle windows by title.
    Find,
    /// Capture the screen.
    Screenshot,
    /// Run a shell verb.
    Shell,
    /// Create a shortcut file.
    Shortcut,
}

impl ActionKind {
    /// All kinds, highest priority first.
    pub const PRIORITY: [Self; 7] = [
        Self::Exec,
        Self::Kill,
        Self::Resolution,
        Self::Find,
        Self::Screenshot,
        Self::Shell,
        Self::Shortcut,
    ];

    /// Name of the primary field that selects this kind; also its display name.
    pub fn field(self) -> &'static str {
        match self {
            Self::Exec => "exec",
            Self::Kill => "kill",
            Self::Resolution => "resolution",
            Self::Find => "find",
            Self::Screenshot => "screenshot",
            Self::Shell => "shell",
            Self::Shortcut => "shortcut",
        }
    }

    /// The primary field value of this kind in `entry`.
    fn primary(self, entry: &Entry) -> Option<&str> {
        match self {
            Self::Exec => entry.exec.as_deref(),
            Self::Kill => entry.kill.as_deref(),
            Self::Resolution => entry.resolution.as_deref(),
            Self::Find => entry.find.as_deref(),
            Self::Screenshot => entry.screenshot.as_deref(),
            Self::Shell => entry.shell.as_deref(),
            Self::Shortcut => entry.shortcut.as_deref(),
        }
    }

    /// The highest-priority kind whose primary field is present in `entry`.
    pub fn select(entry: &Entry) -> Option<(Self, &str)> {
        Self::PRIORITY
            .into_iter()
            .find_map(|k| k.primary(entry).map(|v| (k, v)))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Which processes a `kill` action terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillTarget {
    /// A single process id, from `"pid=<n>"`.
    Pid(u32),
    /// Every process whose image name matches exactly, ignoring case.
    Name(String),
}

impl KillTarget {
    /// Parse a kill spec. The `pid=` prefix is matched case-insensitively.
    pub fn parse(s: &str) -> Result<Self, ActionError> {
        let has_pid_prefix = s.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("pid="));
        if !has_pid_prefix {
            return Ok(Self::Name(s.to_string()));
        }
        parse_unsigned(&s[4..])
            .map(Self::Pid)
            .ok_or_else(|| ActionError::Invalid {
                kind: ActionKind::Kill,
                field: "pid",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for KillTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pid(pid) => write!(f, "pid={}", pid),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Screen area captured by a `screenshot` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The whole virtual desktop (all monitors).
    All,
    /// The foreground window, falling back to the primary monitor.
    Current,
    /// The primary monitor. Unrecognized region names land here.
    Primary,
}

impl Region {
    /// Parse a region name case-insensitively.
    pub fn from_spec(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else if s.eq_ignore_ascii_case("current") {
            Self::Current
        } else {
            Self::Primary
        }
    }
}

/// Where a `screenshot` action puts the captured image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveSpec {
    /// The system clipboard (absent `save`, or `"clipboard"`).
    Clipboard,
    /// Prompt for a file name (`"ask"`).
    Ask,
    /// Write `<prefix>-<timestamp>.png`.
    Prefix(String),
}

impl SaveSpec {
    /// Parse the `save` field.
    pub fn from_spec(s: Option<&str>) -> Self {
        match s {
            None => Self::Clipboard,
            Some(s) if s.eq_ignore_ascii_case("clipboard") => Self::Clipboard,
            Some(s) if s.eq_ignore_ascii_case("ask") => Self::Ask,
            Some(s) => Self::Prefix(s.to_string()),
        }
    }
}

/// Parse `"<width>x<height>"`, splitting on the first `x`.
///
/// Both halves must be unsigned integers.
pub fn parse_resolution(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once('x')?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    Some((w, h))
}

/// One runnable operation, selected from an [`Entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Launch a program (fire and forget).
    Exec {
        /// Command line, program path first.
        command: String,
        /// Initial show state of the new window.
        window: ShowMode,
    },
    /// Terminate processes.
    Kill(KillTarget),
    /// Change the display mode of a monitor (primary when `monitor` is absent).
    Resolution {
        /// Horizontal pixels.
        width: u32,
        /// Vertical pixels.
        height: u32,
        /// Device name of the target monitor.
        monitor: Option<String>,
    },
    /// Alternate matching windows between two show states.
    Find {
        /// Case-sensitive title substring.
        pattern: String,
        /// State applied on the hiding step.
        hide: ShowMode,
        /// State applied on the showing step.
        show: ShowMode,
    },
    /// Capture a screen region.
    Screenshot {
        /// Area to capture.
        region: Region,
        /// Destination of the image.
        save: SaveSpec,
    },
    /// Run a shell verb on a file.
    Shell {
        /// Verb such as `open` or `print`.
        verb: String,
        /// File the verb acts on.
        file: String,
        /// Extra parameters.
        args: Option<String>,
        /// Working directory.
        directory: Option<String>,
        /// Show state of any window the verb opens.
        window: ShowMode,
    },
    /// Create a `.lnk` shortcut file at `link` pointing to `target`.
    Shortcut {
        /// Path of the shortcut file.
        link: String,
        /// Path the shortcut points to.
        target: String,
        /// Arguments stored in the shortcut.
        args: Option<String>,
        /// Icon file.
        icon: Option<String>,
        /// Index of the icon within `icon`.
        icon_index: i32,
        /// Show state used when the shortcut is opened.
        window: ShowMode,
    },
}

impl Action {
    /// Select and build the action an entry describes.
    ///
    /// Primary fields are checked in [`ActionKind::PRIORITY`] order and the
    /// first one present wins; fields of lower-priority kinds are ignored even
    /// when present. Once a kind is selected, a missing or malformed argument
    /// is an error for that kind; selection never falls through to the next.
    pub fn from_entry(entry: &Entry) -> Result<Self, ActionError> {
        let (kind, value) = ActionKind::select(entry).ok_or(ActionError::NoAction)?;
        let window = || ShowMode::from_spec(entry.window.as_deref());
        let action = match kind {
            ActionKind::Exec => Self::Exec {
                command: value.to_string(),
                window: window(),
            },
            ActionKind::Kill => Self::Kill(KillTarget::parse(value)?),
            ActionKind::Resolution => {
                let (width, height) =
                    parse_resolution(value).ok_or_else(|| ActionError::Invalid {
                        kind,
                        field: "resolution",
                        value: value.to_string(),
                    })?;
                Self::Resolution {
                    width,
                    height,
                    monitor: entry.monitor.clone(),
                }
            }
            ActionKind::Find => Self::Find {
                pattern: value.to_string(),
                hide: entry
                    .hide
                    .as_deref()
                    .map_or(ShowMode::Hide, |s| ShowMode::from_spec(Some(s))),
                show: entry
                    .show
                    .as_deref()
                    .map_or(ShowMode::Restore, |s| ShowMode::from_spec(Some(s))),
            },
            ActionKind::Screenshot => Self::Screenshot {
                region: Region::from_spec(value),
                save: SaveSpec::from_spec(entry.save.as_deref()),
            },
            ActionKind::Shell => Self::Shell {
                verb: value.to_string(),
                file: entry.file.clone().ok_or(ActionError::MissingField {
                    kind,
                    field: "file",
                })?,
                args: entry.args.clone(),
                directory: entry.directory.clone(),
                window: window(),
            },
            ActionKind::Shortcut => Self::Shortcut {
                link: value.to_string(),
                target: entry.file.clone().ok_or(ActionError::MissingField {
                    kind,
                    field: "file",
                })?,
                args: entry.args.clone(),
                icon: entry.icon.clone(),
                icon_index: icon_index(entry.id),
                window: window(),
            },
        };
        Ok(action)
    }

    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Exec { .. } => ActionKind::Exec,
            Self::Kill(_) => ActionKind::Kill,
            Self::Resolution { .. } => ActionKind::Resolution,
            Self::Find { .. } => ActionKind::Find,
            Self::Screenshot { .. } => ActionKind::Screenshot,
            Self::Shell { .. } => ActionKind::Shell,
            Self::Shortcut { .. } => ActionKind::Shortcut,
        }
    }
}

/// Icon index from the `id` field; absent or not-a-number is 0.
fn icon_index(id: Option<f64>) -> i32 {
    match id {
        Some(v) if !v.is_nan() => v as i32,
        _ => 0,
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exec { command, .. } => write!(f, "Exec: {}", command),
            Self::Kill(target) => write!(f, "Kill: {}", target),
            Self::Resolution {
                width,
                height,
                monitor,
            } => match monitor {
                Some(m) => write!(f, "Resolution: {}x{} on {}", width, height, m),
                None => write!(f, "Resolution: {}x{}", width, height),
            },
            Self::Find { pattern, .. } => write!(f, "Find: {}", pattern),
            Self::Screenshot { region, save } => {
                write!(f, "Screenshot: {:?} -> {:?}", region, save)
            }
            Self::Shell {
                verb,
                file,
                args,
                directory,
                ..
            } => write!(
                f,
                "Shell: {} {} {} {}",
                verb,
                file,
                args.as_deref().unwrap_or(""),
                directory.as_deref().unwrap_or("")
            ),
            Self::Shortcut { link, target, .. } => {
                write!(f, "Shortcut: {}.lnk -> {}", link, target)
            }
        }
    }
}
