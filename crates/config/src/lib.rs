//! Configuration tree, action model and loader used by fe.
//!
//! The configuration is a JSON document with three ordered sections:
//! `hotkey` (global key bindings), `systray` (tray menu entries) and `init`
//! (entries run once at the first successful load). Every entry describes
//! exactly one [`Action`]; see [`Action::from_entry`] for the selection rules.

use std::{
    env,
    path::{Path, PathBuf},
};

mod action;
mod error;
mod loader;
mod raw;
mod types;

#[cfg(test)]
mod test_action;
#[cfg(test)]
mod test_parse;

pub use action::{Action, ActionKind, KillTarget, Region, SaveSpec, parse_resolution};
pub use error::{ActionError, Error, excerpt_at};
pub use loader::{load_from_path, load_from_str};
pub use types::{Config, Entry, ShowMode, TogglePolicy};

/// File name used when the executable path cannot be determined.
pub const FALLBACK_CONFIG_NAME: &str = "fe.json";

/// Determine the default config path: the running executable with its
/// extension replaced by `.json`.
///
/// Falls back to [`FALLBACK_CONFIG_NAME`] in the working directory when the
/// executable path is unavailable.
pub fn default_config_path() -> PathBuf {
    match env::current_exe() {
        Ok(exe) => exe.with_extension("json"),
        Err(e) => {
            tracing::warn!("current_exe failed: {}", e);
            PathBuf::from(FALLBACK_CONFIG_NAME)
        }
    }
}

/// Resolve the effective config path: `explicit` when provided, else the
/// default next to the executable.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(default_config_path, Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let p = resolve_config_path(Some(Path::new("C:/tools/keys.json")));
        assert_eq!(p, PathBuf::from("C:/tools/keys.json"));
    }

    #[test]
    fn default_path_has_json_extension() {
        let p = resolve_config_path(None);
        assert_eq!(p.extension().and_then(|e| e.to_str()), Some("json"));
    }
}
