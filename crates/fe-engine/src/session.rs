//! Session lifecycle: load, register, dispatch, reload, edit, shutdown.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use config::{Config, ShowMode};
use logging::LogBuffer;
use tracing::{debug, error, info};

use crate::{
    Error, Result,
    deps::HotkeyApi,
    dispatch::Dispatcher,
    key_binding::{HotkeyRegistry, RegistrationReport},
    ops::SysOps,
    toggle::{Source, ToggleState},
};

/// Title used for user-visible notifications.
pub const APP_TITLE: &str = "fe";

/// Editor used by [`Session::edit`] when none is configured.
pub const DEFAULT_EDITOR: &str = "notepad.exe";

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No configuration installed; no hotkeys held.
    Unloaded,
    /// A configuration is installed and its hotkeys are registered.
    Loaded,
    /// Shut down; every hotkey released. Final.
    Terminated,
}

/// Inputs delivered by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The OS reported a hotkey press for a binding id.
    Hotkey(u32),
    /// A user tray entry was selected, by index into `systray`.
    Menu(usize),
    /// The Reload command.
    Reload,
    /// The Edit command.
    Edit,
}

/// Static session settings.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Configuration file.
    pub config_path: PathBuf,
    /// Editor command; the quoted config path is appended.
    pub editor: String,
}

impl SessionOptions {
    /// Options for `config_path` with the default editor.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            editor: DEFAULT_EDITOR.to_string(),
        }
    }
}

/// Owns everything that lives for one configuration: the tree, the hotkey
/// registry and the toggle state, plus the once-per-process `init` flag.
pub struct Session {
    /// Config path and editor.
    opts: SessionOptions,
    /// Capabilities used outside dispatch: opening the editor, notifications.
    ops: Arc<dyn SysOps>,
    /// Hotkey ids granted for the current tree.
    registry: HotkeyRegistry,
    /// Runs entries from every trigger source.
    dispatcher: Dispatcher,
    /// `find` alternation state; reset on reload.
    toggle: ToggleState,
    /// Recent log lines shown by the log view.
    logs: LogBuffer,
    /// The loaded tree, `None` until a load succeeds.
    config: Option<Arc<Config>>,
    /// Set once the `init` sequence has run.
    init_done: bool,
    /// Lifecycle phase.
    state: SessionState,
}

impl Session {
    /// Create an unloaded session.
    pub fn new(
        opts: SessionOptions,
        api: Arc<dyn HotkeyApi>,
        ops: Arc<dyn SysOps>,
        logs: LogBuffer,
    ) -> Self {
        Self {
            opts,
            registry: HotkeyRegistry::new(api),
            dispatcher: Dispatcher::new(ops.clone()),
            ops,
            toggle: ToggleState::default(),
            logs,
            config: None,
            init_done: false,
            state: SessionState::Unloaded,
        }
    }

    /// Load the configuration and register its hotkeys.
    ///
    /// The `init` sequence runs after the first successful load of the
    /// process only. A load failure is logged and notified, and leaves the
    /// session unloaded.
    pub fn init(&mut self) -> Result<RegistrationReport> {
        if self.state == SessionState::Terminated {
            return Err(Error::Msg("session terminated".into()));
        }
        let config = match config::load_from_path(&self.opts.config_path) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                let text = e.pretty();
                error!("{}", text);
                self.ops.notify_error(APP_TITLE, &text);
                return Err(e.into());
            }
        };
        self.toggle.set_policy(config.toggle);
        let report = self.registry.register_all(config.clone());
        self.config = Some(config.clone());
        self.state = SessionState::Loaded;

        if !self.init_done {
            self.init_done = true;
            for (i, entry) in config.init.iter().enumerate() {
                self.dispatcher
                    .dispatch(entry, Source::Init(i), &mut self.toggle);
            }
        }
        Ok(report)
    }

    /// Tear down and load again. The `init` sequence is not re-run.
    pub fn reload(&mut self) -> Result<RegistrationReport> {
        if self.state == SessionState::Terminated {
            return Err(Error::Msg("session terminated".into()));
        }
        self.teardown();
        self.logs.clear();
        info!("Reload {}", self.opts.config_path.display());
        self.init()
    }

    /// Open the configuration in the editor, wait for it to exit, then reload.
    pub fn edit(&mut self) -> Result<RegistrationReport> {
        let path = self.opts.config_path.clone();
        let command = format!("{} \"{}\"", self.opts.editor, path.display());
        info!("Edit: {}", command);
        if let Err(e) = self.ops.launch(&command, ShowMode::Normal, true) {
            error!("Editor failed: {}", e);
            self.ops
                .notify_error(APP_TITLE, &format!("CANNOT LOAD\n{}", path.display()));
        }
        self.reload()
    }

    /// Route one UI input.
    pub fn handle(&mut self, trigger: Trigger) {
        if self.state == SessionState::Terminated {
            debug!("{:?} ignored after shutdown", trigger);
            return;
        }
        match trigger {
            Trigger::Hotkey(id) => match self.registry.resolve(id) {
                Some(entry) => {
                    self.dispatcher
                        .dispatch(entry, Source::Hotkey(id), &mut self.toggle);
                }
                None => debug!("Hotkey {} has no entry", id),
            },
            Trigger::Menu(index) => {
                match self.config.as_ref().and_then(|c| c.systray.get(index)) {
                    Some(entry) => {
                        self.dispatcher
                            .dispatch(entry, Source::Menu(index), &mut self.toggle);
                    }
                    None => debug!("Menu item {} has no entry", index),
                }
            }
            Trigger::Reload => {
                if let Err(e) = self.reload() {
                    debug!("Reload left session unloaded: {}", e);
                }
            }
            Trigger::Edit => {
                if let Err(e) = self.edit() {
                    debug!("Edit left session unloaded: {}", e);
                }
            }
        }
    }

    /// Release every hotkey and drop the tree. Final.
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        self.teardown();
        self.state = SessionState::Terminated;
        info!("Session terminated");
    }

    fn teardown(&mut self) {
        self.registry.unregister_all();
        self.config = None;
        self.toggle.reset_bindings();
        if self.state == SessionState::Loaded {
            self.state = SessionState::Unloaded;
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Installed configuration tree.
    pub fn config(&self) -> Option<&Config> {
        self.config.as_deref()
    }

    /// Configuration file path.
    pub fn config_path(&self) -> &Path {
        &self.opts.config_path
    }

    /// The log sink cleared on reload.
    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    /// Labels for the user tray entries, in `systray` order.
    pub fn menu_entries(&self) -> Vec<String> {
        let Some(config) = self.config.as_ref() else {
            return Vec::new();
        };
        (0..config.systray.len())
            .filter_map(|i| config.menu_label(i))
            .collect()
    }

    /// Granted hotkey ids, ascending.
    pub fn registered_ids(&self) -> Vec<u32> {
        self.registry.registered_ids()
    }

    /// Hotkey listing lines for the List command.
    pub fn describe(&self) -> Vec<String> {
        self.registry.describe_lines()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
