use std::sync::Arc;

use config::{Action, ActionError, ActionKind, Entry, KillTarget, ShowMode};
use tracing::{debug, error, info, warn};

use crate::{
    Result, screenshot,
    ops::{KILL_EXIT_CODE, ShortcutSpec, SysOps},
    toggle::{Phase, Source, ToggleState},
};

/// Runs the single action an entry describes.
///
/// Errors never leave [`Dispatcher::dispatch`]: each is logged and dropped,
/// so one bad entry cannot abort a batch such as the `init` sequence.
#[derive(Clone)]
pub struct Dispatcher {
    /// Window system and process capabilities every handler calls into.
    ops: Arc<dyn SysOps>,
}

impl Dispatcher {
    /// Create a dispatcher over the given capabilities.
    pub fn new(ops: Arc<dyn SysOps>) -> Self {
        Self { ops }
    }

    /// Select and run the action of `entry`.
    pub fn dispatch(&self, entry: &Entry, source: Source, toggle: &mut ToggleState) {
        let action = match Action::from_entry(entry) {
            Ok(action) => action,
            Err(ActionError::NoAction) => {
                debug!("{:?}: entry has no action", source);
                return;
            }
            // A shortcut without a target contributes nothing, not even a log line.
            Err(ActionError::MissingField {
                kind: ActionKind::Shortcut,
                ..
            }) => return,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };
        info!("{}", action);
        if let Err(e) = self.run(&action, source, toggle) {
            error!("{} failed: {}", action.kind(), e);
        }
    }

    fn run(&self, action: &Action, source: Source, toggle: &mut ToggleState) -> Result<()> {
        match action {
            Action::Exec { command, window } => self.ops.launch(command, *window, false),
            Action::Kill(KillTarget::Pid(pid)) => self.ops.kill_pid(*pid, KILL_EXIT_CODE),
            Action::Kill(KillTarget::Name(name)) => {
                let n = self.ops.kill_name(name, KILL_EXIT_CODE)?;
                debug!("Terminated {} processes named {}", n, name);
                Ok(())
            }
            Action::Resolution {
                width,
                height,
                monitor,
            } => self
                .ops
                .change_display_mode(monitor.as_deref(), *width, *height),
            Action::Find {
                pattern,
                hide,
                show,
            } => {
                let mode = match toggle.advance(source) {
                    Phase::Hide => *hide,
                    Phase::Show => *show,
                };
                self.show_windows_by_title(pattern, mode);
                Ok(())
            }
            Action::Screenshot { region, save } => {
                screenshot::take(self.ops.as_ref(), *region, save).map(|_| ())
            }
            Action::Shell {
                verb,
                file,
                args,
                directory,
                window,
            } => self.ops.shell_execute(
                verb,
                file,
                args.as_deref(),
                directory.as_deref(),
                *window,
            ),
            Action::Shortcut {
                link,
                target,
                args,
                icon,
                icon_index,
                window,
            } => self.ops.create_shortcut(&ShortcutSpec {
                link: format!("{}.lnk", link),
                target: target.clone(),
                args: args.clone(),
                icon: icon.clone(),
                icon_index: *icon_index,
                show: *window,
            }),
        }
    }

    /// Apply `mode` to every other-process, titled window whose title
    /// contains `pattern`, ignoring case.
    fn show_windows_by_title(&self, pattern: &str, mode: ShowMode) {
        let needle = pattern.to_lowercase();
        let own = self.ops.own_pid();
        let mut hits = 0usize;
        for w in self.ops.list_windows() {
            if w.pid == own || w.title.is_empty() || !w.title.to_lowercase().contains(&needle) {
                continue;
            }
            hits += 1;
            if let Err(e) = self.ops.set_show_state(w.handle, mode) {
                warn!("Show {:?} as {}: {}", w.title, mode.as_str(), e);
            }
        }
        debug!("Find {:?}: {} windows set to {}", pattern, hits, mode.as_str());
    }
}
