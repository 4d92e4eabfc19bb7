use std::sync::Arc;

use fe_engine::{APP_TITLE, Session, SessionOptions, Trigger};
use logging::LogBuffer;
use tracing::{debug, error, info, warn};
use win_ops::{Pump, SingleInstance, WinHotkeyApi, WinSysOps};

use crate::{
    menu::MenuCommand,
    tray::Tray,
    views::{self, LOG_LINES},
};

/// Name of the mutex marking the running instance.
const INSTANCE_MUTEX: &str = "Local\\fe-hotkey-runner";

/// Run one tray command.
fn run_command(cmd: MenuCommand, session: &mut Session, tray: &mut Tray, logs: &LogBuffer) {
    match cmd {
        MenuCommand::Log => {
            win_ops::show_text(APP_TITLE, &views::log_text(logs, LOG_LINES));
        }
        MenuCommand::List => {
            win_ops::show_text(APP_TITLE, &views::list_text(&session.describe()));
        }
        MenuCommand::Exit => win_ops::quit(),
        MenuCommand::Entry(_) | MenuCommand::Reload | MenuCommand::Edit => {
            if let Some(trigger) = cmd.trigger() {
                session.handle(trigger);
            }
            if cmd.reloads() {
                tray.rebuild(&session.menu_entries());
            }
        }
    }
}

/// Run the daemon until Exit. Returns the process exit status.
pub(crate) fn run(opts: SessionOptions, logs: LogBuffer) -> i32 {
    let _instance = match SingleInstance::acquire(INSTANCE_MUTEX) {
        Ok(Some(guard)) => guard,
        Ok(None) => {
            warn!("Another instance is already running");
            return 1;
        }
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    if let Err(e) = win_ops::init_com() {
        warn!("{}", e);
    }

    info!("Config {}", opts.config_path.display());
    let mut session = Session::new(
        opts,
        Arc::new(WinHotkeyApi::new()),
        Arc::new(WinSysOps::new()),
        logs.clone(),
    );
    match session.init() {
        Ok(report) => debug!("Registered hotkeys {:?}", report.registered),
        Err(e) => debug!("Started without a configuration: {}", e),
    }
    let Some(mut tray) = Tray::new(&session.menu_entries()) else {
        session.shutdown();
        return 1;
    };

    loop {
        match win_ops::pump_one() {
            Pump::Quit => break,
            Pump::Hotkey(id) => session.handle(Trigger::Hotkey(id)),
            Pump::Dispatched => {}
        }
        while let Some(cmd) = tray.next_command() {
            run_command(cmd, &mut session, &mut tray, &logs);
        }
    }
    session.shutdown();
    0
}
