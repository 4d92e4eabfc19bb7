use tracing::{error, warn};
use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
};

use crate::menu::{self, MenuCommand, MenuRow};

static TRAY_ICON_PNG: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/tray-icon.png"));

fn tray_icon_image() -> Option<Icon> {
    match image::load_from_memory(TRAY_ICON_PNG) {
        Ok(im) => {
            let rgba = im.to_rgba8();
            let (w, h) = rgba.dimensions();
            Icon::from_rgba(rgba.to_vec(), w, h).ok()
        }
        Err(_) => None,
    }
}

/// Build the native menu for `entries`, returning it with the id of every item.
fn build_menu(entries: &[String]) -> (Menu, Vec<(MenuId, MenuCommand)>) {
    let menu = Menu::new();
    let mut commands = Vec::new();
    for row in menu::layout(entries) {
        let appended = match row {
            MenuRow::Item(label, cmd) => {
                let item = MenuItem::new(label, true, None);
                commands.push((item.id().clone(), cmd));
                menu.append(&item)
            }
            MenuRow::Separator => menu.append(&PredefinedMenuItem::separator()),
        };
        if let Err(e) = appended {
            warn!("Tray menu append failed: {}", e);
        }
    }
    (menu, commands)
}

/// The notification-area icon and its menu.
pub(crate) struct Tray {
    /// Kept alive for as long as the icon should show.
    icon: TrayIcon,
    /// Menu item ids and what they do.
    commands: Vec<(MenuId, MenuCommand)>,
}

impl Tray {
    /// Create the icon with a menu for `entries`.
    pub(crate) fn new(entries: &[String]) -> Option<Self> {
        let (menu, commands) = build_menu(entries);
        let mut builder = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(fe_engine::APP_TITLE);
        if let Some(icon) = tray_icon_image() {
            builder = builder.with_icon(icon);
        }
        match builder.build() {
            Ok(icon) => Some(Self { icon, commands }),
            Err(e) => {
                error!("Failed to create tray icon: {}", e);
                None
            }
        }
    }

    /// Replace the menu after the configuration changed.
    pub(crate) fn rebuild(&mut self, entries: &[String]) {
        let (menu, commands) = build_menu(entries);
        self.icon.set_menu(Some(Box::new(menu)));
        self.commands = commands;
    }

    /// Next selected menu command, if any is pending.
    pub(crate) fn next_command(&self) -> Option<MenuCommand> {
        while let Ok(ev) = MenuEvent::receiver().try_recv() {
            if let Some((_, cmd)) = self.commands.iter().find(|(id, _)| *id == ev.id) {
                return Some(*cmd);
            }
        }
        None
    }
}
