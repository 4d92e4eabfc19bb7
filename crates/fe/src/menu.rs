use fe_engine::Trigger;

/// What a tray menu item does when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuCommand {
    /// Run the `systray` entry at this index.
    Entry(usize),
    /// Show the recent log.
    Log,
    /// Reload the configuration.
    Reload,
    /// Edit the configuration, then reload.
    Edit,
    /// Show the registered hotkeys.
    List,
    /// Quit.
    Exit,
}

impl MenuCommand {
    /// Session input for commands the session handles itself.
    pub(crate) fn trigger(self) -> Option<Trigger> {
        match self {
            Self::Entry(i) => Some(Trigger::Menu(i)),
            Self::Reload => Some(Trigger::Reload),
            Self::Edit => Some(Trigger::Edit),
            Self::Log | Self::List | Self::Exit => None,
        }
    }

    /// True when the menu must be rebuilt after the command ran.
    pub(crate) fn reloads(self) -> bool {
        matches!(self, Self::Reload | Self::Edit)
    }
}

/// Built-in commands, always below the user entries.
const FIXED: [(&str, MenuCommand); 5] = [
    ("Log", MenuCommand::Log),
    ("Reload", MenuCommand::Reload),
    ("Edit", MenuCommand::Edit),
    ("List", MenuCommand::List),
    ("Exit", MenuCommand::Exit),
];

/// One row of the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuRow {
    /// A selectable item.
    Item(String, MenuCommand),
    /// A divider.
    Separator,
}

/// Tray menu rows: user entries, a separator when there are any, then the
/// built-in commands.
pub(crate) fn layout(entries: &[String]) -> Vec<MenuRow> {
    let mut rows: Vec<MenuRow> = entries
        .iter()
        .enumerate()
        .map(|(i, label)| MenuRow::Item(label.clone(), MenuCommand::Entry(i)))
        .collect();
    if !rows.is_empty() {
        rows.push(MenuRow::Separator);
    }
    rows.extend(
        FIXED
            .iter()
            .map(|(label, cmd)| MenuRow::Item((*label).to_string(), *cmd)),
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_entries_come_first() {
        let rows = layout(&["Calc".to_string(), "Item 2".to_string()]);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], MenuRow::Item("Calc".into(), MenuCommand::Entry(0)));
        assert_eq!(rows[1], MenuRow::Item("Item 2".into(), MenuCommand::Entry(1)));
        assert_eq!(rows[2], MenuRow::Separator);
        assert_eq!(rows[7], MenuRow::Item("Exit".into(), MenuCommand::Exit));
    }

    #[test]
    fn no_separator_without_entries() {
        let rows = layout(&[]);
        assert_eq!(rows.len(), FIXED.len());
        assert!(!rows.contains(&MenuRow::Separator));
    }

    #[test]
    fn commands_map_to_session_triggers() {
        assert_eq!(MenuCommand::Entry(3).trigger(), Some(Trigger::Menu(3)));
        assert_eq!(MenuCommand::Edit.trigger(), Some(Trigger::Edit));
        assert_eq!(MenuCommand::Exit.trigger(), None);
        assert!(MenuCommand::Reload.reloads());
        assert!(!MenuCommand::Entry(0).reloads());
    }
}
