use logging::LogBuffer;

/// Most recent log entries shown by the Log command.
pub(crate) const LOG_LINES: usize = 40;

/// The last `max` log entries, oldest first, one per line.
pub(crate) fn log_text(logs: &LogBuffer, max: usize) -> String {
    if logs.is_empty() {
        return "Log is empty".to_string();
    }
    logs.tail_text(max)
}

/// Hotkey listing for the List command.
pub(crate) fn list_text(lines: &[String]) -> String {
    if lines.is_empty() {
        return "No hotkeys registered".to_string();
    }
    lines.join("\r\n")
}

#[cfg(test)]
mod tests {
    use logging::LogEntry;

    use super::*;

    fn entry(level: &str, message: &str) -> LogEntry {
        LogEntry {
            level: level.into(),
            target: "fe".into(),
            message: message.into(),
        }
    }

    #[test]
    fn log_text_keeps_the_tail() {
        let logs = LogBuffer::new();
        assert_eq!(log_text(&logs, 2), "Log is empty");
        logs.push(entry("INFO", "one"));
        logs.push(entry("WARN", "two"));
        logs.push(entry("ERROR", "three"));
        assert_eq!(log_text(&logs, 2), "WARN  two\r\nERROR three");
    }

    #[test]
    fn list_text_joins_lines() {
        let lines = vec!["ctrl-f1, first".to_string(), "ctrl-f2".to_string()];
        assert_eq!(list_text(&lines), "ctrl-f1, first\r\nctrl-f2");
        assert_eq!(list_text(&[]), "No hotkeys registered");
    }
}
