//! In-memory log ring backing the log window.
//!
//! A [`LogBuffer`] is a cheap handle; clones share the same storage. Install
//! [`LogBuffer::layer`] in the subscriber and every event that passes the
//! filter is recorded. The Log command reads [`LogBuffer::tail_text`], and a config
//! reload calls [`LogBuffer::clear`].

use std::{collections::VecDeque, fmt::Write as _, sync::Arc};

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::render_event;

/// Maximum number of retained entries; the oldest are dropped first.
pub const MAX_ENTRIES: usize = 5000;

/// One recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Level name as rendered by tracing (`ERROR`, `WARN`, ...).
    pub level: String,
    /// Event target.
    pub target: String,
    /// Rendered message.
    pub message: String,
}

impl LogEntry {
    /// Error and warning lines are highlighted in the log window.
    pub fn is_error(&self) -> bool {
        matches!(self.level.as_str(), "ERROR" | "WARN")
    }
}

/// Shared bounded buffer of log entries.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    /// Entries in arrival order.
    inner: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&self, entry: LogEntry) {
        let mut buf = self.inner.lock();
        while buf.len() >= MAX_ENTRIES {
            buf.pop_front();
        }
        buf.push_back(entry);
    }

    /// Copy of all entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.inner.lock().iter().cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// The newest `max` entries, oldest first, rendered as `LEVEL message`
    /// lines joined by CRLF, the line ending native message boxes expect.
    pub fn tail_text(&self, max: usize) -> String {
        let buf = self.inner.lock();
        let start = buf.len().saturating_sub(max);
        let mut out = String::new();
        for (i, e) in buf.iter().skip(start).enumerate() {
            if i > 0 {
                out.push_str("\r\n");
            }
            let _ignored = write!(out, "{:<5} {}", e.level, e.message);
        }
        out
    }

    /// Tracing layer recording into this buffer.
    pub fn layer(&self) -> BufferLayer {
        BufferLayer { buf: self.clone() }
    }
}

/// Tracing layer that records events into a [`LogBuffer`].
pub struct BufferLayer {
    /// Destination buffer.
    buf: LogBuffer,
}

impl<S> Layer<S> for BufferLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let r = render_event(event);
        self.buf.push(LogEntry {
            level: r.level,
            target: r.target,
            message: r.message,
        });
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{layer::SubscriberExt, registry};

    use super::*;

    #[test]
    fn layer_records_events() {
        let buf = LogBuffer::new();
        let subscriber = registry().with(buf.layer());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Exec: {}", "notepad.exe");
            tracing::warn!(id = 3, "Register hotkey failed");
        });
        let entries = buf.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "INFO");
        assert_eq!(entries[0].message, "Exec: notepad.exe");
        assert!(!entries[0].is_error());
        assert_eq!(entries[1].message, "Register hotkey failed id=3");
        assert!(entries[1].is_error());
        assert_eq!(
            buf.tail_text(MAX_ENTRIES),
            "INFO  Exec: notepad.exe\r\nWARN  Register hotkey failed id=3"
        );
        assert_eq!(buf.tail_text(1), "WARN  Register hotkey failed id=3");
        assert_eq!(buf.tail_text(0), "");
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let buf = LogBuffer::new();
        for i in 0..MAX_ENTRIES + 10 {
            buf.push(LogEntry {
                level: "INFO".into(),
                target: "t".into(),
                message: i.to_string(),
            });
        }
        assert_eq!(buf.len(), MAX_ENTRIES);
        assert_eq!(buf.snapshot()[0].message, "10");
    }

    #[test]
    fn clear_empties_shared_storage() {
        let buf = LogBuffer::new();
        let other = buf.clone();
        other.push(LogEntry {
            level: "ERROR".into(),
            target: "t".into(),
            message: "boom".into(),
        });
        assert!(!buf.is_empty());
        buf.clear();
        assert!(other.is_empty());
        assert_eq!(other.tail_text(10), "");
    }
}
