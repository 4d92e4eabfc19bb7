//! Render `tracing` events into concise `(level, target, message)` triples.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// Human-readable message or rendered `key=value` pairs.
    pub message: String,
}

/// Extract a concise triple (level, target, message) from a tracing Event.
///
/// If the event carries a `message` field it is used, followed by any other
/// fields as `key=value`; otherwise only the fields are rendered.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    struct MsgVisitor {
        /// Captured `message` field, if present.
        msg: Option<String>,
        /// Accumulated non-message fields rendered as `key=value`.
        fields: String,
    }
    impl Visit for MsgVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.msg = Some(value.to_string());
            } else {
                let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
            }
        }
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.msg = Some(format!("{:?}", value));
            } else {
                let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
            }
        }
    }
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    let fields = vis.fields.trim_end();
    let message = match vis.msg {
        Some(m) if fields.is_empty() => m,
        Some(m) => format!("{} {}", m, fields),
        None => fields.to_string(),
    };
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{layer::SubscriberExt, registry};

    use crate::LogBuffer;

    #[test]
    fn message_is_followed_by_fields() {
        let buf = LogBuffer::new();
        tracing::subscriber::with_default(registry().with(buf.layer()), || {
            tracing::warn!(id = 3, "Register hotkey {} failed", "ctrl-f1");
            tracing::info!(path = "fe.json");
        });
        let entries = buf.snapshot();
        assert_eq!(entries[0].level, "WARN");
        assert_eq!(entries[0].message, "Register hotkey ctrl-f1 failed id=3");
        assert_eq!(entries[1].message, "path=\"fe.json\"");
    }
}
