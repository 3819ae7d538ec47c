//! Container log drivers

use serde_json::{json, Value};

/// Log configuration attached to a container.
///
/// Only the platform-managed driver is modeled; it ships container output to
/// the orchestrator's log store under a stream prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDriver {
    stream_prefix: String,
}

impl LogDriver {
    /// Platform-managed logging with the given stream prefix
    pub fn managed(stream_prefix: impl Into<String>) -> Self {
        Self {
            stream_prefix: stream_prefix.into(),
        }
    }

    pub fn stream_prefix(&self) -> &str {
        &self.stream_prefix
    }

    pub(crate) fn render(&self) -> Value {
        json!({
            "driver": "managed",
            "options": {
                "streamPrefix": self.stream_prefix,
            },
        })
    }
}
