//! NDJSON event sink
//!
//! Outputs audit events as NDJSON on stdout for CI/automation consumption
//! (`--json` mode). One JSON object per line.

use std::io::{self, Write};
use std::sync::Mutex;

use super::{AuditEvent, AuditSink};

/// Event sink that writes NDJSON events
pub struct NdjsonSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl NdjsonSink {
    /// Create a sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write an arbitrary line (used by commands for summary events)
    pub fn line(&self, value: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
            let _ = writer.flush();
        }
    }
}

impl AuditSink for NdjsonSink {
    fn emit(&self, event: &AuditEvent) {
        self.line(serde_json::json!({
            "event": event.kind(),
            "data": event.payload(),
        }));
    }
}
