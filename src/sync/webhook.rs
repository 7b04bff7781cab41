//! Spreadsheet webhook sink
//!
//! POSTs each audit event to a spreadsheet script endpoint as
//! `{"type": ..., "data": ..., "timestamp": ...}`. The receiving script
//! appends every event to a raw audit sheet and maintains per-entity
//! sheets. Delivery is best-effort with a short timeout; failures are
//! logged to stderr and swallowed.

use std::time::Duration;

use chrono::Utc;

use super::{AuditEvent, AuditSink};

/// Webhook sink toward the audit spreadsheet
pub struct SheetWebhook {
    url: String,
    client: reqwest::blocking::Client,
}

impl SheetWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            url: url.into(),
            client,
        }
    }

    /// Body posted for an event (separated out so the shape is testable
    /// without a network)
    pub fn request_body(event: &AuditEvent) -> serde_json::Value {
        serde_json::json!({
            "type": event.kind(),
            "data": event.payload(),
            "timestamp": Utc::now().to_rfc3339(),
        })
    }
}

impl AuditSink for SheetWebhook {
    fn emit(&self, event: &AuditEvent) {
        let body = Self::request_body(event);
        if let Err(e) = self.client.post(&self.url).json(&body).send() {
            eprintln!("warning: audit webhook unreachable: {e}");
        }
    }
}
