//! Log payload: an ordered batch of log records.

use serde::{Deserialize, Serialize};

use crate::{Attributes, Timestamp, TraceId};

/// Severity of a [`LogRecord`], lowest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Fine-grained diagnostic detail.
    Trace,
    /// Diagnostic detail useful while debugging.
    Debug,
    /// Normal operational messages.
    #[default]
    Info,
    /// Unexpected conditions that did not cause a failure.
    Warn,
    /// A failed operation.
    Error,
    /// A failure the emitter cannot recover from.
    Fatal,
}

/// A single log entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the record was emitted.
    pub timestamp: Timestamp,
    /// Severity of the record.
    pub severity: Severity,
    /// Rendered log message.
    pub body: String,
    /// Trace the record was emitted under, if any.
    pub trace_id: Option<TraceId>,
    /// Structured key/value context attached to the record.
    pub attributes: Attributes,
}

impl LogRecord {
    /// Creates a record stamped now, not correlated with any trace.
    pub fn new(severity: Severity, body: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            severity,
            body: body.into(),
            trace_id: None,
            attributes: Attributes::new(),
        }
    }
}

batch! {
    /// A batch of log records, as handed from one pipeline component to the next.
    Logs { records: LogRecord }
}

impl Logs {
    /// Returns the number of log records in the batch.
    pub fn log_record_count(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_into_iter_yields_records_in_order() {
        let logs: Logs = ["boot", "ready"]
            .into_iter()
            .map(|b| LogRecord::new(Severity::Info, b))
            .collect();

        assert_eq!(logs.log_record_count(), 2);
        let bodies: Vec<String> = logs.into_iter().map(|r| r.body).collect();
        assert_eq!(bodies, ["boot", "ready"]);
    }
}
