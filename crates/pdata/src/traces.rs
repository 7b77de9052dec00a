//! Trace payload: an ordered batch of spans.

use serde::{Deserialize, Serialize};

use crate::{Attributes, SpanId, Timestamp, TraceId};

/// One unit of work within a trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Trace the span belongs to.
    pub trace_id: TraceId,
    /// Identifier of this span, unique within its trace.
    pub span_id: SpanId,
    /// Parent span, `None` for a root span.
    pub parent_span_id: Option<SpanId>,
    /// Operation name.
    pub name: String,
    /// When the operation started.
    pub start: Timestamp,
    /// When the operation ended.
    pub end: Timestamp,
    /// Key/value metadata describing the operation.
    pub attributes: Attributes,
}

impl Span {
    /// Creates a root span with fresh random identifiers and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            trace_id: TraceId::new_random(),
            span_id: SpanId::new_random(),
            parent_span_id: None,
            name: name.into(),
            start: now,
            end: now,
            attributes: Attributes::new(),
        }
    }
}

batch! {
    /// A batch of spans, as handed from one pipeline component to the next.
    Traces { spans: Span }
}

impl Traces {
    /// Returns the number of spans in the batch.
    pub fn span_count(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(names: &[&str]) -> Traces {
        names.iter().map(|n| Span::new(*n)).collect()
    }

    #[test]
    fn test_split_off_keeps_prefix_and_returns_rest() {
        let mut traces = spans(&["a", "b", "c", "d", "e"]);
        let rest = traces.split_off(2);

        let kept: Vec<_> = traces.iter().map(|s| s.name.as_str()).collect();
        let rejected: Vec<_> = rest.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(kept, ["a", "b"]);
        assert_eq!(rejected, ["c", "d", "e"]);
    }

    #[test]
    fn test_split_off_past_end_is_empty() {
        let mut traces = spans(&["a"]);
        let rest = traces.split_off(10);
        assert!(rest.is_empty());
        assert_eq!(traces.span_count(), 1);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut first = spans(&["a"]);
        first.merge(spans(&["b", "c"]));
        let names: Vec<_> = first.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_serde_round_trip_preserves_ids() {
        let traces = spans(&["checkout"]);
        let json = serde_json::to_string(&traces).unwrap();
        let decoded: Traces = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, traces);
    }
}
