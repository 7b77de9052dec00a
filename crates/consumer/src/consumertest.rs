//! Test doubles implementing [`Consumer`].
//!
//! - [`Sink`] records everything it is given.
//! - [`ErrConsumer`] rejects everything, returning the whole batch.
//! - [`PartialConsumer`] accepts a prefix of each batch and rejects the rest.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pdata::{Logs, Metrics, Traces};

use crate::{BoxError, Consumer, SignalData, SignalError};

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Records every batch it consumes, in arrival order.
#[derive(Debug)]
pub struct Sink<V> {
    batches: Mutex<Vec<V>>,
}

impl<V> Default for Sink<V> {
    fn default() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
        }
    }
}

impl<V: SignalData> Sink<V> {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every batch consumed so far.
    pub fn all(&self) -> Vec<V> {
        self.lock().clone()
    }

    /// Returns the number of batches consumed.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been consumed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the total number of items across every batch.
    pub fn item_count(&self) -> usize {
        self.lock().iter().map(SignalData::item_count).sum()
    }

    /// Forgets everything consumed so far.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<V>> {
        self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<V: SignalData> Consumer<V> for Sink<V> {
    async fn consume(&self, data: V) -> Result<(), BoxError> {
        tracing::debug!(
            signal = %V::SIGNAL,
            items = data.item_count(),
            "sink accepted batch"
        );
        self.lock().push(data);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ErrConsumer
// ---------------------------------------------------------------------------

/// Rejects every batch, returning it whole inside the signal error for `V`.
#[derive(Debug)]
pub struct ErrConsumer<V> {
    message: String,
    _signal: PhantomData<fn() -> V>,
}

impl<V: SignalData> ErrConsumer<V> {
    /// Creates a consumer that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            _signal: PhantomData,
        }
    }
}

#[async_trait]
impl<V: SignalData> Consumer<V> for ErrConsumer<V> {
    async fn consume(&self, data: V) -> Result<(), BoxError> {
        tracing::debug!(
            signal = %V::SIGNAL,
            items = data.item_count(),
            error = %self.message,
            "rejecting batch"
        );
        Err(<V::Error as SignalError>::new(self.message.clone(), data).into())
    }
}

// ---------------------------------------------------------------------------
// PartialConsumer
// ---------------------------------------------------------------------------

/// Payloads [`PartialConsumer`] knows how to cut in two.
pub trait SplitBatch: SignalData {
    /// Keeps items `[0, at)` in `self` and returns the rest.
    fn split_at_item(&mut self, at: usize) -> Self;
}

impl SplitBatch for Traces {
    fn split_at_item(&mut self, at: usize) -> Self {
        self.split_off(at)
    }
}

impl SplitBatch for Metrics {
    fn split_at_item(&mut self, at: usize) -> Self {
        self.split_off(at)
    }
}

impl SplitBatch for Logs {
    fn split_at_item(&mut self, at: usize) -> Self {
        self.split_off(at)
    }
}

/// Accepts at most `limit` items per batch into an inner [`Sink`] and rejects
/// the remainder as the signal error for `V`.
#[derive(Debug)]
pub struct PartialConsumer<V> {
    limit: usize,
    message: String,
    sink: Sink<V>,
}

impl<V: SplitBatch> PartialConsumer<V> {
    /// Creates a consumer that keeps `limit` items per batch and fails the
    /// rest with `message`.
    pub fn new(limit: usize, message: impl Into<String>) -> Self {
        Self {
            limit,
            message: message.into(),
            sink: Sink::new(),
        }
    }

    /// The sink holding every accepted prefix.
    pub fn sink(&self) -> &Sink<V> {
        &self.sink
    }
}

#[async_trait]
impl<V: SplitBatch> Consumer<V> for PartialConsumer<V> {
    async fn consume(&self, mut data: V) -> Result<(), BoxError> {
        let rejected = data.split_at_item(self.limit);
        if data.item_count() > 0 {
            self.sink.consume(data).await?;
        }
        if rejected.item_count() == 0 {
            return Ok(());
        }

        tracing::debug!(
            signal = %V::SIGNAL,
            items = rejected.item_count(),
            error = %self.message,
            "rejecting batch remainder"
        );
        Err(<V::Error as SignalError>::new(self.message.clone(), rejected).into())
    }
}

#[cfg(test)]
mod tests {
    use pdata::{LogRecord, Severity, Span};

    use super::*;
    use crate::{failed_data, LogsError, TracesError};

    fn traces(n: usize) -> Traces {
        (0..n).map(|i| Span::new(format!("span-{i}"))).collect()
    }

    #[tokio::test]
    async fn test_sink_records_batches_in_order() {
        let sink = Sink::<Traces>::new();
        sink.consume(traces(2)).await.unwrap();
        sink.consume(traces(3)).await.unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.item_count(), 5);
        let counts: Vec<_> = sink.all().iter().map(Traces::span_count).collect();
        assert_eq!(counts, [2, 3]);

        sink.reset();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_err_consumer_returns_whole_batch() {
        let logs: Logs = vec![LogRecord::new(Severity::Error, "disk full")].into();
        let consumer = ErrConsumer::<Logs>::new("backend unavailable");

        let err = consumer.consume(logs.clone()).await.unwrap_err();

        assert_eq!(err.to_string(), "backend unavailable");
        assert!(err.downcast_ref::<LogsError>().is_some());
        assert_eq!(failed_data::<Logs>(&*err), Some(&logs));
    }

    #[tokio::test]
    async fn test_partial_consumer_splits_batch() {
        let batch = traces(5);
        let consumer = PartialConsumer::<Traces>::new(2, "queue full");

        let err = consumer.consume(batch.clone()).await.unwrap_err();

        assert_eq!(err.to_string(), "queue full");
        let rejected = err.downcast_ref::<TracesError>().unwrap().data();
        assert_eq!(rejected.as_slice(), &batch.as_slice()[2..]);
        assert_eq!(consumer.sink().all(), vec![Traces::from(batch.as_slice()[..2].to_vec())]);
    }

    #[tokio::test]
    async fn test_partial_consumer_within_limit_succeeds() {
        let consumer = PartialConsumer::<Traces>::new(10, "queue full");
        consumer.consume(traces(3)).await.unwrap();
        assert_eq!(consumer.sink().item_count(), 3);
    }

    #[tokio::test]
    async fn test_partial_consumer_with_zero_limit_rejects_everything() {
        let consumer = PartialConsumer::<Metrics>::new(0, "throttled");
        let batch: Metrics = vec![pdata::Metric::new("cpu", Vec::new())].into();

        let err = consumer.consume(batch.clone()).await.unwrap_err();

        assert!(consumer.sink().is_empty());
        assert_eq!(failed_data::<Metrics>(&*err), Some(&batch));
    }
}
