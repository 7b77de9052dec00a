//! The consumer port: the seam through which pipeline components hand
//! telemetry to the next component.

use async_trait::async_trait;

use crate::{BoxError, SignalData};

/// Accepts batches of one signal kind.
///
/// Implemented by exporters, processors and anything else that sits
/// downstream in a pipeline.
///
/// ## Failure contract
///
/// A consumer that processed only part of `data` returns the signal error for
/// `V` (e.g. [`crate::TracesError`]) carrying the items it did **not** process,
/// so the caller can requeue exactly those. Any other error means nothing in
/// the batch should be assumed delivered or retryable. Retry and back-off are
/// the caller's decision.
#[async_trait]
pub trait Consumer<V: SignalData>: Send + Sync {
    /// Processes one batch.
    async fn consume(&self, data: V) -> Result<(), BoxError>;
}
