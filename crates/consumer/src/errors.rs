//! Retryable signal errors: an error bound to the telemetry data it failed on.
//!
//! When a consumer cannot process all of a batch it returns one of
//! [`TracesError`], [`MetricsError`] or [`LogsError`], wrapping its own error
//! together with the subset of data that failed. Upstream code (retry queues,
//! fan-out routers) finds the signal error anywhere in the returned error's
//! `source()` chain, pulls the payload back out and decides what to do with it.
//!
//! ## Contract
//!
//! - `Display` is exactly the wrapped error's description. The payload is
//!   never rendered, not even by `Debug`.
//! - `source()` returns the wrapped error, so walking the chain reaches it and
//!   every cause below it.
//! - The payload type is fixed by the error type. A [`TracesError`] can only
//!   carry [`Traces`]; the set of payload types is closed by [`SignalData`].
//! - Construction never fails and has no side effects. Any value convertible
//!   into a [`BoxError`] is accepted as the cause, including bare strings and
//!   errors with an empty description.

use std::fmt;

use pdata::{Logs, Metrics, Signal, Traces};
use thiserror::Error;

/// The pipeline's generic error value.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

mod sealed {
    pub trait Sealed {}

    impl Sealed for pdata::Traces {}
    impl Sealed for pdata::Metrics {}
    impl Sealed for pdata::Logs {}
}

// ---------------------------------------------------------------------------
// Payload binding
// ---------------------------------------------------------------------------

/// A telemetry payload that can ride along with a [`RetryableSignalError`].
///
/// Sealed: implemented for exactly [`Traces`], [`Metrics`] and [`Logs`].
pub trait SignalData: sealed::Sealed + Clone + Send + Sync + 'static {
    /// Signal kind of this payload.
    const SIGNAL: Signal;

    /// The named error type that carries this payload.
    type Error: SignalError<Data = Self>;

    /// Number of top-level items in the payload. Only used for log fields.
    fn item_count(&self) -> usize;
}

impl SignalData for Traces {
    const SIGNAL: Signal = Signal::Traces;
    type Error = TracesError;

    fn item_count(&self) -> usize {
        self.span_count()
    }
}

impl SignalData for Metrics {
    const SIGNAL: Signal = Signal::Metrics;
    type Error = MetricsError;

    fn item_count(&self) -> usize {
        self.metric_count()
    }
}

impl SignalData for Logs {
    const SIGNAL: Signal = Signal::Logs;
    type Error = LogsError;

    fn item_count(&self) -> usize {
        self.log_record_count()
    }
}

// ---------------------------------------------------------------------------
// Generic wrapper
// ---------------------------------------------------------------------------

/// An error together with the payload of kind `V` that failed to be processed.
///
/// Both parts are fixed at construction; there is no mutation API. Only the
/// named forms ([`TracesError`] etc.) build one, so every payload handed
/// upstream is one [`find_signal_error`] recognises:
///
/// ```compile_fail
/// use consumer::RetryableSignalError;
///
/// let _ = RetryableSignalError::new("export failed", pdata::Traces::new());
/// ```
///
/// `Display` is the wrapped error's description and `source()` is the wrapped
/// error itself. Reporters that print the whole chain (e.g. `anyhow`'s `{:#}`)
/// therefore show that description twice.
pub struct RetryableSignalError<V: SignalData> {
    error: BoxError,
    data: V,
}

impl<V: SignalData> RetryableSignalError<V> {
    /// Binds `err` to the payload that failed.
    pub(crate) fn new(err: impl Into<BoxError>, data: V) -> Self {
        Self {
            error: err.into(),
            data,
        }
    }

    /// Returns the wrapped error.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.error
    }

    /// Returns the payload that failed to be processed or sent.
    pub fn data(&self) -> &V {
        &self.data
    }

    /// Consumes the error, returning the payload.
    pub fn into_data(self) -> V {
        self.data
    }

    /// Consumes the error, returning the wrapped error and the payload.
    pub fn into_parts(self) -> (BoxError, V) {
        (self.error, self.data)
    }
}

impl<V: SignalData> fmt::Debug for RetryableSignalError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryableSignalError")
            .field("error", &self.error)
            .field("signal", &V::SIGNAL)
            .field("items", &self.data.item_count())
            .finish()
    }
}

impl<V: SignalData> fmt::Display for RetryableSignalError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<V: SignalData> std::error::Error for RetryableSignalError<V> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.error)
    }
}

// ---------------------------------------------------------------------------
// Payload-carrying capability
// ---------------------------------------------------------------------------

/// Capability shared by the named signal errors, for code that is generic over
/// the signal kind.
pub trait SignalError: std::error::Error + Send + Sync + Sized + 'static {
    /// Payload type carried by this error.
    type Data: SignalData;

    /// Binds `err` to the payload that failed.
    fn new(err: impl Into<BoxError>, data: Self::Data) -> Self;

    /// Returns the wrapped error.
    fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static);

    /// Returns the payload that failed to be processed or sent.
    fn data(&self) -> &Self::Data;

    /// Consumes the error, returning the payload.
    fn into_data(self) -> Self::Data;

    /// Consumes the error, returning the wrapped error and the payload.
    fn into_parts(self) -> (BoxError, Self::Data);
}

// ---------------------------------------------------------------------------
// Named signal errors.
// Generates: newtype over RetryableSignalError<$data> with forwarded Display
// and source(), inherent accessors, the SignalError impl, and the legacy alias.
// ---------------------------------------------------------------------------
macro_rules! signal_error {
    (
        $(#[$attr:meta])*
        $name:ident($data:ty), legacy = $legacy:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Error)]
        #[error(transparent)]
        pub struct $name(RetryableSignalError<$data>);

        impl $name {
            /// Binds `err` to the payload that failed.
            pub fn new(err: impl Into<BoxError>, data: $data) -> Self {
                Self(RetryableSignalError::new(err, data))
            }

            /// Returns the wrapped error.
            pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
                self.0.cause()
            }

            /// Returns the payload that failed to be processed or sent.
            pub fn data(&self) -> &$data {
                self.0.data()
            }

            /// Consumes the error, returning the payload.
            pub fn into_data(self) -> $data {
                self.0.into_data()
            }

            /// Consumes the error, returning the wrapped error and the payload.
            pub fn into_parts(self) -> (BoxError, $data) {
                self.0.into_parts()
            }

            /// Legacy alias for [`data`](Self::data).
            #[deprecated(since = "0.1.0", note = "use `data` instead")]
            pub fn $legacy(&self) -> &$data {
                self.data()
            }
        }

        impl SignalError for $name {
            type Data = $data;

            fn new(err: impl Into<BoxError>, data: $data) -> Self {
                $name::new(err, data)
            }

            fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
                self.0.cause()
            }

            fn data(&self) -> &$data {
                self.0.data()
            }

            fn into_data(self) -> $data {
                self.0.into_data()
            }

            fn into_parts(self) -> (BoxError, $data) {
                self.0.into_parts()
            }
        }
    };
}

signal_error! {
    /// A failure that carries the [`Traces`] that were not processed or sent.
    TracesError(Traces), legacy = get_traces
}

signal_error! {
    /// A failure that carries the [`Metrics`] that were not processed or sent.
    MetricsError(Metrics), legacy = get_metrics
}

signal_error! {
    /// A failure that carries the [`Logs`] that were not processed or sent.
    LogsError(Logs), legacy = get_logs
}

// ---------------------------------------------------------------------------
// Constructors returning the generic error value
// ---------------------------------------------------------------------------

/// Wraps `err` and the spans that failed into a boxed [`TracesError`].
pub fn new_traces_error(err: impl Into<BoxError>, data: Traces) -> BoxError {
    Box::new(TracesError::new(err, data))
}

/// Wraps `err` and the metrics that failed into a boxed [`MetricsError`].
pub fn new_metrics_error(err: impl Into<BoxError>, data: Metrics) -> BoxError {
    Box::new(MetricsError::new(err, data))
}

/// Wraps `err` and the log records that failed into a boxed [`LogsError`].
pub fn new_logs_error(err: impl Into<BoxError>, data: Logs) -> BoxError {
    Box::new(LogsError::new(err, data))
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Returns the first `T` found walking `err` and its `source()` chain.
pub fn find_signal_error<'a, T: SignalError>(
    err: &'a (dyn std::error::Error + 'static),
) -> Option<&'a T> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = e.downcast_ref::<T>() {
            return Some(found);
        }
        current = e.source();
    }
    None
}

/// Returns the payload of kind `V` carried anywhere in `err`'s chain.
pub fn failed_data<'a, V: SignalData>(
    err: &'a (dyn std::error::Error + 'static),
) -> Option<&'a V> {
    find_signal_error::<V::Error>(err).map(SignalError::data)
}

/// Takes ownership of a top-level signal error.
///
/// Returns the untouched box when `err` is not a `T`; use
/// [`find_signal_error`] to look further down the chain.
pub fn downcast_signal_error<T: SignalError>(err: BoxError) -> Result<T, BoxError> {
    err.downcast::<T>().map(|boxed| *boxed)
}
