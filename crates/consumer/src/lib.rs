//! Consumer port and partial-failure errors for telemetry pipelines.
//!
//! A pipeline is a chain of components, each handing batches of
//! [`pdata::Traces`], [`pdata::Metrics`] or [`pdata::Logs`] to the next
//! through the [`Consumer`] trait. When a component can only process part of a
//! batch it reports *which* part failed by returning a [`TracesError`],
//! [`MetricsError`] or [`LogsError`]: its own error plus the unprocessed data.
//! The caller can then retry, drop or re-route exactly that data without
//! knowing anything about the component that failed.
//!
//! ```
//! use consumer::{find_signal_error, new_traces_error, LogsError, TracesError};
//! use pdata::{Span, Traces};
//!
//! let failed: Traces = vec![Span::new("GET /"), Span::new("SELECT")].into();
//! let err = new_traces_error("export failed: connection reset", failed);
//!
//! assert_eq!(err.to_string(), "export failed: connection reset");
//! let traces_err = find_signal_error::<TracesError>(&*err).unwrap();
//! assert_eq!(traces_err.data().span_count(), 2);
//! assert!(find_signal_error::<LogsError>(&*err).is_none());
//! ```
//!
//! ## Architectural Layer
//!
//! **Port definitions + error values.** This crate has no I/O dependencies
//! and makes no retry decisions.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`errors`] | `RetryableSignalError`, the named signal errors, inspection helpers |
//! | [`consumers`] | The `Consumer` port trait |
//! | [`consumertest`] | Sinks and failing consumers for tests |

pub mod consumers;
pub mod consumertest;
pub mod errors;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use consumers::Consumer;
pub use errors::{
    downcast_signal_error, failed_data, find_signal_error, new_logs_error, new_metrics_error,
    new_traces_error, BoxError, LogsError, MetricsError, RetryableSignalError, SignalData,
    SignalError, TracesError,
};
