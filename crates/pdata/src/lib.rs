//! Telemetry payload value types.
//!
//! This crate holds the three signal payloads a consumer pipeline moves
//! around: [`Traces`], [`Metrics`] and [`Logs`]. Each is an ordered batch of
//! items with the same small set of batch operations (push, merge, split).
//! Consumers treat them as opaque values; nothing here knows how a batch was
//! received or where it is going.
//!
//! ## Architectural Layer
//!
//! **Value types only.** This crate has no I/O dependencies.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `TraceId`, `SpanId` |
//! | [`types`] | `Signal`, `Timestamp`, `Attributes` |
//! | [`traces`] | `Traces`, `Span` |
//! | [`metrics`] | `Metrics`, `Metric`, `NumberDataPoint` |
//! | [`logs`] | `Logs`, `LogRecord`, `Severity` |

// ---------------------------------------------------------------------------
// Macro for ordered batch types.
// Generates: new(), push(), len(), is_empty(), iter(), as_slice(), merge(),
// split_off(), From<Vec<_>>, FromIterator, IntoIterator.
// ---------------------------------------------------------------------------
macro_rules! batch {
    (
        $(#[$attr:meta])*
        $name:ident { $field:ident: $item:ty }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $field: Vec<$item>,
        }

        impl $name {
            /// Creates an empty batch.
            pub fn new() -> Self {
                Self::default()
            }

            /// Appends one item to the end of the batch.
            pub fn push(&mut self, item: $item) {
                self.$field.push(item);
            }

            /// Returns the number of top-level items in the batch.
            pub fn len(&self) -> usize {
                self.$field.len()
            }

            /// Returns `true` if the batch holds no items.
            pub fn is_empty(&self) -> bool {
                self.$field.is_empty()
            }

            /// Iterates over the items in order.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.$field.iter()
            }

            /// Returns the items as a slice.
            pub fn as_slice(&self) -> &[$item] {
                &self.$field
            }

            /// Moves every item of `other` onto the end of this batch.
            pub fn merge(&mut self, other: $name) {
                self.$field.extend(other.$field);
            }

            /// Splits the batch at `at`.
            ///
            /// `self` keeps items `[0, at)` and the returned batch holds
            /// `[at, len)`. An `at` past the end is clamped, yielding an empty
            /// batch.
            #[must_use]
            pub fn split_off(&mut self, at: usize) -> $name {
                let at = at.min(self.$field.len());
                Self {
                    $field: self.$field.split_off(at),
                }
            }
        }

        impl From<Vec<$item>> for $name {
            fn from($field: Vec<$item>) -> Self {
                Self { $field }
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self {
                    $field: iter.into_iter().collect(),
                }
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.$field.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.$field.iter()
            }
        }
    };
}

pub mod identifiers;
pub mod logs;
pub mod metrics;
pub mod traces;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use identifiers::{SpanId, TraceId};
pub use logs::{LogRecord, Logs, Severity};
pub use metrics::{Metric, Metrics, NumberDataPoint};
pub use traces::{Span, Traces};
pub use types::{Attributes, Signal, Timestamp};
