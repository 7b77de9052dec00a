//! Newtype trace-context identifiers.
//!
//! Trace and span identifiers are fixed-width byte arrays on the wire. Each is
//! a distinct newtype so a [`SpanId`] can never be passed where a [`TraceId`]
//! is expected. An all-zero identifier is the "empty" (invalid) value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for byte-array newtypes.
// Generates: struct (Copy), from_bytes(), as_bytes(), is_empty(), new_random(),
// lowercase hex Display.
// ---------------------------------------------------------------------------
macro_rules! bytes_id {
    (
        $(#[$attr:meta])*
        $name:ident, $len:literal
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Creates an identifier from raw bytes.
            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Generates a new random identifier.
            ///
            /// The bytes come from a v4 UUID, whose version nibble guarantees
            /// the result is never empty.
            pub fn new_random() -> Self {
                let mut bytes = [0u8; $len];
                bytes.copy_from_slice(&Uuid::new_v4().as_bytes()[..$len]);
                Self(bytes)
            }

            /// Returns the underlying bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns `true` if every byte is zero.
            pub fn is_empty(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                for b in &self.0 {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    };
}

bytes_id! {
    /// Identifies a trace: every span produced for one end-to-end request.
    TraceId, 16
}

bytes_id! {
    /// Identifies a single span within a trace.
    SpanId, 8
}
