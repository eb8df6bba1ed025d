//! Binder error types.

use thiserror::Error;

/// Errors reported by [`SheetBinder`](crate::SheetBinder) transitions.
///
/// Stack operations themselves are total; popping an empty stack is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The view asked to present a sheet at a depth that already presents a
    /// different one. The stack is left untouched.
    #[error("depth {index} already presents a sheet ({count} on the stack)")]
    Occupied {
        /// The binder's handle index.
        index: usize,
        /// Stack depth when the request was made.
        count: usize,
    },
}
