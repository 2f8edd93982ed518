//! Fatal conditions the builder can detect ahead of a panic.
//!
//! Per spec.md §7, these represent logic bugs in the AST-producing front
//! end, not recoverable conditions: callers are expected to `.expect()` or
//! propagate rather than retry.

use thiserror::Error;

/// Errors [`crate::builder::BlockBuilder`] can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Attempted to `add` a `Declaration` whose parameter name already
    /// exists somewhere in the block's scope chain.
    #[error("duplicate variable '{name}' in this block's scope chain")]
    DuplicateVariable {
        /// The colliding name.
        name: String,
    },
}
