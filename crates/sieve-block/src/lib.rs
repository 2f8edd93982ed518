//! Incremental statement-block builder for the Sieve expression-tree
//! optimizer.
//!
//! [`BlockBuilder`] is the front end's scope-tracking companion to
//! `sieve-optimize`: it names temporaries, shares structurally-identical
//! subexpressions through a reuse table, and — on [`BlockBuilder::to_block`]
//! — inlines single-use declarations and re-runs the peephole optimizer.

pub mod builder;
pub mod error;
pub mod reuse;

pub use builder::{BlockBuilder, SharedBuilder, normalized_initializer};
pub use error::BlockError;
