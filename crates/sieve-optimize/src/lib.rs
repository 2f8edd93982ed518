//! Algebraic rewrites and substitution for the Sieve expression-tree
//! optimizer.
//!
//! This crate implements the peephole side of spec.md's core: the
//! [`always`] truth oracle, the bottom-up [`OptimizeVisitor`], the
//! l-value-aware [`SubstituteVariableVisitor`], and the identity-keyed
//! [`UseCounter`]. It knows nothing about name allocation, scoping, or the
//! reuse table — that's `sieve-block`'s job, which drives these visitors
//! in the two-pass protocol spec.md §4.5 describes.

pub mod optimize;
pub mod param_key;
pub mod substitute;
pub mod truth;
pub mod use_counter;

pub use optimize::OptimizeVisitor;
pub use param_key::ParamKey;
pub use substitute::SubstituteVariableVisitor;
pub use truth::{Truth, always};
pub use use_counter::UseCounter;
