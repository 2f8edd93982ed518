//! The always-truth oracle.
//!
//! Classifies an expression that has already been visited by
//! [`crate::optimize::OptimizeVisitor`] as definitely true, definitely
//! false, or unknown. Deliberately narrow, per spec.md §9: it recognizes
//! only the four canonical forms (unboxed/boxed `true`/`false`) and never
//! attempts to evaluate an arbitrary boolean-typed subtree — the bottom-up
//! traversal guarantees anything foldable is already folded by the time it
//! is visible here (e.g. `1 == 1` has already become the literal `true`).

use sieve_ast::{ConstantValue, Node};

/// The result of classifying an expression's truth value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    #[must_use]
    pub const fn is_true(self) -> bool { matches!(self, Self::True) }

    #[must_use]
    pub const fn is_false(self) -> bool { matches!(self, Self::False) }
}

/// `always(e)`.
#[must_use]
pub fn always(expr: &Node) -> Truth {
    match expr {
        Node::Constant(c) => match c.value {
            ConstantValue::Bool(true) => Truth::True,
            ConstantValue::Bool(false) => Truth::False,
            _ => Truth::Unknown,
        },
        _ => match expr.as_boxed_bool() {
            Some(true) => Truth::True,
            Some(false) => Truth::False,
            None => Truth::Unknown,
        },
    }
}
