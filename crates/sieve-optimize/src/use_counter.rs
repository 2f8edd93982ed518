//! Counts references to a registered set of parameters.
//!
//! Only a `Parameter` visit can increment a count, and every `Parameter`
//! visit does — including one that sits on the left of an assignment.
//! Per spec.md §4.4/§9, the source's decrement-on-assignment path is
//! commented out, and this mirrors that exactly: there is deliberately no
//! code path here that *doesn't* count an assignment target. Free
//! variables (parameters not in `registered`, e.g. captured from an outer
//! block) are visited but never tallied.

use rustc_hash::{FxHashMap, FxHashSet};
use sieve_ast::{Node, Parameter, Rewriter};

use crate::param_key::ParamKey;

/// Per-symbol reference counts over a registered set of parameters.
pub struct UseCounter {
    registered: FxHashSet<ParamKey>,
    counts: FxHashMap<ParamKey, usize>,
}

impl UseCounter {
    #[must_use]
    pub fn new(registered: impl IntoIterator<Item = Parameter>) -> Self {
        Self {
            registered: registered.into_iter().map(ParamKey).collect(),
            counts: FxHashMap::default(),
        }
    }

    /// Visits `node` purely for its counting side effect; the traversal
    /// never rewrites anything, so the returned tree is discarded.
    pub fn visit_statement(&mut self, node: &Node) { let _ = self.visit(node); }

    #[must_use]
    pub fn count_of(&self, p: &Parameter) -> usize {
        self.counts.get(&ParamKey(p.clone())).copied().unwrap_or(0)
    }
}

impl Rewriter for UseCounter {
    fn visit_parameter(&mut self, node: &Node) -> Node {
        if let Node::Parameter(p) = node {
            let key = ParamKey(p.clone());
            if self.registered.contains(&key) {
                *self.counts.entry(key).or_insert(0) += 1;
            }
        }
        node.clone()
    }
}
