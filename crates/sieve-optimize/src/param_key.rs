//! Identity-keyed wrapper for hashing [`Parameter`]s.
//!
//! Substitution maps and use-count tables are keyed by parameter identity,
//! not name: `BlockBuilder` alpha-renames by minting fresh `Parameter`s
//! that can legitimately reuse a base name (`t`, `t0`, `t1`, ...), so a
//! name-keyed map would silently merge two distinct bindings. `ParamKey`
//! hashes and compares by the underlying `Rc`'s address.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use sieve_ast::Parameter;

#[derive(Debug, Clone)]
pub struct ParamKey(pub Parameter);

impl PartialEq for ParamKey {
    fn eq(&self, other: &Self) -> bool { self.0.is_same(&other.0) }
}

impl Eq for ParamKey {}

impl Hash for ParamKey {
    fn hash<H: Hasher>(&self, state: &mut H) { (Rc::as_ptr(&self.0.0) as usize).hash(state); }
}
