//! The common-subexpression reuse table's hashable key.
//!
//! `expressionForReuse` maps a *normalized initializer* (spec.md §3) to the
//! final `Declaration` that binds it, so `BlockBuilder::append` can share a
//! slot across structurally-equal expressions instead of re-declaring one.
//! Keying a `FxHashMap` by tree shape needs a hash consistent with
//! [`sieve_ast::structural_eq`] — `derive(Hash)` is unavailable on `Node`
//! itself (it would hash `Rc<ParameterData>` contents, the same by-value
//! bug `structural_eq`'s doc comment warns against for equality), so
//! `ReuseKey` walks the tree by hand, hashing `Parameter` by pointer
//! identity and `Constant` by value, exactly mirroring `structural_eq`'s
//! own recursion.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use sieve_ast::{ConstantValue, Node, structural_eq};

#[derive(Debug, Clone)]
pub struct ReuseKey(pub Node);

impl PartialEq for ReuseKey {
    fn eq(&self, other: &Self) -> bool { structural_eq(&self.0, &other.0) }
}

impl Eq for ReuseKey {}

impl Hash for ReuseKey {
    fn hash<H: Hasher>(&self, state: &mut H) { hash_node(&self.0, state); }
}

fn hash_node<H: Hasher>(node: &Node, state: &mut H) {
    std::mem::discriminant(node).hash(state);
    match node {
        Node::Constant(c) => {
            hash_constant_value(&c.value, state);
            c.static_type.hash(state);
        }
        Node::Parameter(p) => (Rc::as_ptr(&p.0) as usize).hash(state),
        Node::Unary(u) => {
            u.op.hash(state);
            u.static_type.hash(state);
            hash_node(&u.operand, state);
        }
        Node::Binary(b) => {
            b.op.hash(state);
            b.static_type.hash(state);
            hash_node(&b.left, state);
            hash_node(&b.right, state);
        }
        Node::Ternary(t) => {
            t.static_type.hash(state);
            hash_node(&t.cond, state);
            hash_node(&t.then_branch, state);
            hash_node(&t.else_branch, state);
        }
        Node::TypeBinary(tb) => {
            tb.op.hash(state);
            tb.target_type.hash(state);
            hash_node(&tb.expression, state);
        }
        Node::Member(m) => {
            m.declaring_type.hash(state);
            m.name.hash(state);
            if let Some(target) = &m.target {
                hash_node(target, state);
            }
        }
        Node::Declaration(d) => {
            d.modifiers.hash(state);
            (Rc::as_ptr(&d.parameter.0) as usize).hash(state);
            if let Some(init) = &d.initializer {
                hash_node(init, state);
            }
        }
        Node::Return(r) => {
            if let Some(e) = &r.expression {
                hash_node(e, state);
            }
        }
        Node::Statement(s) => hash_node(&s.expression, state),
        Node::ConditionalStmt(c) => {
            for arm in &c.arms {
                hash_node(arm, state);
            }
        }
        Node::Block(b) => {
            for stmt in &b.statements {
                hash_node(stmt, state);
            }
        }
        Node::Empty => {}
    }
}

fn hash_constant_value<H: Hasher>(value: &ConstantValue, state: &mut H) {
    match value {
        ConstantValue::Null => 0u8.hash(state),
        ConstantValue::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        ConstantValue::Int(i) => {
            2u8.hash(state);
            i.hash(state);
        }
        ConstantValue::Float(v) => {
            3u8.hash(state);
            v.to_bits().hash(state);
        }
        ConstantValue::Str(s) => {
            4u8.hash(state);
            s.hash(state);
        }
    }
}
