//! Identity-keyed parameter substitution.
//!
//! Walks an expression, replacing registered [`Parameter`] references with
//! their mapped replacement and recursively expanding through the
//! replacement itself — so a substitution map chaining `y -> x + 1` then
//! inlining `x` also expands `x`'s own mapping. A parameter re-entering
//! its own expansion is a logic bug in the caller (spec.md §7), not a
//! recoverable condition, so it panics.
//!
//! L-value protection (spec.md §4.3): this does not reuse
//! [`sieve_ast::Rewriter`]'s default bottom-up traversal, which always
//! pre-visits every child before dispatch. Substitution needs the
//! opposite for mutating operators — it must decide *whether* to visit an
//! l-value child before visiting it — so `visit` is overridden wholesale
//! rather than composed from the default per-kind methods.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use sieve_ast::{BinaryData, Node, Parameter, Rewriter, same_node};

use crate::param_key::ParamKey;

/// `subMap: Parameter -> Expression`, consulted by identity.
pub struct SubstituteVariableVisitor<'a> {
    sub_map: &'a FxHashMap<ParamKey, Node>,
    active: FxHashSet<ParamKey>,
}

impl<'a> SubstituteVariableVisitor<'a> {
    #[must_use]
    pub fn new(sub_map: &'a FxHashMap<ParamKey, Node>) -> Self {
        Self { sub_map, active: FxHashSet::default() }
    }

    fn substitute_parameter(&mut self, p: &Parameter, node: &Node) -> Node {
        let key = ParamKey(p.clone());
        let Some(replacement) = self.sub_map.get(&key) else {
            return node.clone();
        };
        let replacement = replacement.clone();
        if !self.active.insert(ParamKey(p.clone())) {
            panic!("recursive expansion of substitution for parameter '{}'", p.name());
        }
        let result = self.visit(&replacement);
        let _ = self.active.remove(&key);
        result
    }
}

impl Rewriter for SubstituteVariableVisitor<'_> {
    fn visit(&mut self, node: &Node) -> Node {
        match node {
            Node::Parameter(p) => self.substitute_parameter(p, node),

            // An l-value operand is never substituted into: `t++` must
            // stay `t++`, never become e.g. `1++`.
            Node::Unary(u) if u.op.modifies_lvalue() => node.clone(),
            Node::Unary(u) => {
                let operand = self.visit(&u.operand);
                self.visit_unary(node, u, operand)
            }

            // An assignment's left operand is never substituted into. If
            // that left operand is itself scheduled for inlining, the
            // whole assignment is dead (its target is disappearing), so
            // only the right-hand side survives.
            Node::Binary(b) if b.op.modifies_lvalue() => self.visit_mutating_binary(node, b),
            Node::Binary(b) => {
                let left = self.visit(&b.left);
                let right = self.visit(&b.right);
                self.visit_binary(node, b, left, right)
            }

            Node::Constant(_) => self.visit_constant(node),
            Node::Ternary(t) => {
                let cond = self.visit(&t.cond);
                let then_branch = self.visit(&t.then_branch);
                let else_branch = self.visit(&t.else_branch);
                self.visit_ternary(node, t, cond, then_branch, else_branch)
            }
            Node::TypeBinary(tb) => {
                let expression = self.visit(&tb.expression);
                self.visit_type_binary(node, tb, expression)
            }
            Node::Member(m) => {
                let target = m.target.as_ref().map(|t| self.visit(t));
                self.visit_member(node, m, target)
            }
            Node::Declaration(d) => {
                let initializer = d.initializer.as_ref().map(|i| self.visit(i));
                self.visit_declaration(node, d, initializer)
            }
            Node::Return(r) => {
                let expression = r.expression.as_ref().map(|e| self.visit(e));
                self.visit_return(node, r, expression)
            }
            Node::Statement(s) => {
                let expression = self.visit(&s.expression);
                self.visit_statement(node, s, expression)
            }
            Node::ConditionalStmt(c) => {
                let arms = c.arms.iter().map(|a| self.visit(a)).collect();
                self.visit_conditional_stmt(node, c, arms)
            }
            Node::Block(b) => {
                let statements = b.statements.iter().map(|s| self.visit(s)).collect();
                self.visit_block(node, b, statements)
            }
            Node::Empty => self.visit_empty(node),
        }
    }
}

impl SubstituteVariableVisitor<'_> {
    fn visit_mutating_binary(&mut self, node: &Node, data: &Rc<BinaryData>) -> Node {
        if let Node::Parameter(p) = &data.left {
            if self.sub_map.contains_key(&ParamKey(p.clone())) {
                return self.visit(&data.right);
            }
        }
        let right = self.visit(&data.right);
        if same_node(&right, &data.right) {
            node.clone()
        } else {
            Node::binary(data.op, data.left.clone(), right, data.static_type.clone())
        }
    }
}
