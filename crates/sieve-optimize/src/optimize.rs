//! Peephole rewrites over unary/binary/ternary/conversion nodes and
//! dead-branch elimination over conditional statements.
//!
//! `OptimizeVisitor` is bottom-up (spec.md §4.2): [`sieve_ast::Rewriter`]'s
//! default traversal already visits children before dispatching to the
//! per-kind method, so every rewrite below only ever inspects
//! already-optimized children.

use std::rc::Rc;

use sieve_ast::{
    BinaryData, BinaryOpKind, ConditionalStmtData, ConstantValue, Node, Rewriter, TernaryData,
    UnaryData, UnaryOpKind, same_node, structural_eq,
};

use crate::truth::{Truth, always};

/// `reduce(op, lhs, rhs)`: the one-sided constant-folding step spec.md
/// §4.2 applies to `AndAlso`/`OrElse`/`Equal`/`NotEqual`, with `lhs` the
/// side inspected for a known truth value.
fn reduce(op: BinaryOpKind, lhs: &Node, rhs: &Node) -> Option<Node> {
    match op {
        BinaryOpKind::AndAlso => match always(lhs) {
            Truth::True => Some(rhs.clone()),
            Truth::False => Some(Node::constant_bool(false)),
            Truth::Unknown => None,
        },
        BinaryOpKind::OrElse => match always(lhs) {
            Truth::True => Some(Node::constant_bool(true)),
            Truth::False => Some(rhs.clone()),
            Truth::Unknown => None,
        },
        BinaryOpKind::Equal => {
            if rhs.is_constant_null() && lhs.static_type().is_some_and(|t| t.is_primitive()) {
                return Some(Node::constant_bool(false));
            }
            match always(lhs) {
                Truth::True => Some(rhs.clone()),
                Truth::False => Some(Node::not(rhs.clone())),
                Truth::Unknown => None,
            }
        }
        BinaryOpKind::NotEqual => {
            if rhs.is_constant_null() && lhs.static_type().is_some_and(|t| t.is_primitive()) {
                return Some(Node::constant_bool(true));
            }
            match always(lhs) {
                Truth::True => Some(Node::not(rhs.clone())),
                Truth::False => Some(rhs.clone()),
                Truth::Unknown => None,
            }
        }
        _ => None,
    }
}

fn rebuild_binary(node: &Node, data: &Rc<BinaryData>, left: Node, right: Node) -> Node {
    if same_node(&left, &data.left) && same_node(&right, &data.right) {
        node.clone()
    } else {
        Node::binary(data.op, left, right, data.static_type.clone())
    }
}

/// The bottom-up peephole rewriter. Holds no state of its own: every
/// rewrite is a pure function of already-visited children, so a single
/// unit value can be reused across an arbitrary number of traversals.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimizeVisitor;

impl OptimizeVisitor {
    #[must_use]
    pub const fn new() -> Self { Self }

    /// Runs one optimization pass over `node` and returns the rewritten
    /// tree.
    #[must_use]
    pub fn run(&self, node: &Node) -> Node { Self::new().visit(node) }
}

impl Rewriter for OptimizeVisitor {
    fn visit_unary(&mut self, node: &Node, data: &Rc<UnaryData>, operand: Node) -> Node {
        if data.op == UnaryOpKind::Convert {
            if operand.static_type() == Some(&data.static_type) {
                return operand;
            }
            if let Node::Constant(c) = &operand {
                return Node::constant(c.value.clone(), data.static_type.clone());
            }
        }
        if same_node(&operand, &data.operand) {
            node.clone()
        } else {
            Node::unary(data.op, operand, data.static_type.clone())
        }
    }

    fn visit_binary(&mut self, node: &Node, data: &Rc<BinaryData>, left: Node, right: Node) -> Node {
        match data.op {
            BinaryOpKind::Assign => {
                if structural_eq(&left, &right) {
                    return self.visit(&left);
                }
            }
            BinaryOpKind::Equal | BinaryOpKind::NotEqual => {
                let is_equal = data.op == BinaryOpKind::Equal;
                if structural_eq(&left, &right) {
                    return Node::constant_bool(is_equal);
                }
                if let (Node::Constant(ca), Node::Constant(cb)) = (&left, &right) {
                    if ca.value == ConstantValue::Null && cb.value == ConstantValue::Null {
                        return Node::constant_bool(is_equal);
                    }
                    if ca.static_type == cb.static_type {
                        return Node::constant_bool(!is_equal);
                    }
                }
                if let Some(result) = reduce(data.op, &left, &right) {
                    return result;
                }
                if let Some(result) = reduce(data.op, &right, &left) {
                    return result;
                }
            }
            BinaryOpKind::AndAlso | BinaryOpKind::OrElse => {
                if let Some(result) = reduce(data.op, &left, &right) {
                    return result;
                }
                if let Some(result) = reduce(data.op, &right, &left) {
                    return result;
                }
            }
            _ => {}
        }
        rebuild_binary(node, data, left, right)
    }

    fn visit_ternary(
        &mut self,
        node: &Node,
        data: &Rc<TernaryData>,
        cond: Node,
        then_branch: Node,
        else_branch: Node,
    ) -> Node {
        if always(&cond).is_true() {
            return then_branch;
        }
        if always(&cond).is_false() {
            return else_branch;
        }
        if structural_eq(&then_branch, &else_branch) {
            return then_branch;
        }
        if let Node::Unary(u) = &cond {
            if u.op == UnaryOpKind::Not {
                return Node::conditional(
                    u.operand.clone(),
                    else_branch,
                    then_branch,
                    data.static_type.clone(),
                );
            }
        }
        if same_node(&cond, &data.cond)
            && same_node(&then_branch, &data.then_branch)
            && same_node(&else_branch, &data.else_branch)
        {
            node.clone()
        } else {
            Node::conditional(cond, then_branch, else_branch, data.static_type.clone())
        }
    }

    fn visit_conditional_stmt(&mut self, node: &Node, data: &Rc<ConditionalStmtData>, arms: Vec<Node>) -> Node {
        let pair_count = arms.len() / 2;
        let has_else = arms.len() % 2 == 1;

        let mut survivors: Vec<Node> = Vec::new();
        let mut any_classified = false;
        let mut terminated = false;

        for i in 0..pair_count {
            let test = &arms[2 * i];
            let stmt = &arms[2 * i + 1];
            match always(test) {
                Truth::False => any_classified = true,
                Truth::True => {
                    any_classified = true;
                    terminated = true;
                    survivors.push(stmt.clone());
                    break;
                }
                Truth::Unknown => {
                    survivors.push(test.clone());
                    survivors.push(stmt.clone());
                }
            }
        }

        if !any_classified {
            let arms_unchanged = arms.len() == data.arms.len()
                && arms.iter().zip(data.arms.iter()).all(|(a, b)| same_node(a, b));
            return if arms_unchanged { node.clone() } else { Node::conditional_stmt(arms) };
        }

        if !terminated && has_else {
            survivors.push(arms[arms.len() - 1].clone());
        }

        if survivors.is_empty() {
            return Node::Empty;
        }
        if survivors.len() == 1 {
            return survivors.into_iter().next().expect("checked len == 1");
        }
        Node::conditional_stmt(survivors)
    }
}
