//! Bottom-up rewrite traversal.
//!
//! `Rewriter` is the `accept(visitor)` contract spec.md's §6 ascribes to the
//! tree: children are visited first, and the per-kind method receives
//! already-rewritten children, never the originals. The default per-kind
//! method returns the input node unchanged when none of its children moved
//! (compared via [`same_node`]), so identity preservation is the ordinary
//! case rather than something every override has to reimplement by hand.
//!
//! [`sieve_optimize`]'s `OptimizeVisitor` overrides the handful of methods
//! it rewrites (unary, binary, ternary, conditional statement) and falls
//! through to the default for everything else.

use std::rc::Rc;

use crate::node::{
    BinaryData, ConditionalStmtData, DeclarationData, MemberData, Node, ReturnData, StatementData,
    TernaryData, TypeBinaryData, UnaryData, same_node,
};

/// A bottom-up tree rewrite.
pub trait Rewriter {
    /// Visits `node`, rewriting children first and dispatching the
    /// rewritten children to the matching per-kind method.
    fn visit(&mut self, node: &Node) -> Node {
        match node {
            Node::Constant(_) => self.visit_constant(node),
            Node::Parameter(_) => self.visit_parameter(node),
            Node::Unary(u) => {
                let operand = self.visit(&u.operand);
                self.visit_unary(node, u, operand)
            }
            Node::Binary(b) => {
                let left = self.visit(&b.left);
                let right = self.visit(&b.right);
                self.visit_binary(node, b, left, right)
            }
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

    fn visit_constant(&mut self, node: &Node) -> Node { node.clone() }

    fn visit_parameter(&mut self, node: &Node) -> Node { node.clone() }

    fn visit_unary(&mut self, node: &Node, data: &Rc<UnaryData>, operand: Node) -> Node {
        if same_node(&operand, &data.operand) {
            return node.clone();
        }
        Node::unary(data.op, operand, data.static_type.clone())
    }

    fn visit_binary(&mut self, node: &Node, data: &Rc<BinaryData>, left: Node, right: Node) -> Node {
        if same_node(&left, &data.left) && same_node(&right, &data.right) {
            return node.clone();
        }
        Node::binary(data.op, left, right, data.static_type.clone())
    }

    fn visit_ternary(
        &mut self,
        node: &Node,
        data: &Rc<TernaryData>,
        cond: Node,
        then_branch: Node,
        else_branch: Node,
    ) -> Node {
        if same_node(&cond, &data.cond)
            && same_node(&then_branch, &data.then_branch)
            && same_node(&else_branch, &data.else_branch)
        {
            return node.clone();
        }
        Node::conditional(cond, then_branch, else_branch, data.static_type.clone())
    }

    fn visit_type_binary(&mut self, node: &Node, data: &Rc<TypeBinaryData>, expression: Node) -> Node {
        if same_node(&expression, &data.expression) {
            return node.clone();
        }
        Node::type_binary(data.op, expression, data.target_type.clone())
    }

    fn visit_member(&mut self, node: &Node, data: &Rc<MemberData>, target: Option<Node>) -> Node {
        if option_same(target.as_ref(), data.target.as_ref()) {
            return node.clone();
        }
        Node::member(target, data.declaring_type.clone(), Rc::clone(&data.name))
    }

    fn visit_declaration(&mut self, node: &Node, data: &Rc<DeclarationData>, initializer: Option<Node>) -> Node {
        if option_same(initializer.as_ref(), data.initializer.as_ref()) {
            return node.clone();
        }
        Node::declare(data.modifiers, data.parameter.clone(), initializer)
    }

    fn visit_return(&mut self, node: &Node, data: &Rc<ReturnData>, expression: Option<Node>) -> Node {
        if option_same(expression.as_ref(), data.expression.as_ref()) {
            return node.clone();
        }
        Node::return_(expression)
    }

    fn visit_statement(&mut self, node: &Node, data: &Rc<StatementData>, expression: Node) -> Node {
        if same_node(&expression, &data.expression) {
            return node.clone();
        }
        Node::statement(expression)
    }

    fn visit_conditional_stmt(&mut self, node: &Node, data: &Rc<ConditionalStmtData>, arms: Vec<Node>) -> Node {
        if slice_same(&arms, &data.arms) {
            return node.clone();
        }
        Node::conditional_stmt(arms)
    }

    fn visit_block(&mut self, node: &Node, data: &Rc<crate::node::BlockData>, statements: Vec<Node>) -> Node {
        if slice_same(&statements, &data.statements) {
            return node.clone();
        }
        Node::block(statements)
    }

    fn visit_empty(&mut self, node: &Node) -> Node { node.clone() }
}

fn option_same(a: Option<&Node>, b: Option<&Node>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => same_node(x, y),
        (None, None) => true,
        _ => false,
    }
}

fn slice_same(a: &[Node], b: &[Node]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| same_node(x, y))
}
