//! The tagged-variant expression/statement tree.
//!
//! `Node` is a plain enum instead of an arena-indexed type with a typed
//! `get_as::<T>()` downcast: the Python-sized AST this crate's ancestor
//! manages needs an arena to avoid hand-writing dozens of match arms, but
//! this tree has a dozen kinds, so a single `match` is both simpler and
//! cheaper than a generation-checked index. Sharing is structural, via
//! `Rc`: a rewrite that changes nothing returns the same `Rc`, which is
//! what lets [`crate::visitor::Rewriter`] preserve identity for free.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::ops::{BinaryOpKind, TypeBinaryOp, UnaryOpKind};
use crate::types::TypeRef;

bitflags! {
    /// Modifiers on a [`DeclarationData`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeclarationFlags: u8 {
        /// The declared variable is never reassigned after initialization,
        /// which makes it safe to share via the reuse table and eligible
        /// for single-use inlining.
        const FINAL = 1 << 0;
    }
}

/// A named binding.
///
/// Two `Parameter`s are equal iff they are the same object: identity, not
/// name. `ParameterData` is never compared structurally (deriving
/// `PartialEq` on it would compare by value, which is exactly wrong here),
/// so equality is implemented only on the `Rc` wrapper via pointer
/// identity.
#[derive(Debug, Clone)]
pub struct Parameter(pub Rc<ParameterData>);

#[derive(Debug)]
pub struct ParameterData {
    pub name: String,
    pub static_type: TypeRef,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, static_type: TypeRef) -> Self {
        Self(Rc::new(ParameterData { name: name.into(), static_type }))
    }

    #[must_use]
    pub fn name(&self) -> &str { &self.0.name }

    #[must_use]
    pub fn static_type(&self) -> &TypeRef { &self.0.static_type }

    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0.name) }
}

/// A literal value. `Null` carries no payload of its own; the declared
/// type on [`ConstantData`] records what it's a null of.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantData {
    pub value: ConstantValue,
    pub static_type: TypeRef,
}

#[derive(Debug, Clone)]
pub struct UnaryData {
    pub op: UnaryOpKind,
    pub operand: Node,
    pub static_type: TypeRef,
}

#[derive(Debug, Clone)]
pub struct BinaryData {
    pub op: BinaryOpKind,
    pub left: Node,
    pub right: Node,
    pub static_type: TypeRef,
}

/// A ternary `cond ? then : else` expression. Spec calls this the
/// `Conditional` form of `Ternary`; it is kept as its own node kind rather
/// than a generic n-ary `Ternary` because the optimizer only ever needs
/// this one shape.
#[derive(Debug, Clone)]
pub struct TernaryData {
    pub cond: Node,
    pub then_branch: Node,
    pub else_branch: Node,
    pub static_type: TypeRef,
}

#[derive(Debug, Clone)]
pub struct TypeBinaryData {
    pub op: TypeBinaryOp,
    pub expression: Node,
    pub target_type: TypeRef,
}

#[derive(Debug, Clone)]
pub struct MemberData {
    pub target: Option<Node>,
    pub declaring_type: TypeRef,
    pub name: Rc<str>,
}

#[derive(Debug, Clone)]
pub struct DeclarationData {
    pub modifiers: DeclarationFlags,
    pub parameter: Parameter,
    pub initializer: Option<Node>,
}

/// A returning statement with an optional value. Stands in for both the
/// `Goto` and `Return` forms spec.md §3 lists together ("Goto/Return"):
/// the two are identical in shape (an optional expression) and in every
/// rewrite this crate performs on them, so there is no separate `Goto`
/// variant to keep in sync.
#[derive(Debug, Clone)]
pub struct ReturnData {
    pub expression: Option<Node>,
}

/// A plain expression statement: evaluate `expression` for its side
/// effects (or as a block's trailing value) without returning from the
/// enclosing function.
#[derive(Debug, Clone)]
pub struct StatementData {
    pub expression: Node,
}

/// The flat arm list of an `if`/`else if`/`else` chain: `[test0, stmt0,
/// test1, stmt1, ..., testk, stmtk, elseStmt?]`.
#[derive(Debug, Clone)]
pub struct ConditionalStmtData {
    pub arms: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub statements: Vec<Node>,
}

/// The tagged-variant tree. Cheap to clone: every non-trivial variant
/// wraps an `Rc`.
#[derive(Debug, Clone)]
pub enum Node {
    Constant(Rc<ConstantData>),
    Parameter(Parameter),
    Unary(Rc<UnaryData>),
    Binary(Rc<BinaryData>),
    Ternary(Rc<TernaryData>),
    TypeBinary(Rc<TypeBinaryData>),
    Member(Rc<MemberData>),
    Declaration(Rc<DeclarationData>),
    Return(Rc<ReturnData>),
    Statement(Rc<StatementData>),
    ConditionalStmt(Rc<ConditionalStmtData>),
    Block(Rc<BlockData>),
    /// The empty-statement sentinel: "rewrite produced nothing". Compared
    /// by matching the variant, which is identity-equal by construction
    /// since it carries no state to diverge on.
    Empty,
}

impl Node {
    #[must_use]
    pub fn constant(value: ConstantValue, static_type: TypeRef) -> Self {
        Self::Constant(Rc::new(ConstantData { value, static_type }))
    }

    #[must_use]
    pub fn constant_null(static_type: TypeRef) -> Self {
        Self::constant(ConstantValue::Null, static_type)
    }

    #[must_use]
    pub fn constant_bool(value: bool) -> Self {
        Self::constant(ConstantValue::Bool(value), TypeRef::bool())
    }

    #[must_use]
    pub fn parameter(p: Parameter) -> Self { Self::Parameter(p) }

    #[must_use]
    pub fn unary(op: UnaryOpKind, operand: Node, static_type: TypeRef) -> Self {
        Self::Unary(Rc::new(UnaryData { op, operand, static_type }))
    }

    #[must_use]
    pub fn not(e: Node) -> Self { Self::unary(UnaryOpKind::Not, e, TypeRef::bool()) }

    #[must_use]
    pub fn convert(e: Node, target_type: TypeRef) -> Self {
        Self::unary(UnaryOpKind::Convert, e, target_type)
    }

    #[must_use]
    pub fn binary(op: BinaryOpKind, left: Node, right: Node, static_type: TypeRef) -> Self {
        Self::Binary(Rc::new(BinaryData { op, left, right, static_type }))
    }

    #[must_use]
    pub fn conditional(cond: Node, then_branch: Node, else_branch: Node, static_type: TypeRef) -> Self {
        Self::Ternary(Rc::new(TernaryData { cond, then_branch, else_branch, static_type }))
    }

    #[must_use]
    pub fn type_binary(op: TypeBinaryOp, expression: Node, target_type: TypeRef) -> Self {
        Self::TypeBinary(Rc::new(TypeBinaryData { op, expression, target_type }))
    }

    #[must_use]
    pub fn member(target: Option<Node>, declaring_type: TypeRef, name: impl Into<Rc<str>>) -> Self {
        Self::Member(Rc::new(MemberData { target, declaring_type, name: name.into() }))
    }

    /// `Boolean.TRUE`/`Boolean.FALSE`: the boxed-boolean member reference
    /// the always-truth oracle recognizes as a canonical truthy/falsy form.
    #[must_use]
    pub fn boxed_bool(value: bool) -> Self {
        Self::member(None, TypeRef::boxed_bool(), if value { "TRUE" } else { "FALSE" })
    }

    /// If this node is the boxed-boolean member reference, its value.
    #[must_use]
    pub fn as_boxed_bool(&self) -> Option<bool> {
        match self {
            Self::Member(m) if m.target.is_none() && m.declaring_type == TypeRef::boxed_bool() => {
                match &*m.name {
                    "TRUE" => Some(true),
                    "FALSE" => Some(false),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn declare(modifiers: DeclarationFlags, parameter: Parameter, initializer: Option<Node>) -> Self {
        Self::Declaration(Rc::new(DeclarationData { modifiers, parameter, initializer }))
    }

    #[must_use]
    pub fn return_(expression: Option<Node>) -> Self {
        Self::Return(Rc::new(ReturnData { expression }))
    }

    #[must_use]
    pub fn statement(expression: Node) -> Self {
        Self::Statement(Rc::new(StatementData { expression }))
    }

    #[must_use]
    pub fn conditional_stmt(arms: Vec<Node>) -> Self {
        Self::ConditionalStmt(Rc::new(ConditionalStmtData { arms }))
    }

    #[must_use]
    pub fn block(statements: Vec<Node>) -> Self { Self::Block(Rc::new(BlockData { statements })) }

    /// The static type of this node, where one is defined. Statements
    /// (`Declaration`, `Return`, `Statement`, `ConditionalStmt`, `Block`,
    /// `Empty`) have no static type of their own.
    #[must_use]
    pub fn static_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Constant(c) => Some(&c.static_type),
            Self::Parameter(p) => Some(p.static_type()),
            Self::Unary(u) => Some(&u.static_type),
            Self::Binary(b) => Some(&b.static_type),
            Self::Ternary(t) => Some(&t.static_type),
            Self::TypeBinary(_) => Some(&TYPE_BINARY_RESULT),
            Self::Member(m) => Some(&m.declaring_type),
            Self::Declaration(_)
            | Self::Return(_)
            | Self::Statement(_)
            | Self::ConditionalStmt(_)
            | Self::Block(_)
            | Self::Empty => None,
        }
    }

    /// True for `Constant(Null, _)`.
    #[must_use]
    pub fn is_constant_null(&self) -> bool {
        matches!(self, Self::Constant(c) if c.value == ConstantValue::Null)
    }

    /// True for the empty-statement sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool { matches!(self, Self::Empty) }

    /// A "simple expression": a `Parameter`, a `Constant`, or a `Convert`
    /// over a simple expression. Cheap enough that `BlockBuilder::append`
    /// never needs to name a temporary for it.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        match self {
            Self::Parameter(_) | Self::Constant(_) => true,
            Self::Unary(u) if u.op == UnaryOpKind::Convert => u.operand.is_simple(),
            _ => false,
        }
    }
}

/// A `TypeIs` test always yields an unboxed boolean.
const TYPE_BINARY_RESULT: TypeRef = TypeRef::Primitive(crate::types::PrimitiveType::Bool);

fn option_eq(a: Option<&Node>, b: Option<&Node>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => structural_eq(x, y),
        (None, None) => true,
        _ => false,
    }
}

/// `equal(a, b)`: node kind, static type, and children compared
/// recursively; `Parameter` by identity; `Constant` by value plus declared
/// type. This is deliberately not `derive(PartialEq)` on `Node`: deriving
/// would compare `Rc<ParameterData>` contents by value, which is exactly
/// the bug spec.md §9 warns against ("alpha-renaming... relies on two
/// differently-named parameters for the 'same' variable being
/// distinguishable").
#[must_use]
pub fn structural_eq(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Constant(x), Node::Constant(y)) => x.value == y.value && x.static_type == y.static_type,
        (Node::Parameter(x), Node::Parameter(y)) => x.is_same(y),
        (Node::Unary(x), Node::Unary(y)) => {
            x.op == y.op && x.static_type == y.static_type && structural_eq(&x.operand, &y.operand)
        }
        (Node::Binary(x), Node::Binary(y)) => {
            x.op == y.op
                && x.static_type == y.static_type
                && structural_eq(&x.left, &y.left)
                && structural_eq(&x.right, &y.right)
        }
        (Node::Ternary(x), Node::Ternary(y)) => {
            x.static_type == y.static_type
                && structural_eq(&x.cond, &y.cond)
                && structural_eq(&x.then_branch, &y.then_branch)
                && structural_eq(&x.else_branch, &y.else_branch)
        }
        (Node::TypeBinary(x), Node::TypeBinary(y)) => {
            x.op == y.op
                && x.target_type == y.target_type
                && structural_eq(&x.expression, &y.expression)
        }
        (Node::Member(x), Node::Member(y)) => {
            x.declaring_type == y.declaring_type
                && x.name == y.name
                && option_eq(x.target.as_ref(), y.target.as_ref())
        }
        (Node::Declaration(x), Node::Declaration(y)) => {
            x.modifiers == y.modifiers
                && x.parameter.is_same(&y.parameter)
                && option_eq(x.initializer.as_ref(), y.initializer.as_ref())
        }
        (Node::Return(x), Node::Return(y)) => option_eq(x.expression.as_ref(), y.expression.as_ref()),
        (Node::Statement(x), Node::Statement(y)) => structural_eq(&x.expression, &y.expression),
        (Node::ConditionalStmt(x), Node::ConditionalStmt(y)) => {
            x.arms.len() == y.arms.len()
                && x.arms.iter().zip(y.arms.iter()).all(|(p, q)| structural_eq(p, q))
        }
        (Node::Block(x), Node::Block(y)) => {
            x.statements.len() == y.statements.len()
                && x.statements.iter().zip(y.statements.iter()).all(|(p, q)| structural_eq(p, q))
        }
        (Node::Empty, Node::Empty) => true,
        _ => false,
    }
}

/// True when `a` and `b` are the same allocation (same `Rc`, or both the
/// `Empty` sentinel). Used by [`crate::visitor::Rewriter`]'s default
/// per-kind methods to decide whether a rewrite actually changed anything,
/// so that an unchanged subtree is returned as the original `Node` rather
/// than a freshly allocated structural twin.
#[must_use]
pub fn same_node(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Constant(x), Node::Constant(y)) => Rc::ptr_eq(x, y),
        (Node::Parameter(x), Node::Parameter(y)) => x.is_same(y),
        (Node::Unary(x), Node::Unary(y)) => Rc::ptr_eq(x, y),
        (Node::Binary(x), Node::Binary(y)) => Rc::ptr_eq(x, y),
        (Node::Ternary(x), Node::Ternary(y)) => Rc::ptr_eq(x, y),
        (Node::TypeBinary(x), Node::TypeBinary(y)) => Rc::ptr_eq(x, y),
        (Node::Member(x), Node::Member(y)) => Rc::ptr_eq(x, y),
        (Node::Declaration(x), Node::Declaration(y)) => Rc::ptr_eq(x, y),
        (Node::Return(x), Node::Return(y)) => Rc::ptr_eq(x, y),
        (Node::Statement(x), Node::Statement(y)) => Rc::ptr_eq(x, y),
        (Node::ConditionalStmt(x), Node::ConditionalStmt(y)) => Rc::ptr_eq(x, y),
        (Node::Block(x), Node::Block(y)) => Rc::ptr_eq(x, y),
        (Node::Empty, Node::Empty) => true,
        _ => false,
    }
}
