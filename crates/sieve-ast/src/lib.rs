//! Node model for the Sieve expression-tree optimizer.
//!
//! This crate defines the tagged-variant `Node` enum the optimizer and
//! block builder operate on: constants, parameters, unary/binary/ternary
//! operators, type tests, member references, declarations, returns, plain
//! expression statements, flat conditional statements, and blocks. It also
//! provides structural equality, a bottom-up rewrite trait ([`Rewriter`]),
//! and a small pretty-printer used to check expected block text.
//!
//! Node construction, parsing, and code generation for the surrounding
//! query-expression language are out of scope here; this crate only
//! carries the subset of the tree that the optimizer and builder need to
//! reason about.

pub mod display;
pub mod node;
pub mod ops;
pub mod types;
pub mod visitor;

pub use node::{
    BinaryData, BlockData, ConditionalStmtData, ConstantData, ConstantValue, DeclarationData,
    DeclarationFlags, MemberData, Node, Parameter, ParameterData, ReturnData, StatementData,
    TernaryData, TypeBinaryData, UnaryData, same_node, structural_eq,
};
pub use ops::{BinaryOpKind, OpMetadata, TypeBinaryOp, UnaryOpKind};
pub use types::{PrimitiveType, TypeRef};
pub use visitor::Rewriter;
