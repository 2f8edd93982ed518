//! Operator tags and their metadata.
//!
//! Each operator kind carries the metadata the core needs: a textual
//! operator (used when comparing formed expressions and when printing),
//! left/right precedence (printing only, irrelevant to rewrites), and
//! whether applying the operator writes to its first operand.

/// Metadata attached to a unary or binary operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpMetadata {
    pub op: &'static str,
    pub lprec: u8,
    pub rprec: u8,
    pub modifies_lvalue: bool,
}

/// Unary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpKind {
    /// Boolean negation.
    Not,
    /// Bitwise complement.
    BitNot,
    /// Numeric negation.
    Negate,
    /// Type conversion/cast.
    Convert,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOpKind {
    #[must_use]
    pub const fn metadata(self) -> OpMetadata {
        match self {
            Self::Not => OpMetadata { op: "!", lprec: 14, rprec: 14, modifies_lvalue: false },
            Self::BitNot => OpMetadata { op: "~", lprec: 14, rprec: 14, modifies_lvalue: false },
            Self::Negate => OpMetadata { op: "-", lprec: 14, rprec: 14, modifies_lvalue: false },
            Self::Convert => OpMetadata { op: "", lprec: 13, rprec: 13, modifies_lvalue: false },
            Self::PreIncrement => {
                OpMetadata { op: "++", lprec: 14, rprec: 14, modifies_lvalue: true }
            }
            Self::PreDecrement => {
                OpMetadata { op: "--", lprec: 14, rprec: 14, modifies_lvalue: true }
            }
            Self::PostIncrement => {
                OpMetadata { op: "++", lprec: 15, rprec: 15, modifies_lvalue: true }
            }
            Self::PostDecrement => {
                OpMetadata { op: "--", lprec: 15, rprec: 15, modifies_lvalue: true }
            }
        }
    }

    #[must_use]
    pub const fn modifies_lvalue(self) -> bool { self.metadata().modifies_lvalue }
}

/// Binary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOpKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    AndAlso,
    OrElse,
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
}

impl BinaryOpKind {
    #[must_use]
    pub const fn metadata(self) -> OpMetadata {
        match self {
            Self::Add => OpMetadata { op: "+", lprec: 11, rprec: 11, modifies_lvalue: false },
            Self::Subtract => {
                OpMetadata { op: "-", lprec: 11, rprec: 11, modifies_lvalue: false }
            }
            Self::Multiply => {
                OpMetadata { op: "*", lprec: 12, rprec: 12, modifies_lvalue: false }
            }
            Self::Divide => OpMetadata { op: "/", lprec: 12, rprec: 12, modifies_lvalue: false },
            Self::Modulo => OpMetadata { op: "%", lprec: 12, rprec: 12, modifies_lvalue: false },
            Self::Equal => OpMetadata { op: "==", lprec: 8, rprec: 8, modifies_lvalue: false },
            Self::NotEqual => {
                OpMetadata { op: "!=", lprec: 8, rprec: 8, modifies_lvalue: false }
            }
            Self::LessThan => OpMetadata { op: "<", lprec: 9, rprec: 9, modifies_lvalue: false },
            Self::LessThanOrEqual => {
                OpMetadata { op: "<=", lprec: 9, rprec: 9, modifies_lvalue: false }
            }
            Self::GreaterThan => {
                OpMetadata { op: ">", lprec: 9, rprec: 9, modifies_lvalue: false }
            }
            Self::GreaterThanOrEqual => {
                OpMetadata { op: ">=", lprec: 9, rprec: 9, modifies_lvalue: false }
            }
            Self::AndAlso => OpMetadata { op: "&&", lprec: 4, rprec: 4, modifies_lvalue: false },
            Self::OrElse => OpMetadata { op: "||", lprec: 3, rprec: 3, modifies_lvalue: false },
            Self::Assign => OpMetadata { op: "=", lprec: 1, rprec: 1, modifies_lvalue: true },
            Self::AddAssign => {
                OpMetadata { op: "+=", lprec: 1, rprec: 1, modifies_lvalue: true }
            }
            Self::SubtractAssign => {
                OpMetadata { op: "-=", lprec: 1, rprec: 1, modifies_lvalue: true }
            }
            Self::MultiplyAssign => {
                OpMetadata { op: "*=", lprec: 1, rprec: 1, modifies_lvalue: true }
            }
            Self::DivideAssign => {
                OpMetadata { op: "/=", lprec: 1, rprec: 1, modifies_lvalue: true }
            }
        }
    }

    #[must_use]
    pub const fn modifies_lvalue(self) -> bool { self.metadata().modifies_lvalue }
}

/// Type-test binary operator kinds (e.g. `instanceof`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeBinaryOp {
    TypeIs,
}

impl TypeBinaryOp {
    #[must_use]
    pub const fn op(self) -> &'static str {
        match self {
            Self::TypeIs => "instanceof",
        }
    }
}
