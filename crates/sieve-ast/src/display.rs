//! A minimal pretty-printer.
//!
//! Textual code generation is out of scope for the optimizer core (spec.md
//! §1), but spec.md §8's concrete scenarios are written as literal expected
//! block text ("`{\n  return true;\n}\n`"), so a small, conventional printer
//! — leading `{`, two-space indent, trailing newline — is kept here purely
//! so those scenarios can be asserted as direct string equality. Neither
//! `OptimizeVisitor` nor `BlockBuilder` ever calls this module.

use std::fmt;

use crate::node::{ConditionalStmtData, DeclarationFlags, Node};
use crate::ops::UnaryOpKind;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Block(_) | Node::ConditionalStmt(_) | Node::Declaration(_) | Node::Return(_)
            | Node::Statement(_) | Node::Empty => write_stmt(f, self, 0),
            _ => write_expr(f, self),
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    match node {
        Node::Constant(c) => write!(f, "{}", c.value),
        Node::Parameter(p) => write!(f, "{p}"),
        Node::Unary(u) => match u.op {
            UnaryOpKind::Convert => write_expr(f, &u.operand),
            UnaryOpKind::PostIncrement | UnaryOpKind::PostDecrement => {
                write_expr(f, &u.operand)?;
                write!(f, "{}", u.op.metadata().op)
            }
            _ => {
                write!(f, "{}", u.op.metadata().op)?;
                write_expr(f, &u.operand)
            }
        },
        Node::Binary(b) => {
            write_expr(f, &b.left)?;
            write!(f, " {} ", b.op.metadata().op)?;
            write_expr(f, &b.right)
        }
        Node::Ternary(t) => {
            write_expr(f, &t.cond)?;
            write!(f, " ? ")?;
            write_expr(f, &t.then_branch)?;
            write!(f, " : ")?;
            write_expr(f, &t.else_branch)
        }
        Node::TypeBinary(tb) => {
            write_expr(f, &tb.expression)?;
            write!(f, " {} {}", tb.op.op(), tb.target_type)
        }
        Node::Member(m) => {
            if let Some(target) = &m.target {
                write_expr(f, target)?;
                write!(f, ".")?;
            }
            write!(f, "{}", m.name)
        }
        Node::Declaration(_)
        | Node::Return(_)
        | Node::Statement(_)
        | Node::ConditionalStmt(_)
        | Node::Block(_)
        | Node::Empty => unreachable!("statement node passed to write_expr"),
    }
}

fn write_stmt(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node {
        Node::Return(r) => {
            write!(f, "{pad}return")?;
            if let Some(expr) = &r.expression {
                write!(f, " ")?;
                write_expr(f, expr)?;
            }
            writeln!(f, ";")
        }
        Node::Statement(s) => {
            write!(f, "{pad}")?;
            write_expr(f, &s.expression)?;
            writeln!(f, ";")
        }
        Node::Declaration(d) => {
            write!(f, "{pad}")?;
            if d.modifiers.contains(DeclarationFlags::FINAL) {
                write!(f, "final ")?;
            }
            write!(f, "{} {}", d.parameter.static_type(), d.parameter)?;
            if let Some(init) = &d.initializer {
                write!(f, " = ")?;
                write_expr(f, init)?;
            }
            writeln!(f, ";")
        }
        Node::ConditionalStmt(c) => write_conditional(f, c, indent),
        Node::Block(b) => {
            writeln!(f, "{pad}{{")?;
            for stmt in &b.statements {
                write_stmt(f, stmt, indent + 1)?;
            }
            write!(f, "{pad}}}")?;
            if indent == 0 { writeln!(f) } else { Ok(()) }
        }
        Node::Empty => Ok(()),
        _ => unreachable!("expression node passed to write_stmt"),
    }
}

/// Writes the statements of `node`'s body at `indent`, unwrapping a
/// [`Node::Block`] rather than nesting another pair of braces inside the
/// `if`/`else` braces that already bound it.
fn write_body(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
    match node {
        Node::Block(b) => {
            for stmt in &b.statements {
                write_stmt(f, stmt, indent)?;
            }
            Ok(())
        }
        other => write_stmt(f, other, indent),
    }
}

fn write_conditional(f: &mut fmt::Formatter<'_>, data: &ConditionalStmtData, indent: usize) -> fmt::Result {
    let pad = "  ".repeat(indent);
    let pair_count = data.arms.len() / 2;
    let has_else = data.arms.len() % 2 == 1;

    for i in 0..pair_count {
        let test = &data.arms[2 * i];
        let stmt = &data.arms[2 * i + 1];
        if i == 0 {
            write!(f, "{pad}if (")?;
        } else {
            write!(f, "{pad}}} else if (")?;
        }
        write_expr(f, test)?;
        writeln!(f, ") {{")?;
        write_body(f, stmt, indent + 1)?;
    }
    if has_else {
        writeln!(f, "{pad}}} else {{")?;
        write_body(f, &data.arms[data.arms.len() - 1], indent + 1)?;
    }
    writeln!(f, "{pad}}}")
}
