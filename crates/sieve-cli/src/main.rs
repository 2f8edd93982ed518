//! Sieve CLI
//!
//! Demo driver for the expression-tree optimizer and block builder: builds
//! a small sample block through the public `BlockBuilder` API and prints it,
//! unoptimized and optimized.

use anyhow::Result;
use clap::Parser;
use sieve_ast::{BinaryOpKind, ConstantValue, Node, PrimitiveType, TypeRef};
use sieve_block::BlockBuilder;
use sieve_optimize::OptimizeVisitor;

/// The Sieve expression-tree optimizer and block builder
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Show verbose output
    #[clap(short, long)]
    verbose: bool,

    /// Print the unoptimized tree alongside the optimized one
    #[clap(long)]
    emit_tree: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.verbose {
        println!("sieve-cli v{}", env!("CARGO_PKG_VERSION"));
    }

    let unoptimized = sample_block();

    if args.emit_tree {
        println!("unoptimized:\n{unoptimized}");
    }

    let optimized = OptimizeVisitor::new().run(&unoptimized);
    println!("{optimized}");

    Ok(())
}

/// `final int x = 2 * 3; final bool cond = !false; return cond ? x + 1 : x - 1;`
///
/// Built with optimizing disabled, so the returned tree is the raw
/// declare-everything shape `main` then optimizes for comparison.
fn sample_block() -> Node {
    let int_ty = TypeRef::Primitive(PrimitiveType::Int);
    let mut builder = BlockBuilder::new(false, None);

    let product = Node::binary(BinaryOpKind::Multiply, int_const(2), int_const(3), int_ty.clone());
    let x = builder.append("x", product, true);

    let cond = Node::not(Node::constant_bool(false));
    let cond = builder.append("cond", cond, true);

    let then_branch = Node::binary(BinaryOpKind::Add, x.clone(), int_const(1), int_ty.clone());
    let else_branch = Node::binary(BinaryOpKind::Subtract, x, int_const(1), int_ty.clone());
    let result = Node::conditional(cond, then_branch, else_branch, int_ty);

    builder.add(Node::return_(Some(result))).expect("fresh builder, no name collisions possible");
    builder.to_block()
}

fn int_const(v: i64) -> Node {
    Node::constant(ConstantValue::Int(v), TypeRef::Primitive(PrimitiveType::Int))
}

