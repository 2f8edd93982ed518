//! Scope, reuse, and single-use inlining behavior of `BlockBuilder`
//! (spec.md §8 invariants 3-5, scenario 9).

use sieve_ast::{BinaryOpKind, ConstantValue, DeclarationFlags, Node, Parameter, PrimitiveType, TypeRef};
use sieve_block::{BlockBuilder, BlockError};

fn int_const(v: i64) -> Node { Node::constant(ConstantValue::Int(v), TypeRef::Primitive(PrimitiveType::Int)) }

fn int_ty() -> TypeRef { TypeRef::Primitive(PrimitiveType::Int) }

#[test]
fn declaring_the_same_name_twice_is_rejected() {
    let mut b = BlockBuilder::new(true, None);
    let x = Parameter::new("x", int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, x.clone(), Some(int_const(1)))).unwrap();

    let y = Parameter::new("x", int_ty());
    let err = b.add(Node::declare(DeclarationFlags::FINAL, y, Some(int_const(2)))).unwrap_err();
    assert_eq!(err, BlockError::DuplicateVariable { name: "x".to_string() });
}

#[test]
fn single_use_declaration_is_inlined_into_its_use() {
    let mut b = BlockBuilder::new(true, None);
    let x = Parameter::new("x", int_ty());
    let t = b.append("t", Node::binary(BinaryOpKind::Add, Node::parameter(x.clone()), int_const(1), int_ty()), true);
    let ret = Node::binary(BinaryOpKind::Add, t, int_const(1), int_ty());
    b.add(Node::return_(Some(ret))).unwrap();

    let block = b.to_block();
    assert_eq!(block.to_string(), "{\n  return x + 1 + 1;\n}\n");
}

#[test]
fn underscore_prefixed_declaration_is_never_inlined() {
    let mut b = BlockBuilder::new(true, None);
    let name = b.new_name("t", false);
    assert!(name.starts_with('_'));
    let param = Parameter::new(name, int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, param.clone(), Some(int_const(5)))).unwrap();
    b.add(Node::return_(Some(Node::parameter(param)))).unwrap();

    let block = b.to_block();
    let text = block.to_string();
    assert!(text.contains("final int _t"), "expected the declaration to survive, got: {text}");
}

#[test]
fn unused_declaration_is_dropped() {
    let mut b = BlockBuilder::new(true, None);
    let x = Parameter::new("x", int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, x, Some(int_const(1)))).unwrap();
    b.add(Node::return_(Some(int_const(0)))).unwrap();

    let block = b.to_block();
    assert_eq!(block.to_string(), "{\n  return 0;\n}\n");
}

#[test]
fn structurally_identical_initializers_share_one_declaration() {
    let mut b = BlockBuilder::new(true, None);
    let x = Parameter::new("x", int_ty());

    let first = b.append(
        "t",
        Node::binary(BinaryOpKind::Add, Node::parameter(x.clone()), int_const(1), int_ty()),
        true,
    );
    let second = b.append(
        "t",
        Node::binary(BinaryOpKind::Add, Node::parameter(x), int_const(1), int_ty()),
        true,
    );

    let (Node::Parameter(p1), Node::Parameter(p2)) = (&first, &second) else {
        panic!("append should have returned parameter references");
    };
    assert!(p1.is_same(p2), "the second append should have reused the first declaration");
}

#[test]
fn appending_a_simple_expression_never_declares_a_temporary() {
    let mut b = BlockBuilder::new(true, None);
    let x = Parameter::new("x", int_ty());
    let result = b.append("t", Node::parameter(x.clone()), true);
    match &result {
        Node::Parameter(p) => assert!(p.is_same(&x)),
        other => panic!("expected the same parameter back unchanged, got {other}"),
    }
    assert!(!b.has_variable("t"));
}

#[test]
fn clear_resets_scope_and_reuse_state() {
    let mut b = BlockBuilder::new(true, None);
    let x = Parameter::new("x", int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, x, Some(int_const(1)))).unwrap();
    assert!(b.has_variable("x"));

    b.clear();
    assert!(!b.has_variable("x"));

    let y = Parameter::new("x", int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, y, Some(int_const(2)))).unwrap();
    assert!(b.has_variable("x"));
}

#[test]
fn append_if_not_null_forwards_some_and_passes_through_none() {
    let mut b = BlockBuilder::new(true, None);
    assert!(b.append_if_not_null("t", None, true).is_none());

    let x = Parameter::new("x", int_ty());
    let appended = b.append_if_not_null("t", Some(Node::parameter(x.clone())), true);
    match appended {
        Some(Node::Parameter(p)) => assert!(p.is_same(&x)),
        other => panic!("expected the same parameter back unchanged, got {other:?}"),
    }
}

#[test]
fn append_block_renames_a_clashing_declaration_and_returns_its_tail_value() {
    let mut b = BlockBuilder::new(true, None);
    let outer_x = Parameter::new("x", int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, outer_x, Some(int_const(1)))).unwrap();

    // A sub-block that also declares a variable named "x", clashing with
    // the outer one, and returns an expression built from it.
    let inner_x = Parameter::new("x", int_ty());
    let sub_block = Node::block(vec![
        Node::declare(DeclarationFlags::FINAL, inner_x.clone(), Some(int_const(2))),
        Node::return_(Some(Node::binary(
            BinaryOpKind::Add,
            Node::parameter(inner_x),
            int_const(1),
            int_ty(),
        ))),
    ]);

    let tail = b.append_block(&sub_block, true).expect("sub-block ends in a return");
    b.add(Node::return_(Some(tail))).unwrap();

    // Both "x" declarations are single-use (the outer one only inside the
    // inner initializer, the inner one only in the tail return) and get
    // fully inlined, so every trace of the clashing name disappears.
    let block = b.to_block();
    assert_eq!(block.to_string(), "{\n  return 2 + 1;\n}\n");
}

#[test]
fn append_block_renames_a_clashing_declaration_with_a_non_simple_initializer() {
    let mut b = BlockBuilder::new(true, None);
    let outer_x = Parameter::new("x", int_ty());
    b.add(Node::declare(DeclarationFlags::FINAL, outer_x.clone(), Some(int_const(1)))).unwrap();

    let inner_x = Parameter::new("x", int_ty());
    let sub_block = Node::block(vec![
        Node::declare(
            DeclarationFlags::FINAL,
            inner_x.clone(),
            Some(Node::binary(BinaryOpKind::Add, Node::parameter(outer_x.clone()), int_const(1), int_ty())),
        ),
        Node::return_(Some(Node::binary(BinaryOpKind::Add, Node::parameter(inner_x), int_const(1), int_ty()))),
    ]);

    let tail = b.append_block(&sub_block, true).expect("sub-block ends in a return");
    // Reference outer_x a second time so it is used more than once and
    // survives inlining, making the rename of the inner "x" observable
    // directly in the printed output instead of being inlined away too.
    let final_expr = Node::binary(BinaryOpKind::Add, tail, Node::parameter(outer_x), int_ty());
    b.add(Node::return_(Some(final_expr))).unwrap();

    // The inner "x" is renamed away from the clash (it never surfaces in
    // the output under either name) and, being single-use, is inlined;
    // the outer "x", used twice, survives as a real declaration.
    let block = b.to_block();
    assert_eq!(block.to_string(), "{\n  final int x = 1;\n  return x + 1 + 1 + x;\n}\n");
}
