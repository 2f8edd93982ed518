//! Pretty-printer output for the literal block texts spec.md §8 asserts
//! against.

use sieve_ast::{BinaryOpKind, ConstantValue, DeclarationFlags, Node, Parameter, PrimitiveType, TypeRef};

fn int_const(v: i64) -> Node { Node::constant(ConstantValue::Int(v), TypeRef::Primitive(PrimitiveType::Int)) }

#[test]
fn empty_block_prints_braces_only() {
    let block = Node::block(vec![]);
    assert_eq!(block.to_string(), "{\n}\n");
}

#[test]
fn return_statement_prints_with_trailing_semicolon() {
    let block = Node::block(vec![Node::return_(Some(int_const(1)))]);
    assert_eq!(block.to_string(), "{\n  return 1;\n}\n");
}

#[test]
fn bare_return_has_no_expression() {
    let block = Node::block(vec![Node::return_(None)]);
    assert_eq!(block.to_string(), "{\n  return;\n}\n");
}

#[test]
fn declaration_prints_modifier_type_name_and_initializer() {
    let x = Parameter::new("x", TypeRef::Primitive(PrimitiveType::Int));
    let decl = Node::declare(DeclarationFlags::FINAL, x, Some(int_const(1)));
    let block = Node::block(vec![decl]);
    assert_eq!(block.to_string(), "{\n  final int x = 1;\n}\n");
}

#[test]
fn if_else_if_else_chain_prints_with_nesting() {
    let a = Parameter::new("a", TypeRef::bool());
    let b = Parameter::new("b", TypeRef::bool());
    let arms = vec![
        Node::parameter(a),
        Node::block(vec![Node::return_(Some(int_const(1)))]),
        Node::parameter(b),
        Node::block(vec![Node::return_(Some(int_const(2)))]),
        Node::block(vec![Node::return_(Some(int_const(3)))]),
    ];
    let block = Node::block(vec![Node::conditional_stmt(arms)]);
    assert_eq!(
        block.to_string(),
        "{\n  if (a) {\n    return 1;\n  } else if (b) {\n    return 2;\n  } else {\n    return 3;\n  }\n}\n"
    );
}

#[test]
fn binary_and_ternary_expressions_print_infix() {
    let expr = Node::conditional(
        Node::constant_bool(true),
        Node::binary(BinaryOpKind::Add, int_const(1), int_const(2), TypeRef::Primitive(PrimitiveType::Int)),
        int_const(3),
        TypeRef::Primitive(PrimitiveType::Int),
    );
    assert_eq!(expr.to_string(), "true ? 1 + 2 : 3");
}

#[test]
fn post_increment_suffixes_its_operand() {
    let x = Parameter::new("x", TypeRef::Primitive(PrimitiveType::Int));
    let expr = Node::unary(sieve_ast::UnaryOpKind::PostIncrement, Node::parameter(x), TypeRef::Primitive(PrimitiveType::Int));
    assert_eq!(expr.to_string(), "x++");
}
