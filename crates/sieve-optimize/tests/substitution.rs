//! L-value safety and recursion-guard behavior of
//! `SubstituteVariableVisitor` (spec.md §4.3, §8 invariant 6).

use rustc_hash::FxHashMap;
use sieve_ast::{BinaryOpKind, ConstantValue, Node, Parameter, PrimitiveType, Rewriter, TypeRef, UnaryOpKind};
use sieve_optimize::{ParamKey, SubstituteVariableVisitor};

fn int_const(v: i64) -> Node { Node::constant(ConstantValue::Int(v), TypeRef::Primitive(PrimitiveType::Int)) }

#[test]
fn mutating_unary_over_a_substituted_parameter_is_untouched() {
    let t = Parameter::new("t", TypeRef::Primitive(PrimitiveType::Int));
    let mut sub_map = FxHashMap::default();
    let _ = sub_map.insert(ParamKey(t.clone()), int_const(1));

    let expr = Node::unary(UnaryOpKind::PostIncrement, Node::parameter(t), TypeRef::Primitive(PrimitiveType::Int));
    let result = SubstituteVariableVisitor::new(&sub_map).visit(&expr);
    assert_eq!(result.to_string(), "t++");
}

#[test]
fn assignment_to_a_substituted_target_is_eliminated() {
    let t = Parameter::new("t", TypeRef::Primitive(PrimitiveType::Int));
    let mut sub_map = FxHashMap::default();
    let _ = sub_map.insert(ParamKey(t.clone()), int_const(1));

    let expr = Node::binary(
        BinaryOpKind::Assign,
        Node::parameter(t),
        int_const(9),
        TypeRef::Primitive(PrimitiveType::Int),
    );
    let result = SubstituteVariableVisitor::new(&sub_map).visit(&expr);
    assert_eq!(result.to_string(), "9");
}

#[test]
fn substitution_expands_transitively() {
    let x = Parameter::new("x", TypeRef::Primitive(PrimitiveType::Int));
    let y = Parameter::new("y", TypeRef::Primitive(PrimitiveType::Int));
    let mut sub_map = FxHashMap::default();
    let _ = sub_map.insert(ParamKey(x.clone()), int_const(1));
    let _ = sub_map.insert(
        ParamKey(y.clone()),
        Node::binary(BinaryOpKind::Add, Node::parameter(x), int_const(1), TypeRef::Primitive(PrimitiveType::Int)),
    );

    let expr = Node::parameter(y);
    let result = SubstituteVariableVisitor::new(&sub_map).visit(&expr);
    assert_eq!(result.to_string(), "1 + 1");
}

#[test]
#[should_panic(expected = "recursive expansion")]
fn recursive_substitution_panics() {
    let x = Parameter::new("x", TypeRef::Primitive(PrimitiveType::Int));
    let mut sub_map = FxHashMap::default();
    let _ = sub_map.insert(
        ParamKey(x.clone()),
        Node::binary(BinaryOpKind::Add, Node::parameter(x.clone()), int_const(1), TypeRef::Primitive(PrimitiveType::Int)),
    );

    let expr = Node::parameter(x);
    let _ = SubstituteVariableVisitor::new(&sub_map).visit(&expr);
}

#[test]
fn non_lvalue_operands_are_substituted_normally() {
    let x = Parameter::new("x", TypeRef::Primitive(PrimitiveType::Int));
    let mut sub_map = FxHashMap::default();
    let _ = sub_map.insert(ParamKey(x.clone()), int_const(5));

    let expr = Node::unary(UnaryOpKind::Negate, Node::parameter(x), TypeRef::Primitive(PrimitiveType::Int));
    let result = SubstituteVariableVisitor::new(&sub_map).visit(&expr);
    assert_eq!(result.to_string(), "-5");
}
