//! Property-based check of idempotence (spec.md §8 invariant 1): running
//! `OptimizeVisitor` on its own output changes nothing further, for a wide
//! range of randomly generated boolean-result expressions.

use proptest::prelude::*;
use sieve_ast::{BinaryOpKind, ConstantValue, Node, Parameter, PrimitiveType, TypeRef, structural_eq};
use sieve_optimize::OptimizeVisitor;

fn int_leaf() -> BoxedStrategy<Node> {
    prop_oneof![
        any::<i16>().prop_map(|v| Node::constant(ConstantValue::Int(i64::from(v)), TypeRef::Primitive(PrimitiveType::Int))),
        Just(Node::parameter(Parameter::new("n", TypeRef::Primitive(PrimitiveType::Int)))),
    ]
    .boxed()
}

fn int_comparison() -> BoxedStrategy<Node> {
    (int_leaf(), int_leaf(), any::<bool>())
        .prop_map(|(a, b, is_equal)| {
            let op = if is_equal { BinaryOpKind::Equal } else { BinaryOpKind::NotEqual };
            Node::binary(op, a, b, TypeRef::bool())
        })
        .boxed()
}

/// A grammar of boolean-typed expressions: constants, a shared free
/// variable, int comparisons, negation, short-circuit `&&`/`||`, and
/// ternaries whose branches are themselves boolean — the shapes
/// `OptimizeVisitor` actually rewrites (spec.md §4.2).
fn bool_expr() -> BoxedStrategy<Node> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Node::constant_bool),
        Just(Node::parameter(Parameter::new("b", TypeRef::bool()))),
        int_comparison(),
    ];
    leaf.prop_recursive(4, 64, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Node::not),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Node::binary(BinaryOpKind::AndAlso, a, b, TypeRef::bool())),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Node::binary(BinaryOpKind::OrElse, a, b, TypeRef::bool())),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| Node::conditional(c, t, e, TypeRef::bool())),
        ]
    })
    .boxed()
}

proptest! {
    #[test]
    fn optimize_is_idempotent(expr in bool_expr()) {
        let once = OptimizeVisitor::new().run(&expr);
        let twice = OptimizeVisitor::new().run(&once);
        prop_assert!(structural_eq(&once, &twice));
    }

    /// A second pass over an already-optimized tree never introduces a
    /// node that wasn't there before: its printed form is stable.
    #[test]
    fn reoptimizing_does_not_change_printed_form(expr in bool_expr()) {
        let once = OptimizeVisitor::new().run(&expr);
        let twice = OptimizeVisitor::new().run(&once);
        prop_assert_eq!(once.to_string(), twice.to_string());
    }
}
