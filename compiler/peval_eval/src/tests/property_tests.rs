use pretty_assertions::assert_eq;
use proptest::prelude::*;

use peval_ir::{BinaryOp, DynamicValue, Program};

use crate::coerce::{number_to_int32, number_to_string, number_to_uint32, string_to_number};
use crate::{evaluate, EvaluationSession, Evaluator};

const OPERATORS: &[BinaryOp] = &[
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Rem,
    BinaryOp::Exp,
    BinaryOp::Lt,
    BinaryOp::LooseEq,
    BinaryOp::StrictEq,
    BinaryOp::BitAnd,
    BinaryOp::Shl,
    BinaryOp::UShr,
];

fn finite() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |n| n.is_finite())
}

proptest! {
    #[test]
    fn number_to_string_round_trips(n in finite()) {
        prop_assert_eq!(string_to_number(&number_to_string(n)), n);
    }

    #[test]
    fn int32_is_identity_on_int32(i in any::<i32>()) {
        prop_assert_eq!(number_to_int32(f64::from(i)), i);
        prop_assert_eq!(number_to_uint32(f64::from(i)), i as u32);
    }

    #[test]
    fn int32_wraps_modulo_2_pow_32(i in any::<i32>(), k in -4i32..4) {
        let shifted = f64::from(i) + f64::from(k) * 4_294_967_296.0;
        prop_assert_eq!(number_to_int32(shifted), i);
    }

    #[test]
    fn evaluation_is_deterministic(
        a in finite(),
        b in finite(),
        op in proptest::sample::select(OPERATORS),
    ) {
        let mut p = Program::new();
        let left = p.arena.num(a);
        let right = p.arena.num(b);
        let node = p.arena.binary(op, left, right);
        let first = evaluate(&p, node);
        let second = evaluate(&p, node);
        prop_assert!(first.confident);
        prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn addition_matches_ieee(a in finite(), b in finite()) {
        let mut p = Program::new();
        let left = p.arena.num(a);
        let right = p.arena.num(b);
        let node = p.arena.binary(BinaryOp::Add, left, right);
        let Some(DynamicValue::Number(sum)) = evaluate(&p, node).value else {
            return Err(TestCaseError::fail("addition did not fold to a number"));
        };
        prop_assert_eq!(sum.to_bits(), (a + b).to_bits());
    }

    #[test]
    fn concatenation_preserves_text(a in "[a-z ]{0,16}", b in "\\PC{0,16}") {
        let mut p = Program::new();
        let left = p.arena.str_lit(&a);
        let right = p.arena.str_lit(&b);
        let node = p.arena.binary(BinaryOp::Add, left, right);
        prop_assert_eq!(evaluate(&p, node).value, Some(DynamicValue::String(a + &b)));
    }

    #[test]
    fn shared_session_is_idempotent(a in finite(), s in "[0-9a-f]{0,8}") {
        let mut p = Program::new();
        let left = p.arena.num(a);
        let right = p.arena.str_lit(&s);
        let node = p.arena.binary(BinaryOp::Add, left, right);
        let evaluator = Evaluator::new(&p);
        let mut session = EvaluationSession::new();
        let first = evaluator.evaluate_in(node, &mut session);
        let resolved = session.resolved_count();
        let second = evaluator.evaluate_in(node, &mut session);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(session.resolved_count(), resolved);
        prop_assert_eq!(first, evaluate(&p, node).value);
    }
}

#[test]
fn negative_zero_prints_as_zero() {
    assert_eq!(number_to_string(-0.0), "0");
    assert_eq!(string_to_number("-0").to_bits(), (-0.0f64).to_bits());
}
