//! Binary operator implementations.
//!
//! Direct enum dispatch over [`BinaryOp`]. Every operator is defined through
//! the coercions in [`crate::coerce`]; `None` means the result depends on
//! something static evaluation cannot know (object identity, prototype
//! chains) and the caller must deopt.

use std::cmp::Ordering;

use peval_ir::{BinaryOp, DynamicValue};

use crate::coerce::{to_int32, to_js_string, to_number, to_primitive, to_uint32};

/// Evaluate a binary operation on two known operands.
pub fn evaluate_binary(op: BinaryOp, left: &DynamicValue, right: &DynamicValue) -> Option<DynamicValue> {
    let value = match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => (to_number(left) - to_number(right)).into(),
        BinaryOp::Mul => (to_number(left) * to_number(right)).into(),
        BinaryOp::Div => (to_number(left) / to_number(right)).into(),
        BinaryOp::Rem => (to_number(left) % to_number(right)).into(),
        BinaryOp::Exp => pow(to_number(left), to_number(right)).into(),

        BinaryOp::Lt => (less_than(left, right) == Some(true)).into(),
        BinaryOp::Gt => (less_than(right, left) == Some(true)).into(),
        BinaryOp::LtEq => (less_than(right, left) == Some(false)).into(),
        BinaryOp::GtEq => (less_than(left, right) == Some(false)).into(),

        BinaryOp::StrictEq => strict_equals(left, right)?.into(),
        BinaryOp::StrictNotEq => (!strict_equals(left, right)?).into(),
        BinaryOp::LooseEq => loose_equals(left, right)?.into(),
        BinaryOp::LooseNotEq => (!loose_equals(left, right)?).into(),

        BinaryOp::BitOr => f64::from(to_int32(left) | to_int32(right)).into(),
        BinaryOp::BitAnd => f64::from(to_int32(left) & to_int32(right)).into(),
        BinaryOp::BitXor => f64::from(to_int32(left) ^ to_int32(right)).into(),
        BinaryOp::Shl => f64::from(to_int32(left).wrapping_shl(shift_count(right))).into(),
        BinaryOp::Shr => f64::from(to_int32(left).wrapping_shr(shift_count(right))).into(),
        BinaryOp::UShr => f64::from(to_uint32(left).wrapping_shr(shift_count(right))).into(),

        // Both depend on the runtime object graph.
        BinaryOp::In | BinaryOp::InstanceOf => return None,
    };
    Some(value)
}

/// `+`: string concatenation if either primitive is a string, else addition.
fn add(left: &DynamicValue, right: &DynamicValue) -> DynamicValue {
    let left = to_primitive(left);
    let right = to_primitive(right);
    if matches!(left, DynamicValue::String(_)) || matches!(right, DynamicValue::String(_)) {
        let mut s = to_js_string(&left);
        s.push_str(&to_js_string(&right));
        DynamicValue::String(s)
    } else {
        (to_number(&left) + to_number(&right)).into()
    }
}

/// Shift counts use the low five bits of `ToUint32`.
#[inline]
fn shift_count(value: &DynamicValue) -> u32 {
    to_uint32(value) & 0x1F
}

/// `Number::exponentiate`.
///
/// Differs from `powf` where IEEE and the language disagree: `1 ** ±Infinity`
/// and `1 ** NaN` are `NaN`.
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() {
        return f64::NAN;
    }
    if exponent == 0.0 {
        return 1.0;
    }
    if base.is_nan() {
        return f64::NAN;
    }
    if base.abs() == 1.0 && exponent.is_infinite() {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// `IsLessThan(x, y)`. `None` is the language's `undefined` (a `NaN`
/// operand), which makes every relational operator `false`.
pub fn less_than(left: &DynamicValue, right: &DynamicValue) -> Option<bool> {
    let left = to_primitive(left);
    let right = to_primitive(right);
    if let (DynamicValue::String(a), DynamicValue::String(b)) = (&left, &right) {
        return Some(compare_utf16(a, b) == Ordering::Less);
    }
    let a = to_number(&left);
    let b = to_number(&right);
    if a.is_nan() || b.is_nan() {
        None
    } else {
        Some(a < b)
    }
}

/// Code-unit order, which differs from `str`'s code-point order for
/// characters beyond the BMP.
pub fn compare_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// `IsStrictlyEqual`. `None` when both sides are objects: identity is
/// unknowable for values rebuilt at each evaluation.
pub fn strict_equals(left: &DynamicValue, right: &DynamicValue) -> Option<bool> {
    match (left, right) {
        (l, r) if l.is_object() && r.is_object() => None,
        (DynamicValue::Number(a), DynamicValue::Number(b)) => Some(a == b),
        (DynamicValue::String(a), DynamicValue::String(b)) => Some(a == b),
        (DynamicValue::Boolean(a), DynamicValue::Boolean(b)) => Some(a == b),
        (DynamicValue::Null, DynamicValue::Null)
        | (DynamicValue::Undefined, DynamicValue::Undefined) => Some(true),
        _ => Some(false),
    }
}

/// `IsLooselyEqual`.
pub fn loose_equals(left: &DynamicValue, right: &DynamicValue) -> Option<bool> {
    use DynamicValue as V;

    match (left, right) {
        (l, r) if std::mem::discriminant(l) == std::mem::discriminant(r) => strict_equals(l, r),
        (l, r) if l.is_nullish() || r.is_nullish() => Some(l.is_nullish() && r.is_nullish()),
        (V::Number(a), V::String(_)) => Some(*a == to_number(right)),
        (V::String(_), V::Number(b)) => Some(to_number(left) == *b),
        (V::Boolean(_), _) => loose_equals(&V::Number(to_number(left)), right),
        (_, V::Boolean(_)) => loose_equals(left, &V::Number(to_number(right))),
        (l, r) if l.is_object() && r.is_object() => None,
        (l, r) if l.is_object() => loose_equals(&to_primitive(l), r),
        (l, r) if r.is_object() => loose_equals(l, &to_primitive(r)),
        _ => Some(false),
    }
}
