//! Unary operator implementations.
//!
//! `void` and `typeof`-of-a-function never reach here: the evaluator answers
//! them without evaluating the operand.

use peval_ir::{DynamicValue, UnaryOp};

use crate::coerce::{to_int32, to_number};

/// Evaluate a unary operation on a known operand. `None` means the operator
/// has no static result.
pub fn evaluate_unary(op: UnaryOp, operand: &DynamicValue) -> Option<DynamicValue> {
    let value = match op {
        UnaryOp::Not => DynamicValue::Boolean(!operand.is_truthy()),
        UnaryOp::Plus => DynamicValue::Number(to_number(operand)),
        UnaryOp::Neg => DynamicValue::Number(-to_number(operand)),
        UnaryOp::BitNot => DynamicValue::Number(f64::from(!to_int32(operand))),
        UnaryOp::TypeOf => DynamicValue::string(operand.type_of()),
        UnaryOp::Void => DynamicValue::Undefined,
        // Mutates the object graph.
        UnaryOp::Delete => return None,
    };
    Some(value)
}
