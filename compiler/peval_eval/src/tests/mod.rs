//! End-to-end tests through the public entry points.
//!
//! Trees are built with [`peval_ir::Program`], the reference host:
//! - `evaluate_tests`: literal folding and deopt witnesses
//! - `binding_tests`: identifier resolution through the scope table
//! - `call_tests`: native calls and their configuration
//! - `collection_tests`: array and object literals
//! - `property_tests`: proptest properties of evaluation and coercion
//! - `parallel_tests`: independent evaluations across threads

mod call_tests;
mod property_tests;

use peval_ir::{DynamicValue, ExprId, Program};

use crate::{evaluate, Evaluation};

/// Evaluate `node` and return its value, panicking on a deopt.
#[track_caller]
fn value_of(program: &Program, node: ExprId) -> DynamicValue {
    match evaluate(program, node) {
        Evaluation {
            confident: true,
            value: Some(value),
            ..
        } => value,
        other => panic!("expected a confident value, got {other:?}"),
    }
}

/// Evaluate `node` and return the deopt witness, panicking on a value.
#[track_caller]
fn witness_of(program: &Program, node: ExprId) -> ExprId {
    match evaluate(program, node) {
        Evaluation {
            confident: false,
            deopt: Some(witness),
            value: None,
        } => witness,
        other => panic!("expected a deopt, got {other:?}"),
    }
}
