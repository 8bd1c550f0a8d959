use pretty_assertions::assert_eq;

use peval_ir::{DynamicValue, ExprId, Program};

use super::{value_of, witness_of};
use crate::{EvalConfig, Evaluator};

/// `object.member(args...)` with `object` a free identifier.
fn static_call(p: &mut Program, object: &str, member: &str, args: &[ExprId]) -> ExprId {
    let object = p.arena.ident(object);
    let callee = p.arena.member(object, member);
    p.arena.call(callee, args)
}

/// `"receiver".method(args...)`
fn string_call(p: &mut Program, receiver: &str, method: &str, args: &[ExprId]) -> ExprId {
    let receiver = p.arena.str_lit(receiver);
    let callee = p.arena.member(receiver, method);
    p.arena.call(callee, args)
}

#[test]
fn math_functions() {
    let mut p = Program::new();
    let args = [p.arena.num(1.0), p.arena.num(5.0), p.arena.num(3.0)];
    let call = static_call(&mut p, "Math", "max", &args);
    assert_eq!(value_of(&p, call), DynamicValue::Number(5.0));

    let arg = p.arena.num(2.5);
    let call = static_call(&mut p, "Math", "round", &[arg]);
    assert_eq!(value_of(&p, call), DynamicValue::Number(3.0));

    let call = static_call(&mut p, "Math", "min", &[]);
    assert_eq!(value_of(&p, call), DynamicValue::Number(f64::INFINITY));
}

#[test]
fn random_is_never_folded() {
    let mut p = Program::new();
    let call = static_call(&mut p, "Math", "random", &[]);
    assert_eq!(witness_of(&p, call), call);

    // Still a deopt with the exclusion list emptied.
    let config = EvalConfig::default().excluded_methods(Vec::<String>::new());
    let evaluator = Evaluator::new(&p).with_config(config);
    let result = evaluator.evaluate(call);
    assert!(!result.confident);
    assert_eq!(result.deopt, Some(call));
}

#[test]
fn excluded_methods_deopt() {
    let mut p = Program::new();
    let arg = p.arena.num(1.5);
    let call = static_call(&mut p, "Math", "floor", &[arg]);
    assert_eq!(value_of(&p, call), DynamicValue::Number(1.0));

    let config = EvalConfig::default().exclude_method("floor");
    let evaluator = Evaluator::new(&p).with_config(config);
    assert_eq!(evaluator.evaluate(call).deopt, Some(call));
}

#[test]
fn conversion_functions() {
    let mut p = Program::new();
    let string = p.arena.ident("String");
    let arg = p.arena.num(12.0);
    let call = p.arena.call(string, &[arg]);
    assert_eq!(value_of(&p, call), DynamicValue::string("12"));

    let number = p.arena.ident("Number");
    let arg = p.arena.str_lit(" 0x10 ");
    let call = p.arena.call(number, &[arg]);
    assert_eq!(value_of(&p, call), DynamicValue::Number(16.0));

    let number = p.arena.ident("Number");
    let call = p.arena.call(number, &[]);
    assert_eq!(value_of(&p, call), DynamicValue::Number(0.0));
}

#[test]
fn number_statics() {
    let mut p = Program::new();
    let arg = p.arena.str_lit("42px");
    let call = static_call(&mut p, "Number", "parseInt", &[arg]);
    assert_eq!(value_of(&p, call), DynamicValue::Number(42.0));

    let arg = p.arena.str_lit("5");
    let call = static_call(&mut p, "Number", "isInteger", &[arg]);
    assert_eq!(value_of(&p, call), DynamicValue::Boolean(false));
}

#[test]
fn string_methods_on_literals() {
    let mut p = Program::new();
    let call = string_call(&mut p, "abc", "toUpperCase", &[]);
    assert_eq!(value_of(&p, call), DynamicValue::string("ABC"));

    let args = [p.arena.num(1.0), p.arena.num(-1.0)];
    let call = string_call(&mut p, "hello", "slice", &args);
    assert_eq!(value_of(&p, call), DynamicValue::string("ell"));

    let sep = p.arena.str_lit(",");
    let call = string_call(&mut p, "a,b", "split", &[sep]);
    assert_eq!(
        value_of(&p, call),
        DynamicValue::Array(vec![DynamicValue::string("a"), DynamicValue::string("b")])
    );

    let call = string_call(&mut p, "  x ", "trim", &[]);
    assert_eq!(value_of(&p, call), DynamicValue::string("x"));
}

#[test]
fn number_methods_on_literals() {
    let mut p = Program::new();
    let receiver = p.arena.num(255.0);
    let callee = p.arena.member(receiver, "toString");
    let radix = p.arena.num(16.0);
    let call = p.arena.call(callee, &[radix]);
    assert_eq!(value_of(&p, call), DynamicValue::string("ff"));

    let receiver = p.arena.num(1.5);
    let callee = p.arena.member(receiver, "toFixed");
    let digits = p.arena.num(1.0);
    let call = p.arena.call(callee, &[digits]);
    assert_eq!(witness_of(&p, call), call);
}

#[test]
fn call_faults_deopt_at_call() {
    let mut p = Program::new();
    let count = p.arena.num(-1.0);
    let call = string_call(&mut p, "a", "repeat", &[count]);
    assert_eq!(witness_of(&p, call), call);

    let call = static_call(&mut p, "Math", "PI", &[]);
    assert_eq!(witness_of(&p, call), call);

    let call = string_call(&mut p, "a", "replace", &[]);
    assert_eq!(witness_of(&p, call), call);
}

#[test]
fn oversized_results_deopt_at_call() {
    let mut p = Program::new();
    let width = p.arena.num(64.0);
    let call = string_call(&mut p, "x", "padStart", &[width]);
    let config = EvalConfig::default().max_string_len(16);
    let evaluator = Evaluator::new(&p).with_config(config);
    assert_eq!(evaluator.evaluate(call).deopt, Some(call));
}

#[test]
fn unknown_callees_deopt_before_arguments() {
    let mut p = Program::new();
    let callee = p.arena.ident("fetch");
    let arg = p.arena.ident("url");
    let call = p.arena.call(callee, &[arg]);
    assert_eq!(witness_of(&p, call), call);

    let receiver = p.arena.ident("list");
    let callee = p.arena.member(receiver, "join");
    let call = p.arena.call(callee, &[]);
    assert_eq!(witness_of(&p, call), call);
}

#[test]
fn unknown_argument_deopts_at_argument() {
    let mut p = Program::new();
    let arg = p.arena.ident("n");
    let call = static_call(&mut p, "Math", "abs", &[arg]);
    assert_eq!(witness_of(&p, call), arg);

    let list = p.arena.ident("list");
    let spread = p.arena.spread(list);
    let call = static_call(&mut p, "Math", "max", &[spread]);
    assert_eq!(witness_of(&p, call), spread);
}
