//! `Math` namespace.

use peval_ir::DynamicValue;

use super::num_arg;
use crate::coerce::{number_to_int32, number_to_uint32, to_number};
use crate::errors::{not_callable, unsupported, CallResult};
use crate::operators::pow;

pub(super) fn call(member: &str, args: &[DynamicValue]) -> CallResult {
    let x = || num_arg(args, 0);
    let y = || num_arg(args, 1);
    let n = match member {
        "abs" => x().abs(),
        "acos" => x().acos(),
        "acosh" => x().acosh(),
        "asin" => x().asin(),
        "asinh" => x().asinh(),
        "atan" => x().atan(),
        "atanh" => x().atanh(),
        "atan2" => x().atan2(y()),
        "cbrt" => x().cbrt(),
        "ceil" => x().ceil(),
        "clz32" => f64::from(number_to_uint32(x()).leading_zeros()),
        "cos" => x().cos(),
        "cosh" => x().cosh(),
        "exp" => x().exp(),
        "expm1" => x().exp_m1(),
        "floor" => x().floor(),
        "fround" => f64::from(x() as f32),
        "hypot" => hypot(args),
        "imul" => f64::from(number_to_int32(x()).wrapping_mul(number_to_int32(y()))),
        "log" => x().ln(),
        "log1p" => x().ln_1p(),
        "log10" => x().log10(),
        "log2" => x().log2(),
        "max" => max(args),
        "min" => min(args),
        "pow" => pow(x(), y()),
        "round" => round(x()),
        "sign" => sign(x()),
        "sin" => x().sin(),
        "sinh" => x().sinh(),
        "sqrt" => x().sqrt(),
        "tan" => x().tan(),
        "tanh" => x().tanh(),
        "trunc" => x().trunc(),
        // Non-deterministic: never folded, excluded or not.
        "random" => return Err(unsupported("Math.random")),
        // Value properties (`Math.PI`) and missing members alike.
        _ => return Err(not_callable(format!("Math.{member}"))),
    };
    Ok(DynamicValue::Number(n))
}

/// `Math.round`: ties toward `+Infinity`, sign of zero preserved.
fn round(x: f64) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    if x > 0.0 && x < 0.5 {
        return 0.0;
    }
    if x < 0.0 && x >= -0.5 {
        return -0.0;
    }
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}

/// `Math.max`: `NaN` wins, `+0` beats `-0`, no arguments is `-Infinity`.
fn max(args: &[DynamicValue]) -> f64 {
    args.iter().map(to_number).fold(f64::NEG_INFINITY, |acc, n| {
        if acc.is_nan() || n.is_nan() {
            f64::NAN
        } else if n > acc || (n == 0.0 && acc == 0.0 && acc.is_sign_negative()) {
            n
        } else {
            acc
        }
    })
}

/// `Math.min`: `NaN` wins, `-0` beats `+0`, no arguments is `Infinity`.
fn min(args: &[DynamicValue]) -> f64 {
    args.iter().map(to_number).fold(f64::INFINITY, |acc, n| {
        if acc.is_nan() || n.is_nan() {
            f64::NAN
        } else if n < acc || (n == 0.0 && acc == 0.0 && n.is_sign_negative()) {
            n
        } else {
            acc
        }
    })
}

/// `Math.hypot`: an infinite argument wins over `NaN`.
fn hypot(args: &[DynamicValue]) -> f64 {
    let values: Vec<f64> = args.iter().map(to_number).collect();
    if values.iter().any(|n| n.is_infinite()) {
        return f64::INFINITY;
    }
    if values.iter().any(|n| n.is_nan()) {
        return f64::NAN;
    }
    values.iter().fold(0.0, |acc, n| acc.hypot(*n))
}
