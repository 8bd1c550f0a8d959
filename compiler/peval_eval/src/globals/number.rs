//! `Number` namespace and number literal methods.

use peval_ir::DynamicValue;

use super::arg;
use crate::coerce::{
    decimal_literal_len, integer_to_radix_string, is_js_whitespace, number_to_string,
    parse_radix_integer, to_int32, to_integer_or_infinity, to_js_string,
};
use crate::errors::{not_callable, range_error, unsupported, CallResult};

/// `Number.MAX_SAFE_INTEGER`
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Members of `Number.prototype`.
pub(super) const PROTOTYPE_MEMBERS: &[&str] = &[
    "constructor",
    "toExponential",
    "toFixed",
    "toLocaleString",
    "toPrecision",
    "toString",
    "valueOf",
];

/// Methods that exist on numbers but are not folded.
const UNFOLDED_METHODS: &[&str] = &["toExponential", "toFixed", "toLocaleString", "toPrecision"];

pub(super) fn call_static(member: &str, args: &[DynamicValue]) -> CallResult {
    let number = arg(args, 0).as_number();
    let value = match member {
        "isFinite" => number.is_some_and(f64::is_finite).into(),
        "isNaN" => number.is_some_and(f64::is_nan).into(),
        "isInteger" => number.is_some_and(is_integral).into(),
        "isSafeInteger" => number
            .is_some_and(|n| is_integral(n) && n.abs() <= MAX_SAFE_INTEGER)
            .into(),
        "parseFloat" => parse_float(&to_js_string(arg(args, 0))).into(),
        "parseInt" => parse_int(&to_js_string(arg(args, 0)), arg(args, 1)).into(),
        _ => return Err(not_callable(format!("Number.{member}"))),
    };
    Ok(value)
}

pub(super) fn call_method(receiver: f64, method: &str, args: &[DynamicValue]) -> CallResult {
    match method {
        "valueOf" => Ok(DynamicValue::Number(receiver)),
        "toString" => to_string_radix(receiver, arg(args, 0)).map(DynamicValue::String),
        _ if UNFOLDED_METHODS.contains(&method) => {
            Err(unsupported(format!("Number.prototype.{method}")))
        }
        _ => Err(not_callable(format!("Number.prototype.{method}"))),
    }
}

#[inline]
fn is_integral(n: f64) -> bool {
    n.is_finite() && n.trunc() == n
}

/// `Number.prototype.toString(radix)`.
fn to_string_radix(receiver: f64, radix: &DynamicValue) -> CallResult<String> {
    const CALLEE: &str = "Number.prototype.toString";

    let radix = if matches!(radix, DynamicValue::Undefined) {
        10.0
    } else {
        to_integer_or_infinity(radix)
    };
    if !(2.0..=36.0).contains(&radix) {
        return Err(range_error(CALLEE, "radix must be between 2 and 36"));
    }
    if radix == 10.0 {
        return Ok(number_to_string(receiver));
    }
    // Fractional digits in other radixes need the engine's digit generation.
    integer_to_radix_string(receiver, radix as u32).ok_or_else(|| unsupported(CALLEE))
}

/// `parseFloat`: the longest decimal prefix after leading whitespace.
pub(crate) fn parse_float(input: &str) -> f64 {
    let s = input.trim_start_matches(is_js_whitespace);
    for (prefix, value) in [
        ("Infinity", f64::INFINITY),
        ("+Infinity", f64::INFINITY),
        ("-Infinity", f64::NEG_INFINITY),
    ] {
        if s.starts_with(prefix) {
            return value;
        }
    }
    match decimal_literal_len(s) {
        0 => f64::NAN,
        len => s[..len].parse().unwrap_or(f64::NAN),
    }
}

/// `parseInt`: the longest digit prefix in `radix` after whitespace, sign,
/// and an optional `0x` prefix.
pub(crate) fn parse_int(input: &str, radix: &DynamicValue) -> f64 {
    let s = input.trim_start_matches(is_js_whitespace);
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut radix = to_int32(radix);
    let mut strip_prefix = true;
    if radix == 0 {
        radix = 10;
    } else {
        if !(2..=36).contains(&radix) {
            return f64::NAN;
        }
        strip_prefix = radix == 16;
    }

    let mut s = s;
    if strip_prefix && (s.starts_with("0x") || s.starts_with("0X")) {
        s = &s[2..];
        radix = 16;
    }

    let radix = radix as u32;
    let end = s
        .char_indices()
        .find(|(_, c)| c.to_digit(radix).is_none())
        .map_or(s.len(), |(i, _)| i);
    match parse_radix_integer(&s[..end], radix) {
        Some(value) if negative => -value,
        Some(value) => value,
        None => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::CallError;

    fn n(value: f64) -> DynamicValue {
        DynamicValue::Number(value)
    }

    #[test]
    fn predicates_do_not_coerce() {
        assert_eq!(call_static("isInteger", &[n(5.0)]), Ok(true.into()));
        assert_eq!(call_static("isInteger", &[n(5.5)]), Ok(false.into()));
        assert_eq!(call_static("isInteger", &[DynamicValue::string("5")]), Ok(false.into()));
        assert_eq!(call_static("isNaN", &[DynamicValue::string("x")]), Ok(false.into()));
        assert_eq!(call_static("isNaN", &[n(f64::NAN)]), Ok(true.into()));
        assert_eq!(call_static("isFinite", &[n(f64::INFINITY)]), Ok(false.into()));
        assert_eq!(call_static("isSafeInteger", &[n(9_007_199_254_740_992.0)]), Ok(false.into()));
    }

    #[test]
    fn parse_float_prefixes() {
        assert_eq!(parse_float("  3.14abc"), 3.14);
        assert_eq!(parse_float("-.5e1x"), -5.0);
        assert_eq!(parse_float("Infinityx"), f64::INFINITY);
        assert!(parse_float("x1").is_nan());
        assert!(parse_float("").is_nan());
    }

    #[test]
    fn parse_int_radixes() {
        let undefined = DynamicValue::Undefined;
        assert_eq!(parse_int("42px", &undefined), 42.0);
        assert_eq!(parse_int("  -17", &undefined), -17.0);
        assert_eq!(parse_int("0x1f", &undefined), 31.0);
        assert_eq!(parse_int("ff", &n(16.0)), 255.0);
        assert_eq!(parse_int("0x1f", &n(16.0)), 31.0);
        assert_eq!(parse_int("0x1f", &n(10.0)), 0.0);
        assert_eq!(parse_int("101", &n(2.0)), 5.0);
        assert_eq!(parse_int("3.9", &undefined), 3.0);
        assert!(parse_int("z", &undefined).is_nan());
        assert!(parse_int("1", &n(37.0)).is_nan());
        assert!(parse_int("-0", &undefined).is_sign_negative());
    }

    #[test]
    fn to_string_with_radix() {
        assert_eq!(call_method(255.0, "toString", &[n(16.0)]), Ok(DynamicValue::string("ff")));
        assert_eq!(call_method(255.0, "toString", &[]), Ok(DynamicValue::string("255")));
        assert_eq!(call_method(0.5, "toString", &[n(10.0)]), Ok(DynamicValue::string("0.5")));
        assert!(matches!(
            call_method(1.0, "toString", &[n(1.0)]),
            Err(CallError::Range { .. })
        ));
        assert!(matches!(
            call_method(0.5, "toString", &[n(2.0)]),
            Err(CallError::Unsupported { .. })
        ));
    }

    #[test]
    fn other_members() {
        assert_eq!(call_method(3.0, "valueOf", &[]), Ok(n(3.0)));
        assert!(matches!(call_method(3.0, "toFixed", &[]), Err(CallError::Unsupported { .. })));
        assert!(matches!(call_method(3.0, "nope", &[]), Err(CallError::NotCallable { .. })));
        assert!(matches!(
            call_static("MAX_SAFE_INTEGER", &[]),
            Err(CallError::NotCallable { .. })
        ));
    }
}
