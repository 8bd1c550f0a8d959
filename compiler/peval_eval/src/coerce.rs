//! Type coercions.
//!
//! The abstract operations every operator and native callable is defined in
//! terms of: `ToPrimitive`, `ToNumber`, `ToString`, `ToInt32`/`ToUint32`,
//! `ToIntegerOrInfinity`. Plain arrays and objects have no custom
//! `valueOf`, so `ToPrimitive` of them is their `toString` for either hint.
//!
//! Strings are UTF-8 on the Rust side; operations defined on UTF-16 code
//! units (`length`, indexing, relational comparison) go through
//! [`utf16_units`].

use peval_ir::DynamicValue;

/// `2^32`, the modulus of the 32-bit integer conversions.
const TWO_32: f64 = 4_294_967_296.0;

/// `ToPrimitive`: arrays join with `,`, objects become `[object Object]`.
pub fn to_primitive(value: &DynamicValue) -> DynamicValue {
    match value {
        DynamicValue::Array(_) | DynamicValue::Object(_) => {
            DynamicValue::String(to_js_string(value))
        }
        other => other.clone(),
    }
}

/// `ToNumber`.
pub fn to_number(value: &DynamicValue) -> f64 {
    match value {
        DynamicValue::Undefined => f64::NAN,
        DynamicValue::Null => 0.0,
        DynamicValue::Boolean(b) => f64::from(u8::from(*b)),
        DynamicValue::Number(n) => *n,
        DynamicValue::String(s) => string_to_number(s),
        DynamicValue::Array(_) | DynamicValue::Object(_) => to_number(&to_primitive(value)),
    }
}

/// `ToString`.
pub fn to_js_string(value: &DynamicValue) -> String {
    match value {
        DynamicValue::Undefined => "undefined".to_owned(),
        DynamicValue::Null => "null".to_owned(),
        DynamicValue::Boolean(b) => b.to_string(),
        DynamicValue::Number(n) => number_to_string(*n),
        DynamicValue::String(s) => s.clone(),
        DynamicValue::Array(items) => join(items, ","),
        DynamicValue::Object(_) => "[object Object]".to_owned(),
    }
}

/// `Array.prototype.join`: `null` and `undefined` elements become empty.
pub fn join(items: &[DynamicValue], separator: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        if !item.is_nullish() {
            out.push_str(&to_js_string(item));
        }
    }
    out
}

/// `ToIntegerOrInfinity`: truncation, with `NaN` mapped to `0`.
pub fn to_integer_or_infinity(value: &DynamicValue) -> f64 {
    let n = to_number(value);
    if n.is_nan() {
        0.0
    } else if n.is_infinite() {
        n
    } else {
        // `+ 0.0` folds `-0` into `+0`.
        n.trunc() + 0.0
    }
}

/// `ToUint32` of a number.
pub fn number_to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let int = n.trunc() % TWO_32;
    let int = if int < 0.0 { int + TWO_32 } else { int };
    int as u32
}

/// `ToInt32` of a number.
pub fn number_to_int32(n: f64) -> i32 {
    number_to_uint32(n) as i32
}

/// `ToUint16` of a number (`String.fromCharCode`).
pub fn number_to_uint16(n: f64) -> u16 {
    (number_to_uint32(n) & 0xFFFF) as u16
}

/// `ToInt32`.
pub fn to_int32(value: &DynamicValue) -> i32 {
    number_to_int32(to_number(value))
}

/// `ToUint32`.
pub fn to_uint32(value: &DynamicValue) -> u32 {
    number_to_uint32(to_number(value))
}

/// The string's UTF-16 code units.
#[inline]
pub fn utf16_units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Length in UTF-16 code units.
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Whitespace and line terminators stripped by `StringToNumber` and `trim`.
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `StringToNumber`.
///
/// Accepts decimal literals with optional sign and exponent, `Infinity`, and
/// unsigned `0x`/`0o`/`0b` integers. Rust-only spellings (`inf`, `nan`,
/// `1_000`) are rejected.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    let bytes = trimmed.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix_integer(&trimmed[2..], radix).unwrap_or(f64::NAN);
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if decimal_literal_len(trimmed) == trimmed.len() {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Parse all of `digits` as an unsigned integer in `radix`.
pub(crate) fn parse_radix_integer(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0.0f64;
    for c in digits.chars() {
        let d = c.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(d);
    }
    Some(value)
}

/// Length of the longest prefix of `s` that is a `StrDecimalLiteral`
/// (excluding `Infinity`), or `0` if there is none.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "cursor arithmetic stays within `bytes.len()`"
)]
pub(crate) fn decimal_literal_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// `Number::toString` with radix 10.
///
/// Uses the shortest round-trip digits (what `{:e}` prints) and the
/// language's layout rules: plain notation for decimal exponents in
/// `[-7, 21)`, exponent notation (`1e+21`, `1.5e-7`) outside it.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "decimal exponents of an f64 are within [-324, 309)"
)]
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }

    let sci = format!("{n:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    // Decimal point position: value = 0.digits * 10^point
    let point = exponent + 1;

    if k <= point && point <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat('0').take((point - k) as usize));
        out
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        let zeros = "0".repeat((-point) as usize);
        format!("0.{zeros}{digits}")
    } else {
        let e = point - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    }
}

/// `Number::toString(radix)` for integral values.
///
/// Returns `None` for fractional values or magnitudes beyond `u64`, which
/// need the full digit-generation algorithm.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "radix is checked to be in 2..=36"
)]
pub fn integer_to_radix_string(n: f64, radix: u32) -> Option<String> {
    if !(2..=36).contains(&radix) {
        return None;
    }
    if n.is_nan() {
        return Some("NaN".to_owned());
    }
    if n.is_infinite() {
        return Some(if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned());
    }
    if n.fract() != 0.0 || n.abs() >= 18_446_744_073_709_551_616.0 {
        return None;
    }
    let mut magnitude = n.abs() as u64;
    if magnitude == 0 {
        return Some("0".to_owned());
    }
    let mut digits = Vec::new();
    while magnitude > 0 {
        let d = (magnitude % u64::from(radix)) as u32;
        digits.push(std::char::from_digit(d, radix)?);
        magnitude /= u64::from(radix);
    }
    if n < 0.0 {
        digits.push('-');
    }
    Some(digits.iter().rev().collect())
}

/// Canonical property key for a number (`{ 1.0: x }` has key `"1"`).
#[inline]
pub fn number_to_key(n: f64) -> String {
    number_to_string(n)
}

#[cfg(test)]
mod tests;
