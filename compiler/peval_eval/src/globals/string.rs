//! `String` namespace and string literal methods.
//!
//! Positions, lengths and search results are in UTF-16 code units. A result
//! that would split a surrogate pair cannot be represented as a Rust string
//! and faults with [`CallError::LoneSurrogate`](crate::CallError).

use peval_ir::DynamicValue;

use super::{arg, num_arg};
use crate::coerce::{
    is_js_whitespace, number_to_uint16, to_integer_or_infinity, to_js_string, to_number,
    to_uint32, utf16_units,
};
use crate::errors::{
    lone_surrogate, not_callable, range_error, string_too_long, unsupported, CallResult,
};
use crate::EvalConfig;

/// Members of `String.prototype`, including the Annex B HTML methods.
pub(super) const PROTOTYPE_MEMBERS: &[&str] = &[
    "anchor", "at", "big", "blink", "bold", "charAt", "charCodeAt", "codePointAt", "concat",
    "constructor", "endsWith", "fixed", "fontcolor", "fontsize", "includes", "indexOf",
    "isWellFormed", "italics", "lastIndexOf", "link", "localeCompare", "match", "matchAll",
    "normalize", "padEnd", "padStart", "repeat", "replace", "replaceAll", "search", "slice",
    "small", "split", "startsWith", "strike", "sub", "substr", "substring", "sup",
    "toLocaleLowerCase", "toLocaleUpperCase", "toLowerCase", "toString", "toUpperCase",
    "toWellFormed", "trim", "trimEnd", "trimLeft", "trimRight", "trimStart", "valueOf",
];

/// Methods that exist on strings but are not folded.
const UNFOLDED_METHODS: &[&str] = &[
    "isWellFormed",
    "localeCompare",
    "match",
    "matchAll",
    "normalize",
    "replace",
    "replaceAll",
    "search",
    "toLocaleLowerCase",
    "toLocaleUpperCase",
    "toWellFormed",
];

pub(super) fn call_static(member: &str, args: &[DynamicValue]) -> CallResult {
    match member {
        "fromCharCode" => {
            let units: Vec<u16> = args
                .iter()
                .map(|a| number_to_uint16(to_number(a)))
                .collect();
            from_units(&units, "String.fromCharCode").map(DynamicValue::String)
        }
        "fromCodePoint" => from_code_points(args).map(DynamicValue::String),
        // Needs the template strings object of a tagged call.
        "raw" => Err(unsupported("String.raw")),
        _ => Err(not_callable(format!("String.{member}"))),
    }
}

fn from_code_points(args: &[DynamicValue]) -> CallResult<String> {
    const CALLEE: &str = "String.fromCodePoint";

    let mut out = String::new();
    for value in args {
        let n = to_number(value);
        if n.trunc() != n || !(0.0..=1_114_111.0).contains(&n) {
            return Err(range_error(CALLEE, "invalid code point"));
        }
        let c = char::from_u32(n as u32).ok_or_else(|| lone_surrogate(CALLEE))?;
        out.push(c);
    }
    Ok(out)
}

pub(super) fn call_method(
    receiver: &str,
    method: &str,
    args: &[DynamicValue],
    config: &EvalConfig,
) -> CallResult {
    let callee = format!("String.prototype.{method}");
    let units = utf16_units(receiver);
    let len = units.len();

    let value = match method {
        "toString" | "valueOf" => DynamicValue::string(receiver),

        "charAt" => match position(to_integer_or_infinity(arg(args, 0)), len) {
            Some(i) => DynamicValue::String(from_units(&units[i..=i], &callee)?),
            None => DynamicValue::string(""),
        },
        "charCodeAt" => match position(to_integer_or_infinity(arg(args, 0)), len) {
            Some(i) => DynamicValue::Number(f64::from(units[i])),
            None => DynamicValue::Number(f64::NAN),
        },
        "codePointAt" => match position(to_integer_or_infinity(arg(args, 0)), len) {
            Some(i) => DynamicValue::Number(f64::from(code_point_at(&units, i))),
            None => DynamicValue::Undefined,
        },
        "at" => {
            let rel = to_integer_or_infinity(arg(args, 0));
            let k = if rel >= 0.0 { rel } else { len as f64 + rel };
            match position(k, len) {
                Some(i) => DynamicValue::String(from_units(&units[i..=i], &callee)?),
                None => DynamicValue::Undefined,
            }
        }

        "indexOf" => {
            let needle = utf16_units(&to_js_string(arg(args, 0)));
            let start = clamp(to_integer_or_infinity(arg(args, 1)), len);
            index_number(find(&units, &needle, start))
        }
        "lastIndexOf" => {
            let needle = utf16_units(&to_js_string(arg(args, 0)));
            let pos = num_arg(args, 1);
            let start = if pos.is_nan() {
                len
            } else {
                clamp(to_integer_or_infinity(arg(args, 1)), len)
            };
            index_number(rfind(&units, &needle, start))
        }
        "includes" => {
            let needle = utf16_units(&to_js_string(arg(args, 0)));
            let start = clamp(to_integer_or_infinity(arg(args, 1)), len);
            find(&units, &needle, start).is_some().into()
        }
        "startsWith" => {
            let needle = utf16_units(&to_js_string(arg(args, 0)));
            let start = clamp(to_integer_or_infinity(arg(args, 1)), len);
            units[start..].starts_with(&needle).into()
        }
        "endsWith" => {
            let needle = utf16_units(&to_js_string(arg(args, 0)));
            let end = match arg(args, 1) {
                DynamicValue::Undefined => len,
                value => clamp(to_integer_or_infinity(value), len),
            };
            units[..end].ends_with(&needle).into()
        }

        "slice" => {
            let from = relative(to_integer_or_infinity(arg(args, 0)), len);
            let to = match arg(args, 1) {
                DynamicValue::Undefined => len,
                value => relative(to_integer_or_infinity(value), len),
            };
            substring(&units, from, to.max(from), &callee)?
        }
        "substring" => {
            let a = clamp(to_integer_or_infinity(arg(args, 0)), len);
            let b = match arg(args, 1) {
                DynamicValue::Undefined => len,
                value => clamp(to_integer_or_infinity(value), len),
            };
            substring(&units, a.min(b), a.max(b), &callee)?
        }
        "substr" => {
            let start = relative(to_integer_or_infinity(arg(args, 0)), len);
            let count = match arg(args, 1) {
                DynamicValue::Undefined => len.saturating_sub(start),
                value => clamp(to_integer_or_infinity(value), len.saturating_sub(start)),
            };
            substring(&units, start, start.saturating_add(count), &callee)?
        }

        "toUpperCase" => DynamicValue::String(receiver.to_uppercase()),
        "toLowerCase" => DynamicValue::String(receiver.to_lowercase()),
        "trim" => DynamicValue::string(receiver.trim_matches(is_js_whitespace)),
        "trimStart" => DynamicValue::string(receiver.trim_start_matches(is_js_whitespace)),
        "trimEnd" => DynamicValue::string(receiver.trim_end_matches(is_js_whitespace)),

        "padStart" | "padEnd" => pad(
            receiver,
            &units,
            arg(args, 0),
            arg(args, 1),
            method == "padStart",
            config.max_string_len,
            &callee,
        )?,
        "repeat" => repeat(receiver, len, arg(args, 0), config.max_string_len, &callee)?,
        "concat" => {
            let mut out = receiver.to_owned();
            for value in args {
                out.push_str(&to_js_string(value));
            }
            DynamicValue::String(out)
        }
        "split" => split(&units, arg(args, 0), arg(args, 1), &callee)?,

        _ if UNFOLDED_METHODS.contains(&method) => return Err(unsupported(callee)),
        _ => return Err(not_callable(callee)),
    };
    Ok(value)
}

/// Decode code units, faulting on unpaired surrogates.
fn from_units(units: &[u16], callee: &str) -> CallResult<String> {
    String::from_utf16(units).map_err(|_| lone_surrogate(callee))
}

fn substring(units: &[u16], from: usize, to: usize, callee: &str) -> CallResult {
    from_units(&units[from..to], callee).map(DynamicValue::String)
}

/// `pos` as an in-bounds index.
#[inline]
fn position(pos: f64, len: usize) -> Option<usize> {
    (pos >= 0.0 && pos < len as f64).then_some(pos as usize)
}

/// `pos` clamped to `[0, len]`.
#[inline]
fn clamp(pos: f64, len: usize) -> usize {
    pos.clamp(0.0, len as f64) as usize
}

/// A possibly negative position counted from the end, clamped to `[0, len]`.
#[inline]
fn relative(pos: f64, len: usize) -> usize {
    if pos < 0.0 {
        clamp(len as f64 + pos, len)
    } else {
        clamp(pos, len)
    }
}

fn index_number(index: Option<usize>) -> DynamicValue {
    DynamicValue::Number(index.map_or(-1.0, |i| i as f64))
}

fn code_point_at(units: &[u16], i: usize) -> u32 {
    match char::decode_utf16(units[i..].iter().copied()).next() {
        Some(Ok(c)) => u32::from(c),
        Some(Err(e)) => u32::from(e.unpaired_surrogate()),
        None => 0,
    }
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "match offset plus `start` is within `haystack.len()`"
)]
fn find(haystack: &[u16], needle: &[u16], start: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(start);
    }
    haystack[start..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + start)
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "`k <= haystack.len() - needle.len()`"
)]
fn rfind(haystack: &[u16], needle: &[u16], start: usize) -> Option<usize> {
    let last = haystack.len().checked_sub(needle.len())?;
    (0..=start.min(last))
        .rev()
        .find(|&k| &haystack[k..k + needle.len()] == needle)
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "subtraction guarded by `target > units.len()` check"
)]
fn pad(
    receiver: &str,
    units: &[u16],
    max_length: &DynamicValue,
    fill: &DynamicValue,
    at_start: bool,
    limit: usize,
    callee: &str,
) -> CallResult {
    let target = to_integer_or_infinity(max_length);
    if target <= units.len() as f64 {
        return Ok(DynamicValue::string(receiver));
    }
    if target > limit as f64 {
        return Err(string_too_long(callee, limit));
    }
    let filler = match fill {
        DynamicValue::Undefined => vec![u16::from(b' ')],
        value => utf16_units(&to_js_string(value)),
    };
    if filler.is_empty() {
        return Ok(DynamicValue::string(receiver));
    }

    let fill_len = target as usize - units.len();
    let padding: Vec<u16> = filler.iter().copied().cycle().take(fill_len).collect();
    let mut out = Vec::with_capacity(target as usize);
    if at_start {
        out.extend_from_slice(&padding);
        out.extend_from_slice(units);
    } else {
        out.extend_from_slice(units);
        out.extend_from_slice(&padding);
    }
    from_units(&out, callee).map(DynamicValue::String)
}

fn repeat(receiver: &str, len: usize, count: &DynamicValue, limit: usize, callee: &str) -> CallResult {
    let count = to_integer_or_infinity(count);
    if count < 0.0 || count.is_infinite() {
        return Err(range_error(callee, "invalid count value"));
    }
    if count == 0.0 || len == 0 {
        return Ok(DynamicValue::string(""));
    }
    if len as f64 * count > limit as f64 {
        return Err(string_too_long(callee, limit));
    }
    Ok(DynamicValue::String(receiver.repeat(count as usize)))
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "a match ends within `units.len()`"
)]
fn split(
    units: &[u16],
    separator: &DynamicValue,
    limit: &DynamicValue,
    callee: &str,
) -> CallResult {
    let limit = match limit {
        DynamicValue::Undefined => u32::MAX,
        value => to_uint32(value),
    };
    let limit = limit as usize;

    let mut parts: Vec<DynamicValue> = Vec::new();
    if limit == 0 {
        return Ok(DynamicValue::Array(parts));
    }
    if matches!(separator, DynamicValue::Undefined) {
        parts.push(DynamicValue::String(from_units(units, callee)?));
        return Ok(DynamicValue::Array(parts));
    }

    let sep = utf16_units(&to_js_string(separator));
    if sep.is_empty() {
        for unit in units.iter().take(limit) {
            parts.push(DynamicValue::String(from_units(std::slice::from_ref(unit), callee)?));
        }
        return Ok(DynamicValue::Array(parts));
    }
    if units.is_empty() {
        parts.push(DynamicValue::string(""));
        return Ok(DynamicValue::Array(parts));
    }

    let mut start = 0;
    while let Some(found) = find(units, &sep, start) {
        parts.push(substring(units, start, found, callee)?);
        if parts.len() == limit {
            return Ok(DynamicValue::Array(parts));
        }
        start = found + sep.len();
    }
    parts.push(substring(units, start, units.len(), callee)?);
    Ok(DynamicValue::Array(parts))
}
