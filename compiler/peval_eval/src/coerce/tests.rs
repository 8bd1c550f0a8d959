use pretty_assertions::assert_eq;

use peval_ir::ObjectValue;

use super::*;

#[test]
fn number_formatting_plain_range() {
    assert_eq!(number_to_string(0.0), "0");
    assert_eq!(number_to_string(-0.0), "0");
    assert_eq!(number_to_string(1.0), "1");
    assert_eq!(number_to_string(-42.0), "-42");
    assert_eq!(number_to_string(0.1), "0.1");
    assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(number_to_string(123.456), "123.456");
    assert_eq!(number_to_string(1e20), "100000000000000000000");
    assert_eq!(number_to_string(0.000_001), "0.000001");
}

#[test]
fn number_formatting_exponent_range() {
    assert_eq!(number_to_string(1e21), "1e+21");
    assert_eq!(number_to_string(1.5e300), "1.5e+300");
    assert_eq!(number_to_string(1e-7), "1e-7");
    assert_eq!(number_to_string(1.25e-7), "1.25e-7");
    assert_eq!(number_to_string(5e-324), "5e-324");
    assert_eq!(number_to_string(-2e25), "-2e+25");
}

#[test]
fn number_formatting_special_values() {
    assert_eq!(number_to_string(f64::NAN), "NaN");
    assert_eq!(number_to_string(f64::INFINITY), "Infinity");
    assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn string_to_number_decimal() {
    assert_eq!(string_to_number(""), 0.0);
    assert_eq!(string_to_number("   "), 0.0);
    assert_eq!(string_to_number(" 42 "), 42.0);
    assert_eq!(string_to_number("\n\t-1.5e3\u{00A0}"), -1500.0);
    assert_eq!(string_to_number(".5"), 0.5);
    assert_eq!(string_to_number("5."), 5.0);
    assert_eq!(string_to_number("+7"), 7.0);
    assert_eq!(string_to_number("Infinity"), f64::INFINITY);
    assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
}

#[test]
fn string_to_number_prefixed_integers() {
    assert_eq!(string_to_number("0x1F"), 31.0);
    assert_eq!(string_to_number("0o17"), 15.0);
    assert_eq!(string_to_number("0b101"), 5.0);
    assert!(string_to_number("-0x10").is_nan());
    assert!(string_to_number("0x").is_nan());
    assert!(string_to_number("0xG").is_nan());
}

#[test]
fn string_to_number_rejects_foreign_spellings() {
    for s in ["inf", "nan", "NaN", "infinity", "1_000", "abc", "1e", ".", "+", "1 2"] {
        assert!(string_to_number(s).is_nan(), "{s:?} should be NaN");
    }
}

#[test]
fn to_number_of_values() {
    assert!(to_number(&DynamicValue::Undefined).is_nan());
    assert_eq!(to_number(&DynamicValue::Null), 0.0);
    assert_eq!(to_number(&DynamicValue::Boolean(true)), 1.0);
    assert_eq!(to_number(&DynamicValue::Array(vec![])), 0.0);
    assert_eq!(to_number(&DynamicValue::Array(vec![DynamicValue::Number(7.0)])), 7.0);
    assert!(to_number(&DynamicValue::Array(vec![1.0.into(), 2.0.into()])).is_nan());
    assert!(to_number(&DynamicValue::Object(ObjectValue::default())).is_nan());
}

#[test]
fn to_string_of_collections() {
    let arr = DynamicValue::Array(vec![
        DynamicValue::Number(1.0),
        DynamicValue::Null,
        DynamicValue::Undefined,
        DynamicValue::Array(vec![DynamicValue::string("a"), DynamicValue::Boolean(false)]),
    ]);
    assert_eq!(to_js_string(&arr), "1,,,a,false");
    assert_eq!(
        to_js_string(&DynamicValue::Object(ObjectValue::default())),
        "[object Object]"
    );
}

#[test]
fn int32_conversions() {
    assert_eq!(number_to_int32(f64::NAN), 0);
    assert_eq!(number_to_int32(f64::INFINITY), 0);
    assert_eq!(number_to_int32(4_294_967_296.0), 0);
    assert_eq!(number_to_int32(2_147_483_648.0), -2_147_483_648);
    assert_eq!(number_to_int32(-1.0), -1);
    assert_eq!(number_to_int32(3.9), 3);
    assert_eq!(number_to_int32(-3.9), -3);
    assert_eq!(number_to_uint32(-1.0), 4_294_967_295);
    assert_eq!(number_to_uint16(65_537.0), 1);
}

#[test]
fn integer_or_infinity() {
    assert_eq!(to_integer_or_infinity(&DynamicValue::Undefined), 0.0);
    assert_eq!(to_integer_or_infinity(&DynamicValue::Number(-2.7)), -2.0);
    assert_eq!(
        to_integer_or_infinity(&DynamicValue::Number(f64::NEG_INFINITY)),
        f64::NEG_INFINITY
    );
    assert!(to_integer_or_infinity(&DynamicValue::Number(-0.2)).is_sign_positive());
}

#[test]
fn radix_strings() {
    assert_eq!(integer_to_radix_string(255.0, 16).as_deref(), Some("ff"));
    assert_eq!(integer_to_radix_string(-5.0, 2).as_deref(), Some("-101"));
    assert_eq!(integer_to_radix_string(0.0, 36).as_deref(), Some("0"));
    assert_eq!(integer_to_radix_string(f64::NAN, 2).as_deref(), Some("NaN"));
    assert_eq!(integer_to_radix_string(1.5, 2), None);
    assert_eq!(integer_to_radix_string(8.0, 1), None);
}

#[test]
fn utf16_helpers() {
    assert_eq!(utf16_len("abc"), 3);
    assert_eq!(utf16_len("😀"), 2);
    assert_eq!(utf16_units("é"), vec![0xE9]);
}

#[test]
fn decimal_prefix_lengths() {
    assert_eq!(decimal_literal_len("3.14abc"), 4);
    assert_eq!(decimal_literal_len("1e5x"), 3);
    assert_eq!(decimal_literal_len("1e"), 1);
    assert_eq!(decimal_literal_len("-.5"), 3);
    assert_eq!(decimal_literal_len("abc"), 0);
}
