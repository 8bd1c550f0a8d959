//! Member access on string and number literals.

use peval_ir::{DynamicValue, EvalHost, ExprId, ExprKind, MemberProperty};

use super::Evaluator;
use crate::coerce::{number_to_key, utf16_units};
use crate::globals::is_prototype_member;
use crate::session::EvaluationSession;

impl<H: EvalHost + ?Sized> Evaluator<'_, H> {
    /// `"abc".length`, `"abc"[1]`, `(5).foo`.
    ///
    /// Only literal receivers are folded. The property is a plain name or a
    /// computed key that evaluates to a string or number.
    pub(super) fn evaluate_member(
        &self,
        node: ExprId,
        object: ExprId,
        property: MemberProperty,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let host = self.host;
        let receiver = match host.kind(object) {
            ExprKind::Str(name) => DynamicValue::string(host.name(name)),
            ExprKind::Num(bits) => DynamicValue::Number(f64::from_bits(bits)),
            _ => return self.deopt(node, session, "member access on non-literal"),
        };

        let computed;
        let key = match property {
            MemberProperty::Named(name) => host.name(name),
            MemberProperty::Computed(key) => {
                computed = match self.evaluate_cached(key, session)? {
                    DynamicValue::String(s) => s,
                    DynamicValue::Number(n) => number_to_key(n),
                    _ => return self.deopt(node, session, "property key is not a string or number"),
                };
                computed.as_str()
            }
        };

        match property_of(&receiver, key) {
            Some(value) => Some(value),
            None => self.deopt(node, session, "property is inherited"),
        }
    }
}

/// Property `key` of a string or number receiver.
///
/// Own properties are `length` and the code unit indices of a string.
/// Inherited members are functions and have no value here; any other name
/// is absent and reads as `undefined`.
fn property_of(receiver: &DynamicValue, key: &str) -> Option<DynamicValue> {
    if let DynamicValue::String(s) = receiver {
        if key == "length" {
            return Some(DynamicValue::Number(s.encode_utf16().count() as f64));
        }
        if let Some(index) = array_index(key) {
            if let Some(&unit) = utf16_units(s).get(index) {
                // A lone surrogate has no string value here.
                return String::from_utf16(&[unit]).ok().map(DynamicValue::String);
            }
        }
    }
    if is_prototype_member(receiver, key) {
        None
    } else {
        Some(DynamicValue::Undefined)
    }
}

/// `"0"`, `"17"`: canonical array index spellings.
fn array_index(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    match bytes {
        [b'0'] => Some(0),
        [b'1'..=b'9', rest @ ..] if rest.iter().all(u8::is_ascii_digit) => s.parse().ok(),
        _ => None,
    }
}
