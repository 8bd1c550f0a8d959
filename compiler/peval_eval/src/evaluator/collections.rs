//! Array and object literals.
//!
//! Elements, property values and computed keys are each evaluated in a
//! nested session. A failure deopts the enclosing session with the nested
//! witness, so the witness points at the part that could not be folded.

use peval_ir::{DynamicValue, EvalHost, ExprId, ExprKind, ExprRange, ObjectValue};

use super::Evaluator;
use crate::coerce::{number_to_key, to_js_string};
use crate::session::EvaluationSession;

impl<H: EvalHost + ?Sized> Evaluator<'_, H> {
    pub(super) fn evaluate_array(
        &self,
        elements: ExprRange,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let elements = self.host.expr_list(elements);
        let mut values = Vec::with_capacity(elements.len());
        for &element in elements {
            values.push(self.evaluate_nested(element, session)?);
        }
        Some(DynamicValue::Array(values))
    }

    pub(super) fn evaluate_object(
        &self,
        properties: ExprRange,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let host = self.host;
        let mut object = ObjectValue::default();
        for &property in host.expr_list(properties) {
            let ExprKind::Property {
                key,
                value,
                computed,
            } = host.kind(property)
            else {
                // Methods, accessors and spreads.
                return self.deopt(property, session, "unsupported object member");
            };

            let key = if computed {
                to_js_string(&self.evaluate_nested(key, session)?)
            } else {
                match host.kind(key) {
                    // Sets the prototype instead of defining a property.
                    ExprKind::Ident(name) | ExprKind::Str(name)
                        if host.name(name) == "__proto__" =>
                    {
                        return self.deopt(key, session, "prototype assignment")
                    }
                    ExprKind::Ident(name) | ExprKind::Str(name) => host.name(name).to_owned(),
                    ExprKind::Num(bits) => number_to_key(f64::from_bits(bits)),
                    _ => return self.deopt(key, session, "unsupported property key"),
                }
            };

            let value = self.evaluate_nested(value, session)?;
            // Later duplicates overwrite in place, keeping first-seen order.
            object.insert(key, value);
        }
        Some(DynamicValue::Object(object))
    }

    /// Evaluate `node` in a nested session, propagating its witness.
    fn evaluate_nested(
        &self,
        node: ExprId,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let mut nested = session.nested();
        let value = self.evaluate_cached(node, &mut nested);
        match value {
            Some(value) if nested.is_confident() => Some(value),
            _ => {
                let witness = nested.deopt_witness().unwrap_or(node);
                self.deopt(witness, session, "nested evaluation failed")
            }
        }
    }
}
