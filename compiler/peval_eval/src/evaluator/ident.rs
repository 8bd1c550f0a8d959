//! Identifier references.

use peval_ir::{DynamicValue, EvalHost, ExprId, Name};

use super::Evaluator;
use crate::session::EvaluationSession;

impl<H: EvalHost + ?Sized> Evaluator<'_, H> {
    /// Resolve an identifier through its binding.
    ///
    /// Binding failures (reassignment, reads before the declaration ends)
    /// deopt at the declaration; a reference the host cannot follow deopts
    /// at the reference.
    pub(super) fn evaluate_identifier(
        &self,
        node: ExprId,
        name: Name,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let host = self.host;
        let binding = host.binding(node, name);

        if let Some(binding) = &binding {
            if binding.reassigned {
                return self.deopt(binding.declaration, session, "binding is reassigned");
            }
            if host.span(node).start < binding.span.end {
                return self.deopt(
                    binding.declaration,
                    session,
                    "reference precedes end of declaration",
                );
            }
            if let Some(value) = &binding.value {
                return Some(value.clone());
            }
        }

        let well_known = match host.name(name) {
            "undefined" => Some(DynamicValue::Undefined),
            "Infinity" => Some(DynamicValue::Number(f64::INFINITY)),
            "NaN" => Some(DynamicValue::Number(f64::NAN)),
            _ => None,
        };
        if let Some(value) = well_known {
            return match binding {
                None => Some(value),
                Some(binding) => {
                    self.deopt(binding.declaration, session, "well-known global is shadowed")
                }
            };
        }

        let target = host.resolve(node);
        if target == node {
            return self.deopt(node, session, "unresolvable reference");
        }
        self.evaluate_cached(target, session)
    }
}
