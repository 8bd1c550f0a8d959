//! Template literals.

use peval_ir::{DynamicValue, EvalHost, ExprId, ExprKind, ExprRange, MemberProperty, QuasiRange};

use super::Evaluator;
use crate::coerce::to_js_string;
use crate::globals::GlobalObject;
use crate::session::EvaluationSession;

impl<H: EvalHost + ?Sized> Evaluator<'_, H> {
    /// Interleave the template's text segments with its interpolations.
    ///
    /// `raw` selects the raw segment text (`String.raw`) over the cooked
    /// text. A segment without cooked text (an escape only legal in tagged
    /// templates) deopts.
    pub(super) fn evaluate_quasis(
        &self,
        node: ExprId,
        quasis: QuasiRange,
        exprs: ExprRange,
        raw: bool,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let host = self.host;
        let exprs = host.expr_list(exprs);
        let mut out = String::new();
        for (i, quasi) in host.quasis(quasis).iter().enumerate() {
            let text = if raw { Some(quasi.raw) } else { quasi.cooked };
            let Some(text) = text else {
                return self.deopt(node, session, "template segment has no cooked text");
            };
            out.push_str(host.name(text));
            if let Some(&expr) = exprs.get(i) {
                let value = self.evaluate_cached(expr, session)?;
                out.push_str(&to_js_string(&value));
            }
        }
        Some(DynamicValue::String(out))
    }

    /// Whether `tag` is the pristine global `String.raw`.
    pub(super) fn is_string_raw(&self, tag: ExprId) -> bool {
        let host = self.host;
        let ExprKind::Member {
            object,
            property: MemberProperty::Named(property),
        } = host.kind(tag)
        else {
            return false;
        };
        let ExprKind::Ident(name) = host.kind(object) else {
            return false;
        };
        host.name(property) == "raw"
            && self.pristine_global(object, name) == Some(GlobalObject::String)
    }
}
