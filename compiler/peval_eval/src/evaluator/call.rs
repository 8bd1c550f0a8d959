//! Calls to native callables.

use smallvec::SmallVec;
use tracing::debug;

use peval_ir::{DynamicValue, EvalHost, ExprId, ExprKind, ExprRange, MemberProperty, Name};

use super::Evaluator;
use crate::globals::{Callee, GlobalObject};
use crate::session::EvaluationSession;

impl<'h, H: EvalHost + ?Sized> Evaluator<'h, H> {
    /// Fold `callee(args...)` when the callee is on the allow-list.
    ///
    /// Arguments are evaluated in the caller's session. A fault raised by
    /// the native deopts at the call.
    pub(super) fn evaluate_call(
        &self,
        node: ExprId,
        callee: ExprId,
        args: ExprRange,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let Some(target) = self.resolve_callee(callee) else {
            return self.deopt(node, session, "callee is not a known native");
        };
        if let Callee::Static { member, .. } = target {
            if self.config.is_excluded(member) {
                return self.deopt(node, session, "callee is excluded");
            }
        }

        let mut values: SmallVec<[DynamicValue; 4]> = SmallVec::new();
        for &arg in self.host.expr_list(args) {
            values.push(self.evaluate_cached(arg, session)?);
        }

        match target.invoke(&values, &self.config) {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(?node, callee = %target, %error, "native call faulted");
                self.deopt(node, session, "native call faulted")
            }
        }
    }

    /// `String`, `Math.max`, `"abc".slice`, `(1).toString`.
    fn resolve_callee(&self, callee: ExprId) -> Option<Callee<'h>> {
        let host: &'h H = self.host;
        match host.kind(callee) {
            ExprKind::Ident(name) => {
                let object = self.pristine_global(callee, name)?;
                Some(Callee::Global(object))
            }
            ExprKind::Member {
                object,
                property: MemberProperty::Named(member),
            } => {
                let member = host.name(member);
                match host.kind(object) {
                    ExprKind::Ident(name) => {
                        let object = self.pristine_global(object, name)?;
                        Some(Callee::Static { object, member })
                    }
                    ExprKind::Str(receiver) => Some(Callee::StringMethod {
                        receiver: host.name(receiver),
                        method: member,
                    }),
                    ExprKind::Num(bits) => Some(Callee::NumberMethod {
                        receiver: f64::from_bits(bits),
                        method: member,
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// The global namespace `name` names at `at`, unless a local binding
    /// shadows it or the program assigns to it.
    pub(super) fn pristine_global(&self, at: ExprId, name: Name) -> Option<GlobalObject> {
        let object = GlobalObject::from_name(self.host.name(name))?;
        let pristine = !self.host.is_shadowed(at, name) && !self.host.is_global_reassigned(name);
        pristine.then_some(object)
    }
}
