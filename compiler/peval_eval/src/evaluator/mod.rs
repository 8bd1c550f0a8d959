//! Expression dispatch.
//!
//! [`Evaluator::evaluate`] opens a fresh [`EvaluationSession`] and walks the
//! host tree through `evaluate_cached`, which memoizes per node and detects
//! cycles. Each expression kind has one case; anything without a case
//! deopts at the node itself.
//!
//! # Soundness
//!
//! A confident result is the value the expression would have at runtime.
//! Whenever that cannot be established the session deopts; the evaluator
//! never guesses. Every `None` returned while evaluating means the session
//! is no longer confident.
//!
//! # Borrow Pattern
//!
//! [`ExprKind`] is `Copy`, so each case copies the kind out of the host
//! and recurses freely. The host is only ever borrowed shared.

mod call;
mod collections;
mod ident;
mod member;
mod quasis;

use peval_ir::{BinaryOp, DynamicValue, EvalHost, ExprId, ExprKind, LogicalOp, UnaryOp};
use peval_stack::ensure_sufficient_stack;
use tracing::field::Empty;

use crate::coerce::utf16_len;
use crate::operators::evaluate_binary;
use crate::session::{EvaluationSession, MemoEntry};
use crate::unary_operators::evaluate_unary;
use crate::EvalConfig;

/// Outcome of one top-level evaluation.
///
/// Exactly one of `value` and `deopt` is set: `value` when `confident`, the
/// first node evaluation gave up at otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub confident: bool,
    pub value: Option<DynamicValue>,
    pub deopt: Option<ExprId>,
}

impl Evaluation {
    fn from_session(session: &EvaluationSession, value: Option<DynamicValue>) -> Self {
        match value {
            Some(value) if session.is_confident() => Evaluation {
                confident: true,
                value: Some(value),
                deopt: None,
            },
            _ => Evaluation {
                confident: false,
                value: None,
                deopt: session.deopt_witness(),
            },
        }
    }

    /// Truthiness of a confident value.
    pub fn truthy(&self) -> Option<bool> {
        self.value.as_ref().map(DynamicValue::is_truthy)
    }

    /// The value, if the evaluation was confident.
    pub fn into_value(self) -> Option<DynamicValue> {
        self.value
    }
}

/// Static partial evaluator over a host tree.
pub struct Evaluator<'h, H: ?Sized> {
    host: &'h H,
    config: EvalConfig,
}

impl<'h, H: EvalHost + ?Sized> Evaluator<'h, H> {
    /// Create an evaluator with the default configuration.
    pub fn new(host: &'h H) -> Self {
        Evaluator {
            host,
            config: EvalConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate `node` in a fresh session.
    #[tracing::instrument(level = "debug", skip(self), fields(confident = Empty))]
    pub fn evaluate(&self, node: ExprId) -> Evaluation {
        let result = self.evaluate_isolated(node);
        tracing::Span::current().record("confident", result.confident);
        result
    }

    /// Truthiness of `node`, if it evaluates confidently.
    pub fn evaluate_truthy(&self, node: ExprId) -> Option<bool> {
        self.evaluate(node).truthy()
    }

    /// Evaluate `node` inside an existing session, sharing its memo table.
    ///
    /// Returns `None` once the session is not confident, including when it
    /// was already deopted on entry.
    pub fn evaluate_in(&self, node: ExprId, session: &mut EvaluationSession) -> Option<DynamicValue> {
        self.evaluate_cached(node, session)
    }

    fn evaluate_isolated(&self, node: ExprId) -> Evaluation {
        let mut session = EvaluationSession::new();
        let value = self.evaluate_cached(node, &mut session);
        Evaluation::from_session(&session, value)
    }

    /// Memoized evaluation with stack safety.
    pub(crate) fn evaluate_cached(
        &self,
        node: ExprId,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        ensure_sufficient_stack(|| self.evaluate_cached_inner(node, session))
    }

    fn evaluate_cached_inner(
        &self,
        node: ExprId,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        if !session.is_confident() {
            return None;
        }
        match session.entry(node) {
            Some(MemoEntry::Resolved(value)) => return Some(value.clone()),
            Some(MemoEntry::InProgress) => {
                session.deopt(node, "expression depends on itself");
                return None;
            }
            Some(&MemoEntry::Failed(witness)) => {
                session.deopt(witness, "expression failed earlier");
                return None;
            }
            None => {}
        }

        session.begin(node);
        let mut value = self.dispatch(node, session);

        if let Some(DynamicValue::String(s)) = &value {
            if s.len() > self.config.max_string_len && utf16_len(s) > self.config.max_string_len {
                session.deopt(node, "string exceeds length limit");
                value = None;
            }
        }

        match value {
            Some(value) if session.is_confident() => {
                session.resolve(node, value.clone());
                Some(value)
            }
            _ => {
                // Every failing case deopts; this catches any that forgot to.
                session.deopt(node, "no value");
                let witness = session.deopt_witness().unwrap_or(node);
                session.fail(node, witness);
                None
            }
        }
    }

    /// One case per expression kind.
    fn dispatch(&self, node: ExprId, session: &mut EvaluationSession) -> Option<DynamicValue> {
        let host = self.host;
        match host.kind(node) {
            ExprKind::Sequence(range) => match host.expr_list(range).last() {
                Some(&last) => self.evaluate_cached(last, session),
                None => self.deopt(node, session, "empty sequence"),
            },

            ExprKind::Str(name) => Some(DynamicValue::string(host.name(name))),
            ExprKind::Num(bits) => Some(DynamicValue::Number(f64::from_bits(bits))),
            ExprKind::Bool(b) => Some(DynamicValue::Boolean(b)),
            ExprKind::Null => Some(DynamicValue::Null),

            ExprKind::Template { quasis, exprs } => {
                self.evaluate_quasis(node, quasis, exprs, false, session)
            }
            ExprKind::TaggedTemplate { tag, quasis, exprs } => {
                if self.is_string_raw(tag) {
                    self.evaluate_quasis(node, quasis, exprs, true, session)
                } else {
                    self.deopt(node, session, "unknown template tag")
                }
            }

            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let test = self.evaluate_cached(test, session)?;
                let branch = if test.is_truthy() { consequent } else { alternate };
                self.evaluate_cached(branch, session)
            }

            ExprKind::Wrapper { inner, .. } => self.evaluate_cached(inner, session),

            ExprKind::Member { object, property } if !host.is_callee(node) => {
                self.evaluate_member(node, object, property, session)
            }

            ExprKind::Ident(name) => self.evaluate_identifier(node, name, session),

            ExprKind::Unary { op, operand } => self.evaluate_unary(node, op, operand, session),

            ExprKind::Array(elements) => self.evaluate_array(elements, session),
            ExprKind::Object(properties) => self.evaluate_object(properties, session),

            ExprKind::Logical { op, left, right } => {
                self.evaluate_logical(node, op, left, right, session)
            }

            ExprKind::Binary { op, left, right } => {
                self.evaluate_binary(node, op, left, right, session)
            }

            ExprKind::Call { callee, args } => self.evaluate_call(node, callee, args, session),

            ExprKind::Member { .. } => self.deopt(node, session, "member used as callee"),
            ExprKind::Property { .. }
            | ExprKind::Method { .. }
            | ExprKind::Spread(_)
            | ExprKind::Hole
            | ExprKind::Function
            | ExprKind::Class
            | ExprKind::Declaration { .. }
            | ExprKind::Opaque => self.deopt(node, session, "unsupported expression"),
        }
    }

    /// Deopt at `node` and return no value.
    #[inline]
    fn deopt(
        &self,
        node: ExprId,
        session: &mut EvaluationSession,
        reason: &'static str,
    ) -> Option<DynamicValue> {
        session.deopt(node, reason);
        None
    }

    fn evaluate_unary(
        &self,
        node: ExprId,
        op: UnaryOp,
        operand: ExprId,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        if op == UnaryOp::Void {
            return Some(DynamicValue::Undefined);
        }
        if op == UnaryOp::TypeOf && self.host.kind(operand).is_function_like() {
            return Some(DynamicValue::string("function"));
        }
        let value = self.evaluate_cached(operand, session)?;
        match evaluate_unary(op, &value) {
            Some(result) => Some(result),
            None => self.deopt(node, session, "operator has no static result"),
        }
    }

    fn evaluate_binary(
        &self,
        node: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        let left = self.evaluate_cached(left, session)?;
        let right = self.evaluate_cached(right, session)?;
        match evaluate_binary(op, &left, &right) {
            Some(result) => Some(result),
            None => self.deopt(node, session, "operator has no static result"),
        }
    }

    /// `&&`, `||`, `??`.
    ///
    /// The left operand must fold. When it decides the result, the right
    /// operand is still evaluated, speculatively: a deopt inside it is
    /// rolled back.
    fn evaluate_logical(
        &self,
        node: ExprId,
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
        session: &mut EvaluationSession,
    ) -> Option<DynamicValue> {
        if op == LogicalOp::Nullish && !self.config.fold_nullish {
            return self.deopt(node, session, "nullish coalescing disabled");
        }

        let left = self.evaluate_cached(left, session)?;
        let decided_by_left = match op {
            LogicalOp::And => !left.is_truthy(),
            LogicalOp::Or => left.is_truthy(),
            LogicalOp::Nullish => !left.is_nullish(),
        };
        if !decided_by_left {
            return self.evaluate_cached(right, session);
        }

        let before = session.checkpoint();
        self.evaluate_cached(right, session);
        session.restore(before);
        Some(left)
    }
}
