//! Expression node kinds.
//!
//! [`ExprKind`] is the classification vocabulary shared by the evaluator and
//! every host: a host maps each of its nodes to one variant, exposing the
//! node's fixed sub-parts as [`ExprId`]s and ranges. Anything the evaluator
//! has no case for is [`ExprKind::Opaque`].
//!
//! All children are indices, never boxes, so the kind is `Copy` and can be
//! read out of the host before recursing.

mod operators;

pub use operators::{BinaryOp, LogicalOp, UnaryOp};

use crate::{ExprId, ExprRange, Name, QuasiRange};

/// Wrapper nodes that are transparent envelopes around one expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WrapperKind {
    /// `(expr)` when the host keeps parentheses as nodes.
    Parenthesized,
    /// Flow-style `(expr: T)`.
    TypeCast,
    /// `expr;`
    ExpressionStatement,
}

/// Property of a member access.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberProperty {
    /// `object.name`
    Named(Name),
    /// `object[expr]`
    Computed(ExprId),
}

/// One literal text segment of a template.
///
/// `cooked` is `None` when the segment contains an escape that is only
/// legal in tagged templates (e.g. `\unicode`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quasi {
    pub cooked: Option<Name>,
    pub raw: Name,
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// `a, b, c`
    Sequence(ExprRange),

    /// String literal (interned).
    Str(Name),

    /// Numeric literal, stored as `f64` bits for `Hash`.
    Num(u64),

    /// `true` / `false`
    Bool(bool),

    /// `null`
    Null,

    /// `` `a${b}c` ``: `quasis.len() == exprs.len() + 1`.
    Template { quasis: QuasiRange, exprs: ExprRange },

    /// `` tag`a${b}c` ``
    TaggedTemplate {
        tag: ExprId,
        quasis: QuasiRange,
        exprs: ExprRange,
    },

    /// `test ? consequent : alternate`
    Conditional {
        test: ExprId,
        consequent: ExprId,
        alternate: ExprId,
    },

    /// Transparent envelope around `inner`.
    Wrapper { kind: WrapperKind, inner: ExprId },

    /// `object.name` / `object[expr]`
    Member {
        object: ExprId,
        property: MemberProperty,
    },

    /// Identifier in a value position.
    Ident(Name),

    /// Prefix unary operation.
    Unary { op: UnaryOp, operand: ExprId },

    /// `[a, b, c]`; elements may be `Hole` or `Spread` nodes.
    Array(ExprRange),

    /// `{ ... }`; every entry is a `Property`, `Method` or `Spread` node.
    Object(ExprRange),

    /// `key: value` inside an object literal. A non-computed `key` is an
    /// `Ident`, `Str` or `Num` node read verbatim.
    Property {
        key: ExprId,
        value: ExprId,
        computed: bool,
    },

    /// Method, getter or setter inside an object literal.
    Method { key: ExprId, computed: bool },

    /// `...argument`
    Spread(ExprId),

    /// Elided array element: the gap in `[a, , b]`.
    Hole,

    /// `a && b`, `a || b`, `a ?? b`
    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },

    /// Non-short-circuit binary operation.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `callee(args...)`
    Call { callee: ExprId, args: ExprRange },

    /// Function or arrow expression; the body is opaque to the evaluator.
    Function,

    /// Class expression; the body is opaque to the evaluator.
    Class,

    /// Declarator binding `name`, optionally initialized (`init` may be
    /// `ExprId::INVALID`). Serves as the deopt witness for binding failures.
    Declaration { name: Name, init: ExprId },

    /// Any node the host cannot classify more precisely.
    Opaque,
}

impl ExprKind {
    /// Numeric literal from an `f64`.
    #[inline]
    pub fn num(value: f64) -> Self {
        ExprKind::Num(value.to_bits())
    }

    /// Whether this node defines a function when evaluated (`typeof` of it
    /// is `"function"`).
    #[inline]
    pub fn is_function_like(&self) -> bool {
        matches!(self, ExprKind::Function | ExprKind::Class)
    }
}
