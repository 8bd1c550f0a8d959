//! Host capability traits.
//!
//! The evaluator is written strictly against these interfaces and never
//! assumes how the host stores its tree or computes scopes. Each trait covers
//! one concern:
//! - [`SyntaxTree`]: node classification and sub-part access
//! - [`ScopeResolver`]: binding lookups for identifier references
//! - [`AliasResolver`]: one-step resolution of a reference to its definition
//!
//! [`EvalHost`] bundles all three and is implemented automatically.

use crate::{DynamicValue, ExprId, ExprKind, ExprRange, Name, Quasi, QuasiRange, Span};

/// Read access to an expression tree.
pub trait SyntaxTree {
    /// Structural kind of `id`, with its sub-parts.
    fn kind(&self, id: ExprId) -> ExprKind;

    /// Source span of `id`.
    fn span(&self, id: ExprId) -> Span;

    /// Node ids of a child list.
    fn expr_list(&self, range: ExprRange) -> &[ExprId];

    /// Template segments of a template literal.
    fn quasis(&self, range: QuasiRange) -> &[Quasi];

    /// Text of an interned name or literal.
    fn name(&self, name: Name) -> &str;

    /// Whether `id` is the callee of a call expression.
    fn is_callee(&self, id: ExprId) -> bool;
}

/// What the host's scope analysis knows about one binding.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingInfo {
    /// The declaring node; the deopt witness for binding failures.
    pub declaration: ExprId,
    /// Source span of the declaring node.
    pub span: Span,
    /// Whether the binding is assigned anywhere after its declaration.
    pub reassigned: bool,
    /// Value precomputed by the host's binding analysis, if any.
    pub value: Option<DynamicValue>,
}

impl BindingInfo {
    pub fn new(declaration: ExprId, span: Span) -> Self {
        BindingInfo {
            declaration,
            span,
            reassigned: false,
            value: None,
        }
    }
}

/// Binding lookups for identifier references.
pub trait ScopeResolver {
    /// The binding `name` refers to when read at `reference`, or `None` for
    /// an unbound (global) name.
    fn binding(&self, reference: ExprId, name: Name) -> Option<BindingInfo>;

    /// Whether the global `name` is assigned anywhere in the program.
    fn is_global_reassigned(&self, _name: Name) -> bool {
        false
    }

    /// Whether `name` is shadowed by a local binding at `at`.
    fn is_shadowed(&self, at: ExprId, name: Name) -> bool {
        self.binding(at, name).is_some()
    }
}

/// One-step reference following.
pub trait AliasResolver {
    /// The node defining the value `id` refers to, or `id` itself when no
    /// progress is possible.
    fn resolve(&self, id: ExprId) -> ExprId;
}

/// Everything the evaluator needs from its host.
pub trait EvalHost: SyntaxTree + ScopeResolver + AliasResolver {}

impl<T: SyntaxTree + ScopeResolver + AliasResolver + ?Sized> EvalHost for T {}
