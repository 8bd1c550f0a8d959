//! Reference scope tables.
//!
//! Scope analysis is the host's job; [`ScopeTable`] is the minimal store a
//! host fills with its results: declared bindings, which reference resolves
//! to which binding, alias edges, and reassigned globals. [`Program`] pairs
//! it with an [`ExprArena`] to form a complete [`EvalHost`](crate::EvalHost).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::traits::{AliasResolver, BindingInfo, ScopeResolver, SyntaxTree};
use crate::{DynamicValue, ExprArena, ExprId, ExprKind, ExprRange, Name, Quasi, QuasiRange, Span};

/// Index of a binding in a [`ScopeTable`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BindingId(u32);

/// Results of a host's scope analysis.
#[derive(Clone, Debug, Default)]
pub struct ScopeTable {
    bindings: Vec<BindingInfo>,
    /// Identifier reference node -> binding it reads.
    references: FxHashMap<ExprId, BindingId>,
    /// Reference node -> node defining its value.
    aliases: FxHashMap<ExprId, ExprId>,
    reassigned_globals: FxHashSet<Name>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding declared by `declaration`, spanning `span`.
    pub fn declare(&mut self, declaration: ExprId, span: Span) -> BindingId {
        let id = BindingId(crate::arena::to_u32(self.bindings.len(), "bindings"));
        self.bindings.push(BindingInfo::new(declaration, span));
        id
    }

    /// Resolve the identifier node `reference` to `binding`.
    pub fn bind(&mut self, reference: ExprId, binding: BindingId) {
        self.references.insert(reference, binding);
    }

    /// Mark `binding` as assigned after its declaration.
    pub fn mark_reassigned(&mut self, binding: BindingId) {
        if let Some(info) = self.bindings.get_mut(binding.0 as usize) {
            info.reassigned = true;
        }
    }

    /// Attach a value the host's analysis already computed for `binding`.
    pub fn set_value(&mut self, binding: BindingId, value: DynamicValue) {
        if let Some(info) = self.bindings.get_mut(binding.0 as usize) {
            info.value = Some(value);
        }
    }

    /// Record that `reference` evaluates to whatever `target` evaluates to.
    pub fn alias(&mut self, reference: ExprId, target: ExprId) {
        self.aliases.insert(reference, target);
    }

    /// Record an assignment to the unbound global `name`.
    pub fn mark_global_reassigned(&mut self, name: Name) {
        self.reassigned_globals.insert(name);
    }

    pub fn get(&self, binding: BindingId) -> Option<&BindingInfo> {
        self.bindings.get(binding.0 as usize)
    }
}

impl ScopeResolver for ScopeTable {
    fn binding(&self, reference: ExprId, _name: Name) -> Option<BindingInfo> {
        self.references
            .get(&reference)
            .and_then(|&id| self.get(id))
            .cloned()
    }

    fn is_global_reassigned(&self, name: Name) -> bool {
        self.reassigned_globals.contains(&name)
    }
}

impl AliasResolver for ScopeTable {
    fn resolve(&self, id: ExprId) -> ExprId {
        self.aliases.get(&id).copied().unwrap_or(id)
    }
}

/// An expression tree together with its scope analysis.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub arena: ExprArena,
    pub scopes: ScopeTable,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name = init` and record a binding spanning the declaration.
    pub fn declare(&mut self, name: &str, init: ExprId) -> (ExprId, BindingId) {
        let declaration = self.arena.declaration(name, init);
        let binding = self
            .scopes
            .declare(declaration, self.arena.get_span(declaration));
        (declaration, binding)
    }

    /// An identifier reference to `binding`.
    ///
    /// The reference resolves to the declaration's initializer, if it has one.
    pub fn reference(&mut self, name: &str, binding: BindingId) -> ExprId {
        let reference = self.arena.ident(name);
        self.scopes.bind(reference, binding);
        let init = self
            .scopes
            .get(binding)
            .map(|info| *self.arena.get_kind(info.declaration));
        if let Some(ExprKind::Declaration { init, .. }) = init {
            if init.is_valid() {
                self.scopes.alias(reference, init);
            }
        }
        reference
    }
}

impl SyntaxTree for Program {
    #[inline]
    fn kind(&self, id: ExprId) -> ExprKind {
        self.arena.kind(id)
    }

    #[inline]
    fn span(&self, id: ExprId) -> Span {
        SyntaxTree::span(&self.arena, id)
    }

    fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        self.arena.expr_list(range)
    }

    fn quasis(&self, range: QuasiRange) -> &[Quasi] {
        self.arena.quasis(range)
    }

    fn name(&self, name: Name) -> &str {
        self.arena.name(name)
    }

    fn is_callee(&self, id: ExprId) -> bool {
        self.arena.is_callee(id)
    }
}

impl ScopeResolver for Program {
    fn binding(&self, reference: ExprId, name: Name) -> Option<BindingInfo> {
        self.scopes.binding(reference, name)
    }

    fn is_global_reassigned(&self, name: Name) -> bool {
        self.scopes.is_global_reassigned(name)
    }
}

impl AliasResolver for Program {
    fn resolve(&self, id: ExprId) -> ExprId {
        self.scopes.resolve(id)
    }
}
