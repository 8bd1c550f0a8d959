//! Reference expression arena.
//!
//! [`ExprArena`] is a struct-of-arrays tree store (parallel `kinds`, `spans`,
//! `parents` indexed by [`ExprId`]) with flattened child lists. It implements
//! [`SyntaxTree`] and is what tests and simple hosts build trees with; hosts
//! with their own tree representation implement the trait directly instead.
//!
//! # Building
//!
//! Trees are built bottom-up in source order. The sugar methods (`num`,
//! `binary`, `call`, ...) assign spans automatically: leaves get a fresh
//! one-byte span past everything allocated so far, composites cover their
//! children. Hosts that know real offsets use [`ExprArena::alloc`].

use crate::ast::{BinaryOp, ExprKind, LogicalOp, MemberProperty, Quasi, UnaryOp, WrapperKind};
use crate::traits::SyntaxTree;
use crate::{ExprId, ExprRange, Name, QuasiRange, Span, StringInterner};

/// Convert a length to `u32`, panicking with context on overflow.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: {what} exceed u32::MAX"))
}

/// Convert a list length to `u16`, panicking with context on overflow.
#[inline]
pub(crate) fn to_u16(len: usize, what: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("arena overflow: {what} exceeds u16::MAX"))
}

/// Flat expression tree with parent links.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    /// Node kinds (parallel with `spans` and `parents`).
    kinds: Vec<ExprKind>,
    /// Source spans (parallel with `kinds`).
    spans: Vec<Span>,
    /// Parent of each node; `ExprId::INVALID` for roots.
    parents: Vec<ExprId>,
    /// Flattened child lists (elements, arguments, properties).
    expr_lists: Vec<ExprId>,
    /// Template segments.
    quasis: Vec<Quasi>,
    /// Identifier and literal text.
    interner: StringInterner,
    /// Next free offset for automatically assigned spans.
    cursor: u32,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node with an explicit span, linking its children to it.
    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "expressions"));
        self.kinds.push(kind);
        self.spans.push(span);
        self.parents.push(ExprId::INVALID);
        self.cursor = self.cursor.max(span.end.saturating_add(1));
        self.link_children(id, kind);
        id
    }

    /// Allocate a child list.
    pub fn alloc_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend_from_slice(ids);
        ExprRange::new(start, to_u16(ids.len(), "expression list"))
    }

    /// Allocate template segments.
    pub fn alloc_quasis(&mut self, quasis: &[Quasi]) -> QuasiRange {
        if quasis.is_empty() {
            return QuasiRange::EMPTY;
        }
        let start = to_u32(self.quasis.len(), "template segments");
        self.quasis.extend_from_slice(quasis);
        QuasiRange::new(start, to_u16(quasis.len(), "template segment list"))
    }

    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn get_kind(&self, id: ExprId) -> &ExprKind {
        &self.kinds[id.index()]
    }

    #[inline]
    pub fn get_span(&self, id: ExprId) -> Span {
        self.spans[id.index()]
    }

    /// Parent of `id`, if it has been attached to one.
    #[inline]
    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.parents.get(id.index()).copied().filter(|p| p.is_valid())
    }

    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    pub fn get_quasis(&self, range: QuasiRange) -> &[Quasi] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.quasis[start..start + range.len()]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn link_children(&mut self, parent: ExprId, kind: ExprKind) {
        match kind {
            ExprKind::Sequence(range)
            | ExprKind::Array(range)
            | ExprKind::Object(range)
            | ExprKind::Template { exprs: range, .. } => self.link_range(parent, range),
            ExprKind::TaggedTemplate { tag, exprs, .. } => {
                self.link(parent, tag);
                self.link_range(parent, exprs);
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.link(parent, test);
                self.link(parent, consequent);
                self.link(parent, alternate);
            }
            ExprKind::Wrapper { inner, .. } => self.link(parent, inner),
            ExprKind::Member { object, property } => {
                self.link(parent, object);
                if let MemberProperty::Computed(key) = property {
                    self.link(parent, key);
                }
            }
            ExprKind::Unary { operand, .. } => self.link(parent, operand),
            ExprKind::Property { key, value, .. } => {
                self.link(parent, key);
                self.link(parent, value);
            }
            ExprKind::Method { key, .. } => self.link(parent, key),
            ExprKind::Spread(argument) => self.link(parent, argument),
            ExprKind::Logical { left, right, .. } | ExprKind::Binary { left, right, .. } => {
                self.link(parent, left);
                self.link(parent, right);
            }
            ExprKind::Call { callee, args } => {
                self.link(parent, callee);
                self.link_range(parent, args);
            }
            ExprKind::Declaration { init, .. } => self.link(parent, init),
            ExprKind::Str(_)
            | ExprKind::Num(_)
            | ExprKind::Bool(_)
            | ExprKind::Null
            | ExprKind::Ident(_)
            | ExprKind::Hole
            | ExprKind::Function
            | ExprKind::Class
            | ExprKind::Opaque => {}
        }
    }

    fn link(&mut self, parent: ExprId, child: ExprId) {
        if let Some(slot) = self.parents.get_mut(child.index()) {
            *slot = parent;
        }
    }

    fn link_range(&mut self, parent: ExprId, range: ExprRange) {
        let start = range.start as usize;
        for i in start..start + range.len() {
            let child = self.expr_lists[i];
            self.link(parent, child);
        }
    }

    // Builder sugar

    fn leaf_span(&mut self) -> Span {
        let span = Span::new(self.cursor, self.cursor + 1);
        self.cursor += 2;
        span
    }

    fn cover(&mut self, children: &[ExprId]) -> Span {
        children
            .iter()
            .filter(|c| c.is_valid())
            .map(|&c| self.get_span(c))
            .reduce(Span::merge)
            .unwrap_or_else(|| self.leaf_span())
    }

    fn leaf(&mut self, kind: ExprKind) -> ExprId {
        let span = self.leaf_span();
        self.alloc(kind, span)
    }

    fn composite(&mut self, kind: ExprKind, children: &[ExprId]) -> ExprId {
        let span = self.cover(children);
        self.alloc(kind, span)
    }

    pub fn str_lit(&mut self, value: &str) -> ExprId {
        let name = self.intern(value);
        self.leaf(ExprKind::Str(name))
    }

    pub fn num(&mut self, value: f64) -> ExprId {
        self.leaf(ExprKind::num(value))
    }

    pub fn bool_lit(&mut self, value: bool) -> ExprId {
        self.leaf(ExprKind::Bool(value))
    }

    pub fn null(&mut self) -> ExprId {
        self.leaf(ExprKind::Null)
    }

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.intern(name);
        self.leaf(ExprKind::Ident(name))
    }

    pub fn hole(&mut self) -> ExprId {
        self.leaf(ExprKind::Hole)
    }

    pub fn function(&mut self) -> ExprId {
        self.leaf(ExprKind::Function)
    }

    pub fn class(&mut self) -> ExprId {
        self.leaf(ExprKind::Class)
    }

    pub fn opaque(&mut self) -> ExprId {
        self.leaf(ExprKind::Opaque)
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.composite(ExprKind::Binary { op, left, right }, &[left, right])
    }

    pub fn logical(&mut self, op: LogicalOp, left: ExprId, right: ExprId) -> ExprId {
        self.composite(ExprKind::Logical { op, left, right }, &[left, right])
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.composite(ExprKind::Unary { op, operand }, &[operand])
    }

    pub fn conditional(&mut self, test: ExprId, consequent: ExprId, alternate: ExprId) -> ExprId {
        self.composite(
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            },
            &[test, consequent, alternate],
        )
    }

    pub fn wrap(&mut self, kind: WrapperKind, inner: ExprId) -> ExprId {
        self.composite(ExprKind::Wrapper { kind, inner }, &[inner])
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        self.wrap(WrapperKind::Parenthesized, inner)
    }

    pub fn sequence(&mut self, exprs: &[ExprId]) -> ExprId {
        let range = self.alloc_list(exprs);
        self.composite(ExprKind::Sequence(range), exprs)
    }

    pub fn array(&mut self, elements: &[ExprId]) -> ExprId {
        let range = self.alloc_list(elements);
        self.composite(ExprKind::Array(range), elements)
    }

    pub fn object(&mut self, properties: &[ExprId]) -> ExprId {
        let range = self.alloc_list(properties);
        self.composite(ExprKind::Object(range), properties)
    }

    pub fn property(&mut self, key: ExprId, value: ExprId) -> ExprId {
        self.composite(
            ExprKind::Property {
                key,
                value,
                computed: false,
            },
            &[key, value],
        )
    }

    pub fn computed_property(&mut self, key: ExprId, value: ExprId) -> ExprId {
        self.composite(
            ExprKind::Property {
                key,
                value,
                computed: true,
            },
            &[key, value],
        )
    }

    pub fn method(&mut self, key: ExprId) -> ExprId {
        self.composite(
            ExprKind::Method {
                key,
                computed: false,
            },
            &[key],
        )
    }

    pub fn spread(&mut self, argument: ExprId) -> ExprId {
        self.composite(ExprKind::Spread(argument), &[argument])
    }

    /// `object.name`
    pub fn member(&mut self, object: ExprId, name: &str) -> ExprId {
        let name = self.intern(name);
        let span = self.get_span(object).merge(self.leaf_span());
        self.alloc(
            ExprKind::Member {
                object,
                property: MemberProperty::Named(name),
            },
            span,
        )
    }

    /// `object[key]`
    pub fn index(&mut self, object: ExprId, key: ExprId) -> ExprId {
        self.composite(
            ExprKind::Member {
                object,
                property: MemberProperty::Computed(key),
            },
            &[object, key],
        )
    }

    pub fn call(&mut self, callee: ExprId, args: &[ExprId]) -> ExprId {
        let range = self.alloc_list(args);
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(callee);
        children.extend_from_slice(args);
        self.composite(ExprKind::Call { callee, args: range }, &children)
    }

    /// Template literal from `(cooked, raw)` segments and interpolations.
    ///
    /// A `None` cooked text models an escape only legal in tagged templates.
    pub fn template(&mut self, segments: &[(Option<&str>, &str)], exprs: &[ExprId]) -> ExprId {
        let quasis = self.quasi_range(segments);
        let range = self.alloc_list(exprs);
        let span = self.template_span(exprs);
        self.alloc(
            ExprKind::Template {
                quasis,
                exprs: range,
            },
            span,
        )
    }

    pub fn tagged_template(
        &mut self,
        tag: ExprId,
        segments: &[(Option<&str>, &str)],
        exprs: &[ExprId],
    ) -> ExprId {
        let quasis = self.quasi_range(segments);
        let range = self.alloc_list(exprs);
        let span = self.get_span(tag).merge(self.template_span(exprs));
        self.alloc(
            ExprKind::TaggedTemplate {
                tag,
                quasis,
                exprs: range,
            },
            span,
        )
    }

    /// `name = init` (`init` may be `ExprId::INVALID`).
    pub fn declaration(&mut self, name: &str, init: ExprId) -> ExprId {
        let name = self.intern(name);
        let head = self.leaf_span();
        let span = if init.is_valid() {
            self.get_span(init).merge(head)
        } else {
            head
        };
        self.alloc(ExprKind::Declaration { name, init }, span)
    }

    fn quasi_range(&mut self, segments: &[(Option<&str>, &str)]) -> QuasiRange {
        let quasis: Vec<Quasi> = segments
            .iter()
            .map(|&(cooked, raw)| Quasi {
                cooked: cooked.map(|c| self.intern(c)),
                raw: self.intern(raw),
            })
            .collect();
        self.alloc_quasis(&quasis)
    }

    fn template_span(&mut self, exprs: &[ExprId]) -> Span {
        let close = self.leaf_span();
        exprs
            .iter()
            .map(|&e| self.get_span(e))
            .fold(close, Span::merge)
    }
}

impl SyntaxTree for ExprArena {
    #[inline]
    fn kind(&self, id: ExprId) -> ExprKind {
        self.kinds.get(id.index()).copied().unwrap_or(ExprKind::Opaque)
    }

    #[inline]
    fn span(&self, id: ExprId) -> Span {
        self.spans.get(id.index()).copied().unwrap_or_default()
    }

    fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        self.get_expr_list(range)
    }

    fn quasis(&self, range: QuasiRange) -> &[Quasi] {
        self.get_quasis(range)
    }

    fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    fn is_callee(&self, id: ExprId) -> bool {
        self.parent(id).is_some_and(|parent| {
            matches!(self.get_kind(parent), ExprKind::Call { callee, .. } if *callee == id)
        })
    }
}

#[cfg(test)]
mod tests;
