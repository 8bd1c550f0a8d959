//! peval IR: the data the static partial evaluator works on.
//!
//! This crate contains:
//! - Node identities ([`ExprId`], [`ExprRange`], [`QuasiRange`]) and [`Span`]s
//! - The expression-kind vocabulary ([`ExprKind`] and its operators)
//! - [`DynamicValue`], the values folding can produce
//! - The host capability traits ([`SyntaxTree`], [`ScopeResolver`],
//!   [`AliasResolver`], bundled as [`EvalHost`])
//! - A reference host: [`ExprArena`] plus [`ScopeTable`], combined as [`Program`]
//!
//! # Design Philosophy
//!
//! - **Flatten everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Intern strings**: identifiers and literal text are [`Name`] handles
//! - **Segregate interfaces**: one trait per collaborator concern
//!
//! Numeric literals are stored as `u64` bits so [`ExprKind`] can be `Hash`.

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod scope;
mod span;
pub mod traits;
mod value;

pub use arena::ExprArena;
pub use ast::{BinaryOp, ExprKind, LogicalOp, MemberProperty, Quasi, UnaryOp, WrapperKind};
pub use expr_id::{ExprId, ExprRange, QuasiRange};
pub use interner::StringInterner;
pub use name::Name;
pub use scope::{BindingId, Program, ScopeTable};
pub use span::Span;
pub use traits::{AliasResolver, BindingInfo, EvalHost, ScopeResolver, SyntaxTree};
pub use value::{DynamicValue, ObjectValue};
