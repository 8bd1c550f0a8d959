#![deny(clippy::arithmetic_side_effects)]
//! peval Eval: static partial evaluation of expression trees.
//!
//! Given a node of a host's syntax tree, decides whether the expression has
//! a value knowable without running the program and, if so, computes it.
//! Otherwise it reports the first node where evaluation gave up (the deopt
//! witness).
//!
//! # Architecture
//!
//! - [`Evaluator`]: per-kind dispatch over any [`EvalHost`]
//! - [`EvaluationSession`]: confidence, deopt witness and memo table of one
//!   evaluation
//! - `evaluate_binary` / `evaluate_unary`: enum dispatch over operators
//! - [`coerce`]: the language's value conversions
//! - `globals`: the closed set of native callables
//! - [`EvalConfig`]: exclusion list and limits
//!
//! # Tracing
//!
//! `evaluate` opens a `debug` span per top-level evaluation. The first deopt
//! of a session is logged at `trace` with its reason, and native call faults
//! at `debug`. Call [`init_tracing`] to print them when `RUST_LOG` is set.

pub mod coerce;
mod config;
pub mod errors;
mod evaluator;
mod globals;
mod operators;
mod session;
mod unary_operators;

use std::sync::Once;

use peval_ir::{EvalHost, ExprId};

pub use config::{EvalConfig, DEFAULT_MAX_STRING_LEN};
pub use errors::{CallError, CallResult};
pub use evaluator::{Evaluation, Evaluator};
pub use globals::{Callee, GlobalObject};
pub use operators::{evaluate_binary, loose_equals, strict_equals};
pub use session::EvaluationSession;
pub use unary_operators::evaluate_unary;

pub use peval_ir::DynamicValue;

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, once per process.
///
/// Does nothing when `RUST_LOG` is unset.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
                .ok();
        }
    });
}

/// Evaluate `node` with the default configuration.
pub fn evaluate<H: EvalHost + ?Sized>(host: &H, node: ExprId) -> Evaluation {
    Evaluator::new(host).evaluate(node)
}

/// Truthiness of `node` with the default configuration, if it evaluates
/// confidently.
pub fn evaluate_truthy<H: EvalHost + ?Sized>(host: &H, node: ExprId) -> Option<bool> {
    Evaluator::new(host).evaluate_truthy(node)
}

#[cfg(test)]
mod tests;
