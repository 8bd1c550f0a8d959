//! Stack safety for deep expression trees.
//!
//! The partial evaluator walks the host's expression tree recursively, one
//! native frame per nested node. Machine-generated sources (minified bundles,
//! long `a + b + c + ...` chains) can nest tens of thousands of levels deep,
//! so every recursive step goes through [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough; the engine owns the stack.
//!
//! # Configuration
//!
//! - **Red zone**: 128KB. Below this much headroom a new segment is allocated.
//! - **Segment size**: 2MB per growth.

/// Minimum headroom before a new stack segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
///
/// Wrap the body of any function that recurses once per tree level:
///
/// ```text
/// fn evaluate_cached(&self, id: ExprId, session: &mut EvaluationSession) -> Option<DynamicValue> {
///     ensure_sufficient_stack(|| self.dispatch(id, session))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM: call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
