//! Faults raised by native callables.
//!
//! A fault never escapes the evaluator: the call site turns it into a deopt
//! at the call node. The constructors are `#[cold]` so the happy paths in
//! [`crate::globals`] stay compact.

use thiserror::Error;

/// Why a native callable could not produce a value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CallError {
    /// The callee exists but is not a function (`Math.PI()`, `Math()`).
    #[error("`{callee}` is not a function")]
    NotCallable { callee: String },

    /// The callee is a real function the evaluator does not fold.
    #[error("`{callee}` is not folded")]
    Unsupported { callee: String },

    /// The call would throw a `RangeError`.
    #[error("`{callee}`: {message}")]
    Range {
        callee: String,
        message: &'static str,
    },

    /// The result would exceed the configured string length limit.
    #[error("`{callee}` would produce a string longer than {limit} code units")]
    StringTooLong { callee: String, limit: usize },

    /// The result contains an unpaired surrogate, which has no UTF-8 form.
    #[error("`{callee}` would produce a lone surrogate")]
    LoneSurrogate { callee: String },
}

/// Result of invoking a native callable.
pub type CallResult<T = peval_ir::DynamicValue> = Result<T, CallError>;

#[cold]
pub fn not_callable(callee: impl Into<String>) -> CallError {
    CallError::NotCallable {
        callee: callee.into(),
    }
}

#[cold]
pub fn unsupported(callee: impl Into<String>) -> CallError {
    CallError::Unsupported {
        callee: callee.into(),
    }
}

#[cold]
pub fn range_error(callee: impl Into<String>, message: &'static str) -> CallError {
    CallError::Range {
        callee: callee.into(),
        message,
    }
}

#[cold]
pub fn string_too_long(callee: impl Into<String>, limit: usize) -> CallError {
    CallError::StringTooLong {
        callee: callee.into(),
        limit,
    }
}

#[cold]
pub fn lone_surrogate(callee: impl Into<String>) -> CallError {
    CallError::LoneSurrogate {
        callee: callee.into(),
    }
}
