//! Values the evaluator can produce.
//!
//! A closed enum mirroring the runtime value shapes the folder understands.
//! There is deliberately no function variant: whitelisted callables are
//! invoked inside the evaluator and never escape as values.

use std::fmt;

use indexmap::IndexMap;

/// Insertion-ordered string-keyed object.
///
/// Re-inserting an existing key replaces its value in place, matching the
/// property order of an object literal with duplicate keys.
pub type ObjectValue = IndexMap<String, DynamicValue>;

/// A statically known runtime value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicValue {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<DynamicValue>),
    Object(ObjectValue),
}

impl DynamicValue {
    /// Convenience constructor for string values.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        DynamicValue::String(s.into())
    }

    /// Truthiness under the language's boolean coercion.
    pub fn is_truthy(&self) -> bool {
        match self {
            DynamicValue::Null | DynamicValue::Undefined => false,
            DynamicValue::Boolean(b) => *b,
            DynamicValue::Number(n) => *n != 0.0 && !n.is_nan(),
            DynamicValue::String(s) => !s.is_empty(),
            DynamicValue::Array(_) | DynamicValue::Object(_) => true,
        }
    }

    /// `null` or `undefined`.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, DynamicValue::Null | DynamicValue::Undefined)
    }

    /// Arrays and objects: compared by identity at runtime.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, DynamicValue::Array(_) | DynamicValue::Object(_))
    }

    /// Result of the `typeof` operator.
    pub fn type_of(&self) -> &'static str {
        match self {
            DynamicValue::Undefined => "undefined",
            DynamicValue::Boolean(_) => "boolean",
            DynamicValue::Number(_) => "number",
            DynamicValue::String(_) => "string",
            DynamicValue::Null | DynamicValue::Array(_) | DynamicValue::Object(_) => "object",
        }
    }

    /// The number payload, if this is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DynamicValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Boolean(b)
    }
}

impl From<f64> for DynamicValue {
    fn from(n: f64) -> Self {
        DynamicValue::Number(n)
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::String(s.to_owned())
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::String(s)
    }
}

/// Debug-oriented rendering; not the language's `ToString`.
impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Null => write!(f, "null"),
            DynamicValue::Undefined => write!(f, "undefined"),
            DynamicValue::Boolean(b) => write!(f, "{b}"),
            DynamicValue::Number(n) => write!(f, "{n}"),
            DynamicValue::String(s) => write!(f, "{s:?}"),
            DynamicValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            DynamicValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {key:?}: {value}")?;
                }
                if map.is_empty() {
                    write!(f, "}}")
                } else {
                    write!(f, " }}")
                }
            }
        }
    }
}
