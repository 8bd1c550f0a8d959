//! Native callables.
//!
//! The fixed set of functions a call expression may fold to: the `String`
//! and `Number` conversion functions, deterministic members of the `String`,
//! `Number` and `Math` namespaces, and methods on string and number literal
//! receivers. Dispatch is by enum and name match, like the rest of the
//! evaluator; the set is closed.
//!
//! Every callable is pure. Faults come back as [`CallError`] and the caller
//! turns them into a deopt.

mod math;
mod number;
mod string;

use peval_ir::DynamicValue;

use crate::coerce::{to_js_string, to_number};
use crate::errors::{not_callable, CallResult};
use crate::EvalConfig;

/// Global namespaces call expressions may resolve into.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GlobalObject {
    String,
    Number,
    Math,
}

impl GlobalObject {
    /// The namespace bound to the global `name`, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(GlobalObject::String),
            "Number" => Some(GlobalObject::Number),
            "Math" => Some(GlobalObject::Math),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GlobalObject::String => "String",
            GlobalObject::Number => "Number",
            GlobalObject::Math => "Math",
        }
    }
}

/// What the callee of a call expression resolved to.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Callee<'a> {
    /// `String(x)`, `Number(x)`, `Math(x)`.
    Global(GlobalObject),
    /// `Math.floor(x)`: a member of a global namespace.
    Static {
        object: GlobalObject,
        member: &'a str,
    },
    /// `"abc".slice(1)`
    StringMethod { receiver: &'a str, method: &'a str },
    /// `(255).toString(16)`
    NumberMethod { receiver: f64, method: &'a str },
}

impl Callee<'_> {
    /// Invoke the callable on already-evaluated arguments.
    pub fn invoke(&self, args: &[DynamicValue], config: &EvalConfig) -> CallResult {
        match *self {
            Callee::Global(GlobalObject::String) => Ok(DynamicValue::String(match args.first() {
                Some(value) => to_js_string(value),
                None => String::new(),
            })),
            Callee::Global(GlobalObject::Number) => Ok(DynamicValue::Number(
                args.first().map_or(0.0, to_number),
            )),
            Callee::Global(GlobalObject::Math) => Err(not_callable("Math")),
            Callee::Static { object, member } => match object {
                GlobalObject::String => string::call_static(member, args),
                GlobalObject::Number => number::call_static(member, args),
                GlobalObject::Math => math::call(member, args),
            },
            Callee::StringMethod { receiver, method } => {
                string::call_method(receiver, method, args, config)
            }
            Callee::NumberMethod { receiver, method } => {
                number::call_method(receiver, method, args)
            }
        }
    }
}

impl std::fmt::Display for Callee<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callee::Global(object) => f.write_str(object.name()),
            Callee::Static { object, member } => write!(f, "{}.{member}", object.name()),
            Callee::StringMethod { method, .. } => write!(f, "String.prototype.{method}"),
            Callee::NumberMethod { method, .. } => write!(f, "Number.prototype.{method}"),
        }
    }
}

/// Members of `Object.prototype`, inherited by every primitive wrapper.
const OBJECT_PROTOTYPE_MEMBERS: &[&str] = &[
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
    "__proto__",
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];

/// Whether `name` is inherited through the prototype chain of `receiver`.
///
/// Only string and number receivers have a known chain; anything else
/// may inherit any name.
pub(crate) fn is_prototype_member(receiver: &DynamicValue, name: &str) -> bool {
    let own = match receiver {
        DynamicValue::String(_) => string::PROTOTYPE_MEMBERS,
        DynamicValue::Number(_) => number::PROTOTYPE_MEMBERS,
        _ => return true,
    };
    own.contains(&name) || OBJECT_PROTOTYPE_MEMBERS.contains(&name)
}

static UNDEFINED: DynamicValue = DynamicValue::Undefined;

/// Argument `index`, or `undefined` when it was not passed.
#[inline]
fn arg(args: &[DynamicValue], index: usize) -> &DynamicValue {
    args.get(index).unwrap_or(&UNDEFINED)
}

/// `ToNumber` of argument `index`.
#[inline]
fn num_arg(args: &[DynamicValue], index: usize) -> f64 {
    to_number(arg(args, index))
}
