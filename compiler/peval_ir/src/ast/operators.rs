//! Binary, logical and unary operators.

/// Binary (non-short-circuit) operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,

    // Relational
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Equality
    LooseEq,
    LooseNotEq,
    StrictEq,
    StrictNotEq,

    // Bitwise
    BitOr,
    BitAnd,
    BitXor,
    Shl,
    Shr,
    UShr,

    // Object-model operators, never folded
    In,
    InstanceOf,
}

impl BinaryOp {
    /// Source-level symbol, used in trace output.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Exp => "**",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::LooseEq => "==",
            Self::LooseNotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
        }
    }

    /// Parse a source-level symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "**" => Self::Exp,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::LtEq,
            ">=" => Self::GtEq,
            "==" => Self::LooseEq,
            "!=" => Self::LooseNotEq,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNotEq,
            "|" => Self::BitOr,
            "&" => Self::BitAnd,
            "^" => Self::BitXor,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            "in" => Self::In,
            "instanceof" => Self::InstanceOf,
            _ => return None,
        })
    }
}

/// Short-circuit operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOp {
    And,
    Or,
    Nullish,
}

impl LogicalOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Nullish => "??",
        }
    }
}

/// Prefix unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Void,
    TypeOf,
    Not,
    Plus,
    Neg,
    BitNot,
    /// `delete`: has an effect on the object graph, never folded.
    Delete,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::TypeOf => "typeof",
            Self::Not => "!",
            Self::Plus => "+",
            Self::Neg => "-",
            Self::BitNot => "~",
            Self::Delete => "delete",
        }
    }
}
