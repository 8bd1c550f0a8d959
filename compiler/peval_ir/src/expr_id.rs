//! Node identities and ranges for the flat expression tree.
//!
//! - `ExprId(u32)` instead of references into the host tree: `Copy`,
//!   hashable, and stable for the lifetime of the tree, which is exactly what
//!   a memo table keyed by node needs.
//! - `ExprRange` / `QuasiRange` for child lists (arguments, elements,
//!   properties, template segments).

use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of one node in the host's expression tree.
///
/// Used by the evaluator as a memo-cache key and as the deopt witness. The
/// evaluator never looks inside it; only the host knows what it indexes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for "no node" (e.g. a declaration without an initializer).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Index into the owning arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Hash for ExprId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of node ids in the arena's flattened child lists.
///
/// `(start: u32, len: u16)`: 8 bytes after alignment versus 24 for a `Vec`,
/// which keeps [`ExprKind`](crate::ExprKind) `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprRange {
    pub start: u32,
    pub len: u16,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        ExprRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprRange({}..{})",
            self.start,
            self.start + u32::from(self.len)
        )
    }
}

impl Default for ExprRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Range of template segments ([`Quasi`](crate::Quasi)) in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuasiRange {
    pub start: u32,
    pub len: u16,
}

impl QuasiRange {
    pub const EMPTY: QuasiRange = QuasiRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        QuasiRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sentinel() {
        assert!(!ExprId::INVALID.is_valid());
        assert!(ExprId::new(0).is_valid());
        assert_eq!(ExprId::default(), ExprId::INVALID);
    }

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", ExprId::new(7)), "ExprId(7)");
        assert_eq!(format!("{:?}", ExprId::INVALID), "ExprId::INVALID");
        assert_eq!(format!("{:?}", ExprRange::new(3, 2)), "ExprRange(3..5)");
    }

    #[test]
    fn range_len() {
        assert!(ExprRange::EMPTY.is_empty());
        assert_eq!(ExprRange::new(10, 4).len(), 4);
        assert_eq!(QuasiRange::new(0, 3).len(), 3);
    }
}
