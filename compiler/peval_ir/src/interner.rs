//! String interner for identifiers and literal text.
//!
//! Single-owner: the interner lives inside the arena that builds the tree,
//! so no locking is needed. Lookups borrow from the interner.

use rustc_hash::FxHashMap;

use crate::arena::to_u32;
use crate::Name;

/// Deduplicating string store handing out [`Name`] handles.
#[derive(Clone, Debug)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create an interner with the empty string pre-interned as [`Name::EMPTY`].
    pub fn new() -> Self {
        let mut interner = StringInterner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }

    /// Intern `s`, returning the existing handle if it was seen before.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let name = Name::from_raw(to_u32(self.strings.len(), "interned strings"));
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Text of an interned handle.
    ///
    /// Handles from a different interner resolve to the empty string rather
    /// than panicking.
    #[inline]
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |s| s)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
