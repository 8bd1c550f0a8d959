//! Evaluator configuration.

/// Default cap on folded string length, in UTF-16 code units.
pub const DEFAULT_MAX_STRING_LEN: usize = 1 << 20;

/// Tunables for an [`Evaluator`](crate::Evaluator).
///
/// The defaults fold everything the evaluator knows how to fold except
/// `random` members of the global namespaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Member names never invoked through `String.x()`, `Number.x()` or
    /// `Math.x()`, even if the namespace has them.
    pub excluded_methods: Vec<String>,
    /// Longest string any operation may produce. Longer results deopt.
    pub max_string_len: usize,
    /// Whether `a ?? b` is folded. When off, nullish coalescing deopts.
    pub fold_nullish: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            excluded_methods: vec!["random".to_owned()],
            max_string_len: DEFAULT_MAX_STRING_LEN,
            fold_nullish: true,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also refuse to invoke the namespace member `name`.
    #[must_use]
    pub fn exclude_method(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.excluded_methods.contains(&name) {
            self.excluded_methods.push(name);
        }
        self
    }

    /// Replace the excluded member list.
    #[must_use]
    pub fn excluded_methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_methods = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn max_string_len(mut self, limit: usize) -> Self {
        self.max_string_len = limit;
        self
    }

    #[must_use]
    pub fn fold_nullish(mut self, enabled: bool) -> Self {
        self.fold_nullish = enabled;
        self
    }

    /// Whether `name` is on the exclusion list.
    #[inline]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_methods.iter().any(|m| m == name)
    }
}
