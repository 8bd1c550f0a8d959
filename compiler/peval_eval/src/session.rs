//! Per-evaluation state.
//!
//! An [`EvaluationSession`] lives for exactly one top-level evaluation. It
//! carries the confidence flag, the first deopt witness, and a memo table
//! keyed by node identity. A memo entry is inserted unresolved when a node's
//! evaluation starts; meeting an unresolved entry again means the node
//! depends on itself. A node that fails keeps its witness in the memo, so
//! meeting it again replays the deopt without walking the subtree.

use rustc_hash::FxHashMap;
use tracing::trace;

use peval_ir::{DynamicValue, ExprId};

/// Memo state of one node.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MemoEntry {
    /// Evaluation has started and not finished.
    InProgress,
    /// Evaluation finished confidently.
    Resolved(DynamicValue),
    /// Evaluation gave up; the first deopt inside it happened at the witness.
    Failed(ExprId),
}

/// Confidence and witness at one point in time, for speculative evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    confident: bool,
    witness: Option<ExprId>,
}

/// State of one top-level evaluation.
#[derive(Debug)]
pub struct EvaluationSession {
    confident: bool,
    deopt_witness: Option<ExprId>,
    memo: FxHashMap<ExprId, MemoEntry>,
}

impl Default for EvaluationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationSession {
    pub fn new() -> Self {
        EvaluationSession {
            confident: true,
            deopt_witness: None,
            memo: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn is_confident(&self) -> bool {
        self.confident
    }

    /// The node the first deopt happened at.
    #[inline]
    pub fn deopt_witness(&self) -> Option<ExprId> {
        self.deopt_witness
    }

    /// Value `node` resolved to in this session, if it resolved.
    pub fn resolved(&self, node: ExprId) -> Option<&DynamicValue> {
        match self.memo.get(&node) {
            Some(MemoEntry::Resolved(value)) => Some(value),
            _ => None,
        }
    }

    /// Number of resolved nodes.
    pub fn resolved_count(&self) -> usize {
        self.memo
            .values()
            .filter(|entry| matches!(entry, MemoEntry::Resolved(_)))
            .count()
    }

    /// Give up on the whole evaluation. Only the first call records `node`.
    pub fn deopt(&mut self, node: ExprId, reason: &'static str) {
        if !self.confident {
            return;
        }
        trace!(?node, reason, "deopt");
        self.confident = false;
        self.deopt_witness = Some(node);
    }

    /// A fresh session for a nested evaluation.
    ///
    /// Resolved and failed values are not shared, but nodes still in
    /// progress here stay in progress in the child, so a cycle through a
    /// nested evaluation is still detected.
    pub(crate) fn nested(&self) -> EvaluationSession {
        let mut child = EvaluationSession::new();
        child.memo.extend(
            self.memo
                .iter()
                .filter(|(_, entry)| matches!(entry, MemoEntry::InProgress))
                .map(|(&node, _)| (node, MemoEntry::InProgress)),
        );
        child
    }

    #[inline]
    pub(crate) fn entry(&self, node: ExprId) -> Option<&MemoEntry> {
        self.memo.get(&node)
    }

    pub(crate) fn begin(&mut self, node: ExprId) {
        self.memo.insert(node, MemoEntry::InProgress);
    }

    pub(crate) fn resolve(&mut self, node: ExprId, value: DynamicValue) {
        debug_assert!(
            !matches!(self.memo.get(&node), Some(MemoEntry::Resolved(_))),
            "memo entry resolved twice"
        );
        self.memo.insert(node, MemoEntry::Resolved(value));
    }

    /// Record that `node` failed with the first deopt at `witness`.
    pub(crate) fn fail(&mut self, node: ExprId, witness: ExprId) {
        self.memo.insert(node, MemoEntry::Failed(witness));
    }

    #[inline]
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            confident: self.confident,
            witness: self.deopt_witness,
        }
    }

    /// Rewind confidence and witness to `checkpoint`.
    #[inline]
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.confident = checkpoint.confident;
        self.deopt_witness = checkpoint.witness;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn first_deopt_wins() {
        let mut session = EvaluationSession::new();
        assert!(session.is_confident());
        session.deopt(ExprId::new(3), "first");
        session.deopt(ExprId::new(7), "second");
        assert!(!session.is_confident());
        assert_eq!(session.deopt_witness(), Some(ExprId::new(3)));
    }

    #[test]
    fn memo_lifecycle() {
        let mut session = EvaluationSession::new();
        let node = ExprId::new(1);
        assert_eq!(session.entry(node), None);
        session.begin(node);
        assert_eq!(session.entry(node), Some(&MemoEntry::InProgress));
        assert_eq!(session.resolved(node), None);
        session.resolve(node, DynamicValue::Number(2.0));
        assert_eq!(session.resolved(node), Some(&DynamicValue::Number(2.0)));
        assert_eq!(session.resolved_count(), 1);

        let other = ExprId::new(2);
        session.begin(other);
        session.fail(other, ExprId::new(4));
        assert_eq!(session.entry(other), Some(&MemoEntry::Failed(ExprId::new(4))));
        assert_eq!(session.resolved(other), None);
        assert_eq!(session.resolved_count(), 1);
    }

    #[test]
    fn nested_sessions_inherit_only_in_progress_nodes() {
        let mut session = EvaluationSession::new();
        session.begin(ExprId::new(1));
        session.begin(ExprId::new(2));
        session.resolve(ExprId::new(2), DynamicValue::Null);
        session.begin(ExprId::new(3));
        session.fail(ExprId::new(3), ExprId::new(3));
        session.deopt(ExprId::new(3), "parent");

        let child = session.nested();
        assert!(child.is_confident());
        assert_eq!(child.entry(ExprId::new(1)), Some(&MemoEntry::InProgress));
        assert_eq!(child.entry(ExprId::new(2)), None);
        assert_eq!(child.entry(ExprId::new(3)), None);
    }

    #[test]
    fn checkpoints_rewind_confidence() {
        let mut session = EvaluationSession::new();
        let before = session.checkpoint();
        session.deopt(ExprId::new(9), "speculative");
        let after = session.checkpoint();
        session.restore(before);
        assert!(session.is_confident());
        assert_eq!(session.deopt_witness(), None);
        session.restore(after);
        assert!(!session.is_confident());
        assert_eq!(session.deopt_witness(), Some(ExprId::new(9)));
    }
}
