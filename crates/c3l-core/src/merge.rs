//! The C3 merge step.
//!
//! [`merge`] combines the linearizations of a node's direct parents with the
//! raw parent list into one sequence. Selection always restarts from the
//! first cursor after a pick, and the first head found in no tail wins, so
//! the left-to-right input order is the tie-break.
//!
//! # Invariants
//!
//! - Every input sequence is a subsequence of the result.
//! - Every input element appears in the result exactly once.
//! - Tail occurrence counts in [`MergeState`] always equal the number of
//!   cursors whose tail holds the element.

use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};

use crate::error::{C3Error, C3Result};
use crate::identifier::Identifier;
use crate::sequence::MergeCursor;

/// Merge ordered sequences according to C3.
///
/// The last sequence is the precedence guard: the raw list of direct parents
/// in declaration order. Its tail vetoes any candidate that would reorder
/// the parents, and its head is scanned after every other head.
///
/// ```
/// use c3l_core::merge;
///
/// let merged = merge(&[vec!['C', 'A', 'R'], vec!['D', 'B', 'R'], vec!['C', 'D']]).unwrap();
/// assert_eq!(merged, vec!['C', 'A', 'D', 'B', 'R']);
/// ```
///
/// # Errors
///
/// - [`C3Error::Inconsistent`] when no head is free of later occurrences.
/// - [`C3Error::DuplicateEntry`] when one sequence repeats an element.
pub fn merge<Id, S>(sequences: &[S]) -> C3Result<Vec<Id>, Id>
where
    Id: Identifier,
    S: AsRef<[Id]>,
{
    let mut state = MergeState::new(sequences)?;
    let mut result = Vec::with_capacity(state.remaining());

    loop {
        if state.is_exhausted() {
            return Ok(result);
        }

        let Some((index, candidate)) = state.next_candidate() else {
            let blocked = state.heads();
            warn!(candidates = blocked.len(), ?blocked, "C3 merge found no consistent candidate");
            return Err(C3Error::Inconsistent {
                node: None,
                blocked,
            });
        };

        trace!(
            ?candidate,
            sequence = index,
            from_guard = state.is_guard(index),
            "selected merge candidate"
        );
        state.consume(candidate);
        result.push(candidate.clone());
    }
}

/// All cursors of one merge call, plus an index of tail occurrences.
///
/// The last cursor is the precedence guard.
#[derive(Debug)]
struct MergeState<'a, Id> {
    cursors: Vec<MergeCursor<'a, Id>>,
    /// For every element, how many cursors currently hold it in their tail.
    tail_counts: HashMap<&'a Id, usize>,
}

impl<'a, Id: Identifier> MergeState<'a, Id> {
    fn new<S: AsRef<[Id]>>(sequences: &'a [S]) -> C3Result<Self, Id> {
        let mut cursors = Vec::with_capacity(sequences.len());
        let mut tail_counts: HashMap<&'a Id, usize> = HashMap::new();

        for (index, sequence) in sequences.iter().enumerate() {
            let items = sequence.as_ref();

            let mut seen = HashSet::with_capacity(items.len());
            for item in items {
                if !seen.insert(item) {
                    return Err(C3Error::DuplicateEntry {
                        sequence: index,
                        item: item.clone(),
                    });
                }
            }

            let cursor = MergeCursor::new(items);
            for item in cursor.tail() {
                *tail_counts.entry(item).or_insert(0) += 1;
            }
            cursors.push(cursor);
        }

        Ok(Self {
            cursors,
            tail_counts,
        })
    }

    fn is_guard(&self, index: usize) -> bool {
        index + 1 == self.cursors.len()
    }

    fn is_exhausted(&self) -> bool {
        self.cursors.iter().all(MergeCursor::is_exhausted)
    }

    fn remaining(&self) -> usize {
        self.cursors.iter().map(MergeCursor::len).sum()
    }

    fn in_any_tail(&self, item: &Id) -> bool {
        self.tail_counts.get(item).is_some_and(|&count| count > 0)
    }

    /// Scan heads in input order and return the first that is in no tail.
    fn next_candidate(&self) -> Option<(usize, &'a Id)> {
        self.cursors.iter().enumerate().find_map(|(index, cursor)| {
            let head = cursor.peek_front()?;
            (!self.in_any_tail(head)).then_some((index, head))
        })
    }

    /// Pop `candidate` from every cursor whose head it is.
    ///
    /// Each pop moves the cursor's next element from its tail to its head,
    /// so that element's tail count drops by one.
    fn consume(&mut self, candidate: &Id) {
        for cursor in &mut self.cursors {
            if cursor.peek_front() != Some(candidate) {
                continue;
            }
            cursor.pop_front();
            if let Some(promoted) = cursor.peek_front() {
                if let Some(count) = self.tail_counts.get_mut(promoted) {
                    *count -= 1;
                }
            }
        }
    }

    /// Distinct heads of the unexhausted cursors, in scan order.
    fn heads(&self) -> Vec<Id> {
        let mut heads: Vec<Id> = Vec::new();
        for head in self.cursors.iter().filter_map(MergeCursor::peek_front) {
            if !heads.contains(head) {
                heads.push(head.clone());
            }
        }
        heads
    }
}
