//! Head/tail cursor over one merge input sequence.

/// A cursor over a borrowed sequence, split into a head and a tail.
///
/// The head is the first unconsumed element, or `None` once the sequence is
/// exhausted. The tail is everything after the head and is only used for
/// membership tests. Consuming the head promotes the first tail element.
///
/// # Invariants
///
/// - `head()` is `items[pos]` while `pos < items.len()`.
/// - `tail()` never contains the head, given a duplicate-free sequence.
#[derive(Clone, Debug)]
pub struct MergeCursor<'a, Id> {
    items: &'a [Id],
    pos: usize,
}

impl<'a, Id: PartialEq> MergeCursor<'a, Id> {
    /// Create a cursor positioned at the start of `items`.
    pub fn new(items: &'a [Id]) -> Self {
        Self { items, pos: 0 }
    }

    /// The next candidate, or `None` if the sequence is exhausted.
    pub fn peek_front(&self) -> Option<&'a Id> {
        self.items.get(self.pos)
    }

    /// Consume and return the head, promoting the next element.
    pub fn pop_front(&mut self) -> Option<&'a Id> {
        let head = self.items.get(self.pos)?;
        self.pos += 1;
        Some(head)
    }

    /// The elements after the head.
    pub fn tail(&self) -> &'a [Id] {
        self.items.get(self.pos + 1..).unwrap_or(&[])
    }

    /// Returns `true` if `item` occurs in the tail.
    pub fn contains_in_remainder(&self, item: &Id) -> bool {
        self.tail().contains(item)
    }

    /// Returns `true` when neither a head nor a tail remains.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.items.len()
    }

    /// Number of unconsumed elements, head included.
    pub fn len(&self) -> usize {
        self.items.len().saturating_sub(self.pos)
    }

    /// Returns `true` if no elements remain.
    pub fn is_empty(&self) -> bool {
        self.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_exhausted() {
        let cursor: MergeCursor<'_, char> = MergeCursor::new(&[]);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.peek_front(), None);
        assert!(cursor.tail().is_empty());
        assert_eq!(cursor.len(), 0);
    }

    #[test]
    fn head_and_tail_split() {
        let items = ['C', 'A', 'R'];
        let cursor = MergeCursor::new(&items);
        assert_eq!(cursor.peek_front(), Some(&'C'));
        assert_eq!(cursor.tail(), &['A', 'R']);
        assert!(cursor.contains_in_remainder(&'R'));
        assert!(!cursor.contains_in_remainder(&'C'));
    }

    #[test]
    fn pop_promotes_next_element() {
        let items = ['C', 'A'];
        let mut cursor = MergeCursor::new(&items);
        assert_eq!(cursor.pop_front(), Some(&'C'));
        assert_eq!(cursor.peek_front(), Some(&'A'));
        assert!(cursor.tail().is_empty());
        assert_eq!(cursor.len(), 1);

        assert_eq!(cursor.pop_front(), Some(&'A'));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.pop_front(), None);
        assert_eq!(cursor.len(), 0);
    }
}
