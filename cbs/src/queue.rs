//! Flat FIFO queues that keep their consumed prefix.
use std::vec::Drain;

/// A FIFO queue backed by a single vector.
///
/// Popping only advances the head, so the consumed entries stay accessible. The solver uses this
/// to keep its propagation queue and its assignment trail in the same storage.
#[derive(Clone, Debug)]
pub struct Queue<T> {
    data: Vec<T>,
    head: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self {
            data: vec![],
            head: 0,
        }
    }
}

/// Saved bounds of a queue's live range, see [`Queue::store`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct QueueMark {
    head: usize,
    tail: usize,
}

impl<T: Copy> Queue<T> {
    /// Appends an entry at the tail.
    #[inline(always)]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Returns the entry at the head and advances the head past it.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        let value = *self.data.get(self.head)?;
        self.head += 1;
        Some(value)
    }

    /// Position of the first live entry.
    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Position one past the last entry.
    #[inline(always)]
    pub fn tail(&self) -> usize {
        self.data.len()
    }

    /// Number of live entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len() - self.head
    }

    /// Whether there are no live entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.data.len()
    }

    /// The live entries.
    #[inline(always)]
    pub fn live(&self) -> &[T] {
        &self.data[self.head..]
    }

    /// All entries ever pushed and not truncated, including the consumed ones.
    #[inline(always)]
    pub fn all(&self) -> &[T] {
        &self.data
    }

    #[inline(always)]
    pub fn get(&self, pos: usize) -> T {
        self.data[pos]
    }

    #[inline(always)]
    pub fn set(&mut self, pos: usize, value: T) {
        self.data[pos] = value;
    }

    /// Drops every entry at or after `tail`, keeping the head.
    pub fn truncate(&mut self, tail: usize) {
        debug_assert!(self.head <= tail);
        self.data.truncate(tail);
    }

    /// Moves head and tail back to `bound` and returns the removed entries.
    pub fn drain_from(&mut self, bound: usize) -> Drain<'_, T> {
        debug_assert!(bound <= self.data.len());
        self.head = bound;
        self.data.drain(bound..)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.data.clear();
        self.head = 0;
    }

    /// Saves the live range by copying it past the tail.
    ///
    /// The copy becomes the new live range, so later in-place edits leave the saved entries
    /// untouched and [`restore`][Self::restore] only has to reset the bounds.
    pub fn store(&mut self) -> QueueMark {
        let mark = QueueMark {
            head: self.head,
            tail: self.data.len(),
        };
        self.data.extend_from_within(mark.head..mark.tail);
        self.head = mark.tail;
        mark
    }

    /// Returns to the live range saved by [`store`][Self::store].
    pub fn restore(&mut self, mark: QueueMark) {
        debug_assert!(mark.tail <= self.data.len());
        self.data.truncate(mark.tail);
        self.head = mark.head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_keeps_consumed_entries() {
        let mut queue = Queue::default();
        queue.push(1);
        queue.push(2);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.live(), [2]);
        assert_eq!(queue.all(), [1, 2]);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());

        assert_eq!(queue.drain_from(1).collect::<Vec<_>>(), [2]);
        assert_eq!(queue.head(), 1);
        assert_eq!(queue.tail(), 1);
    }

    #[test]
    fn store_and_restore() {
        let mut queue = Queue::default();
        for value in 0..4 {
            queue.push(value);
        }
        queue.pop();

        let mark = queue.store();
        assert_eq!(queue.live(), [1, 2, 3]);
        assert_eq!(queue.head(), 4);

        // compact the copy in place
        queue.set(queue.head(), 3);
        let head = queue.head();
        queue.truncate(head + 1);
        queue.push(7);
        assert_eq!(queue.live(), [3, 7]);

        queue.restore(mark);
        assert_eq!(queue.live(), [1, 2, 3]);
        assert_eq!(queue.all(), [0, 1, 2, 3]);
    }
}
