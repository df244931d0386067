use std::{iter::FusedIterator, marker::PhantomData, ops::Range};

use crate::Id;

/// A range of [`Id`] values having contiguous indices.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IdRange<I> {
    // invariant: all indices in start..end are valid for I
    start: usize,
    end: usize,
    _phantom: PhantomData<I>,
}

impl<I: Id> From<Range<I>> for IdRange<I> {
    #[inline(always)]
    fn from(value: Range<I>) -> Self {
        Self::from_index_range(value.start.id_index()..value.end.id_index())
    }
}

impl<I: Id> IdRange<I> {
    /// Creates an id range given a corresponding index range.
    ///
    /// # Panics
    ///
    /// Panics when the range contains indices that are not valid for `I`.
    #[inline]
    #[track_caller]
    pub fn from_index_range(range: Range<usize>) -> Self {
        let Range { start, end } = range;
        assert!(start <= end);
        assert!(end <= I::MAX_ID_INDEX.saturating_add(1));
        Self {
            start,
            end,
            _phantom: PhantomData,
        }
    }

    /// Returns an iterator over the ids in the range.
    #[inline(always)]
    pub fn iter(&self) -> IdRangeIter<I> {
        self.into_iter()
    }

    /// Returns the indices present in the id range.
    #[inline(always)]
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the number of ids in the range.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` when the range contains no ids.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` when the range contains the given id.
    #[inline(always)]
    pub fn contains(&self, id: I) -> bool {
        (self.start..self.end).contains(&id.id_index())
    }
}

/// Iterator over the ids of an [`IdRange`].
#[derive(Clone, Debug)]
pub struct IdRangeIter<I> {
    indices: Range<usize>,
    _phantom: PhantomData<I>,
}

impl<I: Id> Iterator for IdRangeIter<I> {
    type Item = I;

    #[inline(always)]
    fn next(&mut self) -> Option<I> {
        self.indices.next().map(I::from_id_index_unchecked)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<I: Id> DoubleEndedIterator for IdRangeIter<I> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<I> {
        self.indices.next_back().map(I::from_id_index_unchecked)
    }
}

impl<I: Id> ExactSizeIterator for IdRangeIter<I> {}

impl<I: Id> FusedIterator for IdRangeIter<I> {}

impl<I: Id> IntoIterator for IdRange<I> {
    type Item = I;

    type IntoIter = IdRangeIter<I>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        IdRangeIter {
            indices: self.start..self.end,
            _phantom: PhantomData,
        }
    }
}

impl<I: Id> IntoIterator for &IdRange<I> {
    type Item = I;

    type IntoIter = IdRangeIter<I>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        (*self).into_iter()
    }
}
