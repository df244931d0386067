//! [`Vec`] wrapper with [`Id`] indexing.
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::{Id, IdRange};

/// A [`Vec`] wrapper, representing a collection that maps `K` keys to `V` values.
///
/// It has entries `(k, v)` with `v` being the item at position [`k.id_index()`][Id::id_index] of
/// the wrapped vector. The keys always span a contiguous range of ids starting at
/// [`K::MIN_ID`][Id::MIN_ID].
///
/// The length of the wrapped vector never exceeds the number of valid `K` ids.
pub struct IdVec<K, V> {
    _phantom: PhantomData<K>,
    values: Vec<V>,
}

impl<K, V> Default for IdVec<K, V> {
    #[inline(always)]
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
            values: Vec::new(),
        }
    }
}

impl<K, V: Clone> Clone for IdVec<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            _phantom: PhantomData,
            values: self.values.clone(),
        }
    }
}

impl<K, V: PartialEq> PartialEq for IdVec<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K, V: Eq> Eq for IdVec<K, V> {}

impl<K: Id, V> IdVec<K, V> {
    /// Creates an `IdVec` from a vector of values.
    ///
    /// # Panics
    ///
    /// Panics when `K` cannot index the full length of the vector.
    #[inline]
    #[track_caller]
    pub fn from_vec(values: Vec<V>) -> Self {
        assert!(values.len() <= K::MAX_ID_INDEX.saturating_add(1));
        Self {
            _phantom: PhantomData,
            values,
        }
    }

    /// Creates an `IdVec` holding `len` clones of `value`.
    #[inline]
    pub fn from_elem(value: V, len: usize) -> Self
    where
        V: Clone,
    {
        Self::from_vec(vec![value; len])
    }

    /// Creates an empty `IdVec` with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Returns the values as a slice.
    #[inline(always)]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Returns the values as a mutable slice.
    #[inline(always)]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// Returns the keys as a contiguous range of ids.
    #[inline(always)]
    pub fn keys(&self) -> IdRange<K> {
        IdRange::from_index_range(0..self.values.len())
    }

    /// Returns the number of entries in the collection.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the collection contains no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a reference to the value for a given key or `None` if the key is out of bounds.
    #[inline(always)]
    pub fn get(&self, key: K) -> Option<&V> {
        self.values.get(key.id_index())
    }

    /// Returns a mutable reference to the value for a given key or `None` if the key is out of
    /// bounds.
    #[inline(always)]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.values.get_mut(key.id_index())
    }

    /// Returns an iterator over all entries as `(K, &V)` pairs.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (K, &V)> + ExactSizeIterator + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (K::from_id_index_unchecked(index), value))
    }

    /// Returns an iterator over all entries as `(K, &mut V)` pairs.
    #[inline]
    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = (K, &mut V)> + ExactSizeIterator + '_ {
        self.values
            .iter_mut()
            .enumerate()
            .map(|(index, value)| (K::from_id_index_unchecked(index), value))
    }

    /// Inserts a value as a new entry, using the id with the smallest available index as key.
    ///
    /// This returns the used key and a mutable reference to the just inserted value.
    #[inline]
    pub fn push(&mut self, value: V) -> (K, &mut V) {
        let index = self.values.len();
        let key = K::from_id_index(index);
        self.values.push(value);
        (key, &mut self.values[index])
    }

    /// Removes and returns the entry with the id having the largest used index.
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        let value = self.values.pop()?;
        Some((K::from_id_index_unchecked(self.values.len()), value))
    }

    /// Returns the id with the smallest available index.
    ///
    /// This is the same key that would be used when calling [`push`][Self::push].
    #[inline(always)]
    pub fn next_unused_key(&self) -> K {
        K::from_id_index(self.len())
    }

    /// Appends default values until there is an entry with the given key.
    #[inline]
    pub fn grow_for_key(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        if self.len() <= key.id_index() {
            self.values.resize_with(key.id_index() + 1, Default::default)
        }
        &mut self.values[key.id_index()]
    }

    /// Resizes the collection, creating new entries by cloning the given value.
    #[inline]
    #[track_caller]
    pub fn resize(&mut self, len: usize, value: V)
    where
        V: Clone,
    {
        assert!(len <= K::MAX_ID_INDEX.saturating_add(1));
        self.values.resize(len, value)
    }

    /// Shrinks the collection, dropping all but the first `len` entries.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.values.truncate(len)
    }

    /// Removes all entries of the collection.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<K: Id, V> Index<K> for IdVec<K, V> {
    type Output = V;

    #[inline(always)]
    #[track_caller]
    fn index(&self, key: K) -> &V {
        &self.values[key.id_index()]
    }
}

impl<K: Id, V> IndexMut<K> for IdVec<K, V> {
    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, key: K) -> &mut V {
        &mut self.values[key.id_index()]
    }
}

impl<K: Id, V> FromIterator<V> for IdVec<K, V> {
    #[inline]
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<K: Id, V: Debug> Debug for IdVec<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
