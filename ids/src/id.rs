use core::{fmt::Debug, hash::Hash};

/// Types that represent integer ids
///
/// A type of this trait represents an `usize` index value in the range `0..=Self::MAX_ID_INDEX`.
/// The representation is up to the implementing type, which usually stores a smaller integer.
///
/// Implementations must make [`PartialEq`], [`Ord`] and [`Hash`] behave as if the type was a
/// struct containing [`index: usize`][`Self::id_index()`] as only field. Collections in this
/// crate rely on ids with equal indices being interchangeable.
pub trait Id: Copy + Ord + Hash + Send + Sync + Debug {
    /// The largest index representable by this id type.
    const MAX_ID_INDEX: usize;
    /// The id with index zero.
    const MIN_ID: Self;

    /// Returns the id with a given index, assuming the index is valid.
    ///
    /// Callers need to ensure `index <= Self::MAX_ID_INDEX`. Implementations only check this using
    /// a debug assertion, and may wrap or truncate an invalid index otherwise.
    fn from_id_index_unchecked(index: usize) -> Self;

    /// Returns the index represented by this id.
    fn id_index(self) -> usize;

    /// Returns the id with a given index, panicking when the index is invalid.
    #[inline(always)]
    #[track_caller]
    fn from_id_index(index: usize) -> Self {
        assert!(
            index <= Self::MAX_ID_INDEX,
            "id index {index} exceeds the maximum of {}",
            Self::MAX_ID_INDEX
        );
        Self::from_id_index_unchecked(index)
    }

    /// Returns the id with a given index, if it is valid.
    ///
    /// Never panics.
    #[inline(always)]
    fn try_from_id_index(index: usize) -> Option<Self> {
        (index <= Self::MAX_ID_INDEX).then(|| Self::from_id_index_unchecked(index))
    }
}

macro_rules! impl_primitive_id {
    ($($t:ty),*) => {$(
        impl Id for $t {
            const MAX_ID_INDEX: usize = {
                if (<$t>::MAX as u128) < (usize::MAX as u128) {
                    <$t>::MAX as usize
                } else {
                    usize::MAX
                }
            };
            const MIN_ID: Self = 0;

            #[inline(always)]
            fn from_id_index_unchecked(index: usize) -> Self {
                debug_assert!(index <= Self::MAX_ID_INDEX);
                index as $t
            }

            #[inline(always)]
            fn id_index(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_primitive_id!(u8, u16, u32, u64, usize);
