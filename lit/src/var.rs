use aigsat_ids::Id;
use std::ops;

use super::{lit::Lit, pol::Pol};

/// Numeric identifier for a variable.
///
/// In an AIG a variable is a node id. Index `0` is reserved for the constant false node.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Var(u32);

impl Id for Var {
    const MAX_ID_INDEX: usize = Lit::MAX_CODE >> 1;
    const MIN_ID: Self = Var(0);

    #[inline(always)]
    fn from_id_index_unchecked(index: usize) -> Self {
        debug_assert!(index <= Self::MAX_ID_INDEX);
        Var(index as u32)
    }

    #[inline(always)]
    fn id_index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index() {
            0 => write!(f, "0"),
            index => write!(f, "v{index}"),
        }
    }
}

impl ops::BitXor<Pol> for Var {
    type Output = Lit;

    #[inline(always)]
    fn bitxor(self, rhs: Pol) -> Self::Output {
        self.lit(rhs)
    }
}

impl ops::BitXor<bool> for Var {
    type Output = Lit;

    #[inline(always)]
    fn bitxor(self, rhs: bool) -> Self::Output {
        self.as_lit() ^ rhs
    }
}

impl Var {
    /// The variable of the constant false node.
    pub const FALSE: Self = Self::MIN_ID;

    /// The largest valid [`index`][`Self::index`] for a variable.
    pub const MAX_INDEX: usize = Self::MAX_ID_INDEX;

    /// Returns the variable for a given index.
    #[inline(always)]
    #[track_caller]
    pub fn from_index(index: usize) -> Self {
        Self::from_id_index(index)
    }

    /// Returns the literal for this variable with the given polarity.
    #[inline(always)]
    pub fn lit(self, pol: Pol) -> Lit {
        Lit::from_code_unchecked((self.index() << 1) | (pol as usize))
    }

    /// Returns a positive polarity literal for the variable.
    #[inline(always)]
    pub fn as_lit(self) -> Lit {
        self.lit(Pol::Pos)
    }

    /// Returns a negative polarity literal for the variable.
    #[inline(always)]
    pub fn as_neg_lit(self) -> Lit {
        self.lit(Pol::Neg)
    }

    /// Returns the index of the variable.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.id_index()
    }
}
