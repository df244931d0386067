use std::ops;

/// Either the identity function on, or negation of Booleans.
///
/// This is the complement bit of a [`Lit`][crate::Lit]. Using a separate type instead of `bool`
/// avoids having to pick whether `true` means "complemented" or "not complemented" at every use
/// site.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Pol {
    /// Positive polarity, represents the identity function.
    #[default]
    Pos = 0,
    /// Negative polarity, represents Boolean negation.
    Neg = 1,
}

impl std::fmt::Debug for Pol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for Pol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pos => write!(f, "="),
            Self::Neg => write!(f, "!"),
        }
    }
}

impl Pol {
    /// Returns the negative polarity if the given condition is `true` and a positive polarity
    /// otherwise.
    #[inline(always)]
    pub fn neg_if(neg: bool) -> Self {
        if neg {
            Pol::Neg
        } else {
            Pol::Pos
        }
    }

    /// Returns `true` when this is the negative polarity.
    #[inline(always)]
    pub fn is_neg(self) -> bool {
        self == Pol::Neg
    }

    /// Returns `true` when this is the positive polarity.
    #[inline(always)]
    pub fn is_pos(self) -> bool {
        self == Pol::Pos
    }

    /// Applies the polarity to a bit-parallel simulation word.
    #[inline(always)]
    pub fn apply_word(self, word: u64) -> u64 {
        match self {
            Pol::Pos => word,
            Pol::Neg => !word,
        }
    }
}

impl ops::BitXor for Pol {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Pol::neg_if(self.is_neg() ^ rhs.is_neg())
    }
}

impl ops::BitXorAssign for Pol {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs
    }
}

impl ops::BitXor<Pol> for bool {
    type Output = bool;

    #[inline(always)]
    fn bitxor(self, rhs: Pol) -> Self::Output {
        self ^ rhs.is_neg()
    }
}

impl ops::BitXorAssign<Pol> for bool {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Pol) {
        *self ^= rhs.is_neg()
    }
}

impl ops::Not for Pol {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        self ^ Pol::Neg
    }
}
