use aigsat_ids::Id;
use std::ops;

use super::{pol::Pol, var::Var};

/// Numeric identifier for a Boolean literal, i.e. a signed reference to an AIG node.
///
/// A literal consists of a [variable][`Var`] and a [polarity][`Pol`]. A literal with a positive
/// polarity has the value of its variable while a literal with a negative polarity has the
/// negated value.
///
/// The variable and polarity are combined into a single number, called the
/// [`code`][`Self::code`], which is `2 * var + pol`.
///
/// Note that the generic [`Id::id_index`] of a literal is the same as the [`code`][`Self::code`],
/// not the [`index`][`Self::index`]. The index of a literal is the same as the corresponding
/// variable's [`index`][`Var::index`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Lit(u32);

impl Id for Lit {
    const MAX_ID_INDEX: usize = u32::MAX as usize;
    const MIN_ID: Self = Lit(0);

    #[inline(always)]
    fn from_id_index_unchecked(index: usize) -> Self {
        debug_assert!(index <= Self::MAX_ID_INDEX);
        Lit(index as u32)
    }

    #[inline(always)]
    fn id_index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_const() {
            return match self.pol() {
                Pol::Pos => write!(f, "0"),
                Pol::Neg => write!(f, "1"),
            };
        }
        let prefix = match self.pol() {
            Pol::Pos => "",
            Pol::Neg => "!",
        };
        write!(f, "{prefix}v{}", self.index())
    }
}

impl From<Var> for Lit {
    #[inline(always)]
    fn from(var: Var) -> Self {
        var.as_lit()
    }
}

impl Lit {
    /// The literal representing constant false/0/low.
    pub const FALSE: Self = Lit(0);
    /// The literal representing constant true/1/high.
    pub const TRUE: Self = Lit(1);

    /// The largest valid [`code`][`Self::code`] for a literal.
    pub const MAX_CODE: usize = Self::MAX_ID_INDEX;

    /// Returns the literal for a given code.
    #[inline(always)]
    #[track_caller]
    pub fn from_code(code: usize) -> Self {
        Self::from_id_index(code)
    }

    #[inline(always)]
    pub(crate) fn from_code_unchecked(code: usize) -> Self {
        Self::from_id_index_unchecked(code)
    }

    /// Returns the variable of the literal.
    #[inline(always)]
    pub fn var(self) -> Var {
        Var::from_id_index_unchecked(self.code() >> 1)
    }

    /// Returns the polarity of the literal.
    #[inline(always)]
    pub fn pol(self) -> Pol {
        Pol::neg_if(self.0 & 1 != 0)
    }

    /// Returns the positive polarity literal with the same variable.
    #[inline(always)]
    pub fn as_pos(self) -> Self {
        Lit(self.0 & !1)
    }

    /// Returns the negative polarity literal with the same variable.
    #[inline(always)]
    pub fn as_neg(self) -> Self {
        Lit(self.0 | 1)
    }

    /// Returns whether this literal has positive polarity.
    #[inline(always)]
    pub fn is_pos(self) -> bool {
        self.pol() == Pol::Pos
    }

    /// Returns whether this literal has negative polarity.
    #[inline(always)]
    pub fn is_neg(self) -> bool {
        self.pol() == Pol::Neg
    }

    /// This is equivalent to `f(self.var()) ^ self.pol()`.
    #[inline(always)]
    pub fn lookup(self, f: impl FnOnce(Var) -> Lit) -> Lit {
        f(self.var()) ^ self.pol()
    }

    /// Returns the index of the literal's variable.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.var().index()
    }

    /// Returns the literal's code.
    #[inline(always)]
    pub fn code(self) -> usize {
        self.id_index()
    }

    /// Returns whether this literal is [`Self::FALSE`] or [`Self::TRUE`].
    #[inline(always)]
    pub fn is_const(self) -> bool {
        self.0 < 2
    }
}

impl ops::BitXor<Pol> for Lit {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Pol) -> Self::Output {
        Lit(self.0 ^ rhs as u32)
    }
}

impl ops::BitXorAssign<Pol> for Lit {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Pol) {
        *self = *self ^ rhs;
    }
}

impl ops::BitXor<bool> for Lit {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: bool) -> Self::Output {
        Lit(self.0 ^ rhs as u32)
    }
}

impl ops::BitXorAssign<bool> for Lit {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: bool) {
        *self = *self ^ rhs;
    }
}

impl ops::Not for Lit {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

impl ops::Not for &'_ Lit {
    type Output = Lit;

    #[inline(always)]
    fn not(self) -> Self::Output {
        !*self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarities() {
        let v = Var::from_index(1);

        let l0 = v.as_lit();
        assert!(l0.is_pos());
        assert!(l0.as_pos().is_pos());
        assert!(l0.as_neg().is_neg());
        let l1 = v.as_neg_lit();
        assert!(l1.is_neg());
        assert!(l1.as_pos().is_pos());
        assert!(l1.as_neg().is_neg());
        assert_eq!(!l0, l1);
        assert_eq!(l0 ^ Pol::Neg, l1);
        assert_eq!(l1 ^ true, l0);
    }

    #[test]
    fn codes() {
        assert_eq!(Lit::FALSE.var(), Var::FALSE);
        assert_eq!(!Lit::FALSE, Lit::TRUE);
        assert!(Lit::TRUE.is_const());

        let lit = Var::from_index(5).as_neg_lit();
        assert_eq!(lit.code(), 11);
        assert_eq!(lit.index(), 5);
        assert_eq!(Lit::from_code(11), lit);
        assert!(!lit.is_const());
        assert_eq!(format!("{lit}"), "!v5");
        assert_eq!(format!("{}", Lit::TRUE), "1");
    }
}
