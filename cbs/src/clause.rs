//! Learned clause storage with two watched literals per clause.
//!
//! Clauses live inline in a single `u32` vector. A clause with `n` literals occupies `n + 3`
//! words: the literal count, the literal codes and one next link for each of the two watched
//! literals `lits[0]` and `lits[1]`. A next link of `0` ends a watch list, the arena starts with a
//! reserved word so that no clause has handle `0`.
//!
//! The watch list stored for a literal `l` holds every clause watching `!l`, so it is the list to
//! visit when `l` becomes true.
use std::num::NonZeroU32;

use aigsat_ids::IdVec;
use aigsat_lit::{Lit, Var};

/// Handle of a clause in a [`ClauseArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClauseRef(NonZeroU32);

impl ClauseRef {
    #[inline(always)]
    fn index(self) -> usize {
        self.0.get() as usize
    }

    #[inline(always)]
    fn from_link(link: u32) -> Option<Self> {
        NonZeroU32::new(link).map(Self)
    }

    #[inline(always)]
    fn to_link(clause: Option<Self>) -> u32 {
        clause.map_or(0, |clause| clause.0.get())
    }
}

/// A position holding the next clause of a watch list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WatchSlot {
    /// The head of the watch list stored for a literal.
    Head(Lit),
    /// The link for the second watched literal of a clause.
    Next1(ClauseRef),
}

/// Append-only clause store that is reset in one step.
#[derive(Clone, Debug)]
pub struct ClauseArena {
    data: Vec<u32>,
    watches: IdVec<Lit, Option<ClauseRef>>,
    touched: Vec<Lit>,
}

impl ClauseArena {
    /// Creates an empty arena for literals of `var_count` variables.
    pub fn new(var_count: usize) -> Self {
        Self {
            data: vec![0],
            watches: IdVec::from_elem(None, 2 * var_count),
            touched: vec![],
        }
    }

    /// Number of words used, including the reserved word.
    pub fn words(&self) -> usize {
        self.data.len()
    }

    /// Removes all clauses and empties all watch lists.
    pub fn reset(&mut self) {
        for lit in self.touched.drain(..) {
            self.watches[lit] = None;
        }
        self.data.truncate(1);
    }

    /// Appends a clause and watches its first two literals.
    ///
    /// Unit clauses are stored but never watched.
    pub fn add(&mut self, lits: &[Lit]) -> ClauseRef {
        debug_assert!(!lits.is_empty());
        let start = self.data.len();
        assert!(
            start + lits.len() + 3 <= u32::MAX as usize,
            "clause arena exceeds 32-bit handles"
        );
        self.data.push(lits.len() as u32);
        self.data.extend(lits.iter().map(|lit| lit.code() as u32));
        self.data.extend([0, 0]);

        let clause = ClauseRef::from_link(start as u32).expect("offset 0 is reserved");
        if lits.len() > 1 {
            self.watch(clause, lits[0]);
            self.watch(clause, lits[1]);
        }
        clause
    }

    /// Number of literals of a clause.
    #[inline(always)]
    pub fn len(&self, clause: ClauseRef) -> usize {
        self.data[clause.index()] as usize
    }

    #[inline(always)]
    pub fn lit(&self, clause: ClauseRef, pos: usize) -> Lit {
        debug_assert!(pos < self.len(clause));
        Lit::from_code(self.data[clause.index() + 1 + pos] as usize)
    }

    #[inline(always)]
    pub fn set_lit(&mut self, clause: ClauseRef, pos: usize, lit: Lit) {
        debug_assert!(pos < self.len(clause));
        self.data[clause.index() + 1 + pos] = lit.code() as u32;
    }

    /// Returns the literals of a clause.
    pub fn lits(&self, clause: ClauseRef) -> impl ExactSizeIterator<Item = Lit> + '_ {
        let start = clause.index() + 1;
        self.data[start..start + self.len(clause)]
            .iter()
            .map(|&code| Lit::from_code(code as usize))
    }

    /// Variable of the first literal, i.e. the asserting literal of a learned clause.
    #[inline(always)]
    pub fn head_var(&self, clause: ClauseRef) -> Var {
        self.lit(clause, 0).var()
    }

    #[inline(always)]
    fn link_pos(&self, clause: ClauseRef, watch: usize) -> usize {
        debug_assert!(watch < 2);
        clause.index() + 1 + self.len(clause) + watch
    }

    /// Returns the clause following `clause` in the watch list of its `watch`-th literal.
    #[inline(always)]
    pub fn next(&self, clause: ClauseRef, watch: usize) -> Option<ClauseRef> {
        ClauseRef::from_link(self.data[self.link_pos(clause, watch)])
    }

    #[inline(always)]
    fn set_next(&mut self, clause: ClauseRef, watch: usize, next: Option<ClauseRef>) {
        let pos = self.link_pos(clause, watch);
        self.data[pos] = ClauseRef::to_link(next);
    }

    /// Exchanges the two watched literals of a clause together with their links.
    pub fn swap_watched(&mut self, clause: ClauseRef) {
        let start = clause.index() + 1;
        let len = self.len(clause);
        self.data.swap(start, start + 1);
        self.data.swap(start + len, start + len + 1);
    }

    /// Returns the clause stored in a watch list position.
    #[inline(always)]
    pub fn slot(&self, slot: WatchSlot) -> Option<ClauseRef> {
        match slot {
            WatchSlot::Head(lit) => self.watches[lit],
            WatchSlot::Next1(clause) => self.next(clause, 1),
        }
    }

    /// Overwrites a watch list position.
    #[inline(always)]
    pub fn set_slot(&mut self, slot: WatchSlot, clause: Option<ClauseRef>) {
        match slot {
            WatchSlot::Head(lit) => self.watches[lit] = clause,
            WatchSlot::Next1(other) => self.set_next(other, 1, clause),
        }
    }

    /// Prepends `clause` to the watch list visited when `lit` becomes false.
    ///
    /// `lit` must be one of the two watched literals of the clause.
    pub fn watch(&mut self, clause: ClauseRef, lit: Lit) {
        let watch = if self.lit(clause, 0) == lit {
            0
        } else {
            debug_assert_eq!(self.lit(clause, 1), lit);
            1
        };
        let list = !lit;
        let head = self.watches[list];
        if head.is_none() {
            self.touched.push(list);
        }
        self.set_next(clause, watch, head);
        self.watches[list] = Some(clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(index: usize, neg: bool) -> Lit {
        Var::from_index(index) ^ neg
    }

    /// Collects a watch list whose clauses all watch `!lit` as their second literal.
    fn watch_list(arena: &ClauseArena, lit: Lit) -> Vec<ClauseRef> {
        let mut list = vec![];
        let mut slot = WatchSlot::Head(lit);
        while let Some(clause) = arena.slot(slot) {
            assert_eq!(arena.lit(clause, 1), !lit);
            list.push(clause);
            slot = WatchSlot::Next1(clause);
        }
        list
    }

    #[test]
    fn clauses_are_laid_out_inline() {
        let mut arena = ClauseArena::new(8);
        let c0 = arena.add(&[lit(1, false), lit(2, true), lit(3, false)]);
        let c1 = arena.add(&[lit(4, true)]);

        assert_eq!(arena.len(c0), 3);
        assert_eq!(
            arena.lits(c0).collect::<Vec<_>>(),
            [lit(1, false), lit(2, true), lit(3, false)]
        );
        assert_eq!(arena.head_var(c1), Var::from_index(4));
        assert_eq!(arena.words(), 1 + 6 + 4);

        arena.reset();
        assert_eq!(arena.words(), 1);
        assert_eq!(arena.slot(WatchSlot::Head(lit(1, true))), None);
    }

    #[test]
    fn watch_lists_link_through_second_literal() {
        let mut arena = ClauseArena::new(8);
        let a = lit(1, false);
        let c0 = arena.add(&[lit(2, false), a]);
        let c1 = arena.add(&[lit(3, false), a, lit(4, false)]);

        // both clauses watch `a` in position 1, the list for `!a` visits the newest first
        assert_eq!(watch_list(&arena, !a), [c1, c0]);
        assert_eq!(arena.slot(WatchSlot::Head(!lit(2, false))), Some(c0));

        // unlink c1 from the list as propagation does when it finds a replacement watch
        let next = arena.next(c1, 1);
        arena.set_slot(WatchSlot::Head(!a), next);
        assert_eq!(watch_list(&arena, !a), [c0]);

        arena.swap_watched(c0);
        assert_eq!(arena.lit(c0, 0), a);
        assert_eq!(arena.next(c0, 0), None);
        assert_eq!(arena.slot(WatchSlot::Head(!a)), Some(c0));
    }
}
