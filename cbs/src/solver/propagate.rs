//! Boolean constraint propagation over AND nodes and learned clauses.
use aigsat_lit::{Lit, Var};

use super::{CircuitSolver, Reason};
use crate::clause::{ClauseRef, WatchSlot};

impl CircuitSolver<'_> {
    /// Propagates all pending assignments and rescans the justification frontier until neither
    /// produces new assignments.
    ///
    /// Returns the learned clause of the first conflict.
    pub(super) fn propagate(&mut self, level: u32) -> Option<ClauseRef> {
        loop {
            while let Some(lit) = self.prop.pop() {
                if let Some(clause) = self.propagate_clauses(level, lit) {
                    return Some(clause);
                }
                if let Some(clause) = self.propagate_one(lit.var(), level) {
                    return Some(clause);
                }
            }

            let head = self.just.head();
            let tail = self.just.tail();
            let mut kept = head;
            for pos in head..tail {
                let var = self.just.get(pos);
                if self.is_unjustified(var) {
                    self.just.set(kept, var);
                    kept += 1;
                } else if let Some(clause) = self.propagate_two(var, level) {
                    return Some(clause);
                }
            }
            if kept == tail {
                return None;
            }
            self.just.truncate(kept);
        }
    }

    /// Visits the learned clauses watching `!lit` after `lit` became true.
    ///
    /// Each visited clause is moved to another watch list when it has a literal that is not false,
    /// asserts its first literal when it became unit or yields a conflict when all its literals
    /// are false.
    fn propagate_clauses(&mut self, level: u32, lit: Lit) -> Option<ClauseRef> {
        let false_lit = !lit;
        let mut slot = WatchSlot::Head(lit);
        while let Some(clause) = self.clauses.slot(slot) {
            if self.clauses.lit(clause, 0) == false_lit {
                self.clauses.swap_watched(clause);
            }
            debug_assert_eq!(self.clauses.lit(clause, 1), false_lit);

            let first = self.clauses.lit(clause, 0);
            let first_value = self.lit_value(first);
            if first_value == Some(true) {
                slot = WatchSlot::Next1(clause);
                continue;
            }

            let len = self.clauses.len(clause);
            let replacement =
                (2..len).find(|&pos| self.lit_value(self.clauses.lit(clause, pos)) != Some(false));
            if let Some(pos) = replacement {
                let new_watch = self.clauses.lit(clause, pos);
                self.clauses.set_lit(clause, 1, new_watch);
                self.clauses.set_lit(clause, pos, false_lit);
                let next = self.clauses.next(clause, 1);
                self.clauses.set_slot(slot, next);
                self.clauses.watch(clause, new_watch);
                continue;
            }

            if first_value.is_none() {
                self.assign(first, level, Reason::Clause(clause));
                slot = WatchSlot::Next1(clause);
                continue;
            }

            log::trace!("level {level}: clause conflict on {}", first.var());
            return Some(self.analyze_clause(level, clause));
        }
        None
    }

    /// Propagates the value of a newly assigned node to its fanins.
    ///
    /// A true AND forces both fanins true. A false AND with one true fanin forces the other fanin
    /// false, with no known fanin it joins the justification frontier.
    fn propagate_one(&mut self, var: Var, level: u32) -> Option<ClauseRef> {
        let [a, b] = self.aig.and_fanins(var)?;
        let value_a = self.lit_value(a);
        let value_b = self.lit_value(b);

        if self.value(var) == Some(true) {
            match (value_a, value_b) {
                (Some(false), Some(false)) => {
                    return Some(self.analyze(level, var, a.var(), Some(b.var())))
                }
                (Some(false), _) => return Some(self.analyze(level, var, a.var(), None)),
                (_, Some(false)) => return Some(self.analyze(level, var, b.var(), None)),
                _ => (),
            }
            if value_a.is_none() {
                self.assign(a, level, Reason::Circuit(var, None));
            }
            if value_b.is_none() {
                self.assign(b, level, Reason::Circuit(var, None));
            }
            return None;
        }

        if value_a.is_none() && value_b.is_none() {
            self.just.push(var);
            return None;
        }
        self.propagate_false(var, [a, b], [value_a, value_b], level)
    }

    /// Rechecks a frontier node that is no longer unjustified.
    fn propagate_two(&mut self, var: Var, level: u32) -> Option<ClauseRef> {
        debug_assert_eq!(self.value(var), Some(false));
        let [a, b] = self.aig.and_fanins(var)?;
        let values = [self.lit_value(a), self.lit_value(b)];
        self.propagate_false(var, [a, b], values, level)
    }

    /// Handles a false AND node with at least one assigned fanin.
    fn propagate_false(
        &mut self,
        var: Var,
        [a, b]: [Lit; 2],
        values: [Option<bool>; 2],
        level: u32,
    ) -> Option<ClauseRef> {
        match values {
            [Some(false), _] | [_, Some(false)] => None,
            [Some(true), Some(true)] => Some(self.analyze(level, var, a.var(), Some(b.var()))),
            [Some(true), None] => {
                self.assign(!b, level, Reason::Circuit(var, Some(a.var())));
                None
            }
            [None, Some(true)] => {
                self.assign(!a, level, Reason::Circuit(var, Some(b.var())));
                None
            }
            [None, None] => unreachable!("unjustified node {var} was not deferred"),
        }
    }

    /// Whether `var` is a false AND node with both fanins unassigned.
    fn is_unjustified(&self, var: Var) -> bool {
        let Some([a, b]) = self.aig.and_fanins(var) else {
            return false;
        };
        self.value(var) == Some(false)
            && self.value(a.var()).is_none()
            && self.value(b.var()).is_none()
    }
}
