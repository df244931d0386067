//! Conflict analysis.
//!
//! A conflict is explained by the set of assigned variables involved in it. Analysis replaces every
//! variable of the conflict level by the variables of its reason until only the decision of that
//! level remains, together with variables of lower levels. The learned clause is the disjunction of
//! the negated values of these variables, with the decision as its first literal.
use aigsat_lit::Var;

use super::{CircuitSolver, Reason};
use crate::clause::ClauseRef;

impl CircuitSolver<'_> {
    /// Analyzes a conflict between node `var` and the fanin values of `fanin` and `other`.
    pub(super) fn analyze(
        &mut self,
        level: u32,
        var: Var,
        fanin: Var,
        other: Option<Var>,
    ) -> ClauseRef {
        self.conflicts += 1;
        debug_assert!(self.analysis.is_empty());
        self.analysis.push(var);
        self.analysis.push(fanin);
        self.analysis.extend(other);
        self.derive_reason(level)
    }

    /// Analyzes a learned clause with only false literals.
    pub(super) fn analyze_clause(&mut self, level: u32, clause: ClauseRef) -> ClauseRef {
        self.conflicts += 1;
        debug_assert!(self.analysis.is_empty());
        debug_assert!(self
            .clauses
            .lits(clause)
            .all(|lit| self.lit_value(lit) == Some(false)));
        let lits = self.clauses.lits(clause).map(|lit| lit.var());
        self.analysis.extend(lits);
        self.derive_reason(level)
    }

    /// Combines the two clauses learned for both values of the same decision.
    ///
    /// Both clauses start with the decision, so the resolvent consists of their remaining
    /// variables, which all belong to lower levels. It is analyzed at the highest of these levels.
    pub(super) fn resolve(&mut self, clause0: ClauseRef, clause1: ClauseRef) -> ClauseRef {
        debug_assert_eq!(
            self.clauses.head_var(clause0),
            self.clauses.head_var(clause1)
        );
        debug_assert!(self.analysis.is_empty());
        let mut level_max = 0;
        for clause in [clause0, clause1] {
            for pos in 1..self.clauses.len(clause) {
                let var = self.clauses.lit(clause, pos).var();
                if self.marks[var] {
                    continue;
                }
                self.marks[var] = true;
                self.analysis.push(var);
                level_max = level_max.max(self.levels[var]);
            }
        }
        for &var in &self.analysis {
            self.marks[var] = false;
        }
        debug_assert!(!self.analysis.is_empty());
        self.derive_reason(level_max)
    }

    /// Expands the variables collected in the analysis buffer and adds the learned clause.
    fn derive_reason(&mut self, level: u32) -> ClauseRef {
        let mut decision = None;
        let mut kept = 0;
        let mut pos = 0;
        while let Some(&var) = self.analysis.get(pos) {
            pos += 1;
            if self.marks[var] {
                continue;
            }
            self.marks[var] = true;
            self.marked.push(var);

            let var_level = self.levels[var];
            if var_level < level {
                self.analysis[kept] = var;
                kept += 1;
                continue;
            }
            debug_assert_eq!(var_level, level);

            match self.reasons[var] {
                Reason::Decision => {
                    // level 0 can hold several assumptions, only one of them leads the clause
                    if decision.is_none() {
                        decision = Some(var);
                    } else {
                        self.analysis[kept] = var;
                        kept += 1;
                    }
                }
                Reason::Circuit(first, second) => {
                    self.analysis.push(first);
                    self.analysis.extend(second);
                }
                Reason::Clause(reason) => {
                    debug_assert_eq!(self.clauses.head_var(reason), var);
                    for lit_pos in 1..self.clauses.len(reason) {
                        let lit = self.clauses.lit(reason, lit_pos);
                        self.analysis.push(lit.var());
                    }
                }
            }
        }

        for var in self.marked.drain(..) {
            self.marks[var] = false;
        }
        self.analysis.truncate(kept);

        let decision = decision.expect("conflict does not depend on a decision of its level");
        let clause = self.finish_clause(decision);
        self.analysis.clear();
        clause
    }

    /// Adds the clause consisting of `decision` followed by the kept analysis variables.
    ///
    /// Every literal is false under the current assignment. The second literal is one of the
    /// latest assigned among the kept variables, so the clause stays correctly watched when
    /// backtracking.
    fn finish_clause(&mut self, decision: Var) -> ClauseRef {
        self.clause_buf.clear();
        let mut watch_pos = 1;
        let mut watch_level = 0;
        for var in std::iter::once(decision).chain(self.analysis.iter().copied()) {
            let value = self.values[var] & 1 != 0;
            if !self.clause_buf.is_empty() && self.levels[var] > watch_level {
                watch_level = self.levels[var];
                watch_pos = self.clause_buf.len();
            }
            self.clause_buf.push(var ^ value);
        }
        if self.clause_buf.len() > 1 {
            self.clause_buf.swap(1, watch_pos);
        }

        let clause = self.clauses.add(&self.clause_buf);
        log::trace!("learned {:?}", self.clause_buf);
        clause
    }
}
