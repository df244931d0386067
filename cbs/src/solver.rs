use std::mem::take;

use aigsat_aig::Aig;
use aigsat_ids::IdVec;
use aigsat_lit::{Lit, Var};
use quanta::Instant;

use crate::{
    clause::{ClauseArena, ClauseRef},
    options::{OptionsError, SolverOptions},
    queue::Queue,
    stats::SolverStats,
};

mod analyze;
mod decide;
mod propagate;

/// Outcome of a query.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SolveResult {
    /// The assumptions are satisfiable.
    ///
    /// Contains the value of every primary input the search assigned, as pairs of input index
    /// and value. Inputs that are missing can take any value.
    Sat(Vec<(usize, bool)>),
    /// The assumptions are unsatisfiable.
    ///
    /// Contains a clause implied by the circuit that is falsified by the assumptions. Its
    /// literals are negations of assumptions, after output nodes are replaced by their drivers.
    Unsat(Vec<Lit>),
    /// A resource limit was reached before the query was decided.
    Undecided,
}

impl SolveResult {
    /// Whether this is [`SolveResult::Sat`].
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    /// Whether this is [`SolveResult::Unsat`].
    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveResult::Unsat(_))
    }

    /// Whether this is [`SolveResult::Undecided`].
    pub fn is_undecided(&self) -> bool {
        matches!(self, SolveResult::Undecided)
    }

    fn kind(&self) -> &'static str {
        match self {
            SolveResult::Sat(_) => "sat",
            SolveResult::Unsat(_) => "unsat",
            SolveResult::Undecided => "undecided",
        }
    }
}

/// Why a variable was assigned.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
enum Reason {
    /// An assumption or a decision.
    #[default]
    Decision,
    /// Implied by the AND semantics of the given node and, if present, the given second node.
    Circuit(Var, Option<Var>),
    /// Implied by a learned clause whose first literal is the assigned one.
    Clause(ClauseRef),
}

// Assignment codes. Unassigning sets the second bit, which keeps the last value as a phase.
const FALSE: u8 = 0;
const TRUE: u8 = 1;
const UNASSIGNED: u8 = 2;

/// Circuit based SAT solver working directly on an [`Aig`].
///
/// The solver answers queries of the form "can these literals be true at the same time". It
/// branches on the justification frontier, the AND nodes that are assigned false while both of
/// their fanins are still unassigned. Conflicts are analyzed by resolving circuit reasons back to
/// the most recent decision, and the resulting clauses are propagated with two watched literals
/// for the rest of the query.
///
/// All per node state lives in side tables owned by the solver, so any number of solvers can share
/// one AIG. Each query starts and ends with an empty trail, but allocated storage and statistics
/// are kept between queries.
pub struct CircuitSolver<'a> {
    aig: &'a Aig,
    options: SolverOptions,

    values: IdVec<Var, u8>,
    levels: IdVec<Var, u32>,
    reasons: IdVec<Var, Reason>,
    marks: IdVec<Var, bool>,

    /// Assigned literals in assignment order. The live range is pending propagation.
    prop: Queue<Lit>,
    /// Justification frontier.
    just: Queue<Var>,
    clauses: ClauseArena,

    analysis: Vec<Var>,
    marked: Vec<Var>,
    clause_buf: Vec<Lit>,

    pending: Vec<Lit>,
    model: Vec<(usize, bool)>,
    assignment: Vec<Lit>,

    conflicts: usize,
    just_max: usize,
    stats: SolverStats,
}

impl<'a> CircuitSolver<'a> {
    /// Creates a solver with default options.
    pub fn new(aig: &'a Aig) -> Self {
        let len = aig.len();
        let mut values = IdVec::from_elem(UNASSIGNED, len);
        values[Var::FALSE] = FALSE;
        Self {
            aig,
            options: SolverOptions::default(),
            values,
            levels: IdVec::from_elem(0, len),
            reasons: IdVec::from_elem(Reason::Decision, len),
            marks: IdVec::from_elem(false, len),
            prop: Queue::default(),
            just: Queue::default(),
            clauses: ClauseArena::new(len),
            analysis: vec![],
            marked: vec![],
            clause_buf: vec![],
            pending: vec![],
            model: vec![],
            assignment: vec![],
            conflicts: 0,
            just_max: 0,
            stats: SolverStats::default(),
        }
    }

    /// Creates a solver with the given options.
    pub fn with_options(aig: &'a Aig, options: SolverOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        let mut solver = Self::new(aig);
        solver.options = options;
        Ok(solver)
    }

    /// The AIG this solver works on.
    pub fn aig(&self) -> &'a Aig {
        self.aig
    }

    /// The options used for queries.
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Replaces the options used for subsequent queries.
    pub fn set_options(&mut self, options: SolverOptions) -> Result<(), OptionsError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Statistics accumulated over all queries so far.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Adds an assumption for the next query only.
    pub fn assume(&mut self, lit: Lit) {
        self.pending.push(lit);
    }

    /// Checks whether `lit` can be true, together with any pending assumptions.
    pub fn solve(&mut self, lit: Lit) -> SolveResult {
        self.solve_assuming(&[lit])
    }

    /// Checks whether all given literals can be true at the same time, together with any pending
    /// assumptions.
    ///
    /// Literals of output nodes stand for the output's driver. After a satisfiable query,
    /// [`read_model`][Self::read_model] and [`read_assignment`][Self::read_assignment] return the
    /// satisfying assignment.
    ///
    /// # Panics
    ///
    /// Panics if a literal refers to a node that does not exist.
    pub fn solve_assuming(&mut self, assumptions: &[Lit]) -> SolveResult {
        let start_time = Instant::now();
        debug_assert!(self.prop.tail() == 0 && self.just.tail() == 0);
        debug_assert!(self.clauses.words() == 1);
        self.conflicts = 0;
        self.just_max = 0;

        let mut pending = take(&mut self.pending);
        pending.extend_from_slice(assumptions);

        let result = match self.assign_assumptions(&pending) {
            Err(clause) => {
                self.conflicts += 1;
                SolveResult::Unsat(clause)
            }
            Ok(()) => match self.solve_rec(0) {
                None if !self.limits_exceeded() => {
                    self.save_model();
                    SolveResult::Sat(self.model.clone())
                }
                None => SolveResult::Undecided,
                Some(clause) => SolveResult::Unsat(self.clauses.lits(clause).collect()),
            },
        };

        self.cancel_until(0);
        self.just.clear();
        self.clauses.reset();

        pending.clear();
        self.pending = pending;

        let result = if self.limits_exceeded() {
            SolveResult::Undecided
        } else {
            result
        };

        let elapsed = start_time.elapsed();
        self.stats
            .record(&result, self.conflicts, self.just_max, elapsed);

        log::debug!(
            "{} after {} conflicts, frontier {}, {:.2?}",
            result.kind(),
            self.conflicts,
            self.just_max,
            elapsed
        );
        if self.options.verbose {
            log::info!(
                "query {}: {} ({} conflicts)",
                self.stats.query_count(),
                result.kind(),
                self.conflicts
            );
        }

        result
    }

    /// Solves every combinational output of the AIG on its own.
    ///
    /// Pending assumptions from [`assume`][Self::assume] are consumed by this call and apply to
    /// the query of every output. Outputs driven by constant false are decided without search, as
    /// are outputs driven by constant true when there are no pending assumptions.
    pub fn solve_outputs(&mut self) -> Vec<SolveResult> {
        let aig = self.aig;
        let mut query = take(&mut self.pending);
        let assumption_count = query.len();

        let results = (0..aig.output_count())
            .map(|index| {
                let driver = aig.output_driver(index);
                if driver == Lit::FALSE {
                    let result = SolveResult::Unsat(vec![Lit::TRUE]);
                    self.stats.record(&result, 0, 0, Default::default());
                    result
                } else if driver == Lit::TRUE && assumption_count == 0 {
                    self.model.clear();
                    self.assignment.clear();
                    let result = SolveResult::Sat(vec![]);
                    self.stats.record(&result, 0, 0, Default::default());
                    result
                } else {
                    query.truncate(assumption_count);
                    query.push(driver);
                    self.solve_assuming(&query)
                }
            })
            .collect();

        query.clear();
        self.pending = query;

        if self.options.verbose {
            log::info!("solved {} outputs\n{}", aig.output_count(), self.stats);
        }
        results
    }

    /// Input values of the last satisfiable query, as pairs of input index and value in
    /// assignment order.
    pub fn read_model(&self) -> &[(usize, bool)] {
        &self.model
    }

    /// Every literal assigned true by the last satisfiable query, in assignment order.
    pub fn read_assignment(&self) -> &[Lit] {
        &self.assignment
    }

    /// Assigns the assumptions at level 0.
    ///
    /// Returns the falsified clause when the assumptions contradict each other without any
    /// propagation.
    fn assign_assumptions(&mut self, assumptions: &[Lit]) -> Result<(), Vec<Lit>> {
        for &assumption in assumptions {
            assert!(
                assumption.index() < self.aig.len(),
                "assumption {assumption} refers to a node that does not exist"
            );
            let lit = assumption.lookup(|var| self.aig.driver(var).unwrap_or(var.as_lit()));
            if lit == Lit::TRUE {
                continue;
            }
            if lit == Lit::FALSE {
                return Err(vec![Lit::TRUE]);
            }
            match self.lit_value(lit) {
                Some(true) => continue,
                Some(false) => return Err(vec![lit, !lit]),
                None => self.assign(lit, 0, Reason::Decision),
            }
        }
        Ok(())
    }

    /// Recursive search below decision level `level`.
    ///
    /// Returns a learned clause when the current assignment leads to a conflict, or `None` when
    /// either a satisfying assignment was found or a limit was reached.
    fn solve_rec(&mut self, level: u32) -> Option<ClauseRef> {
        if let Some(clause) = self.propagate(level) {
            return Some(clause);
        }
        if self.just.is_empty() {
            return None;
        }
        self.just_max = self.just_max.max(self.just.len());
        if self.limits_exceeded() {
            return None;
        }

        let prop_head = self.prop.head();
        let just_mark = self.just.store();

        let decision = self.pick_decision_variable();
        log::trace!("level {}: decide {decision}", level + 1);

        self.assign(decision, level + 1, Reason::Decision);
        let learned0 = self.solve_rec(level + 1)?;
        if self.clauses.head_var(learned0) != decision.var() {
            return Some(learned0);
        }

        self.cancel_until(prop_head);
        self.just.restore(just_mark);

        log::trace!("level {}: flip {}", level + 1, !decision);
        self.assign(!decision, level + 1, Reason::Decision);
        let learned1 = self.solve_rec(level + 1)?;
        if self.clauses.head_var(learned1) != decision.var() {
            return Some(learned1);
        }

        Some(self.resolve(learned0, learned1))
    }

    fn limits_exceeded(&self) -> bool {
        self.options
            .conflict_limit
            .is_some_and(|limit| self.conflicts > limit)
            || self
                .options
                .frontier_limit
                .is_some_and(|limit| self.just_max > limit)
    }

    #[inline(always)]
    fn value(&self, var: Var) -> Option<bool> {
        let code = self.values[var];
        (code < UNASSIGNED).then_some(code == TRUE)
    }

    #[inline(always)]
    fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.value(lit.var()).map(|value| value ^ lit.is_neg())
    }

    /// Makes `lit` true.
    #[inline]
    fn assign(&mut self, lit: Lit, level: u32, reason: Reason) {
        let var = lit.var();
        debug_assert!(self.value(var).is_none(), "{var} is already assigned");
        self.values[var] = if lit.is_pos() { TRUE } else { FALSE };
        self.levels[var] = level;
        self.reasons[var] = reason;
        self.prop.push(lit);
    }

    /// Unassigns every literal assigned after the first `bound` trail entries.
    fn cancel_until(&mut self, bound: usize) {
        for lit in self.prop.drain_from(bound) {
            self.values[lit.var()] |= UNASSIGNED;
        }
    }

    fn save_model(&mut self) {
        self.model.clear();
        self.assignment.clear();
        for &lit in self.prop.all() {
            self.assignment.push(lit);
            if let Some(index) = self.aig.node(lit.var()).ok().and_then(|node| node.input_index()) {
                self.model.push((index, lit.is_pos()));
            }
        }
    }
}
