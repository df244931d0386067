//! Circuit based SAT solving on And-Inverter-Graphs.
//!
//! [`CircuitSolver`] decides whether a set of literals of an [`Aig`] can be true at the same time
//! without translating the circuit to CNF. It propagates values through the AND nodes, branches on
//! the fanins of AND nodes that are false but not yet explained by a false fanin and learns
//! clauses from conflicts. The learned clauses are kept in a flat arena for the duration of one
//! query.
//!
//! The search is meant for many cheap queries, e.g. when sweeping for equivalent nodes, so every
//! query can be bounded by [`SolverOptions::conflict_limit`] and
//! [`SolverOptions::frontier_limit`]. Exceeding a limit yields [`SolveResult::Undecided`].
//!
//! ```
//! use aigsat_aig::Aig;
//! use aigsat_cbs::{CircuitSolver, SolveResult};
//!
//! let mut aig = Aig::new();
//! let a = aig.create_input().as_lit();
//! let b = aig.create_input().as_lit();
//! let x = aig.create_xor(a, b);
//!
//! let mut solver = CircuitSolver::new(&aig);
//! assert!(solver.solve(x).is_sat());
//! assert!(matches!(solver.solve_assuming(&[x, a, b]), SolveResult::Unsat(_)));
//! ```
mod clause;
mod options;
mod queue;
mod solver;
mod stats;

pub use options::{DecisionPolicy, OptionsError, SolverOptions};
pub use solver::{CircuitSolver, SolveResult};
pub use stats::SolverStats;

#[doc(no_inline)]
pub use aigsat_aig::{Aig, Lit, Var};
