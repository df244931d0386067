//! Structurally hashed And-Inverter-Graphs with an embedded circuit based SAT solver
//!
//! This crate bundles the workspace crates under one name:
//!
//! * [`ids`] provides typed dense indices and the vectors indexed by them.
//! * [`lit`] provides variables, literals and polarities.
//! * [`aig`] provides the structurally hashed graph store, traversal, cleanup, simulation and
//!   windows.
//! * [`cbs`] provides the circuit based SAT solver.
//!
//! ```
//! use aigsat::{Aig, CircuitSolver};
//!
//! let mut aig = Aig::new();
//! let a = aig.create_input().as_lit();
//! let b = aig.create_input().as_lit();
//! let via_and = aig.create_and(a, b);
//! let via_or = !aig.create_or(!a, !b);
//! // structural hashing already merged both into one node
//! assert_eq!(via_and, via_or);
//!
//! let x = aig.create_xor(a, b);
//! let mut solver = CircuitSolver::new(&aig);
//! assert!(solver.solve_assuming(&[x, via_and]).is_unsat());
//! ```

pub use aigsat_aig as aig;
pub use aigsat_cbs as cbs;
pub use aigsat_ids as ids;
pub use aigsat_lit as lit;

pub use aigsat_aig::{Aig, AigError, Window, WindowMap};
pub use aigsat_cbs::{CircuitSolver, DecisionPolicy, SolveResult, SolverOptions, SolverStats};
pub use aigsat_lit::{Lit, Pol, Var};
