#![allow(missing_docs)] // test only
use aigsat_aig::{Aig, Lit};
use aigsat_cbs::{CircuitSolver, SolveResult, SolverOptions};

/// Builds a miter between two structurally different XOR implementations of the same inputs.
fn xor_miter() -> (Aig, Lit) {
    let mut aig = Aig::new();
    let a = aig.create_input().as_lit();
    let b = aig.create_input().as_lit();
    let x0 = aig.create_xor(a, b);
    let or = aig.create_or(a, b);
    let nand = !aig.create_and(a, b);
    let x1 = aig.create_and(or, nand);
    let miter = aig.create_xor(x0, x1);
    aig.create_output(miter);
    (aig, miter)
}

/// `(p & q) | (r & s)` style target whose frontier holds two nodes at once.
fn two_frontier_nodes() -> (Aig, Lit) {
    let mut aig = Aig::new();
    let inputs: Vec<Lit> = (0..4).map(|_| aig.create_input().as_lit()).collect();
    let m0 = aig.create_and(inputs[0], inputs[1]);
    let m1 = aig.create_and(inputs[2], inputs[3]);
    let target = aig.create_and(!m0, !m1);
    (aig, target)
}

#[test]
fn unsat_miter_needs_conflicts() {
    aigsat_logger::test_setup("trace");
    let (aig, miter) = xor_miter();

    let mut solver = CircuitSolver::new(&aig);
    assert!(solver.solve(miter).is_unsat());
    assert!(solver.stats().unsat_conflicts > 0);

    let options = SolverOptions::default().with_conflict_limit(Some(0));
    let mut limited = CircuitSolver::with_options(&aig, options).unwrap();
    assert_eq!(limited.solve(miter), SolveResult::Undecided);
    assert_eq!(limited.stats().undecided_count, 1);

    // the limit only applies to the query where it is exceeded
    assert!(limited.solve(Lit::TRUE).is_sat());
    assert_eq!(limited.stats().sat_count, 1);
}

#[test]
fn frontier_limit_stops_wide_queries() {
    let (aig, target) = two_frontier_nodes();

    let mut solver = CircuitSolver::new(&aig);
    assert!(solver.solve(target).is_sat());
    assert_eq!(solver.stats().max_frontier, 2);

    let options = SolverOptions::default().with_frontier_limit(Some(1));
    let mut limited = CircuitSolver::with_options(&aig, options).unwrap();
    assert_eq!(limited.solve(target), SolveResult::Undecided);

    let options = SolverOptions::default().with_frontier_limit(Some(2));
    let mut limited = CircuitSolver::with_options(&aig, options).unwrap();
    assert!(limited.solve(target).is_sat());
}

#[test]
fn conflict_limit_zero_on_contradictory_assumptions() {
    let (aig, miter) = xor_miter();
    let options = SolverOptions::default().with_conflict_limit(Some(0));
    let mut solver = CircuitSolver::with_options(&aig, options).unwrap();
    assert_eq!(solver.solve_assuming(&[miter, !miter]), SolveResult::Undecided);
    assert!(solver.solve(Lit::TRUE).is_sat());
}

#[test]
fn rejected_options() {
    let (aig, _) = xor_miter();
    let options = SolverOptions::default().with_frontier_limit(Some(0));
    assert!(CircuitSolver::with_options(&aig, options).is_err());

    let mut solver = CircuitSolver::new(&aig);
    assert!(solver
        .set_options(SolverOptions::default().with_frontier_limit(Some(0)))
        .is_err());
    assert_eq!(solver.options(), &SolverOptions::default());
}
