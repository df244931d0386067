#![allow(missing_docs)] // test only
use aigsat_aig::{Aig, Lit};
use aigsat_cbs::{CircuitSolver, DecisionPolicy, SolveResult, SolverOptions};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

fn random_aig(rng: &mut SmallRng, inputs: usize, ands: usize, outputs: usize) -> Aig {
    let mut aig = Aig::new();
    let mut lits: Vec<Lit> = (0..inputs).map(|_| aig.create_input().as_lit()).collect();
    for _ in 0..ands {
        let a = *lits.choose(rng).unwrap() ^ rng.gen::<bool>();
        let b = *lits.choose(rng).unwrap() ^ rng.gen::<bool>();
        let and = aig.create_and(a, b);
        if !and.is_const() {
            lits.push(and.as_pos());
        }
    }
    for _ in 0..outputs {
        let from = lits.len().saturating_sub(lits.len() / 3 + 1);
        let lit = lits[rng.gen_range(from..lits.len())] ^ rng.gen::<bool>();
        aig.create_output(lit);
    }
    aig
}

/// Fills unassigned inputs randomly and checks that all `lits` evaluate to true.
fn check_model(rng: &mut SmallRng, aig: &Aig, model: &[(usize, bool)], lits: &[Lit]) {
    let mut inputs: Vec<bool> = (0..aig.input_count()).map(|_| rng.gen()).collect();
    for &(index, value) in model {
        inputs[index] = value;
    }
    let words: Vec<u64> = inputs.iter().map(|&value| value as u64).collect();
    let values = aig.simulate(&words).unwrap();
    for &lit in lits {
        let value = lit.pol().apply_word(values[lit.var()]) & 1 != 0;
        assert!(value, "model does not satisfy {lit}");
    }
}

/// Whether some input assignment makes every literal in `lits` true.
fn brute_force(aig: &Aig, lits: &[Lit]) -> bool {
    let tables = aig.truth_tables_for(lits).unwrap();
    let words = tables.first().map_or(1, |table| table.len());
    (0..words).any(|word| tables.iter().fold(!0u64, |acc, table| acc & table[word]) != 0)
}

#[test]
fn single_outputs_agree_with_brute_force() {
    aigsat_logger::test_setup("debug");
    let mut rng = SmallRng::seed_from_u64(0xc0ffee);
    for round in 0..150 {
        let inputs = rng.gen_range(1..=12);
        let aig = random_aig(&mut rng, inputs, 20 + round % 60, 4);
        let policy = DecisionPolicy::ALL[round % 3];
        let options = SolverOptions::default().with_decision_policy(policy);
        let mut solver = CircuitSolver::with_options(&aig, options).unwrap();

        for index in 0..aig.output_count() {
            let driver = aig.output_driver(index);
            for lit in [driver, !driver] {
                let expected = brute_force(&aig, &[lit]);
                match solver.solve(lit) {
                    SolveResult::Sat(model) => {
                        assert!(expected, "round {round}: {lit} is unsat, solver found {model:?}");
                        check_model(&mut rng, &aig, &model, &[lit]);
                    }
                    SolveResult::Unsat(clause) => {
                        assert!(!expected, "round {round}: {lit} is sat, solver says unsat");
                        assert!(clause.iter().all(|&clause_lit| clause_lit == !lit));
                    }
                    SolveResult::Undecided => panic!("undecided without limits"),
                }
            }
        }
    }
}

#[test]
fn wide_inputs_agree_with_brute_force() {
    let mut rng = SmallRng::seed_from_u64(0x16_20);
    for round in 0..8 {
        let inputs = 16 + round % 5;
        let aig = random_aig(&mut rng, inputs, 120, 3);
        let policy = DecisionPolicy::ALL[round % 3];
        let options = SolverOptions::default().with_decision_policy(policy);
        let mut solver = CircuitSolver::with_options(&aig, options).unwrap();

        for index in 0..aig.output_count() {
            let driver = aig.output_driver(index);
            for lit in [driver, !driver] {
                let expected = brute_force(&aig, &[lit]);
                match solver.solve(lit) {
                    SolveResult::Sat(model) => {
                        assert!(expected, "round {round}: {lit} is unsat, solver found {model:?}");
                        check_model(&mut rng, &aig, &model, &[lit]);
                    }
                    SolveResult::Unsat(_) => {
                        assert!(!expected, "round {round}: {lit} is sat, solver says unsat")
                    }
                    SolveResult::Undecided => panic!("undecided without limits"),
                }
            }
        }
    }
}

#[test]
fn assumption_sets_agree_with_brute_force() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for round in 0..150 {
        let inputs = rng.gen_range(2..=10);
        let aig = random_aig(&mut rng, inputs, 50, 6);
        let mut solver = CircuitSolver::new(&aig);

        let mut candidates: Vec<Lit> = aig.vars().iter().skip(1).map(|var| var.as_lit()).collect();
        candidates.shuffle(&mut rng);
        candidates.truncate(rng.gen_range(1..=4));
        let assumptions: Vec<Lit> = candidates
            .iter()
            .map(|&lit| lit ^ rng.gen::<bool>())
            .collect();

        // the brute force check needs output literals resolved to their drivers
        let resolved: Vec<Lit> = assumptions
            .iter()
            .map(|&lit| lit.lookup(|var| aig.driver(var).unwrap_or(var.as_lit())))
            .collect();
        let expected = brute_force(&aig, &resolved);

        match solver.solve_assuming(&assumptions) {
            SolveResult::Sat(model) => {
                assert!(expected, "round {round}: {assumptions:?} reported sat");
                check_model(&mut rng, &aig, &model, &resolved);
                for &lit in solver.read_assignment() {
                    assert!(!lit.is_const());
                }
            }
            SolveResult::Unsat(clause) => {
                assert!(!expected, "round {round}: {assumptions:?} reported unsat");
                for lit in clause {
                    assert!(
                        lit == Lit::TRUE || resolved.contains(&!lit),
                        "round {round}: {lit} is not a negated assumption"
                    );
                }
            }
            SolveResult::Undecided => panic!("undecided without limits"),
        }
    }
}

#[test]
fn assignment_is_consistent_with_simulation() {
    let mut rng = SmallRng::seed_from_u64(99);
    for _ in 0..50 {
        let aig = random_aig(&mut rng, 8, 60, 3);
        let mut solver = CircuitSolver::new(&aig);
        let driver = aig.output_driver(0);
        if !solver.solve(driver).is_sat() {
            continue;
        }
        let assignment = solver.read_assignment().to_vec();
        let mut inputs = vec![0u64; aig.input_count()];
        for &(index, value) in solver.read_model() {
            inputs[index] = if value { !0 } else { 0 };
        }
        // unassigned inputs differ between the two simulated patterns
        for (index, input) in inputs.iter_mut().enumerate() {
            if !solver.read_model().iter().any(|&(i, _)| i == index) {
                *input = 0b10;
            }
        }
        let values = aig.simulate(&inputs).unwrap();
        for lit in assignment {
            let word = lit.pol().apply_word(values[lit.var()]);
            assert_eq!(word & 0b11, 0b11, "{lit} is not implied by the model");
        }
    }
}
