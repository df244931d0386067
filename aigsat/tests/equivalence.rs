#![allow(missing_docs)] // test only
use aigsat::{aig::NodeKind, Aig, CircuitSolver, Lit, SolveResult};
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
        let from = lits.len() / 2;
        let lit = lits[rng.gen_range(from..lits.len())] ^ rng.gen::<bool>();
        aig.create_output(lit);
    }
    aig
}

/// Replays the AND nodes of `src` in `dst` with `inputs` standing for the inputs of `src` and
/// returns the literals of its output drivers.
fn append(dst: &mut Aig, src: &Aig, inputs: &[Lit]) -> Vec<Lit> {
    let mut lits = vec![Lit::FALSE; src.len()];
    let mut drivers = vec![];
    for (var, node) in src.nodes() {
        match node.kind() {
            NodeKind::Const => (),
            NodeKind::Input { index } => lits[var.index()] = inputs[index as usize],
            NodeKind::And { fanins: [a, b] } => {
                let a = a.lookup(|var| lits[var.index()]);
                let b = b.lookup(|var| lits[var.index()]);
                lits[var.index()] = dst.create_and(a, b);
            }
            NodeKind::Output { driver, .. } => {
                drivers.push(driver.lookup(|var| lits[var.index()]));
            }
        }
    }
    drivers
}

/// Builds an AIG with one XOR output per output pair of `left` and `right`.
fn miter(left: &Aig, right: &Aig) -> Aig {
    assert_eq!(left.input_count(), right.input_count());
    assert_eq!(left.output_count(), right.output_count());
    let mut aig = Aig::new();
    let inputs: Vec<Lit> = (0..left.input_count())
        .map(|_| aig.create_input().as_lit())
        .collect();
    let left_drivers = append(&mut aig, left, &inputs);
    let right_drivers = append(&mut aig, right, &inputs);
    for (l, r) in left_drivers.into_iter().zip(right_drivers) {
        let diff = aig.create_xor(l, r);
        aig.create_output(diff);
    }
    aig
}

/// Rebuilds the outputs of `aig` with every AND `a & b` expressed as `(a & b) & (a | b)`.
fn redundant_copy(aig: &Aig) -> Aig {
    let mut copy = Aig::new();
    let mut lits = vec![Lit::FALSE; aig.len()];
    for (var, node) in aig.nodes() {
        match node.kind() {
            NodeKind::Const => (),
            NodeKind::Input { .. } => lits[var.index()] = copy.create_input().as_lit(),
            NodeKind::And { fanins: [a, b] } => {
                let a = a.lookup(|var| lits[var.index()]);
                let b = b.lookup(|var| lits[var.index()]);
                let and = copy.create_and(a, b);
                let or = copy.create_or(a, b);
                lits[var.index()] = copy.create_and(and, or);
            }
            NodeKind::Output { driver, .. } => {
                copy.create_output(driver.lookup(|var| lits[var.index()]));
            }
        }
    }
    copy
}

fn fill_model(input_count: usize, model: &[(usize, bool)]) -> Vec<bool> {
    let mut inputs = vec![false; input_count];
    for &(index, value) in model {
        inputs[index] = value;
    }
    inputs
}

#[test]
fn redundant_windows_are_proven_equivalent() {
    aigsat_logger::test_setup("debug");
    let mut rng = SmallRng::seed_from_u64(0xa15a7);
    for round in 0..40 {
        let inputs = rng.gen_range(3..=12);
        let mut aig = random_aig(&mut rng, inputs, 60, 3);
        let roots = aig.outputs()[..rng.gen_range(1..=3)].to_vec();
        let po_only = round % 2 == 0;

        let window = aig.extract_window(&roots, po_only).unwrap();
        let replacement = redundant_copy(&window.aig);
        let new = aig.insert_window(&window.map, &replacement).unwrap();
        new.check_integrity().unwrap();

        let check = miter(&aig, &new);
        let mut solver = CircuitSolver::new(&check);
        for (index, result) in solver.solve_outputs().into_iter().enumerate() {
            assert!(
                result.is_unsat(),
                "round {round}: output {index} differs after reinsertion: {result:?}"
            );
        }
    }
}

#[test]
fn changed_windows_yield_distinguishing_models() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut distinguished = 0;
    for round in 0..40 {
        let inputs = rng.gen_range(3..=10);
        let mut aig = random_aig(&mut rng, inputs, 50, 2);
        let root = aig.outputs()[0];
        let window = aig.extract_window(&[root], true).unwrap();
        if window.aig.output_count() == 0 {
            continue;
        }

        // complementing the window output changes the root function on every pattern
        let mut replacement = Aig::new();
        let inputs: Vec<Lit> = (0..window.aig.input_count())
            .map(|_| replacement.create_input().as_lit())
            .collect();
        let drivers = append(&mut replacement, &window.aig, &inputs);
        replacement.create_output(!drivers[0]);

        let new = aig.insert_window(&window.map, &replacement).unwrap();
        let check = miter(&aig, &new);
        let mut solver = CircuitSolver::new(&check);
        match solver.solve(check.output_driver(0)) {
            SolveResult::Sat(model) => {
                let inputs = fill_model(aig.input_count(), &model);
                let before = aig.eval(&inputs).unwrap();
                let after = new.eval(&inputs).unwrap();
                assert_ne!(before[0], after[0], "round {round}: model {model:?}");
                distinguished += 1;
            }
            result => panic!("round {round}: expected a distinguishing model, got {result:?}"),
        }
    }
    assert!(distinguished > 0);
}

#[test]
fn node_pairs_match_truth_tables() {
    let mut rng = SmallRng::seed_from_u64(0xbeef);
    for round in 0..30 {
        let inputs = rng.gen_range(2..=8);
        let mut aig = random_aig(&mut rng, inputs, 40, 0);
        let ands: Vec<Lit> = aig.ands().map(|(var, _)| var.as_lit()).collect();
        if ands.len() < 2 {
            continue;
        }
        let tables = aig.truth_tables_for(&ands).unwrap();

        let mut pairs = vec![];
        for _ in 0..20 {
            let i = rng.gen_range(0..ands.len());
            let j = rng.gen_range(0..ands.len());
            let complement = rng.gen::<bool>();
            pairs.push((i, j, complement));
        }
        let diffs: Vec<Lit> = pairs
            .iter()
            .map(|&(i, j, complement)| aig.create_xor(ands[i], ands[j] ^ complement))
            .collect();

        let mut solver = CircuitSolver::new(&aig);
        for (&(i, j, complement), diff) in pairs.iter().zip(diffs) {
            let result = solver.solve(diff);
            let expected_sat = tables_differ(&tables[i], &tables[j], complement, aig.input_count());
            assert_eq!(
                result.is_sat(),
                expected_sat,
                "round {round}: {} vs {}{}",
                ands[i],
                if complement { "!" } else { "" },
                ands[j]
            );
            assert!(!result.is_undecided());
        }
    }
}

/// Whether two truth tables differ, after complementing the second one if requested.
fn tables_differ(a: &[u64], b: &[u64], complement: bool, input_count: usize) -> bool {
    // tables of fewer than 6 inputs only use the low bits of their word
    let used = if input_count < 6 {
        (1u64 << (1 << input_count)) - 1
    } else {
        !0
    };
    let mask = if complement { used } else { 0 };
    a.iter()
        .zip(b)
        .any(|(&a, &b)| (a ^ b ^ mask) & used != 0)
}
