use aigsat_lit::{Lit, Var};

use super::CircuitSolver;
use crate::options::DecisionPolicy;

impl CircuitSolver<'_> {
    /// Picks a frontier node and returns the fanin literal to make false first.
    ///
    /// Of the two fanins, the one with more fanouts is chosen, the second on ties. Its negation
    /// justifies the node.
    pub(super) fn pick_decision_variable(&self) -> Lit {
        let frontier = self.just.live();
        debug_assert!(!frontier.is_empty());

        let node = match self.options.decision_policy {
            DecisionPolicy::HighestId => frontier.iter().copied().max(),
            DecisionPolicy::LowestId => frontier.iter().copied().min(),
            DecisionPolicy::MaxFanout => {
                let mut best: Option<(Var, u32)> = None;
                for &var in frontier {
                    let [a, b] = self.frontier_fanins(var);
                    let refs = self.aig.refs(a.var()).max(self.aig.refs(b.var()));
                    if best.map_or(true, |(_, best_refs)| refs > best_refs) {
                        best = Some((var, refs));
                    }
                }
                best.map(|(var, _)| var)
            }
        }
        .expect("decision requires a non-empty frontier");

        let [a, b] = self.frontier_fanins(node);
        if self.aig.refs(a.var()) > self.aig.refs(b.var()) {
            !a
        } else {
            !b
        }
    }

    fn frontier_fanins(&self, var: Var) -> [Lit; 2] {
        self.aig
            .and_fanins(var)
            .expect("frontier contains only AND nodes")
    }
}

#[cfg(test)]
mod tests {
    use aigsat_aig::Aig;

    use crate::{solver::Reason, CircuitSolver, DecisionPolicy, SolverOptions};

    #[test]
    fn policies_pick_different_frontier_nodes() {
        let mut aig = Aig::new();
        let inputs: Vec<_> = (0..4).map(|_| aig.create_input().as_lit()).collect();
        let low = aig.create_and(inputs[0], inputs[1]);
        let high = aig.create_and(inputs[2], inputs[3]);
        // fanouts: inputs[0] 4, inputs[1] 2, inputs[2] 3, inputs[3] 1
        aig.create_and(inputs[0], !inputs[1]);
        aig.create_and(inputs[0], inputs[2]);
        aig.create_and(inputs[0], !inputs[2]);

        for (policy, node, decision) in [
            (DecisionPolicy::LowestId, low, !inputs[0]),
            (DecisionPolicy::HighestId, high, !inputs[2]),
            (DecisionPolicy::MaxFanout, low, !inputs[0]),
        ] {
            let options = SolverOptions::default().with_decision_policy(policy);
            let mut solver = CircuitSolver::with_options(&aig, options).unwrap();
            solver.assign(!low, 0, Reason::Decision);
            solver.assign(!high, 0, Reason::Decision);
            assert_eq!(solver.propagate(0), None);
            assert_eq!(solver.just.live(), [low.var(), high.var()]);
            assert_eq!(
                solver.pick_decision_variable(),
                decision,
                "{policy} picked the wrong decision for {node}"
            );
            solver.cancel_until(0);
            solver.just.clear();
        }
    }
}
