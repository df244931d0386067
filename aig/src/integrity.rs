use std::hash::BuildHasher;

use aigsat_ids::IdVec;
use aigsat_lit::Var;

use crate::{
    error::{AigError, Result},
    node::NodeKind,
    Aig,
};

fn invalid(message: String) -> AigError {
    AigError::InvalidState(message)
}

impl Aig {
    /// Checks all structural invariants of the store.
    ///
    /// This verifies that node 0 is the only constant, that input and output lists match the
    /// nodes, that every AND has canonically ordered fanins with smaller ids, that the structural
    /// hash table indexes exactly the AND nodes without duplicates, and that ref counts and levels
    /// are up to date. Intended for tests and debugging, it takes linear time.
    pub fn check_integrity(&self) -> Result<()> {
        let mut refs: IdVec<Var, u32> = IdVec::from_elem(0, self.len());
        let mut levels: IdVec<Var, u32> = IdVec::from_elem(0, self.len());
        let mut input_count = 0;
        let mut output_count = 0;
        let mut and_count = 0;

        for (var, node) in self.nodes.iter() {
            for &fanin in node.fanins() {
                if fanin.var() >= var {
                    return Err(invalid(format!("{var} has fanin {fanin} with a larger id")));
                }
                if self.nodes[fanin.var()].is_output() {
                    return Err(invalid(format!("{var} has output {fanin} as fanin")));
                }
                refs[fanin.var()] += 1;
            }

            match node.kind {
                NodeKind::Const => {
                    if var != Var::FALSE {
                        return Err(invalid(format!("{var} is a constant node")));
                    }
                }
                NodeKind::Input { index } => {
                    if self.inputs.get(index as usize) != Some(&var) {
                        return Err(invalid(format!("input {var} has index {index}")));
                    }
                    input_count += 1;
                }
                NodeKind::And { fanins: [a, b] } => {
                    if a >= b || a.var() == b.var() || a.is_const() {
                        return Err(invalid(format!("{var} = {a} & {b} is not canonical")));
                    }
                    let hash = self.build_hasher.hash_one([a, b]);
                    let found = self.strash.find(hash, |&other| {
                        self.nodes[other].and_fanins() == Some([a, b])
                    });
                    if found != Some(&var) {
                        return Err(invalid(format!("{var} = {a} & {b} is not uniquely hashed")));
                    }
                    levels[var] = 1 + levels[a.var()].max(levels[b.var()]);
                    and_count += 1;
                }
                NodeKind::Output { index, driver } => {
                    if self.outputs.get(index as usize) != Some(&var) {
                        return Err(invalid(format!("output {var} has index {index}")));
                    }
                    levels[var] = levels[driver.var()];
                    output_count += 1;
                }
            }
        }

        if self.nodes.get(Var::FALSE).map(|node| node.is_const()) != Some(true) {
            return Err(invalid("node 0 is not the constant".into()));
        }
        if input_count != self.inputs.len() || output_count != self.outputs.len() {
            return Err(invalid("input or output list has extra entries".into()));
        }
        if and_count != self.and_count || self.strash.len() != and_count {
            return Err(invalid(format!(
                "{and_count} and nodes, counter says {}, hash table holds {}",
                self.and_count,
                self.strash.len()
            )));
        }
        for (var, node) in self.nodes.iter() {
            if node.refs != refs[var] {
                return Err(invalid(format!(
                    "{var} has {} refs, expected {}",
                    node.refs, refs[var]
                )));
            }
            if node.level != levels[var] {
                return Err(invalid(format!(
                    "{var} has level {}, expected {}",
                    node.level, levels[var]
                )));
            }
        }
        Ok(())
    }
}
