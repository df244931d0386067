//! Extracting the fanin cone of a set of outputs as a standalone AIG and splicing a replacement
//! back in.
use aigsat_ids::IdVec;
use aigsat_lit::{Lit, Var};

use crate::{
    error::{AigError, Result},
    node::NodeKind,
    Aig,
};

/// Correspondence between the nodes of a window and the AIG it was extracted from.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct WindowMap {
    /// The output nodes the window was extracted for.
    pub roots: Vec<Var>,
    /// Original primary input for each window input, in window input order.
    pub inputs: Vec<Var>,
    /// Original AND node for each window output, in window output order.
    ///
    /// The window output always computes the positive polarity of the original node.
    pub outputs: Vec<Var>,
}

/// A window extracted from an AIG.
#[derive(Clone, Debug)]
pub struct Window {
    /// The window as a standalone AIG.
    pub aig: Aig,
    /// How the window's inputs and outputs relate to the original AIG.
    pub map: WindowMap,
}

impl Aig {
    /// Extracts the transitive fanin cone of the given output nodes as a new AIG.
    ///
    /// The window's inputs are the primary inputs in the cone, ordered by input index. Its outputs
    /// are the AND nodes driving the given outputs. Unless `po_only` is set, every AND node of the
    /// cone that is also used outside of it becomes an additional window output, so that a
    /// replacement window can substitute all uses. The cone's AND nodes are replayed in topological
    /// order through [`create_and`][Self::create_and].
    ///
    /// Outputs driven by a constant or directly by an input do not produce a window output.
    ///
    /// With no roots, the window is a duplicate of the whole AIG and the map is empty except for
    /// the inputs.
    pub fn extract_window(&mut self, roots: &[Var], po_only: bool) -> Result<Window> {
        for &root in roots {
            self.driver(root)?;
        }
        if roots.is_empty() {
            return Ok(Window {
                aig: self.clone(),
                map: WindowMap {
                    roots: vec![],
                    inputs: self.inputs.clone(),
                    outputs: vec![],
                },
            });
        }

        self.mark_cone(roots);

        let inputs: Vec<Var> = self
            .inputs
            .iter()
            .copied()
            .filter(|&input| self.is_current(input))
            .collect();

        let mut is_window_output: IdVec<Var, bool> = IdVec::from_elem(false, self.len());
        let mut outputs = vec![];
        let mut add_output = |var: Var, outputs: &mut Vec<Var>| {
            if !is_window_output[var] {
                is_window_output[var] = true;
                outputs.push(var);
            }
        };

        for &root in roots {
            let driver = self.nodes[root].driver().unwrap_or(Lit::FALSE).var();
            if self.nodes[driver].is_and() {
                add_output(driver, &mut outputs);
            }
        }

        if !po_only {
            for node in self.nodes.values() {
                if node.trav_id == self.trav_id {
                    continue;
                }
                for &fanin in node.fanins() {
                    let fanin_node = &self.nodes[fanin.var()];
                    if fanin_node.trav_id == self.trav_id && fanin_node.is_and() {
                        add_output(fanin.var(), &mut outputs);
                    }
                }
            }
        }

        let mut aig = Aig::new();
        let mut map: IdVec<Var, Lit> = IdVec::from_elem(Lit::FALSE, self.len());
        for &input in &inputs {
            map[input] = aig.create_input().as_lit();
        }
        for (var, node) in self.nodes.iter() {
            if node.trav_id != self.trav_id {
                continue;
            }
            if let NodeKind::And { fanins: [a, b] } = node.kind {
                let a = a.lookup(|var| map[var]);
                let b = b.lookup(|var| map[var]);
                map[var] = aig.create_and(a, b);
            }
        }
        for &output in &outputs {
            aig.create_output(map[output]);
        }

        log::debug!(
            "extracted window with {} inputs, {} ands and {} outputs",
            aig.input_count(),
            aig.and_count(),
            aig.output_count()
        );

        Ok(Window {
            aig,
            map: WindowMap {
                roots: roots.to_vec(),
                inputs,
                outputs,
            },
        })
    }

    /// Returns a new AIG where the window described by `map` is replaced by `replacement`.
    ///
    /// The replacement must have one input per entry of `map.inputs` and one output per entry of
    /// `map.outputs`. All primary inputs and outputs of `self` are kept in order. Every use of a
    /// window output node is redirected to the corresponding replacement output, every other AND
    /// node is rebuilt unchanged. Replacement nodes are replayed through the new AIG's structural
    /// hashing, so they merge with matching nodes outside the window. Nodes left unused by the
    /// substitution are removed by a final [`cleanup`][Self::cleanup].
    ///
    /// With no roots in `map`, this returns a duplicate of `self`.
    pub fn insert_window(&self, map: &WindowMap, replacement: &Aig) -> Result<Aig> {
        if map.roots.is_empty() {
            return Ok(self.clone());
        }
        if replacement.input_count() != map.inputs.len() {
            return Err(AigError::InputMismatch {
                expected: map.inputs.len(),
                found: replacement.input_count(),
            });
        }
        if replacement.output_count() != map.outputs.len() {
            return Err(AigError::OutputMismatch {
                expected: map.outputs.len(),
                found: replacement.output_count(),
            });
        }
        for &var in map.roots.iter().chain(&map.inputs).chain(&map.outputs) {
            self.node(var)?;
        }

        let mut new = Aig::with_capacity(self.len() + replacement.len());
        let mut lits: IdVec<Var, Lit> = IdVec::from_elem(Lit::FALSE, self.len());
        for &input in &self.inputs {
            lits[input] = new.create_input().as_lit();
        }

        let mut overrides: IdVec<Var, Option<Lit>> = IdVec::from_elem(None, self.len());
        let mut replacement_lits: IdVec<Var, Lit> = IdVec::from_elem(Lit::FALSE, replacement.len());
        for (var, node) in replacement.nodes.iter() {
            match node.kind {
                NodeKind::Const => (),
                NodeKind::Input { index } => {
                    replacement_lits[var] = lits[map.inputs[index as usize]];
                }
                NodeKind::And { fanins: [a, b] } => {
                    let a = a.lookup(|var| replacement_lits[var]);
                    let b = b.lookup(|var| replacement_lits[var]);
                    replacement_lits[var] = new.create_and(a, b);
                }
                NodeKind::Output { index, driver } => {
                    overrides[map.outputs[index as usize]] =
                        Some(driver.lookup(|var| replacement_lits[var]));
                }
            }
        }

        for (var, node) in self.nodes.iter() {
            match node.kind {
                NodeKind::Const | NodeKind::Input { .. } => (),
                NodeKind::And { fanins: [a, b] } => {
                    lits[var] = match overrides[var] {
                        Some(lit) => lit,
                        None => {
                            let a = a.lookup(|var| lits[var]);
                            let b = b.lookup(|var| lits[var]);
                            new.create_and(a, b)
                        }
                    };
                }
                NodeKind::Output { driver, .. } => {
                    new.create_output(driver.lookup(|var| lits[var]));
                }
            }
        }

        new.cleanup();
        Ok(new)
    }
}
