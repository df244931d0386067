use aigsat_ids::IdVec;
use aigsat_lit::{Lit, Var};

use crate::{node::NodeKind, Aig};

impl Aig {
    /// Removes all AND nodes that do not reach any output.
    ///
    /// The store is rebuilt from scratch, keeping every primary input and output and the AND nodes
    /// in the transitive fanin of the outputs, all in their original relative order. Surviving ANDs
    /// are replayed through [`create_and`][Self::create_and], so ref counts and levels of the new
    /// store are exact.
    ///
    /// Returns the new literal of every old node, `None` for removed nodes and for outputs.
    pub fn cleanup(&mut self) -> IdVec<Var, Option<Lit>> {
        self.increment_traversal();
        for i in 0..self.outputs.len() {
            let output = self.outputs[i];
            self.mark_current(output);
        }
        // ids are topological, so a single reverse sweep marks the whole fanin cone
        for var in self.vars().iter().rev() {
            if !self.is_current(var) {
                continue;
            }
            match self.nodes[var].kind {
                NodeKind::And { fanins: [a, b] } => {
                    self.mark_current(a.var());
                    self.mark_current(b.var());
                }
                NodeKind::Output { driver, .. } => self.mark_current(driver.var()),
                _ => (),
            }
        }

        let mut new = Aig::with_capacity(self.len());
        let mut map: IdVec<Var, Option<Lit>> = IdVec::from_elem(None, self.len());
        map[Var::FALSE] = Some(Lit::FALSE);
        let mapped = |map: &IdVec<Var, Option<Lit>>, lit: Lit| {
            lit.lookup(|var| map[var].expect("fanins of live nodes are rebuilt first"))
        };

        for (var, node) in self.nodes.iter() {
            match node.kind {
                NodeKind::Const => (),
                NodeKind::Input { .. } => map[var] = Some(new.create_input().as_lit()),
                NodeKind::And { fanins: [a, b] } => {
                    if node.trav_id == self.trav_id {
                        let (a, b) = (mapped(&map, a), mapped(&map, b));
                        map[var] = Some(new.create_and(a, b));
                    }
                }
                NodeKind::Output { driver, .. } => {
                    new.create_output(mapped(&map, driver));
                }
            }
        }

        log::debug!(
            "cleanup kept {} of {} and nodes",
            new.and_count(),
            self.and_count()
        );

        *self = new;
        map
    }
}
