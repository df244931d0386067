//! Generation stamped node marking.
//!
//! Instead of clearing a visited flag on every node before a graph walk, the store keeps a
//! traversal counter and every node remembers the counter value of the last walk that marked it.
//! Starting a new walk is a single increment. The counter is a `u64`, so it cannot wrap around in
//! practice.
use aigsat_lit::Var;

use crate::Aig;

impl Aig {
    /// Starts a new traversal, so that no node is marked as current.
    ///
    /// Every walk has to call this before marking nodes. Directly after creating a store, all
    /// nodes count as current.
    #[inline(always)]
    pub fn increment_traversal(&mut self) {
        self.trav_id += 1;
    }

    /// Returns the current traversal generation.
    #[inline(always)]
    pub fn current_traversal(&self) -> u64 {
        self.trav_id
    }

    /// Returns `true` if the node was marked during the current traversal.
    #[inline(always)]
    pub fn is_current(&self, var: Var) -> bool {
        self.nodes[var].trav_id == self.trav_id
    }

    /// Marks the node as visited during the current traversal.
    #[inline(always)]
    pub fn mark_current(&mut self, var: Var) {
        self.nodes[var].trav_id = self.trav_id;
    }

    /// Marks the node as visited, returning `false` if it already was marked.
    #[inline(always)]
    pub fn mark_current_if_new(&mut self, var: Var) -> bool {
        let node = &mut self.nodes[var];
        let new = node.trav_id != self.trav_id;
        node.trav_id = self.trav_id;
        new
    }

    /// Marks the transitive fanin of the given roots, including the roots themselves.
    ///
    /// This starts a new traversal. Afterwards exactly the nodes in the cone are current.
    pub fn mark_cone(&mut self, roots: &[Var]) {
        self.increment_traversal();
        let mut stack = Vec::with_capacity(roots.len());
        for &root in roots {
            if self.mark_current_if_new(root) {
                stack.push(root);
            }
        }
        while let Some(var) = stack.pop() {
            let [a, b] = match self.nodes[var].fanins() {
                &[a, b] => [Some(a.var()), Some(b.var())],
                &[a] => [Some(a.var()), None],
                _ => continue,
            };
            for fanin in [a, b].into_iter().flatten() {
                if self.mark_current_if_new(fanin) {
                    stack.push(fanin);
                }
            }
        }
    }

    /// Returns the transitive fanin of the given roots in topological order.
    ///
    /// This starts a new traversal and leaves the returned nodes marked as current.
    pub fn collect_cone(&mut self, roots: &[Var]) -> Vec<Var> {
        self.mark_cone(roots);
        self.vars()
            .iter()
            .filter(|&var| self.is_current(var))
            .collect()
    }
}
