//! The structurally hashed AIG store.
use std::hash::{BuildHasher, BuildHasherDefault};

use aigsat_ids::{IdRange, IdVec};
use aigsat_lit::{Lit, Var};
use hashbrown::{hash_table::Entry, HashTable};
use zwohash::ZwoHasher;

use crate::{
    error::{AigError, Result},
    node::{Node, NodeKind},
};

/// A structurally hashed And-Inverter-Graph.
///
/// Nodes are stored in creation order, which is always a topological order: every fanin of a
/// node has a smaller id than the node itself. Node 0 is the constant false node. AND nodes are
/// hash-consed on their canonically ordered fanin pair, so building the same AND twice returns
/// the same node.
///
/// Nodes are never removed in place. Nodes that become unreferenced stay allocated until
/// [`cleanup`][Self::cleanup] rebuilds the store.
#[derive(Clone)]
pub struct Aig {
    pub(crate) nodes: IdVec<Var, Node>,
    pub(crate) inputs: Vec<Var>,
    pub(crate) outputs: Vec<Var>,
    pub(crate) and_count: usize,
    pub(crate) strash: HashTable<Var>,
    pub(crate) build_hasher: BuildHasherDefault<ZwoHasher>,
    pub(crate) trav_id: u64,
}

impl Default for Aig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Aig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for (var, node) in self.nodes.iter() {
            match node.kind {
                NodeKind::Const => list.entry(&format_args!("{var} = 0")),
                NodeKind::Input { index } => list.entry(&format_args!("{var} = input {index}")),
                NodeKind::And { fanins: [a, b] } => list.entry(&format_args!("{var} = {a} & {b}")),
                NodeKind::Output { index, driver } => {
                    list.entry(&format_args!("{var} = output {index} <- {driver}"))
                }
            };
        }
        list.finish()
    }
}

impl Aig {
    /// Creates an AIG containing only the constant false node.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates an AIG containing only the constant false node, with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = IdVec::with_capacity(capacity.max(1));
        nodes.push(Node::new(NodeKind::Const, 0));
        Self {
            nodes,
            inputs: vec![],
            outputs: vec![],
            and_count: 0,
            strash: HashTable::new(),
            build_hasher: Default::default(),
            trav_id: 0,
        }
    }

    /// Appends a new primary input and returns its variable.
    ///
    /// Inputs are never shared, every call creates a distinct node.
    pub fn create_input(&mut self) -> Var {
        let index = self.inputs.len() as u32;
        let (var, _) = self.nodes.push(Node::new(NodeKind::Input { index }, 0));
        self.inputs.push(var);
        var
    }

    /// Returns a literal for the AND of two literals, creating a new node only when needed.
    ///
    /// Trivial cases are folded before hashing: `x & x = x`, `x & !x = 0`, `0 & y = 0` and
    /// `1 & y = y`. Otherwise the fanins are ordered by literal code and an existing AND node with
    /// the same fanins is reused.
    ///
    /// # Panics
    ///
    /// Panics if a fanin refers to a node that does not exist or to an output node.
    pub fn create_and(&mut self, a: Lit, b: Lit) -> Lit {
        self.check_fanin(a);
        self.check_fanin(b);

        if a == b {
            return a;
        }
        if a == !b || a == Lit::FALSE || b == Lit::FALSE {
            return Lit::FALSE;
        }
        if a == Lit::TRUE {
            return b;
        }
        if b == Lit::TRUE {
            return a;
        }

        let fanins = if a < b { [a, b] } else { [b, a] };
        let hash = self.build_hasher.hash_one(fanins);

        match self.strash.entry(
            hash,
            |&other| self.nodes[other].and_fanins() == Some(fanins),
            |&other| {
                self.build_hasher
                    .hash_one(self.nodes[other].and_fanins().unwrap_or_default())
            },
        ) {
            Entry::Occupied(entry) => entry.get().as_lit(),
            Entry::Vacant(entry) => {
                let level = 1 + self.nodes[a.var()]
                    .level
                    .max(self.nodes[b.var()].level);
                let (var, _) = self.nodes.push(Node::new(NodeKind::And { fanins }, level));
                entry.insert(var);
                self.nodes[a.var()].refs += 1;
                self.nodes[b.var()].refs += 1;
                self.and_count += 1;
                var.as_lit()
            }
        }
    }

    /// Returns the literal of an existing AND of two literals without creating any node.
    ///
    /// This applies the same folding as [`create_and`][Self::create_and], so folded cases always
    /// succeed.
    pub fn lookup_and(&self, a: Lit, b: Lit) -> Option<Lit> {
        if a == b {
            return Some(a);
        }
        if a == !b || a == Lit::FALSE || b == Lit::FALSE {
            return Some(Lit::FALSE);
        }
        if a == Lit::TRUE {
            return Some(b);
        }
        if b == Lit::TRUE {
            return Some(a);
        }
        let fanins = if a < b { [a, b] } else { [b, a] };
        let hash = self.build_hasher.hash_one(fanins);
        self.strash
            .find(hash, |&other| self.nodes[other].and_fanins() == Some(fanins))
            .map(|var| var.as_lit())
    }

    /// Returns a literal for the OR of two literals.
    pub fn create_or(&mut self, a: Lit, b: Lit) -> Lit {
        !self.create_and(!a, !b)
    }

    /// Returns a literal for the XOR of two literals, built from three AND nodes.
    pub fn create_xor(&mut self, a: Lit, b: Lit) -> Lit {
        let a_only = self.create_and(a, !b);
        let b_only = self.create_and(!a, b);
        self.create_or(a_only, b_only)
    }

    /// Returns a literal for `if sel { then_lit } else { else_lit }`.
    pub fn create_mux(&mut self, sel: Lit, then_lit: Lit, else_lit: Lit) -> Lit {
        let then_part = self.create_and(sel, then_lit);
        let else_part = self.create_and(!sel, else_lit);
        self.create_or(then_part, else_part)
    }

    /// Appends a new combinational output driven by the given literal.
    ///
    /// Outputs are never shared, even when driven by the same literal.
    pub fn create_output(&mut self, driver: Lit) -> Var {
        self.check_fanin(driver);
        let index = self.outputs.len() as u32;
        let level = self.nodes[driver.var()].level;
        let (var, _) = self
            .nodes
            .push(Node::new(NodeKind::Output { index, driver }, level));
        self.nodes[driver.var()].refs += 1;
        self.outputs.push(var);
        var
    }

    #[inline]
    #[track_caller]
    fn check_fanin(&self, lit: Lit) {
        assert!(
            lit.index() < self.nodes.len(),
            "literal {lit} refers to a node that does not exist"
        );
        debug_assert!(
            !self.nodes[lit.var()].is_output(),
            "literal {lit} refers to an output node"
        );
    }

    /// Returns the node with the given id.
    #[inline]
    pub fn node(&self, var: Var) -> Result<&Node> {
        self.nodes.get(var).ok_or(AigError::NodeNotFound(var))
    }

    /// Returns the number of nodes, including the constant, inputs, ANDs and outputs.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, since every AIG contains the constant node.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all node ids in topological order.
    #[inline(always)]
    pub fn vars(&self) -> IdRange<Var> {
        self.nodes.keys()
    }

    /// Returns all nodes with their ids in topological order.
    #[inline]
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = (Var, &Node)> + '_ {
        self.nodes.iter()
    }

    /// Returns all AND nodes with their fanins in topological order.
    #[inline]
    pub fn ands(&self) -> impl Iterator<Item = (Var, [Lit; 2])> + '_ {
        self.nodes
            .iter()
            .filter_map(|(var, node)| Some((var, node.and_fanins()?)))
    }

    /// Returns the primary inputs in creation order.
    #[inline(always)]
    pub fn inputs(&self) -> &[Var] {
        &self.inputs
    }

    /// Returns the combinational outputs in creation order.
    #[inline(always)]
    pub fn outputs(&self) -> &[Var] {
        &self.outputs
    }

    /// Number of primary inputs.
    #[inline(always)]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of combinational outputs.
    #[inline(always)]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Number of AND nodes, including unreferenced ones.
    #[inline(always)]
    pub fn and_count(&self) -> usize {
        self.and_count
    }

    /// Returns the driver literal of the output with the given index.
    ///
    /// # Panics
    ///
    /// Panics if there is no such output.
    #[inline]
    pub fn output_driver(&self, index: usize) -> Lit {
        match self.nodes[self.outputs[index]].kind {
            NodeKind::Output { driver, .. } => driver,
            _ => unreachable!("output list contains a non-output node"),
        }
    }

    /// Returns the driver literal of an output node.
    pub fn driver(&self, var: Var) -> Result<Lit> {
        self.node(var)?.driver().ok_or(AigError::NotAnOutput(var))
    }

    /// Returns the fanins of an AND node or `None` for any other node.
    ///
    /// # Panics
    ///
    /// Panics if there is no node with the given id.
    #[inline(always)]
    pub fn and_fanins(&self, var: Var) -> Option<[Lit; 2]> {
        self.nodes[var].and_fanins()
    }

    /// Returns the fanout count of a node.
    #[inline(always)]
    pub fn refs(&self, var: Var) -> u32 {
        self.nodes[var].refs
    }

    /// Returns the level of a node.
    #[inline(always)]
    pub fn level(&self, var: Var) -> u32 {
        self.nodes[var].level
    }

    /// Returns the largest level of any output, or of any node when there are no outputs.
    pub fn max_level(&self) -> u32 {
        let from_outputs = self.outputs.iter().map(|&var| self.nodes[var].level).max();
        from_outputs
            .or_else(|| self.nodes.values().iter().map(|node| node.level).max())
            .unwrap_or(0)
    }

    /// Recomputes the fanout count of every node from scratch.
    ///
    /// Construction keeps the counts up to date, this is only needed after fanout information was
    /// modified out of band.
    pub fn recompute_refs(&mut self) {
        for node in self.nodes.values_mut() {
            node.refs = 0;
        }
        for var in self.nodes.keys() {
            let node = &self.nodes[var];
            let fanins: [Option<Lit>; 2] = match node.kind {
                NodeKind::And { fanins: [a, b] } => [Some(a), Some(b)],
                NodeKind::Output { driver, .. } => [Some(driver), None],
                _ => continue,
            };
            for fanin in fanins.into_iter().flatten() {
                self.nodes[fanin.var()].refs += 1;
            }
        }
    }

    /// Recomputes the level of every node from scratch.
    pub fn recompute_levels(&mut self) {
        for var in self.nodes.keys() {
            let level = match self.nodes[var].kind {
                NodeKind::Const | NodeKind::Input { .. } => 0,
                NodeKind::And { fanins: [a, b] } => {
                    1 + self.nodes[a.var()].level.max(self.nodes[b.var()].level)
                }
                NodeKind::Output { driver, .. } => self.nodes[driver.var()].level,
            };
            self.nodes[var].level = level;
        }
    }
}
