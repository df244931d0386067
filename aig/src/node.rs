use aigsat_lit::Lit;

/// The kind of an AIG node together with its fanins.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
    /// The constant false node. Only node 0 has this kind.
    Const,
    /// A primary input, numbered in creation order.
    Input {
        /// Position in [`Aig::inputs`][crate::Aig::inputs].
        index: u32,
    },
    /// A two-input AND gate with canonically ordered fanins.
    And {
        /// Fanin literals with `fanins[0] < fanins[1]`.
        fanins: [Lit; 2],
    },
    /// A combinational output, numbered in creation order.
    Output {
        /// Position in [`Aig::outputs`][crate::Aig::outputs].
        index: u32,
        /// The literal driving this output.
        driver: Lit,
    },
}

/// A node of an [`Aig`][crate::Aig].
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) refs: u32,
    pub(crate) level: u32,
    pub(crate) trav_id: u64,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, level: u32) -> Self {
        Self {
            kind,
            refs: 0,
            level,
            trav_id: 0,
        }
    }

    /// Returns the kind of this node.
    #[inline(always)]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Number of AND and output nodes currently referencing this node.
    #[inline(always)]
    pub fn refs(&self) -> u32 {
        self.refs
    }

    /// Length of the longest path from a primary input to this node.
    #[inline(always)]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The traversal generation that last marked this node.
    #[inline(always)]
    pub fn trav_id(&self) -> u64 {
        self.trav_id
    }

    /// Returns the fanin literals: two for an AND, the driver for an output, none otherwise.
    #[inline]
    pub fn fanins(&self) -> &[Lit] {
        match &self.kind {
            NodeKind::And { fanins } => fanins,
            NodeKind::Output { driver, .. } => std::slice::from_ref(driver),
            NodeKind::Const | NodeKind::Input { .. } => &[],
        }
    }

    /// Returns the fanins if this is an AND node.
    #[inline(always)]
    pub fn and_fanins(&self) -> Option<[Lit; 2]> {
        match self.kind {
            NodeKind::And { fanins } => Some(fanins),
            _ => None,
        }
    }

    /// Returns the input index if this is a primary input.
    #[inline(always)]
    pub fn input_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Input { index } => Some(index as usize),
            _ => None,
        }
    }

    /// Returns the output index if this is a combinational output.
    #[inline(always)]
    pub fn output_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Output { index, .. } => Some(index as usize),
            _ => None,
        }
    }

    /// Returns the driver if this is a combinational output.
    #[inline(always)]
    pub fn driver(&self) -> Option<Lit> {
        match self.kind {
            NodeKind::Output { driver, .. } => Some(driver),
            _ => None,
        }
    }

    /// Returns `true` for the constant node.
    #[inline(always)]
    pub fn is_const(&self) -> bool {
        matches!(self.kind, NodeKind::Const)
    }

    /// Returns `true` for primary inputs.
    #[inline(always)]
    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input { .. })
    }

    /// Returns `true` for AND nodes.
    #[inline(always)]
    pub fn is_and(&self) -> bool {
        matches!(self.kind, NodeKind::And { .. })
    }

    /// Returns `true` for combinational outputs.
    #[inline(always)]
    pub fn is_output(&self) -> bool {
        matches!(self.kind, NodeKind::Output { .. })
    }
}
