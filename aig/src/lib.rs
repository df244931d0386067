//! Structurally hashed And-Inverter-Graphs.
//!
//! An [`Aig`] stores a combinational circuit of primary inputs, two-input AND gates with
//! optionally complemented fanins and combinational outputs. Signed references to nodes are
//! [`Lit`]s, node ids are [`Var`]s. Node ids are assigned in creation order, which is always a
//! topological order, and AND gates are hash-consed so that no two AND nodes share the same fanin
//! pair.
//!
//! Besides construction, the store provides generation stamped node marking for graph walks,
//! mark-and-sweep cleanup, bit-parallel simulation and the extraction and reinsertion of windows.
mod aig;
mod cleanup;
mod error;
mod integrity;
mod node;
pub mod sim;
mod trav;
pub mod window;

pub use aig::Aig;
pub use error::{AigError, Result};
pub use node::{Node, NodeKind};
pub use window::{Window, WindowMap};

pub use aigsat_lit::{Lit, Pol, Var};
