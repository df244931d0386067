//! Bit-parallel simulation.
use aigsat_ids::IdVec;
use aigsat_lit::{Lit, Var};

use crate::{
    error::{AigError, Result},
    node::NodeKind,
    Aig,
};

/// Largest input count supported by [`Aig::truth_tables`].
pub const MAX_TRUTH_TABLE_INPUTS: usize = 20;

const ELEMENTARY: [u64; 6] = [
    0xaaaa_aaaa_aaaa_aaaa,
    0xcccc_cccc_cccc_cccc,
    0xf0f0_f0f0_f0f0_f0f0,
    0xff00_ff00_ff00_ff00,
    0xffff_0000_ffff_0000,
    0xffff_ffff_0000_0000,
];

/// Returns the simulation word of a literal given the words of all nodes.
#[inline(always)]
pub fn lit_word(words: &IdVec<Var, u64>, lit: Lit) -> u64 {
    lit.pol().apply_word(words[lit.var()])
}

impl Aig {
    /// Simulates 64 input patterns at once.
    ///
    /// Bit `k` of `inputs[i]` is the value of input `i` in pattern `k`. Returns one word per node,
    /// outputs carry the value of their driver literal.
    pub fn simulate(&self, inputs: &[u64]) -> Result<IdVec<Var, u64>> {
        if inputs.len() != self.input_count() {
            return Err(AigError::InputMismatch {
                expected: self.input_count(),
                found: inputs.len(),
            });
        }
        let mut words = IdVec::from_elem(0u64, self.len());
        self.simulate_into(inputs, &mut words);
        Ok(words)
    }

    fn simulate_into(&self, inputs: &[u64], words: &mut IdVec<Var, u64>) {
        for (var, node) in self.nodes.iter() {
            words[var] = match node.kind {
                NodeKind::Const => 0,
                NodeKind::Input { index } => inputs[index as usize],
                NodeKind::And { fanins: [a, b] } => lit_word(words, a) & lit_word(words, b),
                NodeKind::Output { driver, .. } => lit_word(words, driver),
            };
        }
    }

    /// Simulates 64 input patterns at once and returns one word per output.
    pub fn simulate_outputs(&self, inputs: &[u64]) -> Result<Vec<u64>> {
        let words = self.simulate(inputs)?;
        Ok(self.outputs.iter().map(|&output| words[output]).collect())
    }

    /// Evaluates a single input assignment and returns the value of every output.
    pub fn eval(&self, inputs: &[bool]) -> Result<Vec<bool>> {
        let words: Vec<u64> = inputs.iter().map(|&value| value as u64).collect();
        Ok(self
            .simulate_outputs(&words)?
            .into_iter()
            .map(|word| word & 1 != 0)
            .collect())
    }

    /// Returns the truth table of every output over all input assignments.
    ///
    /// Bit `k` of the table is the value under the assignment where input `i` has the value of bit
    /// `i` of `k`. Tables of AIGs with fewer than 6 inputs only use the low `2^n` bits of a single
    /// word, the remaining bits are zero.
    pub fn truth_tables(&self) -> Result<Vec<Vec<u64>>> {
        let drivers: Vec<Lit> = (0..self.output_count())
            .map(|index| self.output_driver(index))
            .collect();
        self.truth_tables_for(&drivers)
    }

    /// Returns the truth tables of the given literals over all input assignments.
    ///
    /// See [`truth_tables`][Self::truth_tables] for the table layout.
    pub fn truth_tables_for(&self, lits: &[Lit]) -> Result<Vec<Vec<u64>>> {
        let input_count = self.input_count();
        if input_count > MAX_TRUTH_TABLE_INPUTS {
            return Err(AigError::TooManyInputs {
                max: MAX_TRUTH_TABLE_INPUTS,
                found: input_count,
            });
        }
        for &lit in lits {
            self.node(lit.var())?;
        }

        let patterns = 1usize << input_count;
        let word_count = patterns.div_ceil(64);
        let mask = if patterns < 64 {
            (1u64 << patterns) - 1
        } else {
            !0
        };

        let mut tables = vec![Vec::with_capacity(word_count); lits.len()];
        let mut inputs = vec![0u64; input_count];
        let mut words = IdVec::from_elem(0u64, self.len());

        for word_index in 0..word_count {
            for (i, input) in inputs.iter_mut().enumerate() {
                *input = if i < 6 {
                    ELEMENTARY[i]
                } else if (word_index >> (i - 6)) & 1 != 0 {
                    !0
                } else {
                    0
                };
            }
            self.simulate_into(&inputs, &mut words);
            for (table, &lit) in tables.iter_mut().zip(lits) {
                table.push(lit_word(&words, lit) & mask);
            }
        }

        Ok(tables)
    }
}
