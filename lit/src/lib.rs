//! Numeric identifiers for AIG variables and signed literals
pub mod lit;
pub mod pol;
pub mod var;

pub use lit::Lit;
pub use pol::Pol;
pub use var::Var;
