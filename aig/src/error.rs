use aigsat_lit::Var;
use thiserror::Error;

/// The result of an AIG operation.
pub type Result<T> = std::result::Result<T, AigError>;

/// Error returned when an AIG operation failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AigError {
    /// The node with the given id does not exist.
    #[error("node with id={0} does not exist")]
    NodeNotFound(Var),

    /// The node with the given id exists but is not a combinational output.
    #[error("node with id={0} is not an output")]
    NotAnOutput(Var),

    /// The number of supplied inputs does not match.
    #[error("expected {expected} inputs, found {found}")]
    InputMismatch {
        /// Number of inputs required by the operation.
        expected: usize,
        /// Number of inputs supplied.
        found: usize,
    },

    /// The number of supplied outputs does not match.
    #[error("expected {expected} outputs, found {found}")]
    OutputMismatch {
        /// Number of outputs required by the operation.
        expected: usize,
        /// Number of outputs supplied.
        found: usize,
    },

    /// Exhaustive simulation was requested for too many inputs.
    #[error("exhaustive simulation supports at most {max} inputs, found {found}")]
    TooManyInputs {
        /// Largest supported input count.
        max: usize,
        /// Input count of the AIG.
        found: usize,
    },

    /// The AIG violates one of its structural invariants. This should never happen.
    #[error("the AIG has reached an invalid state: {0}")]
    InvalidState(String),
}
