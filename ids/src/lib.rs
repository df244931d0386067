//! Type checked integer ids and id indexed collections.
#![warn(missing_docs)]

mod id;
mod id_range;
pub mod id_vec;

pub use id::Id;
pub use id_range::{IdRange, IdRangeIter};
pub use id_vec::IdVec;
