//! Precomputation engine for differential analysis of small-block SPNs.
//!
//! The pipeline runs in phases with a join barrier between each:
//! 1. [`RoundTable::build`] evaluates the one-round cipher over the whole
//!    state space on the rayon pool.
//! 2. Either [`DenseDdt::build`] derives the full differential
//!    distribution table (one bit-set row per output difference), or
//!    [`SparseDdt::build`] derives reach sets for caller-chosen
//!    representative differences when the dense pass is out of reach.
//! 3. [`DdtInstance`] snapshots the dense rows for an external
//!    exact-cover engine.
//!
//! Shared inputs (cipher, finished table) are immutable during every
//! parallel phase; accumulation happens through OR-merges of per-worker
//! partials, so results are deterministic regardless of scheduling.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bitset;
mod dense;
mod instance;
mod sparse;
mod table;

pub use crate::bitset::BitSet;
pub use crate::dense::{reachable_diffs, DenseDdt};
pub use crate::instance::{DdtInstance, DdtMode, DdtParams};
pub use crate::sparse::SparseDdt;
pub use crate::table::RoundTable;
