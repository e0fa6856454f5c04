//! Consumers of precomputed differential tables.
//!
//! Two terminal analyses live here: [`greedy_cover`] selects a small set
//! of dense-DDT rows whose OR spans the full difference universe, and
//! [`partition`] turns sparse reach sets into an exclusive-claim report
//! with a completeness check. Both operate purely on the bit-set data the
//! generator crate produced.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cover;
mod partition;

pub use crate::cover::{greedy_cover, CoverError};
pub use crate::partition::{partition, Partition};
