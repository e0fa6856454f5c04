//! Representative-driven sparse DDT.

use spn_core::{Result, State, Width};

use crate::bitset::BitSet;
use crate::dense::reachable_diffs;
use crate::table::RoundTable;

/// Reach sets for a caller-chosen list of representative input
/// differences.
///
/// The sparse path exists for widths where the dense `O(2^{2n})` pass no
/// longer fits time or memory: cost is bounded by
/// `|representatives| * 2^n` instead.
#[derive(Clone, Debug)]
pub struct SparseDdt {
    width: Width,
    reach: Vec<(State, BitSet)>,
}

impl SparseDdt {
    /// Computes the set of output differences reachable from each
    /// representative.
    ///
    /// Representatives are validated against the block width before any
    /// table work starts and are processed in the order given; downstream
    /// partitioning depends on that order. A duplicated entry gets its own
    /// (identical) reach set.
    pub fn build(table: &RoundTable, representatives: &[State]) -> Result<Self> {
        let width = table.width();
        for &rep in representatives {
            width.check(rep)?;
        }

        let mut reach = Vec::with_capacity(representatives.len());
        for &rep in representatives {
            reach.push((rep, reachable_diffs(table, rep)));
        }
        Ok(Self { width, reach })
    }

    /// Block width the table was built for.
    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Representative / reach-set pairs, in build order.
    pub fn reach(&self) -> &[(State, BitSet)] {
        &self.reach
    }
}
