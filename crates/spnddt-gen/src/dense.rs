//! Dense differential distribution table over the full difference domain.

use std::collections::HashSet;

use rayon::prelude::*;
use spn_core::{State, Width};

use crate::bitset::BitSet;
use crate::table::RoundTable;

/// Computes the set of output differences reachable from input difference
/// `diff`, as a bit-set over `[0, 2^n)`.
///
/// The base-input loop is distributed across the rayon pool; each worker
/// folds into a private bit-set and the partials merge by OR. OR is
/// associative and commutative, so the result never depends on how the
/// pool schedules the chunks.
pub fn reachable_diffs(table: &RoundTable, diff: State) -> BitSet {
    let size = table.len();
    (0..size)
        .into_par_iter()
        .fold(
            || BitSet::new(size),
            |mut reach, x| {
                reach.set(table.output_diff(x as State, diff) as usize);
                reach
            },
        )
        .reduce(
            || BitSet::new(size),
            |mut merged, partial| {
                merged.union_with(&partial);
                merged
            },
        )
}

/// Dense DDT in transpose view: row `v` holds, as a bit-set over input
/// differences, every `d` for which some input pair differing by `d`
/// produces outputs differing by `v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseDdt {
    width: Width,
    rows: Vec<BitSet>,
}

impl DenseDdt {
    /// Builds the full table.
    ///
    /// This is the `O(2^{2n})` pass that dominates an analysis: the outer
    /// loop walks every input difference, the inner evaluation runs on the
    /// pool via [`reachable_diffs`], and each reached output difference
    /// gets the current difference's bit set in its row. Difference 0
    /// contributes exactly bit 0 of row 0.
    pub fn build(table: &RoundTable) -> Self {
        let size = table.len();
        let mut rows = vec![BitSet::new(size); size];
        for diff in 0..size {
            let reach = reachable_diffs(table, diff as State);
            for out in reach.iter_ones() {
                rows[out].set(diff);
            }
        }
        Self {
            width: table.width(),
            rows,
        }
    }

    /// Block width the table was built for.
    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Rows indexed by output difference.
    pub fn rows(&self) -> &[BitSet] {
        &self.rows
    }

    /// Number of rows with at least one set bit.
    pub fn non_zero_rows(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_empty()).count()
    }

    /// Unique rows in first-seen order, each paired with the output
    /// difference at which its pattern first occurred.
    ///
    /// This is the deduplicated view; [`DenseDdt::rows`] keeps duplicates.
    /// Which view feeds the cover step changes the reported selection, so
    /// callers state the active mode in their output.
    pub fn dedup_rows(&self) -> (Vec<BitSet>, Vec<State>) {
        let mut seen: HashSet<&BitSet> = HashSet::new();
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for (out, row) in self.rows.iter().enumerate() {
            if seen.insert(row) {
                rows.push(row.clone());
                labels.push(out as State);
            }
        }
        (rows, labels)
    }
}
