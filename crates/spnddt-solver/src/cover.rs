//! Greedy minimum set cover over DDT rows.

use thiserror::Error;

use spnddt_gen::BitSet;

/// Failure modes of the greedy cover search.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoverError {
    /// No remaining row adds coverage, yet the universe is not covered.
    /// The partial selection is discarded rather than returned.
    #[error("cover infeasible: only {covered} of {universe} positions reachable")]
    Infeasible {
        /// Positions covered when the search stalled.
        covered: usize,
        /// Size of the target universe.
        universe: usize,
    },
}

/// Greedily selects rows until the OR of their bit-sets covers all
/// `universe` positions.
///
/// Every row must have width `universe`. Each iteration picks the row
/// with the largest marginal gain over the positions covered so far,
/// breaking ties toward the lowest index, so the selection is
/// reproducible across runs and pool sizes. Each pick strictly grows the
/// covered set; a round with no positive gain means the remaining
/// positions are unreachable and the search stops with
/// [`CoverError::Infeasible`].
///
/// Set cover is NP-hard; this is the classic polynomial-time greedy
/// approximation and the result is not guaranteed minimal.
pub fn greedy_cover(rows: &[BitSet], universe: usize) -> Result<Vec<usize>, CoverError> {
    let mut covered = BitSet::new(universe);
    let mut selected = Vec::new();

    while !covered.is_full() {
        let mut best_row = None;
        let mut best_gain = 0;
        for (idx, row) in rows.iter().enumerate() {
            let gain = row.gain_over(&covered);
            if gain > best_gain {
                best_gain = gain;
                best_row = Some(idx);
            }
        }

        match best_row {
            Some(idx) => {
                covered.union_with(&rows[idx]);
                selected.push(idx);
            }
            None => {
                return Err(CoverError::Infeasible {
                    covered: covered.count_ones(),
                    universe,
                });
            }
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(universe: usize, bits: &[usize]) -> BitSet {
        let mut set = BitSet::new(universe);
        for &bit in bits {
            set.set(bit);
        }
        set
    }

    #[test]
    fn picks_the_dominating_row_first() {
        let rows = vec![
            row(4, &[0, 1]),
            row(4, &[1, 2]),
            row(4, &[2, 3]),
            row(4, &[0, 1, 2, 3]),
        ];
        assert_eq!(greedy_cover(&rows, 4), Ok(vec![3]));
    }

    #[test]
    fn ties_break_toward_the_lowest_index() {
        let rows = vec![row(4, &[0, 1]), row(4, &[2, 3]), row(4, &[0, 1])];
        assert_eq!(greedy_cover(&rows, 4), Ok(vec![0, 1]));
    }

    #[test]
    fn covers_in_multiple_rounds() {
        let rows = vec![row(6, &[0, 1, 2]), row(6, &[2, 3]), row(6, &[4, 5])];
        let selected = greedy_cover(&rows, 6).unwrap();
        assert_eq!(selected, vec![0, 2, 1]);

        let mut union = BitSet::new(6);
        for &idx in &selected {
            union.union_with(&rows[idx]);
        }
        assert!(union.is_full());
    }

    #[test]
    fn every_pick_strictly_grows_coverage() {
        let rows = vec![
            row(8, &[0, 1, 2, 3]),
            row(8, &[0, 1, 2, 3]),
            row(8, &[3, 4]),
            row(8, &[5, 6]),
            row(8, &[7]),
        ];
        let selected = greedy_cover(&rows, 8).unwrap();
        let mut covered = BitSet::new(8);
        let mut last = 0;
        for &idx in &selected {
            covered.union_with(&rows[idx]);
            let count = covered.count_ones();
            assert!(count > last, "pick {idx} added nothing");
            last = count;
        }
    }

    #[test]
    fn unreachable_positions_are_an_explicit_error() {
        let rows = vec![row(4, &[0, 1]), row(4, &[1])];
        assert_eq!(
            greedy_cover(&rows, 4),
            Err(CoverError::Infeasible {
                covered: 2,
                universe: 4
            })
        );
    }

    #[test]
    fn empty_row_list_is_infeasible() {
        assert_eq!(
            greedy_cover(&[], 4),
            Err(CoverError::Infeasible {
                covered: 0,
                universe: 4
            })
        );
    }
}
