//! Parallel precomputation of the one-round lookup table.

use rayon::prelude::*;
use spn_core::{Cipher, State, Width};

/// Lookup table holding `round(x)` for every `x` in the state space.
///
/// Built once per analysis, then shared read-only by every DDT pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTable {
    width: Width,
    entries: Box<[u32]>,
}

impl RoundTable {
    /// Evaluates the round over the full domain, splitting the work across
    /// the rayon pool.
    ///
    /// Every entry's slot is fixed by its index, so the parallel collect
    /// writes disjoint positions and the result is independent of
    /// scheduling. A panicking worker propagates out of the join and
    /// aborts the build before a short table can be observed.
    pub fn build(cipher: &Cipher) -> Self {
        let width = cipher.width();
        let entries: Vec<u32> = (0..width.size())
            .into_par_iter()
            .map(|x| cipher.round(x as State) as u32)
            .collect();
        Self {
            width,
            entries: entries.into_boxed_slice(),
        }
    }

    /// Block width the table was built for.
    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Number of entries, `2^n`.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a valid width has at least 16 entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Round image of `x`.
    #[inline]
    pub fn get(&self, x: State) -> State {
        self.entries[x as usize] as State
    }

    /// Output difference induced by input difference `diff` at base
    /// input `x`.
    #[inline]
    pub fn output_diff(&self, x: State, diff: State) -> State {
        self.get(x) ^ self.get(x ^ diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_core::{gift, ivlbc};

    #[test]
    fn table_covers_the_full_domain() {
        let cipher = gift();
        let table = RoundTable::build(&cipher);
        assert_eq!(table.len(), 1 << 16);
    }

    #[test]
    fn entries_match_direct_evaluation() {
        let cipher = ivlbc();
        let table = RoundTable::build(&cipher);
        for x in (0..table.len() as State).step_by(251) {
            assert_eq!(table.get(x), cipher.round(x));
        }
    }

    #[test]
    fn table_of_a_bijection_has_no_collisions() {
        let cipher = gift();
        let table = RoundTable::build(&cipher);
        let mut seen = vec![false; table.len()];
        for x in 0..table.len() as State {
            let y = table.get(x) as usize;
            assert!(!seen[y]);
            seen[y] = true;
        }
    }

    #[test]
    fn zero_difference_induces_zero_output_difference() {
        let cipher = gift();
        let table = RoundTable::build(&cipher);
        for x in (0..table.len() as State).step_by(509) {
            assert_eq!(table.output_diff(x, 0), 0);
        }
    }
}
