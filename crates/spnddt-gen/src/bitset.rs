//! Fixed-width bit-sets backed by 64-bit words.

use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// A bit-set of fixed width, stored as packed `u64` words.
///
/// Serves two roles in the analysis: a DDT row (one bit per input
/// difference) and a reach set (one bit per output difference). Widths are
/// set at construction and every binary operation requires equal widths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSet {
    bits: usize,
    words: Box<[u64]>,
}

fn tail_mask(bits: usize) -> u64 {
    let tail = bits % WORD_BITS;
    if tail == 0 {
        u64::MAX
    } else {
        (1u64 << tail) - 1
    }
}

impl BitSet {
    /// Allocates a zeroed set covering `bits` positions.
    pub fn new(bits: usize) -> Self {
        let words = vec![0u64; (bits + WORD_BITS - 1) / WORD_BITS];
        Self {
            bits,
            words: words.into_boxed_slice(),
        }
    }

    /// Width in bit positions.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits
    }

    /// Sets the bit at `idx`.
    #[inline]
    pub fn set(&mut self, idx: usize) {
        assert!(idx < self.bits, "bit index out of range");
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
    }

    /// True when the bit at `idx` is set.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        assert!(idx < self.bits, "bit index out of range");
        (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1
    }

    /// OR-merges `other` into `self`.
    pub fn union_with(&mut self, other: &Self) {
        assert_eq!(self.bits, other.bits, "bit-set widths differ");
        for (dst, src) in self.words.iter_mut().zip(other.words.iter()) {
            *dst |= src;
        }
    }

    /// Clears every bit of `self` that is set in `other`.
    pub fn subtract(&mut self, other: &Self) {
        assert_eq!(self.bits, other.bits, "bit-set widths differ");
        for (dst, src) in self.words.iter_mut().zip(other.words.iter()) {
            *dst &= !src;
        }
    }

    /// Number of set positions.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of positions set in `self` but not in `covered`: the
    /// marginal gain of adding this set to a partial cover.
    pub fn gain_over(&self, covered: &Self) -> usize {
        assert_eq!(self.bits, covered.bits, "bit-set widths differ");
        self.words
            .iter()
            .zip(covered.words.iter())
            .map(|(w, c)| (w & !c).count_ones() as usize)
            .sum()
    }

    /// True when no position is set in both sets.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        assert_eq!(self.bits, other.bits, "bit-set widths differ");
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & b == 0)
    }

    /// True when no position is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// True when every in-width position is set.
    pub fn is_full(&self) -> bool {
        match self.words.split_last() {
            None => true,
            Some((last, body)) => {
                body.iter().all(|&w| w == u64::MAX) && *last == tail_mask(self.bits)
            }
        }
    }

    /// Returns the set with every in-width position flipped.
    pub fn complement(&self) -> Self {
        let mut out = self.clone();
        for word in out.words.iter_mut() {
            *word = !*word;
        }
        if let Some(last) = out.words.last_mut() {
            *last &= tail_mask(self.bits);
        }
        out
    }

    /// Iterates over set positions in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut bits = word;
            core::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(word_idx * WORD_BITS + bit)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_contains_round_trip() {
        let mut set = BitSet::new(100);
        for idx in [0, 1, 63, 64, 99] {
            assert!(!set.contains(idx));
            set.set(idx);
            assert!(set.contains(idx));
        }
        assert_eq!(set.count_ones(), 5);
    }

    #[test]
    #[should_panic(expected = "bit index out of range")]
    fn set_rejects_out_of_width_index() {
        let mut set = BitSet::new(100);
        set.set(100);
    }

    #[test]
    fn union_and_subtract() {
        let mut a = BitSet::new(128);
        let mut b = BitSet::new(128);
        a.set(3);
        a.set(70);
        b.set(70);
        b.set(90);

        let mut union = a.clone();
        union.union_with(&b);
        assert_eq!(union.iter_ones().collect::<Vec<_>>(), vec![3, 70, 90]);

        let mut diff = union.clone();
        diff.subtract(&a);
        assert_eq!(diff.iter_ones().collect::<Vec<_>>(), vec![90]);
    }

    #[test]
    fn gain_counts_only_new_positions() {
        let mut covered = BitSet::new(64);
        covered.set(1);
        covered.set(2);
        let mut row = BitSet::new(64);
        row.set(2);
        row.set(3);
        row.set(4);
        assert_eq!(row.gain_over(&covered), 2);
    }

    #[test]
    fn fullness_respects_the_tail_word() {
        let mut set = BitSet::new(70);
        for idx in 0..69 {
            set.set(idx);
        }
        assert!(!set.is_full());
        set.set(69);
        assert!(set.is_full());
    }

    #[test]
    fn complement_flips_in_width_positions_only() {
        let mut set = BitSet::new(70);
        set.set(0);
        set.set(69);
        let comp = set.complement();
        assert_eq!(comp.count_ones(), 68);
        assert!(!comp.contains(0));
        assert!(comp.contains(1));
        assert!(!comp.contains(69));

        let mut both = set.clone();
        both.union_with(&comp);
        assert!(both.is_full());
    }

    #[test]
    fn disjointness() {
        let mut a = BitSet::new(64);
        let mut b = BitSet::new(64);
        a.set(5);
        b.set(6);
        assert!(a.is_disjoint(&b));
        b.set(5);
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn iter_ones_is_ascending() {
        let mut set = BitSet::new(200);
        for idx in [199, 0, 64, 63, 128] {
            set.set(idx);
        }
        assert_eq!(set.iter_ones().collect::<Vec<_>>(), vec![0, 63, 64, 128, 199]);
    }
}
