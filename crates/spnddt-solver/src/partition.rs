//! Exclusive-claim partitioning of sparse reach sets.

use spn_core::State;
use spnddt_gen::{BitSet, SparseDdt};

/// Disjoint per-representative claims plus the unclaimed residue of the
/// output universe.
#[derive(Clone, Debug)]
pub struct Partition {
    claims: Vec<(State, BitSet)>,
    uncovered: BitSet,
}

impl Partition {
    /// Claims in processing order. Pairwise disjoint by construction.
    pub fn claims(&self) -> &[(State, BitSet)] {
        &self.claims
    }

    /// Output differences claimed by no representative.
    pub fn uncovered(&self) -> &BitSet {
        &self.uncovered
    }

    /// Total number of claimed output differences.
    pub fn claimed_total(&self) -> usize {
        self.claims.iter().map(|(_, claim)| claim.count_ones()).sum()
    }

    /// True when the claims cover the whole output universe.
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Partitions the reach sets of a sparse DDT into mutually exclusive
/// claims.
///
/// Representatives are visited in the order the sparse table was built
/// with. Each claims its reachable output differences minus everything an
/// earlier representative already took, so the claims are disjoint and a
/// representative listed twice claims nothing the second time. The
/// residue against the full `[0, 2^n)` universe is kept for the
/// completeness report.
pub fn partition(sparse: &SparseDdt) -> Partition {
    let size = sparse.width().size();
    let mut claimed = BitSet::new(size);
    let mut claims = Vec::with_capacity(sparse.reach().len());

    for (rep, reach) in sparse.reach() {
        let mut claim = reach.clone();
        claim.subtract(&claimed);
        claimed.union_with(&claim);
        claims.push((*rep, claim));
    }

    Partition {
        claims,
        uncovered: claimed.complement(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_core::{BitPermutation, Cipher, LinearLayer, Sbox, Width};
    use spnddt_gen::RoundTable;

    fn identity_table(bits: u32) -> RoundTable {
        let width = Width::new(bits).unwrap();
        let linear = LinearLayer::BitPermutation(BitPermutation::identity(width));
        let cipher = Cipher::new(width, Sbox::identity(), linear).unwrap();
        RoundTable::build(&cipher)
    }

    #[test]
    fn identity_reach_sets_partition_into_singletons() {
        // For the identity round, difference d reaches exactly {d}.
        let table = identity_table(4);
        let sparse = SparseDdt::build(&table, &[0, 5, 10]).unwrap();
        let part = partition(&sparse);

        for (rep, claim) in part.claims() {
            assert_eq!(claim.count_ones(), 1);
            assert!(claim.contains(*rep as usize));
        }
        assert_eq!(part.claimed_total(), 3);
        assert!(!part.is_complete());
        assert_eq!(part.uncovered().count_ones(), 13);
    }

    #[test]
    fn duplicate_representative_claims_nothing_the_second_time() {
        let table = identity_table(4);
        let sparse = SparseDdt::build(&table, &[5, 5]).unwrap();
        let part = partition(&sparse);

        assert_eq!(part.claims()[0].1.count_ones(), 1);
        assert!(part.claims()[1].1.is_empty());
    }

    #[test]
    fn full_representative_list_partitions_the_whole_universe() {
        let table = identity_table(4);
        let reps: Vec<u64> = (0..16).collect();
        let sparse = SparseDdt::build(&table, &reps).unwrap();
        let part = partition(&sparse);

        assert!(part.is_complete());
        assert_eq!(part.claimed_total(), 16);
        for (i, (_, a)) in part.claims().iter().enumerate() {
            for (_, b) in part.claims().iter().skip(i + 1) {
                assert!(a.is_disjoint(b));
            }
        }
    }
}
