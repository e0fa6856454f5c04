//! Serializable DDT snapshots for external cover engines.

use serde::{Deserialize, Serialize};
use spn_core::State;

use crate::bitset::BitSet;
use crate::dense::DenseDdt;

/// Which row view a serialized instance captures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DdtMode {
    /// Every output-difference row, duplicates included.
    Full,
    /// Unique rows in first-seen order.
    DedupedRows,
}

/// Static parameters describing a serialized DDT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdtParams {
    /// Block width in bits.
    pub width_bits: u32,
    /// Number of serialized rows.
    pub rows: usize,
    /// Row view captured by this instance.
    pub mode: DdtMode,
    /// Format version tag for future compatibility changes.
    pub version: u32,
}

/// A DDT snapshot in the bit-set representation an external exact-cover
/// engine consumes.
///
/// The in-process greedy solver and an out-of-process exact solver see the
/// same rows; only the selection strategy differs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdtInstance {
    /// Static parameters.
    pub params: DdtParams,
    /// Output-difference label of each row, in row order.
    pub labels: Vec<State>,
    /// Bit-set rows over input differences.
    pub rows: Vec<BitSet>,
}

const FORMAT_VERSION: u32 = 1;

impl DdtInstance {
    /// Captures the full row view of a dense DDT.
    pub fn from_dense(ddt: &DenseDdt) -> Self {
        let rows = ddt.rows().to_vec();
        let labels = (0..rows.len() as State).collect();
        Self {
            params: DdtParams {
                width_bits: ddt.width().bits(),
                rows: rows.len(),
                mode: DdtMode::Full,
                version: FORMAT_VERSION,
            },
            labels,
            rows,
        }
    }

    /// Captures the deduplicated row view of a dense DDT.
    pub fn from_dense_deduped(ddt: &DenseDdt) -> Self {
        let (rows, labels) = ddt.dedup_rows();
        Self {
            params: DdtParams {
                width_bits: ddt.width().bits(),
                rows: rows.len(),
                mode: DdtMode::DedupedRows,
                version: FORMAT_VERSION,
            },
            labels,
            rows,
        }
    }

    /// Serializes the instance with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes an instance with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RoundTable;
    use spn_core::{BitPermutation, Cipher, LinearLayer, Sbox, Width};

    fn toy_ddt() -> DenseDdt {
        let width = Width::new(8).unwrap();
        let sbox = Sbox::new(spn_core::IVLBC_SBOX).unwrap();
        let perm = BitPermutation::new(vec![1, 0, 3, 2, 5, 4, 7, 6]).unwrap();
        let cipher = Cipher::new(width, sbox, LinearLayer::BitPermutation(perm)).unwrap();
        DenseDdt::build(&RoundTable::build(&cipher))
    }

    #[test]
    fn serialize_round_trip() {
        let instance = DdtInstance::from_dense(&toy_ddt());
        let bytes = instance.to_bytes().expect("serialize");
        let decoded = DdtInstance::from_bytes(&bytes).expect("deserialize");
        assert_eq!(decoded, instance);
        assert_eq!(decoded.params.mode, DdtMode::Full);
        assert_eq!(decoded.params.rows, 256);
    }

    #[test]
    fn deduped_instance_keeps_consistent_labels() {
        let ddt = toy_ddt();
        let instance = DdtInstance::from_dense_deduped(&ddt);
        assert_eq!(instance.params.mode, DdtMode::DedupedRows);
        assert_eq!(instance.rows.len(), instance.labels.len());
        assert_eq!(instance.rows.len(), instance.params.rows);
        for (row, &label) in instance.rows.iter().zip(instance.labels.iter()) {
            assert_eq!(row, &ddt.rows()[label as usize]);
        }
    }
}
