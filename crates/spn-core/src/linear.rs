//! Linear mixing layers over an `n`-bit block.

use crate::error::{Error, Result};
use crate::state::{State, Width};

/// Bit permutation routing source bit `i` to destination bit `map[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitPermutation {
    map: Box<[u8]>,
}

impl BitPermutation {
    /// Wraps a destination array after checking it is a permutation of
    /// `0..map.len()`.
    pub fn new(map: Vec<u8>) -> Result<Self> {
        let len = map.len();
        let mut seen = vec![false; len];
        for &dest in &map {
            let dest = dest as usize;
            if dest >= len || seen[dest] {
                return Err(Error::PermutationMalformed { expected: len });
            }
            seen[dest] = true;
        }
        Ok(Self {
            map: map.into_boxed_slice(),
        })
    }

    /// The identity permutation on `width` bits.
    pub fn identity(width: Width) -> Self {
        let map: Vec<u8> = (0..width.bits() as u8).collect();
        Self {
            map: map.into_boxed_slice(),
        }
    }

    /// Number of bit positions covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True for a zero-length permutation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Exposes the destination array (`map[i]` is where source bit `i`
    /// lands).
    pub fn destinations(&self) -> &[u8] {
        &self.map
    }

    /// Routes every set bit of `value` to its destination position.
    #[inline]
    pub fn apply(&self, value: State) -> State {
        let mut out = 0u64;
        for (src, &dest) in self.map.iter().enumerate() {
            if (value >> src) & 1 == 1 {
                out |= 1u64 << dest;
            }
        }
        out
    }
}

/// 4×4 binary matrix XOR-combining the four nibbles of a 16-bit block.
///
/// Nibbles are taken big-nibble-first: input block `i` is bits
/// `12-4i ..= 15-4i`, and output rows are reassembled the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NibbleMatrix {
    rows: [[u8; 4]; 4],
}

impl NibbleMatrix {
    /// Wraps a matrix after checking every entry is 0 or 1.
    pub fn new(rows: [[u8; 4]; 4]) -> Result<Self> {
        for (row, entries) in rows.iter().enumerate() {
            for (col, &entry) in entries.iter().enumerate() {
                if entry > 1 {
                    return Err(Error::MatrixNotBinary { row, col });
                }
            }
        }
        Ok(Self { rows })
    }

    /// XOR-combines the input nibbles selected by each matrix row.
    #[inline]
    pub fn apply(&self, value: State) -> State {
        let value = value & 0xffff;
        let mut blocks = [0u8; 4];
        for (i, block) in blocks.iter_mut().enumerate() {
            *block = ((value >> (12 - 4 * i)) & 0xf) as u8;
        }

        let mut out = 0u64;
        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut acc = 0u8;
            for (col, &entry) in row.iter().enumerate() {
                if entry == 1 {
                    acc ^= blocks[col];
                }
            }
            out |= (acc as State) << (12 - 4 * row_idx);
        }
        out
    }

    /// Exposes the matrix rows.
    pub fn rows(&self) -> &[[u8; 4]; 4] {
        &self.rows
    }
}

/// The linear mixing step of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinearLayer {
    /// Route individual bits to new positions.
    BitPermutation(BitPermutation),
    /// XOR-combine the four nibbles of a 16-bit block.
    NibbleMatrix(NibbleMatrix),
}

impl LinearLayer {
    /// Checks the layer against the block width.
    pub(crate) fn check_width(&self, width: Width) -> Result<()> {
        match self {
            LinearLayer::BitPermutation(perm) if perm.len() != width.bits() as usize => {
                Err(Error::PermutationLengthMismatch {
                    expected: width.bits() as usize,
                    got: perm.len(),
                })
            }
            LinearLayer::NibbleMatrix(_) if width.bits() != 16 => {
                Err(Error::MatrixWidthMismatch(width.bits()))
            }
            _ => Ok(()),
        }
    }

    /// Applies the layer to an in-range state.
    #[inline]
    pub fn apply(&self, value: State) -> State {
        match self {
            LinearLayer::BitPermutation(perm) => perm.apply(value),
            LinearLayer::NibbleMatrix(matrix) => matrix.apply(value),
        }
    }
}
