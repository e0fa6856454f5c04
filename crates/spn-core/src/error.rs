//! Validation errors for cipher construction and boundary inputs.

use thiserror::Error;

/// Errors raised while validating a cipher configuration or a
/// caller-supplied state value.
///
/// All variants are deterministic: retrying the same call reproduces the
/// same failure, so none of them is worth a retry loop.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Block width must be a positive multiple of four bits, at most 32.
    #[error("block width must be a multiple of 4 in 4..=32, got {0}")]
    InvalidWidth(u32),

    /// The 16-entry S-box table repeats or skips a 4-bit value.
    #[error("s-box table is not a permutation of 0..=15")]
    SboxNotBijective,

    /// A bit-permutation array repeats or skips a destination position.
    #[error("bit permutation is not a permutation of 0..{expected}")]
    PermutationMalformed {
        /// Number of bit positions the permutation must cover.
        expected: usize,
    },

    /// A bit-permutation array does not match the block width.
    #[error("bit permutation covers {got} bits, block has {expected}")]
    PermutationLengthMismatch {
        /// Block width in bits.
        expected: usize,
        /// Length of the supplied permutation.
        got: usize,
    },

    /// Mix-matrix entries must be 0 or 1.
    #[error("mix matrix entry at row {row}, column {col} is not binary")]
    MatrixNotBinary {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },

    /// Nibble mixing is defined on 16-bit blocks only.
    #[error("nibble mix matrix requires a 16-bit block, got {0} bits")]
    MatrixWidthMismatch(u32),

    /// A state or difference value lies outside the block's domain.
    #[error("state {value:#x} does not fit a {bits}-bit block")]
    StateOutOfRange {
        /// The offending value.
        value: u64,
        /// Block width in bits.
        bits: u32,
    },
}

/// Result alias used throughout the workspace.
pub type Result<T> = core::result::Result<T, Error>;
