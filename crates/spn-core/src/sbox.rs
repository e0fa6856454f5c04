//! 4-bit substitution tables.

use crate::error::{Error, Result};

/// Bijective substitution table on 4-bit values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sbox {
    table: [u8; 16],
}

impl Sbox {
    /// Wraps a table after checking it is a permutation of `0..=15`.
    ///
    /// Non-bijective tables are rejected here, before any lookup table is
    /// built from them: a repeated entry would make every downstream DDT
    /// silently meaningless.
    pub fn new(table: [u8; 16]) -> Result<Self> {
        let mut seen = [false; 16];
        for &entry in table.iter() {
            if entry > 0xf || seen[entry as usize] {
                return Err(Error::SboxNotBijective);
            }
            seen[entry as usize] = true;
        }
        Ok(Self { table })
    }

    /// The identity substitution.
    pub fn identity() -> Self {
        let mut table = [0u8; 16];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        Self { table }
    }

    /// Substitutes one nibble. Only the low four bits of `nibble` are read.
    #[inline]
    pub fn apply(&self, nibble: u8) -> u8 {
        self.table[(nibble & 0xf) as usize]
    }

    /// Returns the inverse substitution.
    pub fn inverse(&self) -> Self {
        let mut table = [0u8; 16];
        for (i, &entry) in self.table.iter().enumerate() {
            table[entry as usize] = i as u8;
        }
        Self { table }
    }

    /// Exposes the raw 16-entry table.
    pub fn entries(&self) -> &[u8; 16] {
        &self.table
    }
}
