//! Reduced 16-bit models of published SPN ciphers.
//!
//! Both presets collapse one full round onto a single 16-bit block: the
//! GIFT model routes bits through a 16-position slice of the GIFT
//! permutation, the IVLBC model XOR-mixes nibbles through the cipher's
//! involutory 4×4 matrix.

use crate::cipher::Cipher;
use crate::linear::{BitPermutation, LinearLayer, NibbleMatrix};
use crate::sbox::Sbox;
use crate::state::Width;

/// The GIFT S-box.
pub const GIFT_SBOX: [u8; 16] = [
    0x1, 0xa, 0x4, 0xc, 0x6, 0xf, 0x3, 0x9, 0x2, 0xd, 0xb, 0x7, 0x5, 0x0, 0x8, 0xe,
];

/// 16-bit slice of the GIFT bit permutation.
pub const GIFT_BIT_PERMUTATION: [u8; 16] = [0, 5, 10, 15, 12, 1, 6, 11, 8, 13, 2, 7, 4, 9, 14, 3];

/// The IVLBC S-box.
pub const IVLBC_SBOX: [u8; 16] = [
    0x0, 0xf, 0xe, 0x5, 0xd, 0x3, 0x6, 0xc, 0xb, 0x9, 0xa, 0x8, 0x7, 0x4, 0x2, 0x1,
];

/// The IVLBC nibble mix matrix (each nibble becomes the XOR of the other
/// three).
pub const IVLBC_MIX_MATRIX: [[u8; 4]; 4] = [
    [0, 1, 1, 1],
    [1, 0, 1, 1],
    [1, 1, 0, 1],
    [1, 1, 1, 0],
];

/// 16-bit GIFT model: GIFT S-box with the 16-bit bit permutation.
pub fn gift() -> Cipher {
    let width = Width::new(16).expect("preset width is valid");
    let sbox = Sbox::new(GIFT_SBOX).expect("preset s-box is bijective");
    let perm =
        BitPermutation::new(GIFT_BIT_PERMUTATION.to_vec()).expect("preset permutation is valid");
    Cipher::new(width, sbox, LinearLayer::BitPermutation(perm))
        .expect("preset configuration is consistent")
}

/// 16-bit IVLBC model: IVLBC S-box with the 4×4 XOR mix matrix.
pub fn ivlbc() -> Cipher {
    let width = Width::new(16).expect("preset width is valid");
    let sbox = Sbox::new(IVLBC_SBOX).expect("preset s-box is bijective");
    let matrix = NibbleMatrix::new(IVLBC_MIX_MATRIX).expect("preset matrix is binary");
    Cipher::new(width, sbox, LinearLayer::NibbleMatrix(matrix))
        .expect("preset configuration is consistent")
}
