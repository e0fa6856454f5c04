//! One-round SPN evaluation.

use crate::error::Result;
use crate::linear::LinearLayer;
use crate::sbox::Sbox;
use crate::state::{State, Width};

/// A validated one-round SPN in super-S-box form: an S-box layer, the
/// linear mixing layer, then a second S-box layer.
///
/// Construction checks every structural invariant up front, so a `Cipher`
/// value can be evaluated over the whole state space without further
/// validation.
#[derive(Clone, Debug)]
pub struct Cipher {
    width: Width,
    sbox: Sbox,
    linear: LinearLayer,
}

impl Cipher {
    /// Bundles a width, S-box and linear layer, checking that the layer
    /// matches the block width.
    pub fn new(width: Width, sbox: Sbox, linear: LinearLayer) -> Result<Self> {
        linear.check_width(width)?;
        Ok(Self {
            width,
            sbox,
            linear,
        })
    }

    /// Block width.
    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// The substitution table.
    pub fn sbox(&self) -> &Sbox {
        &self.sbox
    }

    /// The linear mixing layer.
    pub fn linear(&self) -> &LinearLayer {
        &self.linear
    }

    /// Substitutes every nibble of `value` through the S-box.
    #[inline]
    fn substitute(&self, value: State) -> State {
        let mut out = 0u64;
        for i in 0..self.width.nibbles() {
            let nibble = ((value >> (4 * i)) & 0xf) as u8;
            out |= (self.sbox.apply(nibble) as State) << (4 * i);
        }
        out
    }

    /// Evaluates one round: substitute, mix, substitute again.
    ///
    /// The input is masked to the block width, so any `u64` evaluates to
    /// the round image of its in-range residue. Boundary APIs that must
    /// reject out-of-range values call [`Width::check`] first.
    #[inline]
    pub fn round(&self, x: State) -> State {
        let x = x & self.width.mask();
        self.substitute(self.linear.apply(self.substitute(x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::BitPermutation;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn identity_cipher(bits: u32) -> Cipher {
        let width = Width::new(bits).unwrap();
        let linear = LinearLayer::BitPermutation(BitPermutation::identity(width));
        Cipher::new(width, Sbox::identity(), linear).unwrap()
    }

    fn random_cipher(bits: u32, rng: &mut ChaCha20Rng) -> Cipher {
        let width = Width::new(bits).unwrap();
        let mut table: [u8; 16] = core::array::from_fn(|i| i as u8);
        table.shuffle(rng);
        let mut map: Vec<u8> = (0..bits as u8).collect();
        map.shuffle(rng);
        let linear = LinearLayer::BitPermutation(BitPermutation::new(map).unwrap());
        Cipher::new(width, Sbox::new(table).unwrap(), linear).unwrap()
    }

    #[test]
    fn identity_configuration_fixes_every_state() {
        for bits in [4, 8] {
            let cipher = identity_cipher(bits);
            for x in 0..cipher.width().size() as State {
                assert_eq!(cipher.round(x), x);
            }
        }
    }

    #[test]
    fn round_is_a_bijection() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        for _ in 0..8 {
            let cipher = random_cipher(8, &mut rng);
            let mut seen = vec![false; cipher.width().size()];
            for x in 0..cipher.width().size() as State {
                let y = cipher.round(x) as usize;
                assert!(!seen[y], "two inputs map to {y:#x}");
                seen[y] = true;
            }
        }
    }

    #[test]
    fn round_is_deterministic() {
        let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
        let cipher = random_cipher(12, &mut rng);
        for x in [0u64, 1, 0x5a3, 0xfff] {
            assert_eq!(cipher.round(x), cipher.round(x));
        }
    }

    #[test]
    fn out_of_range_input_is_masked() {
        let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
        let cipher = random_cipher(8, &mut rng);
        assert_eq!(cipher.round(0x1ab), cipher.round(0xab));
    }
}
