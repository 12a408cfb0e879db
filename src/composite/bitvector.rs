//! Fixed-size bit vectors.

use crate::constants::JUSTIFICATION_BITS_SIZE;
use crate::{Decoder, Encoder, Object, SSZError};

/// A vector of exactly `N` bits, packed little-endian into `N.div_ceil(8)` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitvector<const N: usize> {
    bits: [bool; N],
}

impl<const N: usize> Default for Bitvector<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Bitvector<N> {
    pub fn new() -> Self {
        Self { bits: [false; N] }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<(), SSZError> {
        if index >= N {
            return Err(SSZError::InvalidLength {
                expected: N,
                got: index,
            });
        }
        self.bits[index] = value;
        Ok(())
    }

    pub fn as_bits(&self) -> &[bool; N] {
        &self.bits
    }
}

impl<const N: usize> From<[bool; N]> for Bitvector<N> {
    fn from(bits: [bool; N]) -> Self {
        Self { bits }
    }
}

impl<const N: usize> Object for Bitvector<N> {
    fn static_ssz() -> bool {
        true
    }

    /// Returns the packed size in bytes.
    fn size_ssz(&self) -> u32 {
        N.div_ceil(8) as u32
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_bits_fixed(&self.bits);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_bits_fixed(&mut self.bits);
    }
}

/// Justification bits of a beacon state.
pub type JustificationBits = Bitvector<JUSTIFICATION_BITS_SIZE>;
