//! Encoding and decoding for uint values.

use crate::constants::BYTES;
use crate::{Decoder, Encoder, Object};
use alloy_primitives::U256;

macro_rules! impl_uint {
    ($type:ty, $bytes:expr, $encode:ident, $decode:ident) => {
        impl Object for $type {
            /// Unsigned integers are always static.
            fn static_ssz() -> bool {
                true
            }

            /// Returns the fixed size in bytes.
            fn size_ssz(&self) -> u32 {
                $bytes
            }

            /// Encodes the integer in little-endian order.
            fn encode_ssz(&self, enc: &mut Encoder<'_>) {
                enc.$encode(*self);
            }

            /// Decodes a little-endian integer.
            fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
                dec.$decode(self);
            }
        }
    };
}

impl_uint!(u8, 1, encode_u8, decode_u8);
impl_uint!(u16, 2, encode_u16, decode_u16);
impl_uint!(u32, 4, encode_u32, decode_u32);
impl_uint!(u64, 8, encode_u64, decode_u64);

impl Object for U256 {
    fn static_ssz() -> bool {
        true
    }

    fn size_ssz(&self) -> u32 {
        BYTES as u32
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_u256(self);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_u256(self);
    }
}
