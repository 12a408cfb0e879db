//! Encoding and decoding for boolean values.

use crate::{Decoder, Encoder, Object};

impl Object for bool {
    /// Booleans are always a single byte.
    fn static_ssz() -> bool {
        true
    }

    fn size_ssz(&self) -> u32 {
        1
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_bool(*self);
    }

    /// Decodes a boolean, rejecting anything but 0 and 1.
    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_bool(self);
    }
}
