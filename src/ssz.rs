//! The capability set every SSZ encodable and decodable type implements.

use crate::{Decoder, Encoder};

/// The `Object` trait defines what a type needs to be streamed through an [`Encoder`] and
/// rebuilt by a [`Decoder`].
pub trait Object {
    /// Returns whether the type is static in size (i.e. always takes up the same space to
    /// encode) or dynamic.
    ///
    /// This is a property of the type, not of a value, so it takes no receiver.
    fn static_ssz() -> bool;

    /// Returns the total number of bytes the value encodes to right now.
    fn size_ssz(&self) -> u32;

    /// Returns the size of the fixed section: every static field plus one offset per dynamic
    /// field. Static types are all fixed section.
    fn fixed_size_ssz(&self) -> u32 {
        self.size_ssz()
    }

    /// Serializes the object through an SSZ encoder.
    fn encode_ssz(&self, enc: &mut Encoder<'_>);

    /// Parses the object via an SSZ decoder, consuming exactly the decoder's current budget.
    fn decode_ssz(&mut self, dec: &mut Decoder<'_>);
}

/// An [`Object`] the decoder can instantiate from scratch, e.g. for list elements.
pub trait NewableObject: Object + Default {
    /// Returns a fresh zero-valued instance.
    fn new_ssz() -> Self {
        Self::default()
    }
}

impl<T: Object + Default> NewableObject for T {}
