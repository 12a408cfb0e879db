//! Encoding and decoding of fixed vectors.

use crate::{Decoder, Encoder, Object};
use core::ops::{Deref, DerefMut};

/// A vector of exactly `N` sub-objects, static or dynamic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVector<T, const N: usize>([T; N]);

impl<T, const N: usize> FixedVector<T, N> {
    pub fn new(data: [T; N]) -> Self {
        Self(data)
    }

    pub fn into_inner(self) -> [T; N] {
        self.0
    }
}

impl<T: Default, const N: usize> Default for FixedVector<T, N> {
    fn default() -> Self {
        Self(core::array::from_fn(|_| T::default()))
    }
}

impl<T, const N: usize> Deref for FixedVector<T, N> {
    type Target = [T; N];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, const N: usize> DerefMut for FixedVector<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Object, const N: usize> Object for FixedVector<T, N> {
    /// A fixed vector is static exactly when its elements are.
    fn static_ssz() -> bool {
        T::static_ssz()
    }

    fn size_ssz(&self) -> u32 {
        if T::static_ssz() {
            self.0.iter().map(|item| item.size_ssz()).sum()
        } else {
            self.0
                .iter()
                .map(|item| crate::BYTES_PER_LENGTH_OFFSET as u32 + item.size_ssz())
                .sum()
        }
    }

    fn fixed_size_ssz(&self) -> u32 {
        if T::static_ssz() {
            self.size_ssz()
        } else {
            (N * crate::BYTES_PER_LENGTH_OFFSET) as u32
        }
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        if T::static_ssz() {
            for item in &self.0 {
                enc.encode_static_object(item);
            }
        } else {
            for item in &self.0 {
                enc.encode_dynamic_object_offset(item);
            }
            for item in &self.0 {
                enc.encode_dynamic_object_content(item);
            }
        }
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        if T::static_ssz() {
            for item in &mut self.0 {
                dec.decode_static_object(item);
            }
        } else {
            dec.decode_array_of_dynamic_objects(&mut self.0);
        }
    }
}
