//! Encoding and decoding of bounded lists.

use crate::{BYTES_PER_LENGTH_OFFSET, Decoder, Encoder, NewableObject, Object, SSZError};
use core::any::type_name;
use core::ops::{Deref, DerefMut};

/// A list of at most `N` sub-objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<T, const N: usize> {
    elements: Vec<T>,
}

impl<T, const N: usize> List<T, N> {
    pub fn new(elements: Vec<T>) -> Result<Self, SSZError> {
        if elements.len() > N {
            Err(SSZError::InvalidLength {
                expected: N,
                got: elements.len(),
            })
        } else {
            Ok(Self { elements })
        }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends an element, refusing to grow past `N`.
    pub fn push(&mut self, element: T) -> Result<(), SSZError> {
        if self.elements.len() >= N {
            return Err(SSZError::InvalidLength {
                expected: N,
                got: self.elements.len() + 1,
            });
        }
        self.elements.push(element);
        Ok(())
    }
}

impl<T, const N: usize> Default for List<T, N> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T, const N: usize> Deref for List<T, N> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T, const N: usize> DerefMut for List<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl<T: NewableObject, const N: usize> Object for List<T, N> {
    fn static_ssz() -> bool {
        false
    }

    fn size_ssz(&self) -> u32 {
        let offsets = if T::static_ssz() {
            0
        } else {
            self.len() * BYTES_PER_LENGTH_OFFSET
        };
        offsets as u32 + self.elements.iter().map(|e| e.size_ssz()).sum::<u32>()
    }

    fn fixed_size_ssz(&self) -> u32 {
        if T::static_ssz() {
            self.size_ssz()
        } else {
            (self.len() * BYTES_PER_LENGTH_OFFSET) as u32
        }
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        if self.len() > N {
            enc.fail(SSZError::MaxItemsExceeded {
                kind: type_name::<T>(),
                items: self.len(),
                max: N,
            });
            return;
        }
        if T::static_ssz() {
            for item in &self.elements {
                enc.encode_static_object(item);
            }
        } else {
            for item in &self.elements {
                enc.encode_dynamic_object_offset(item);
            }
            for item in &self.elements {
                enc.encode_dynamic_object_content(item);
            }
        }
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        if T::static_ssz() {
            dec.decode_slice_of_static_objects(&mut self.elements, N);
        } else {
            dec.decode_slice_of_dynamic_objects(&mut self.elements, N);
        }
    }
}
