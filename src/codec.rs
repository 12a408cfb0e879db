//! Top-level entry points.

use crate::{Decoder, Encoder, NewableObject, Object, SSZError};
use std::io::{Read, Write};

/// Serializes `obj` into `sink`.
///
/// On failure the sink may already hold part of the encoding; buffer it if that matters.
pub fn encode<W: Write, T: Object>(mut sink: W, obj: &T) -> Result<(), SSZError> {
    let mut enc = Encoder::new(&mut sink);
    enc.encode_object(obj);
    enc.finish()
}

/// Parses `obj` out of `source`, which must yield exactly `size` bytes for it.
pub fn decode<R: Read, T: Object>(mut source: R, obj: &mut T, size: u32) -> Result<(), SSZError> {
    let mut dec = Decoder::new(&mut source, size);
    dec.decode_object(obj);
    dec.finish()
}

/// Serializes `obj` into a freshly allocated buffer of exactly `size_ssz()` capacity.
pub fn encode_to_vec<T: Object>(obj: &T) -> Result<Vec<u8>, SSZError> {
    let mut buf = Vec::with_capacity(obj.size_ssz() as usize);
    encode(&mut buf, obj)?;
    Ok(buf)
}

/// Parses a new `T` spanning all of `bytes`.
pub fn decode_from_bytes<T: NewableObject>(bytes: &[u8]) -> Result<T, SSZError> {
    let size = u32::try_from(bytes.len()).map_err(|_| SSZError::InvalidLength {
        expected: u32::MAX as usize,
        got: bytes.len(),
    })?;
    let mut obj = T::new_ssz();
    decode(bytes, &mut obj, size)?;
    Ok(obj)
}
