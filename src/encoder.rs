//! Streaming SSZ encoder.

use crate::composite::fixed_bytes::FixedBlob;
use crate::constants::BYTES;
use crate::pool::{ENCODERS, Recycle};
use crate::{Object, SSZError};
use alloy_primitives::U256;
use std::io::Write;
use std::mem;
use tracing::trace;

/// Reusable allocations of an [`Encoder`], recycled through the encoder pool.
#[derive(Debug, Default)]
pub(crate) struct EncoderContext {
    scratch: Vec<u8>,
}

impl Recycle for EncoderContext {
    fn reset(&mut self) {
        self.scratch.clear();
    }

    fn retained_bytes(&self) -> usize {
        self.scratch.capacity()
    }
}

/// Writes SSZ objects into a byte sink.
///
/// The first error is latched: every later write becomes a no-op and the error is handed
/// back by [`Encoder::finish`]. Bytes already written are not rolled back.
///
/// Dynamic objects are written in two passes over their fields. The fixed section emits
/// static fields inline and an offset per dynamic field (`encode_dynamic_*_offset`), then
/// the payloads follow in the same order (`encode_dynamic_*_content`).
pub struct Encoder<'a> {
    out: &'a mut dyn Write,
    err: Option<SSZError>,
    offset: u32,
    ctx: EncoderContext,
}

impl<'a> Encoder<'a> {
    /// Binds a pooled encoder to `out`.
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            err: None,
            offset: 0,
            ctx: ENCODERS.acquire(),
        }
    }

    /// Returns the latched error, if any.
    pub fn error(&self) -> Option<&SSZError> {
        self.err.as_ref()
    }

    /// Latches `err` unless an earlier error is already held.
    pub fn fail(&mut self, err: SSZError) {
        if self.err.is_none() {
            trace!(%err, "ssz encoding aborted");
            self.err = Some(err);
        }
    }

    /// Releases the encoder and returns the first error encountered.
    pub fn finish(mut self) -> Result<(), SSZError> {
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.err.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(bytes) {
            self.fail(SSZError::SinkWrite(err));
        }
    }

    /// Writes the bytes staged by `fill` in one go through the pooled scratch buffer.
    fn write_staged(&mut self, fill: impl FnOnce(&mut Vec<u8>)) {
        if self.err.is_some() {
            return;
        }
        let mut scratch = mem::take(&mut self.ctx.scratch);
        scratch.clear();
        fill(&mut scratch);
        self.write(&scratch);
        self.ctx.scratch = scratch;
    }

    /// Encodes a boolean as a single byte.
    pub fn encode_bool(&mut self, value: bool) {
        self.write(&[value as u8]);
    }

    /// Encodes a u8.
    pub fn encode_u8(&mut self, value: u8) {
        self.write(&[value]);
    }

    /// Encodes a u16 in little-endian order.
    pub fn encode_u16(&mut self, value: u16) {
        self.write(&value.to_le_bytes());
    }

    /// Encodes a u32 in little-endian order.
    pub fn encode_u32(&mut self, value: u32) {
        self.write(&value.to_le_bytes());
    }

    /// Encodes a u64 in little-endian order.
    pub fn encode_u64(&mut self, value: u64) {
        self.write(&value.to_le_bytes());
    }

    /// Encodes a U256 in little-endian order.
    pub fn encode_u256(&mut self, value: &U256) {
        self.write(&value.to_le_bytes::<BYTES>());
    }

    /// Encodes a fixed-size binary blob.
    pub fn encode_bytes_fixed<B: FixedBlob>(&mut self, blob: &B) {
        self.write(blob.as_blob());
    }

    /// Encodes a fixed-size array of u64s.
    pub fn encode_u64s_fixed<const N: usize>(&mut self, values: &[u64; N]) {
        self.write_staged(|buf| {
            buf.reserve(N * 8);
            for value in values {
                buf.extend_from_slice(&value.to_le_bytes());
            }
        });
    }

    /// Encodes a fixed-size array of fixed-size binary blobs.
    pub fn encode_bytes_array<B: FixedBlob, const N: usize>(&mut self, blobs: &[B; N]) {
        self.write_staged(|buf| {
            buf.reserve(N * B::LEN);
            for blob in blobs {
                buf.extend_from_slice(blob.as_blob());
            }
        });
    }

    /// Packs a fixed-size bit vector into bytes, least significant bit first.
    pub fn encode_bits_fixed(&mut self, bits: &[bool]) {
        self.write_staged(|buf| {
            buf.resize(bits.len().div_ceil(8), 0);
            for (index, _) in bits.iter().enumerate().filter(|(_, bit)| **bit) {
                buf[index / 8] |= 1 << (index % 8);
            }
        });
    }

    /// Encodes a static object inline, in the fixed section of its parent.
    pub fn encode_static_object<T: Object>(&mut self, obj: &T) {
        if self.err.is_some() {
            return;
        }
        obj.encode_ssz(self);
    }

    /// Writes the running offset and advances it past a payload of `size` bytes.
    pub fn encode_offset(&mut self, size: u32) {
        let offset = self.offset;
        self.encode_u32(offset);
        match offset.checked_add(size) {
            Some(next) => self.offset = next,
            None => self.fail(SSZError::InvalidLength {
                expected: u32::MAX as usize,
                got: offset as usize + size as usize,
            }),
        }
    }

    /// Writes the offset of a dynamic byte list.
    pub fn encode_dynamic_bytes_offset(&mut self, blob: &[u8]) {
        match u32::try_from(blob.len()) {
            Ok(size) => self.encode_offset(size),
            Err(_) => self.fail(SSZError::InvalidLength {
                expected: u32::MAX as usize,
                got: blob.len(),
            }),
        }
    }

    /// Writes the offset of a dynamic object.
    pub fn encode_dynamic_object_offset<T: Object>(&mut self, obj: &T) {
        self.encode_offset(obj.size_ssz());
    }

    /// Writes the payload of a dynamic byte list.
    pub fn encode_dynamic_bytes_content(&mut self, blob: &[u8]) {
        self.write(blob);
    }

    /// Writes the payload of a dynamic object.
    pub fn encode_dynamic_object_content<T: Object>(&mut self, obj: &T) {
        self.encode_object(obj);
    }

    /// Encodes `obj` as the start of a new object: its offsets count from here.
    pub fn encode_object<T: Object>(&mut self, obj: &T) {
        if self.err.is_some() {
            return;
        }
        // Every offset of the enclosing object is already written by the time a payload
        // starts, so one running counter is enough.
        self.offset = obj.fixed_size_ssz();
        obj.encode_ssz(self);
    }
}

impl Drop for Encoder<'_> {
    fn drop(&mut self) {
        ENCODERS.release(mem::take(&mut self.ctx));
    }
}
