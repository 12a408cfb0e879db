//! Streaming SSZ decoder and the offset-table protocol for dynamic objects.

use crate::composite::fixed_bytes::FixedBlob;
use crate::constants::{BYTES, BYTES_PER_LENGTH_OFFSET, MAX_PREALLOCATED_ITEMS, READ_CHUNK_SIZE};
use crate::pool::{DECODERS, Recycle};
use crate::{NewableObject, Object, SSZError};
use alloy_primitives::U256;
use core::any::type_name;
use std::io::Read;
use std::mem;
use tracing::trace;

/// Offset table bookkeeping for one object being decoded.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Byte budget of the whole object.
    size: u32,
    /// Expected value of the first offset.
    fixed: u32,
    /// Index in the shared offset stack where this object's offsets start.
    offsets: usize,
    /// Index of the next payload to hand out.
    next: usize,
}

/// Reusable allocations of a [`Decoder`], recycled through the decoder pool.
#[derive(Debug, Default)]
pub(crate) struct DecoderContext {
    frames: Vec<Frame>,
    offsets: Vec<u32>,
    scratch: Vec<u8>,
}

impl Recycle for DecoderContext {
    fn reset(&mut self) {
        self.frames.clear();
        self.offsets.clear();
        self.scratch.clear();
    }

    fn retained_bytes(&self) -> usize {
        self.scratch.capacity()
            + self.offsets.capacity() * mem::size_of::<u32>()
            + self.frames.capacity() * mem::size_of::<Frame>()
    }
}

/// Reads SSZ objects out of a byte source.
///
/// Every read is charged against the byte budget of the object currently being decoded; the
/// budget, not the source, decides how far decoding may go. The first error is latched and
/// turns every later operation into a no-op.
///
/// Dynamic objects read their fixed section first, with [`Decoder::decode_offset`] in place
/// of each dynamic field, and then the payloads in the same order
/// (`decode_dynamic_bytes`, `decode_dynamic_object`, ...). Each payload gets the span between
/// its offset and the next one as its own budget.
pub struct Decoder<'a> {
    input: &'a mut dyn Read,
    length: u32,
    err: Option<SSZError>,
    ctx: DecoderContext,
}

impl<'a> Decoder<'a> {
    /// Binds a pooled decoder to `input` with a budget of `size` bytes.
    pub fn new(input: &'a mut dyn Read, size: u32) -> Self {
        Self {
            input,
            length: size,
            err: None,
            ctx: DECODERS.acquire(),
        }
    }

    /// Bytes left in the budget of the object being decoded.
    pub fn remaining(&self) -> u32 {
        self.length
    }

    /// Returns the latched error, if any.
    pub fn error(&self) -> Option<&SSZError> {
        self.err.as_ref()
    }

    /// Latches `err` unless an earlier error is already held.
    pub fn fail(&mut self, err: SSZError) {
        if self.err.is_none() {
            trace!(%err, remaining = self.length, "ssz decoding aborted");
            self.err = Some(err);
        }
    }

    /// Releases the decoder and returns the first error encountered.
    pub fn finish(mut self) -> Result<(), SSZError> {
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn latch<T>(&mut self, res: Result<T, SSZError>) -> Option<T> {
        match res {
            Ok(value) => Some(value),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn check_budget(&self, requested: u64) -> Result<(), SSZError> {
        if requested > u64::from(self.length) {
            return Err(SSZError::BudgetExceeded {
                requested,
                available: self.length,
            });
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), SSZError> {
        let requested = buf.len() as u64;
        self.check_budget(requested)?;
        self.input.read_exact(buf).map_err(SSZError::from_read)?;
        self.length -= requested as u32;
        Ok(())
    }

    fn read_u32(&mut self) -> Result<u32, SSZError> {
        let mut buf = [0u8; 4];
        self.read(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Reads into `buf` unless an error is latched; returns whether the read happened.
    fn read_latched(&mut self, buf: &mut [u8]) -> bool {
        if self.err.is_some() {
            return false;
        }
        let res = self.read(buf);
        self.latch(res).is_some()
    }

    /// Reads `size` bytes into the pooled scratch buffer and hands them to `take`.
    fn read_staged(&mut self, size: usize, take: impl FnOnce(&[u8])) {
        if self.err.is_some() {
            return;
        }
        if let Err(err) = self.check_budget(size as u64) {
            self.fail(err);
            return;
        }
        let mut scratch = mem::take(&mut self.ctx.scratch);
        scratch.clear();
        scratch.resize(size, 0);
        if self.read_latched(&mut scratch) {
            take(&scratch);
        }
        self.ctx.scratch = scratch;
    }

    /// Decodes a boolean, rejecting any byte other than 0 or 1.
    pub fn decode_bool(&mut self, value: &mut bool) {
        let mut buf = [0u8; 1];
        if !self.read_latched(&mut buf) {
            return;
        }
        match buf[0] {
            0 => *value = false,
            1 => *value = true,
            byte => self.fail(SSZError::InvalidBooleanByte(byte)),
        }
    }

    /// Decodes a u8.
    pub fn decode_u8(&mut self, value: &mut u8) {
        let mut buf = [0u8; 1];
        if self.read_latched(&mut buf) {
            *value = buf[0];
        }
    }

    /// Decodes a little-endian u16.
    pub fn decode_u16(&mut self, value: &mut u16) {
        let mut buf = [0u8; 2];
        if self.read_latched(&mut buf) {
            *value = u16::from_le_bytes(buf);
        }
    }

    /// Decodes a little-endian u32.
    pub fn decode_u32(&mut self, value: &mut u32) {
        let mut buf = [0u8; 4];
        if self.read_latched(&mut buf) {
            *value = u32::from_le_bytes(buf);
        }
    }

    /// Decodes a little-endian u64.
    pub fn decode_u64(&mut self, value: &mut u64) {
        let mut buf = [0u8; 8];
        if self.read_latched(&mut buf) {
            *value = u64::from_le_bytes(buf);
        }
    }

    /// Decodes a little-endian U256.
    pub fn decode_u256(&mut self, value: &mut U256) {
        let mut buf = [0u8; BYTES];
        if self.read_latched(&mut buf) {
            *value = U256::from_le_bytes(buf);
        }
    }

    /// Decodes a fixed-size binary blob.
    pub fn decode_bytes_fixed<B: FixedBlob>(&mut self, blob: &mut B) {
        self.read_latched(blob.as_blob_mut());
    }

    /// Decodes a fixed-size array of u64s.
    pub fn decode_u64s_fixed<const N: usize>(&mut self, values: &mut [u64; N]) {
        self.read_staged(N * 8, |buf| {
            for (value, chunk) in values.iter_mut().zip(buf.chunks_exact(8)) {
                let mut word = [0u8; 8];
                word.copy_from_slice(chunk);
                *value = u64::from_le_bytes(word);
            }
        });
    }

    /// Decodes a fixed-size array of fixed-size binary blobs.
    pub fn decode_bytes_array<B: FixedBlob, const N: usize>(&mut self, blobs: &mut [B; N]) {
        self.read_staged(N * B::LEN, |buf| {
            for (blob, chunk) in blobs.iter_mut().zip(buf.chunks_exact(B::LEN)) {
                blob.as_blob_mut().copy_from_slice(chunk);
            }
        });
    }

    /// Decodes a fixed-size bit vector of `bits.len()` bits, rejecting set padding bits.
    pub fn decode_bits_fixed(&mut self, bits: &mut [bool]) {
        let size = bits.len();
        let mut padding = None;
        self.read_staged(size.div_ceil(8), |buf| {
            if let Some(&last) = buf.last() {
                if size % 8 != 0 && last >> (size % 8) != 0 {
                    padding = Some(last);
                    return;
                }
            }
            for (index, bit) in bits.iter_mut().enumerate() {
                *bit = (buf[index / 8] >> (index % 8)) & 1 == 1;
            }
        });
        if let Some(byte) = padding {
            self.fail(SSZError::InvalidBitvector { byte, size });
        }
    }

    /// Decodes a static object inline, out of the fixed section of its parent.
    pub fn decode_static_object<T: Object>(&mut self, obj: &mut T) {
        if self.err.is_some() {
            return;
        }
        obj.decode_ssz(self);
    }

    /// Decodes `obj` from the whole remaining budget.
    pub fn decode_object<T: Object>(&mut self, obj: &mut T) {
        if self.err.is_some() {
            return;
        }
        let span = self.length;
        let res = self.decode_in_span(obj, span);
        self.latch(res);
    }

    /// Decodes `obj` from exactly the next `span` bytes, as an object of its own.
    fn decode_in_span<T: Object>(&mut self, obj: &mut T, span: u32) -> Result<(), SSZError> {
        self.check_budget(u64::from(span))?;
        let outer = self.length;
        self.length = span;
        self.ctx.frames.push(Frame {
            size: span,
            fixed: obj.fixed_size_ssz(),
            offsets: self.ctx.offsets.len(),
            next: 0,
        });

        obj.decode_ssz(self);

        if let Some(frame) = self.ctx.frames.pop() {
            self.ctx.offsets.truncate(frame.offsets);
        }
        let left = self.length;
        self.length = outer - span;
        if self.err.is_none() && left != 0 {
            return Err(SSZError::UnconsumedBytes { left });
        }
        Ok(())
    }

    /// Reads the offset of a dynamic field from the fixed section.
    pub fn decode_offset(&mut self) {
        if self.err.is_some() {
            return;
        }
        let res = self.try_decode_offset();
        self.latch(res);
    }

    fn try_decode_offset(&mut self) -> Result<(), SSZError> {
        if (self.length as usize) < BYTES_PER_LENGTH_OFFSET {
            return Err(SSZError::ShortOffset {
                available: self.length,
            });
        }
        let offset = self.read_u32()?;
        let frame = *self.ctx.frames.last().ok_or(SSZError::MissingOffset)?;
        match self.ctx.offsets[frame.offsets..].last() {
            None if offset != frame.fixed => {
                return Err(SSZError::FirstOffsetMismatch {
                    expected: frame.fixed,
                    got: offset,
                });
            }
            Some(&previous) if offset < previous => {
                return Err(SSZError::OffsetOrderingViolation {
                    previous,
                    next: offset,
                });
            }
            _ => {}
        }
        if offset > frame.size {
            return Err(SSZError::OffsetOutOfBounds {
                offset,
                limit: frame.size,
            });
        }
        self.ctx.offsets.push(offset);
        Ok(())
    }

    /// Hands out the span of the next payload of the current object.
    fn next_span(&mut self) -> Result<u32, SSZError> {
        let frame = self.ctx.frames.last_mut().ok_or(SSZError::MissingOffset)?;
        let count = self.ctx.offsets.len() - frame.offsets;
        if frame.next >= count {
            return Err(SSZError::MissingOffset);
        }
        let start = self.ctx.offsets[frame.offsets + frame.next];
        let end = if frame.next + 1 < count {
            self.ctx.offsets[frame.offsets + frame.next + 1]
        } else {
            frame.size
        };
        frame.next += 1;

        let position = frame.size - self.length;
        if position != start {
            return Err(SSZError::PayloadMisaligned {
                offset: start,
                position,
            });
        }
        Ok(end - start)
    }

    /// Decodes the payload of a dynamic byte list of at most `max_size` bytes.
    pub fn decode_dynamic_bytes(&mut self, blob: &mut Vec<u8>, max_size: usize) {
        if self.err.is_some() {
            return;
        }
        let res = self.try_decode_dynamic_bytes(blob, max_size);
        self.latch(res);
    }

    fn try_decode_dynamic_bytes(
        &mut self,
        blob: &mut Vec<u8>,
        max_size: usize,
    ) -> Result<(), SSZError> {
        let span = self.next_span()?;
        if span as usize > max_size {
            return Err(SSZError::MaxItemsExceeded {
                kind: "bytes",
                items: span as usize,
                max: max_size,
            });
        }
        self.check_budget(u64::from(span))?;
        blob.clear();

        // Grow with the bytes that actually arrive.
        let mut left = span as usize;
        while left > 0 {
            let start = blob.len();
            let chunk = left.min(READ_CHUNK_SIZE);
            blob.resize(start + chunk, 0);
            self.read(&mut blob[start..])?;
            left -= chunk;
        }
        Ok(())
    }

    /// Decodes the payload of a dynamic object.
    pub fn decode_dynamic_object<T: Object>(&mut self, obj: &mut T) {
        if self.err.is_some() {
            return;
        }
        let res = self
            .next_span()
            .and_then(|span| self.decode_in_span(obj, span));
        self.latch(res);
    }

    /// Derives how many dynamic items a list region of `limit` bytes holds from its first
    /// offset, consuming that offset.
    fn decode_slice_length(&mut self, limit: u32) -> Result<usize, SSZError> {
        if limit == 0 {
            return Ok(0);
        }
        if (limit as usize) < BYTES_PER_LENGTH_OFFSET {
            return Err(SSZError::ShortOffset { available: limit });
        }
        let first = self.read_u32()?;
        if first == 0 || first as usize % BYTES_PER_LENGTH_OFFSET != 0 {
            return Err(SSZError::MalformedCounterOffset { offset: first });
        }
        Ok(first as usize / BYTES_PER_LENGTH_OFFSET)
    }

    /// Reads the `count - 1` offsets following an already consumed first offset onto the
    /// offset stack and returns where they start.
    fn decode_offset_table(&mut self, count: usize, limit: u32) -> Result<usize, SSZError> {
        let first = (count * BYTES_PER_LENGTH_OFFSET) as u32;
        if first > limit {
            return Err(SSZError::OffsetOutOfBounds {
                offset: first,
                limit,
            });
        }
        let base = self.ctx.offsets.len();
        self.ctx.offsets.push(first);

        let mut previous = first;
        for _ in 1..count {
            let offset = self.read_u32()?;
            if offset < previous {
                return Err(SSZError::OffsetOrderingViolation {
                    previous,
                    next: offset,
                });
            }
            if offset > limit {
                return Err(SSZError::OffsetOutOfBounds { offset, limit });
            }
            self.ctx.offsets.push(offset);
            previous = offset;
        }
        Ok(base)
    }

    /// Span of item `index` of the offset table starting at `base`.
    fn item_span(&self, base: usize, index: usize, count: usize, limit: u32) -> u32 {
        let start = self.ctx.offsets[base + index];
        let end = if index + 1 < count {
            self.ctx.offsets[base + index + 1]
        } else {
            limit
        };
        end - start
    }

    /// Decodes a list of dynamic objects spanning the whole remaining budget, permitting at
    /// most `max_items` of them.
    pub fn decode_slice_of_dynamic_objects<T: NewableObject>(
        &mut self,
        items: &mut Vec<T>,
        max_items: usize,
    ) {
        if self.err.is_some() {
            return;
        }
        let limit = self.length;
        let base = self.ctx.offsets.len();
        let res = self.decode_slice(items, limit, max_items);
        self.ctx.offsets.truncate(base);
        self.latch(res);
    }

    fn decode_slice<T: NewableObject>(
        &mut self,
        items: &mut Vec<T>,
        limit: u32,
        max_items: usize,
    ) -> Result<(), SSZError> {
        items.clear();
        let count = self.decode_slice_length(limit)?;
        if count > max_items {
            return Err(SSZError::MaxItemsExceeded {
                kind: type_name::<T>(),
                items: count,
                max: max_items,
            });
        }
        if count == 0 {
            return Ok(());
        }
        let base = self.decode_offset_table(count, limit)?;

        items.reserve(count.min(MAX_PREALLOCATED_ITEMS));
        for index in 0..count {
            let span = self.item_span(base, index, count, limit);
            let mut item = T::new_ssz();
            self.decode_in_span(&mut item, span)?;
            if self.err.is_some() {
                break;
            }
            items.push(item);
        }
        Ok(())
    }

    /// Decodes exactly `items.len()` dynamic objects in place from the whole remaining
    /// budget.
    pub fn decode_array_of_dynamic_objects<T: Object>(&mut self, items: &mut [T]) {
        if self.err.is_some() {
            return;
        }
        let limit = self.length;
        let base = self.ctx.offsets.len();
        let res = self.decode_array(items, limit);
        self.ctx.offsets.truncate(base);
        self.latch(res);
    }

    fn decode_array<T: Object>(&mut self, items: &mut [T], limit: u32) -> Result<(), SSZError> {
        let count = self.decode_slice_length(limit)?;
        if count != items.len() {
            return Err(SSZError::InvalidLength {
                expected: items.len(),
                got: count,
            });
        }
        if count == 0 {
            return Ok(());
        }
        let base = self.decode_offset_table(count, limit)?;

        for (index, item) in items.iter_mut().enumerate() {
            let span = self.item_span(base, index, count, limit);
            self.decode_in_span(item, span)?;
            if self.err.is_some() {
                break;
            }
        }
        Ok(())
    }

    /// Decodes a list of static objects spanning the whole remaining budget, permitting at
    /// most `max_items` of them.
    pub fn decode_slice_of_static_objects<T: NewableObject>(
        &mut self,
        items: &mut Vec<T>,
        max_items: usize,
    ) {
        if self.err.is_some() {
            return;
        }
        let res = self.try_decode_slice_of_static_objects(items, max_items);
        self.latch(res);
    }

    fn try_decode_slice_of_static_objects<T: NewableObject>(
        &mut self,
        items: &mut Vec<T>,
        max_items: usize,
    ) -> Result<(), SSZError> {
        items.clear();
        let size = self.length;
        if size == 0 {
            return Ok(());
        }
        let item = T::new_ssz().size_ssz();
        if item == 0 || size % item != 0 {
            return Err(SSZError::IndivisibleStaticList { size, item });
        }
        let count = (size / item) as usize;
        if count > max_items {
            return Err(SSZError::MaxItemsExceeded {
                kind: type_name::<T>(),
                items: count,
                max: max_items,
            });
        }

        items.reserve(count.min(MAX_PREALLOCATED_ITEMS));
        for _ in 0..count {
            let mut value = T::new_ssz();
            value.decode_ssz(self);
            if self.err.is_some() {
                break;
            }
            items.push(value);
        }
        Ok(())
    }
}

impl Drop for Decoder<'_> {
    fn drop(&mut self) {
        DECODERS.release(mem::take(&mut self.ctx));
    }
}
