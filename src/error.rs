//! Error variants for SSZ.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SSZError {
    #[error("short offset: {available} bytes available")]
    ShortOffset { available: u32 },

    #[error("malformed counter offset {offset}: must be a non-zero multiple of the offset width")]
    MalformedCounterOffset { offset: u32 },

    #[error("maximum items exceeded: {kind} has {items} items, but only {max} permitted")]
    MaxItemsExceeded {
        kind: &'static str,
        items: usize,
        max: usize,
    },

    #[error("offset ordering violation: {next} follows {previous}")]
    OffsetOrderingViolation { previous: u32, next: u32 },

    #[error("offset {offset} out of bounds for {limit} bytes")]
    OffsetOutOfBounds { offset: u32, limit: u32 },

    #[error("first offset mismatch: expected {expected}, got {got}")]
    FirstOffsetMismatch { expected: u32, got: u32 },

    #[error("dynamic field has no matching offset")]
    MissingOffset,

    #[error("payload expected at offset {offset}, stream is at {position}")]
    PayloadMisaligned { offset: u32, position: u32 },

    #[error("static list of {size} bytes is not a multiple of item size {item}")]
    IndivisibleStaticList { size: u32, item: u32 },

    #[error("object left {left} bytes of its span unconsumed")]
    UnconsumedBytes { left: u32 },

    #[error("byte budget exceeded: requested {requested}, {available} available")]
    BudgetExceeded { requested: u64, available: u32 },

    #[error("stream truncated before the expected bytes were read")]
    TruncatedStream,

    #[error("Invalid byte {0} for boolean deserialization")]
    InvalidBooleanByte(u8),

    #[error("Invalid bitvector: byte {byte:#04x} sets padding bits past bit {size}")]
    InvalidBitvector { byte: u8, size: usize },

    #[error("Invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("sink write failed: {0}")]
    SinkWrite(#[source] io::Error),

    #[error("source read failed: {0}")]
    SourceRead(#[source] io::Error),
}

impl SSZError {
    /// Classifies an error coming out of the byte source.
    pub(crate) fn from_read(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => SSZError::TruncatedStream,
            _ => SSZError::SourceRead(err),
        }
    }
}
