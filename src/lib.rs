//! Streaming SSZ codec: encodes objects into any byte sink and decodes them back from any
//! byte source, guarding every offset and length against the caller-supplied byte budget.

pub mod basic;

pub mod composite;
pub use composite::*;

pub mod ssz;
pub use ssz::*;

pub mod error;
pub use error::*;

pub mod constants;
pub use constants::*;

pub mod encoder;
pub use encoder::Encoder;

pub mod decoder;
pub use decoder::Decoder;

pub mod pool;

pub mod codec;
pub use codec::*;
