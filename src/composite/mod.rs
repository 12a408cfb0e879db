//! List of composite modules.

pub mod bitvector;
pub use bitvector::*;

pub mod fixed_bytes;
pub use fixed_bytes::*;

pub mod fixed_vectors;
pub use fixed_vectors::*;

pub mod ssz_list;
pub use ssz_list::*;
