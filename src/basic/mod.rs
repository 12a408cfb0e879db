//! SSZ basic types.

pub mod boolean;

pub mod uint;
