//! Per-operation input structs.
//!
//! Field docs name where each value travels on the wire.

mod bucket;
mod multipart;
mod object;

pub use bucket::*;
pub use multipart::*;
pub use object::*;
