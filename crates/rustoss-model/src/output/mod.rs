//! Per-operation output structs.

mod bucket;
mod multipart;
mod object;

pub use bucket::*;
pub use multipart::*;
pub use object::*;
