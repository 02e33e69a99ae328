//! Wire model for the RustOSS object store.
//!
//! This crate holds the types shared by the server, the HTTP layer and the
//! client: object permissions and canned ACLs, per-operation input and output
//! structs, the operation enum, and the OSS error model.

pub mod error;
pub mod headers;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use error::{OssError, OssErrorCode};
pub use operations::OssOperation;
pub use types::{CannedAccessControlList, ObjectPermission, ObjectType};
