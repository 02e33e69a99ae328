//! OSS operation handlers.
//!
//! Each submodule exposes `handle_*` methods on [`crate::provider::RustOss`].
//! The server binary bridges these handlers to the HTTP layer by implementing
//! the `OssHandler` trait from `rustoss-http`.

pub mod bucket;
pub mod multipart;
pub mod object;
pub mod object_acl;
