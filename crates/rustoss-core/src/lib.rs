//! In-memory OSS object store for RustOSS.
//!
//! This crate owns buckets, objects and multipart uploads, and decides the
//! access permission stored against every object as it is written.
//!
//! # Architecture
//!
//! ```text
//! rustoss-http (routing, XML, headers)
//!        |
//!        v
//! RustOss (handle_* operation methods)
//!        |
//!        +--> acl::resolve_on_write (permission per write)
//!        v
//!   OssServiceState (buckets, objects, uploads)
//!        |
//!        v
//!   InMemoryStorage (object and part bodies)
//! ```

pub mod acl;
pub mod checksums;
pub mod config;
pub mod error;
mod ops;
pub mod provider;
pub mod state;
pub mod storage;
pub mod utils;
pub mod validation;

pub use config::OssConfig;
pub use provider::RustOss;
