//! OSS store state.
//!
//! - [`OssServiceState`] -- top-level state owning all buckets
//! - [`OssBucket`] -- per-bucket objects and multipart uploads
//! - [`OssObject`] / [`ObjectMetadata`] -- a stored object and its metadata
//! - [`MultipartUpload`] / [`UploadPart`] -- multipart upload tracking
//!
//! # Thread Safety
//!
//! All types are `Send + Sync`. The bucket table and each bucket's upload
//! table are `DashMap`s; each bucket's objects sit behind a
//! `parking_lot::RwLock`, so a permission check and the write it guards happen
//! under one lock.

pub(crate) mod bucket;
pub(crate) mod multipart;
pub(crate) mod object;
pub(crate) mod service;

pub use bucket::{ListResult, OssBucket};
pub use multipart::{MultipartUpload, UploadPart};
pub use object::{ObjectMetadata, OssObject};
pub use service::OssServiceState;
