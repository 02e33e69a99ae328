//! Async HTTP client for the RustOSS object store.
//!
//! [`OssClient`] speaks the path-style REST API served by `rustoss-server`.
//! Every write takes an optional [`CannedAccessControlList`] directive sent as
//! `x-oss-object-acl`; ACL reads come back as [`ObjectPermission`]. The
//! `*_with_options` variants also carry a content type and user metadata
//! through [`ObjectOptions`].
//!
//! Service failures surface as [`ClientError::Service`] with the OSS code and
//! message unchanged. Calls rejected before sending, such as
//! [`OssClient::set_object_acl`] without an ACL, fail with
//! [`ClientError::InvalidArgument`].
//!
//! [`CannedAccessControlList`]: rustoss_model::CannedAccessControlList
//! [`ObjectPermission`]: rustoss_model::ObjectPermission

pub mod client;
pub mod error;
pub mod options;

pub use client::OssClient;
pub use error::ClientError;
pub use options::ObjectOptions;
