//! OSS header names shared by the server and the client.

/// Canned ACL directive on object writes and ACL updates.
pub const OBJECT_ACL: &str = "x-oss-object-acl";

/// Prefix of user metadata headers.
pub const META_PREFIX: &str = "x-oss-meta-";

/// How an object was created: `Normal`, `Appendable` or `Multipart`.
pub const OBJECT_TYPE: &str = "x-oss-object-type";

/// Position at which the next append must start.
pub const NEXT_APPEND_POSITION: &str = "x-oss-next-append-position";

/// Source of a copy, `/{bucket}/{key}`.
pub const COPY_SOURCE: &str = "x-oss-copy-source";

/// `COPY` or `REPLACE` metadata handling on copy.
pub const METADATA_DIRECTIVE: &str = "x-oss-metadata-directive";

/// Request ID echoed on every response.
pub const REQUEST_ID: &str = "x-oss-request-id";
