use std::collections::HashMap;

use bytes::Bytes;

use crate::types::{ObjectPermission, ObjectType, Owner};

/// PutObject output.
#[derive(Debug, Clone, Default)]
pub struct PutObjectOutput {
    /// HTTP header: `ETag`.
    pub etag: String,
}

/// AppendObject output.
#[derive(Debug, Clone, Default)]
pub struct AppendObjectOutput {
    /// HTTP header: `ETag`.
    pub etag: String,
    /// HTTP header: `x-oss-next-append-position`.
    pub next_append_position: u64,
}

/// CopyObject output.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectOutput {
    /// HTTP payload body: `ETag`.
    pub etag: String,
    /// HTTP payload body: `LastModified`.
    pub last_modified: chrono::DateTime<chrono::Utc>,
}

/// Object metadata returned by GetObject and HeadObject.
#[derive(Debug, Clone, Default)]
pub struct ObjectMetadata {
    /// HTTP header: `Content-Length`.
    pub content_length: u64,
    /// HTTP header: `Content-Type`.
    pub content_type: String,
    /// HTTP header: `ETag`.
    pub etag: String,
    /// HTTP header: `Last-Modified`.
    pub last_modified: chrono::DateTime<chrono::Utc>,
    /// HTTP header: `x-oss-object-type`.
    pub object_type: ObjectType,
    /// HTTP header: `x-oss-next-append-position`, appendable objects only.
    pub next_append_position: Option<u64>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// GetObject output.
#[derive(Debug, Clone, Default)]
pub struct GetObjectOutput {
    /// Object metadata headers.
    pub metadata: ObjectMetadata,
    /// HTTP payload body.
    pub body: Bytes,
}

/// HeadObject output.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectOutput {
    /// Object metadata headers.
    pub metadata: ObjectMetadata,
}

/// DeleteObject output.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectOutput {}

/// GetObjectAcl output.
#[derive(Debug, Clone, Default)]
pub struct GetObjectAclOutput {
    /// HTTP payload body: `Owner`.
    pub owner: Owner,
    /// HTTP payload body: `AccessControlList/Grant`.
    pub permission: ObjectPermission,
}

/// PutObjectAcl output.
#[derive(Debug, Clone, Default)]
pub struct PutObjectAclOutput {}
