use std::collections::HashMap;

use bytes::Bytes;

use crate::types::{CannedAccessControlList, MetadataDirective};

/// PutObject input.
#[derive(Debug, Clone, Default)]
pub struct PutObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body.
    pub body: Bytes,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<CannedAccessControlList>,
    /// HTTP header: `Content-Type`.
    pub content_type: Option<String>,
    /// HTTP header: `Content-MD5`.
    pub content_md5: Option<String>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// AppendObject input.
#[derive(Debug, Clone, Default)]
pub struct AppendObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `position`.
    pub position: u64,
    /// HTTP payload body.
    pub body: Bytes,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<CannedAccessControlList>,
    /// HTTP header: `Content-Type`.
    pub content_type: Option<String>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// CopyObject input.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `x-oss-copy-source`.
    pub copy_source: String,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<CannedAccessControlList>,
    /// HTTP header: `Content-Type`.
    pub content_type: Option<String>,
    /// HTTP header: `x-oss-metadata-directive`.
    pub metadata_directive: Option<MetadataDirective>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// GetObject input.
#[derive(Debug, Clone, Default)]
pub struct GetObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
}

/// HeadObject input.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
}

/// DeleteObject input.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
}

/// GetObjectAcl input.
#[derive(Debug, Clone, Default)]
pub struct GetObjectAclInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
}

/// PutObjectAcl input.
#[derive(Debug, Clone, Default)]
pub struct PutObjectAclInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `x-oss-object-acl`. Required.
    pub acl: Option<CannedAccessControlList>,
}
