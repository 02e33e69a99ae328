use std::collections::HashMap;

use bytes::Bytes;

use crate::types::{CannedAccessControlList, PartETag};

/// InitiateMultipartUpload input.
#[derive(Debug, Clone, Default)]
pub struct InitiateMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<CannedAccessControlList>,
    /// HTTP header: `Content-Type`.
    pub content_type: Option<String>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// UploadPart input.
#[derive(Debug, Clone, Default)]
pub struct UploadPartInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
    /// HTTP query: `partNumber`.
    pub part_number: u32,
    /// HTTP payload body.
    pub body: Bytes,
}

/// CompleteMultipartUpload input.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
    /// HTTP payload body.
    pub parts: Vec<PartETag>,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<CannedAccessControlList>,
}

/// AbortMultipartUpload input.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}

/// ListParts input.
#[derive(Debug, Clone, Default)]
pub struct ListPartsInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}
