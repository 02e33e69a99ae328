use crate::types::PartSummary;

/// InitiateMultipartUpload output.
#[derive(Debug, Clone, Default)]
pub struct InitiateMultipartUploadOutput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Upload ID.
    pub upload_id: String,
}

/// UploadPart output.
#[derive(Debug, Clone, Default)]
pub struct UploadPartOutput {
    /// HTTP header: `ETag`.
    pub etag: String,
}

/// CompleteMultipartUpload output.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadOutput {
    /// URL of the assembled object.
    pub location: String,
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Quoted multipart ETag.
    pub etag: String,
}

/// AbortMultipartUpload output.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadOutput {}

/// ListParts output.
#[derive(Debug, Clone, Default)]
pub struct ListPartsOutput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Upload ID.
    pub upload_id: String,
    /// Uploaded parts in part-number order.
    pub parts: Vec<PartSummary>,
}
