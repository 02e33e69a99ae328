use crate::types::ObjectSummary;

/// CreateBucket output.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketOutput {
    /// HTTP header: `Location`.
    pub location: String,
}

/// DeleteBucket output.
#[derive(Debug, Clone, Default)]
pub struct DeleteBucketOutput {}

/// ListObjects output.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsOutput {
    /// Bucket name.
    pub name: String,
    /// Prefix filter echoed back.
    pub prefix: String,
    /// Marker echoed back.
    pub marker: String,
    /// Page size.
    pub max_keys: usize,
    /// Whether more keys follow.
    pub is_truncated: bool,
    /// Marker for the next page, set when truncated.
    pub next_marker: Option<String>,
    /// Matching objects in key order.
    pub contents: Vec<ObjectSummary>,
}
