//! Stored object records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rustoss_model::types::{ObjectPermission, ObjectSummary, ObjectType, Owner};

/// Default content type for bodies uploaded without one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata captured when an object is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// `Content-Type` of the body.
    pub content_type: String,
    /// User metadata from `x-oss-meta-*` headers, keyed without the prefix.
    pub user_metadata: HashMap<String, String>,
}

impl Default for ObjectMetadata {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            user_metadata: HashMap::new(),
        }
    }
}

impl ObjectMetadata {
    /// Build metadata from request values, defaulting the content type.
    #[must_use]
    pub fn new(content_type: Option<String>, user_metadata: HashMap<String, String>) -> Self {
        Self {
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
            user_metadata,
        }
    }
}

/// An object stored in a bucket.
///
/// The body lives in [`crate::storage::InMemoryStorage`]; this record holds
/// everything else, including the object's access permission.
#[derive(Debug, Clone)]
pub struct OssObject {
    /// Object key.
    pub key: String,
    /// Quoted ETag.
    pub etag: String,
    /// Body size in bytes.
    pub size: u64,
    /// Last write time.
    pub last_modified: DateTime<Utc>,
    /// How the object was created.
    pub object_type: ObjectType,
    /// Stored access permission. Never [`ObjectPermission::Unknown`].
    pub acl: ObjectPermission,
    /// Content type and user metadata.
    pub metadata: ObjectMetadata,
    /// Object owner.
    pub owner: Owner,
}

impl OssObject {
    /// The offset the next append must use.
    ///
    /// Only appendable objects report one.
    #[must_use]
    pub fn next_append_position(&self) -> Option<u64> {
        (self.object_type == ObjectType::Appendable).then_some(self.size)
    }

    /// Summary entry for `ListObjects`.
    #[must_use]
    pub fn summary(&self) -> ObjectSummary {
        ObjectSummary {
            key: self.key.clone(),
            etag: self.etag.clone(),
            size: self.size,
            last_modified: self.last_modified,
            object_type: self.object_type,
            owner: self.owner.clone(),
        }
    }
}
