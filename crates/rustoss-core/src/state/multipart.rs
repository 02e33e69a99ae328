//! Multipart upload state.
//!
//! A [`MultipartUpload`] captures the ACL and metadata given at initiation and
//! accumulates [`UploadPart`] entries until it is completed or aborted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rustoss_model::types::{CannedAccessControlList, Owner, PartSummary};

use super::object::ObjectMetadata;

/// An in-progress multipart upload.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    /// Upload ID.
    pub upload_id: String,
    /// The key the completed object will be stored under.
    pub key: String,
    /// When the upload was initiated.
    pub initiated: DateTime<Utc>,
    /// Initiator.
    pub owner: Owner,
    /// ACL directive given at initiation, used when completion carries none.
    pub acl: Option<CannedAccessControlList>,
    /// Metadata applied to the completed object.
    pub metadata: ObjectMetadata,
    /// Uploaded parts keyed by part number.
    pub parts: BTreeMap<u32, UploadPart>,
}

impl MultipartUpload {
    /// Create a new multipart upload with no parts.
    #[must_use]
    pub fn new(
        upload_id: String,
        key: String,
        owner: Owner,
        acl: Option<CannedAccessControlList>,
        metadata: ObjectMetadata,
    ) -> Self {
        Self {
            upload_id,
            key,
            initiated: Utc::now(),
            owner,
            acl,
            metadata,
            parts: BTreeMap::new(),
        }
    }

    /// Insert or replace a part.
    pub fn put_part(&mut self, part: UploadPart) {
        self.parts.insert(part.part_number, part);
    }

    /// Look up a part by number.
    #[must_use]
    pub fn get_part(&self, part_number: u32) -> Option<&UploadPart> {
        self.parts.get(&part_number)
    }

    /// Parts in ascending part-number order.
    #[must_use]
    pub fn part_summaries(&self) -> Vec<PartSummary> {
        self.parts
            .values()
            .map(|p| PartSummary {
                part_number: p.part_number,
                etag: p.etag.clone(),
                size: p.size,
                last_modified: p.last_modified,
            })
            .collect()
    }
}

/// A single uploaded part.
#[derive(Debug, Clone)]
pub struct UploadPart {
    /// Part number, 1-based.
    pub part_number: u32,
    /// Quoted ETag of the part body.
    pub etag: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload time.
    pub last_modified: DateTime<Utc>,
}
