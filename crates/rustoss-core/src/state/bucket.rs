//! OSS bucket state.
//!
//! An [`OssBucket`] holds its objects behind a `parking_lot::RwLock` and its
//! in-progress multipart uploads in a `DashMap` keyed by upload ID.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use rustoss_model::types::Owner;

use super::multipart::MultipartUpload;
use super::object::OssObject;

/// Result of a `ListObjects` scan.
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Matching objects in key order.
    pub objects: Vec<OssObject>,
    /// Whether more keys remain after this page.
    pub is_truncated: bool,
    /// The last key returned, when truncated.
    pub next_marker: Option<String>,
}

/// A bucket with its objects and multipart uploads.
pub struct OssBucket {
    /// Bucket name.
    pub name: String,
    /// Region the bucket reports.
    pub region: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// Bucket owner.
    pub owner: Owner,
    /// Objects keyed by object key.
    pub objects: RwLock<BTreeMap<String, OssObject>>,
    /// In-progress multipart uploads, keyed by upload ID.
    pub multipart_uploads: DashMap<String, MultipartUpload>,
}

impl std::fmt::Debug for OssBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OssBucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("creation_date", &self.creation_date)
            .field("object_count", &self.objects.read().len())
            .field("upload_count", &self.multipart_uploads.len())
            .finish_non_exhaustive()
    }
}

impl OssBucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new(name: String, region: String, owner: Owner) -> Self {
        Self {
            name,
            region,
            creation_date: Utc::now(),
            owner,
            objects: RwLock::new(BTreeMap::new()),
            multipart_uploads: DashMap::new(),
        }
    }

    /// Whether the bucket holds no objects.
    ///
    /// In-progress uploads do not count; they are dropped with the bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Snapshot of the object stored under `key`.
    #[must_use]
    pub fn get_object(&self, key: &str) -> Option<OssObject> {
        self.objects.read().get(key).cloned()
    }

    /// List objects whose keys start with `prefix` and sort after `marker`.
    #[must_use]
    pub fn list_objects(&self, prefix: &str, marker: &str, max_keys: usize) -> ListResult {
        let objects = self.objects.read();
        let lower = if marker.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(marker)
        };

        let mut matching = objects
            .range::<str, _>((lower, Bound::Unbounded))
            .map(|(_, obj)| obj)
            .filter(|obj| obj.key.starts_with(prefix));

        let page: Vec<OssObject> = matching.by_ref().take(max_keys).cloned().collect();
        // An empty page has no marker to resume from.
        let is_truncated = !page.is_empty() && matching.next().is_some();
        let next_marker = if is_truncated {
            page.last().map(|obj| obj.key.clone())
        } else {
            None
        };

        ListResult {
            objects: page,
            is_truncated,
            next_marker,
        }
    }
}
