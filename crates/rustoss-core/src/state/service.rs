//! Top-level OSS service state.
//!
//! [`OssServiceState`] owns the bucket table. All operations are thread-safe
//! via `DashMap`.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use rustoss_model::types::Owner;
use tracing::{debug, info};

use crate::error::OssServiceError;

use super::bucket::OssBucket;

/// Top-level service state holding all buckets.
pub struct OssServiceState {
    /// Bucket name to `OssBucket` mapping.
    buckets: DashMap<String, OssBucket>,
}

impl std::fmt::Debug for OssServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OssServiceState")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for OssServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl OssServiceState {
    /// Create a new, empty service state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Create a new bucket.
    ///
    /// # Errors
    ///
    /// Returns [`OssServiceError::BucketAlreadyExists`] if the name is taken.
    pub fn create_bucket(
        &self,
        name: String,
        region: String,
        owner: Owner,
    ) -> Result<(), OssServiceError> {
        match self.buckets.entry(name) {
            Entry::Occupied(entry) => Err(OssServiceError::BucketAlreadyExists {
                bucket: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(OssBucket::new(name.clone(), region, owner));
                info!(bucket = %name, "bucket created");
                Ok(())
            }
        }
    }

    /// Delete a bucket together with its in-progress uploads.
    ///
    /// # Errors
    ///
    /// - [`OssServiceError::NoSuchBucket`] if the bucket does not exist.
    /// - [`OssServiceError::BucketNotEmpty`] if the bucket still holds objects.
    pub fn delete_bucket(&self, name: &str) -> Result<(), OssServiceError> {
        // The emptiness check runs under the shard write lock, so no write can
        // land between the check and the removal.
        if self
            .buckets
            .remove_if(name, |_, bucket| bucket.is_empty())
            .is_some()
        {
            info!(bucket = %name, "bucket deleted");
            return Ok(());
        }

        if self.bucket_exists(name) {
            Err(OssServiceError::BucketNotEmpty {
                bucket: name.to_owned(),
            })
        } else {
            Err(OssServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
        }
    }

    /// Get a reference to a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`OssServiceError::NoSuchBucket`] if the bucket does not exist.
    pub fn get_bucket(&self, name: &str) -> Result<Ref<'_, String, OssBucket>, OssServiceError> {
        self.buckets
            .get(name)
            .ok_or_else(|| OssServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
    }

    /// Bucket names, sorted.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<String> {
        let mut names: Vec<String> = self.buckets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Check whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Remove all buckets.
    pub fn reset(&self) {
        debug!("resetting all OSS service state");
        self.buckets.clear();
    }
}
