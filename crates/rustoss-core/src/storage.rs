//! In-memory storage for object and part bodies.
//!
//! [`InMemoryStorage`] keeps every body as [`Bytes`] in a [`DashMap`]. All
//! methods are synchronous so callers can run them while holding a bucket's
//! object lock.

use bytes::{Bytes, BytesMut};
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::checksums;
use crate::error::OssServiceError;

/// Composite key identifying a stored object: `(bucket, key)`.
type StorageKey = (String, String);

/// Composite key identifying a multipart part: `(bucket, upload_id, part_number)`.
type PartKey = (String, String, u32);

/// Result of writing data to storage.
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Quoted ETag of the stored body.
    pub etag: String,
    /// Size of the stored body in bytes.
    pub size: u64,
    /// Uppercase MD5 hex digest (unquoted). For multipart bodies this is the
    /// hash portion of the composite ETag.
    pub md5_hex: String,
}

/// In-memory body storage.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use rustoss_core::storage::InMemoryStorage;
///
/// let storage = InMemoryStorage::new();
/// let result = storage.write_object("my-bucket", "hello.txt", Bytes::from("hello"));
/// assert_eq!(result.size, 5);
///
/// let data = storage.read_object("my-bucket", "hello.txt").unwrap();
/// assert_eq!(data.as_ref(), b"hello");
/// ```
#[derive(Default)]
pub struct InMemoryStorage {
    /// Object bodies keyed by `(bucket, key)`.
    objects: DashMap<StorageKey, Bytes>,
    /// Part bodies keyed by `(bucket, upload_id, part_number)`.
    parts: DashMap<PartKey, Bytes>,
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorage")
            .field("objects_count", &self.objects.len())
            .field("parts_count", &self.parts.len())
            .finish()
    }
}

impl InMemoryStorage {
    /// Create an empty storage backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object body, replacing any previous body under the key.
    pub fn write_object(&self, bucket: &str, key: &str, data: Bytes) -> WriteResult {
        let result = describe(&data);
        trace!(bucket, key, size = result.size, "stored object data");
        self.objects.insert((bucket.to_owned(), key.to_owned()), data);
        result
    }

    /// Append to an object body, creating it when absent.
    ///
    /// The returned [`WriteResult`] describes the whole body after the append.
    pub fn append_object(&self, bucket: &str, key: &str, data: &[u8]) -> WriteResult {
        let mut entry = self
            .objects
            .entry((bucket.to_owned(), key.to_owned()))
            .or_default();

        let mut combined = BytesMut::with_capacity(entry.len() + data.len());
        combined.extend_from_slice(entry.value());
        combined.extend_from_slice(data);
        *entry = combined.freeze();

        let result = describe(entry.value());
        trace!(bucket, key, size = result.size, "appended object data");
        result
    }

    /// Read an object body.
    ///
    /// # Errors
    ///
    /// Returns [`OssServiceError::NoSuchKey`] if no body is stored.
    pub fn read_object(&self, bucket: &str, key: &str) -> Result<Bytes, OssServiceError> {
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OssServiceError::NoSuchKey {
                key: key.to_owned(),
            })
    }

    /// Delete an object body. No-op if absent.
    pub fn delete_object(&self, bucket: &str, key: &str) {
        if self
            .objects
            .remove(&(bucket.to_owned(), key.to_owned()))
            .is_some()
        {
            trace!(bucket, key, "deleted object data");
        }
    }

    /// Store a multipart part body, replacing any previous body for the
    /// same part number.
    pub fn write_part(
        &self,
        bucket: &str,
        upload_id: &str,
        part_number: u32,
        data: Bytes,
    ) -> WriteResult {
        let result = describe(&data);
        trace!(bucket, upload_id, part_number, size = result.size, "stored part data");
        self.parts
            .insert((bucket.to_owned(), upload_id.to_owned(), part_number), data);
        result
    }

    /// Concatenate parts in the given order into an object body.
    ///
    /// The parts of the upload are removed afterwards. The returned ETag is the
    /// composite multipart ETag.
    ///
    /// # Errors
    ///
    /// Returns [`OssServiceError::InvalidPart`] if any part body is missing;
    /// nothing is written in that case.
    pub fn complete_multipart(
        &self,
        bucket: &str,
        upload_id: &str,
        key: &str,
        part_numbers: &[u32],
    ) -> Result<WriteResult, OssServiceError> {
        let mut combined = BytesMut::new();
        let mut part_etags = Vec::with_capacity(part_numbers.len());

        for &part_number in part_numbers {
            let part = self
                .parts
                .get(&(bucket.to_owned(), upload_id.to_owned(), part_number))
                .ok_or(OssServiceError::InvalidPart { part_number })?;
            part_etags.push(checksums::compute_md5(part.value()));
            combined.extend_from_slice(part.value());
        }

        let etag = checksums::compute_multipart_etag(&part_etags);
        let md5_hex = checksums::unquote_etag(&etag)
            .split('-')
            .next()
            .unwrap_or_default()
            .to_owned();
        let size = combined.len() as u64;

        self.objects
            .insert((bucket.to_owned(), key.to_owned()), combined.freeze());
        self.abort_multipart(bucket, upload_id);

        debug!(
            bucket,
            upload_id,
            key,
            size,
            parts = part_numbers.len(),
            "completed multipart upload"
        );

        Ok(WriteResult {
            etag,
            size,
            md5_hex,
        })
    }

    /// Delete all part bodies of an upload.
    pub fn abort_multipart(&self, bucket: &str, upload_id: &str) {
        self.parts
            .retain(|key, _| !(key.0 == bucket && key.1 == upload_id));
    }

    /// Delete all object and part bodies of a bucket.
    pub fn delete_bucket_data(&self, bucket: &str) {
        let obj_before = self.objects.len();
        self.objects.retain(|key, _| key.0 != bucket);
        let part_before = self.parts.len();
        self.parts.retain(|key, _| key.0 != bucket);

        debug!(
            bucket,
            objects_removed = obj_before - self.objects.len(),
            parts_removed = part_before - self.parts.len(),
            "deleted all bucket data"
        );
    }

    /// Remove every object and part body.
    pub fn reset(&self) {
        debug!("resetting all storage data");
        self.objects.clear();
        self.parts.clear();
    }
}

fn describe(data: &[u8]) -> WriteResult {
    let md5_hex = checksums::compute_md5(data);
    WriteResult {
        etag: checksums::quote_etag(&md5_hex),
        size: data.len() as u64,
        md5_hex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_write_and_read_object() {
        let storage = InMemoryStorage::new();
        let result = storage.write_object("b", "k", Bytes::from_static(b"hello"));
        assert_eq!(result.size, 5);
        assert_eq!(result.etag, checksums::compute_etag(b"hello"));

        let data = storage
            .read_object("b", "k")
            .unwrap_or_else(|e| panic!("read failed: {e}"));
        assert_eq!(data.as_ref(), b"hello");
    }

    #[test]
    fn test_should_report_missing_object() {
        let storage = InMemoryStorage::new();
        assert!(matches!(
            storage.read_object("b", "missing"),
            Err(OssServiceError::NoSuchKey { key }) if key == "missing"
        ));
    }

    #[test]
    fn test_should_append_to_object() {
        let storage = InMemoryStorage::new();
        let first = storage.append_object("b", "log", b"abc");
        assert_eq!(first.size, 3);
        let second = storage.append_object("b", "log", b"def");
        assert_eq!(second.size, 6);
        assert_eq!(second.etag, checksums::compute_etag(b"abcdef"));
    }

    #[test]
    fn test_should_complete_multipart_in_requested_order() {
        let storage = InMemoryStorage::new();
        storage.write_part("b", "U", 1, Bytes::from_static(b"one-"));
        storage.write_part("b", "U", 2, Bytes::from_static(b"two"));

        let result = storage
            .complete_multipart("b", "U", "k", &[1, 2])
            .unwrap_or_else(|e| panic!("complete failed: {e}"));
        assert_eq!(result.size, 7);
        assert!(result.etag.ends_with("-2\""));

        let data = storage
            .read_object("b", "k")
            .unwrap_or_else(|e| panic!("read failed: {e}"));
        assert_eq!(data.as_ref(), b"one-two");

        // Parts are gone after completion.
        assert!(matches!(
            storage.complete_multipart("b", "U", "k2", &[1]),
            Err(OssServiceError::InvalidPart { part_number: 1 })
        ));
    }

    #[test]
    fn test_should_delete_bucket_data() {
        let storage = InMemoryStorage::new();
        storage.write_object("b", "k", Bytes::from_static(b"x"));
        storage.write_object("other", "k", Bytes::from_static(b"y"));
        storage.write_part("b", "U", 1, Bytes::from_static(b"p"));

        storage.delete_bucket_data("b");
        assert!(storage.read_object("b", "k").is_err());
        assert!(storage.read_object("other", "k").is_ok());

        storage.reset();
        assert!(storage.read_object("other", "k").is_err());
    }
}
