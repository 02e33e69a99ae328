//! Shared utilities for the OSS store.
//!
//! Provides upload ID generation, copy-source parsing, and the fixed owner reported
//! for every bucket and object.

use rustoss_model::types::Owner;
use uuid::Uuid;

use crate::error::OssServiceError;

/// Canonical ID of the single local account.
pub const DEFAULT_OWNER_ID: &str = "1283641064516515";

/// Display name of the single local account.
pub const DEFAULT_OWNER_DISPLAY_NAME: &str = "rustoss";

// ---------------------------------------------------------------------------
// ID generation
// ---------------------------------------------------------------------------

/// Generate an upload ID for a multipart upload.
///
/// # Examples
///
/// ```
/// use rustoss_core::utils::generate_upload_id;
///
/// let id = generate_upload_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
/// ```
#[must_use]
pub fn generate_upload_id() -> String {
    Uuid::new_v4().simple().to_string().to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// The owner reported for every bucket and object.
#[must_use]
pub fn default_owner() -> Owner {
    Owner {
        id: DEFAULT_OWNER_ID.to_owned(),
        display_name: DEFAULT_OWNER_DISPLAY_NAME.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Copy source
// ---------------------------------------------------------------------------

/// Parse an `x-oss-copy-source` header value into `(bucket, key)`.
///
/// The header has the form `/bucket/key`; the leading slash is optional and
/// the key may be percent-encoded.
///
/// # Errors
///
/// Returns [`OssServiceError::InvalidArgument`] if the value has no key part
/// or the decoded key is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use rustoss_core::utils::parse_copy_source;
///
/// let (bucket, key) = parse_copy_source("/src-bucket/dir/file%20a.txt").unwrap();
/// assert_eq!(bucket, "src-bucket");
/// assert_eq!(key, "dir/file a.txt");
/// ```
pub fn parse_copy_source(source: &str) -> Result<(String, String), OssServiceError> {
    let source = source.strip_prefix('/').unwrap_or(source);

    let (bucket, key) = source
        .split_once('/')
        .ok_or_else(|| OssServiceError::InvalidArgument {
            message: "Copy source must be in the format /bucket/key".to_owned(),
        })?;

    if bucket.is_empty() || key.is_empty() {
        return Err(OssServiceError::InvalidArgument {
            message: "Copy source bucket and key must not be empty".to_owned(),
        });
    }

    let decoded_key = percent_encoding::percent_decode_str(key)
        .decode_utf8()
        .map_err(|_| OssServiceError::InvalidArgument {
            message: "Copy source key contains invalid UTF-8".to_owned(),
        })?
        .into_owned();

    Ok((bucket.to_owned(), decoded_key))
}
