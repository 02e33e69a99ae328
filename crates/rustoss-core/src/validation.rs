//! Validation for OSS requests.
//!
//! Bucket names, object keys, part numbers, user metadata and `Content-MD5`
//! are checked here before any state is touched.

use std::collections::HashMap;
use std::hash::BuildHasher;

use base64::Engine;
use md5::{Digest, Md5};

use crate::error::OssServiceError;

/// Maximum total size (in bytes) of all user metadata keys and values.
const MAX_METADATA_SIZE: usize = 8192;

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1023;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Highest part number a multipart upload accepts.
pub const MAX_PART_NUMBER: u32 = 10_000;

/// Validate a bucket name.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, digits and hyphens
/// - Must start and end with a letter or digit
///
/// # Errors
///
/// Returns [`OssServiceError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use rustoss_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("my-bucket-01").is_ok());
/// assert!(validate_bucket_name("My_Bucket").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), OssServiceError> {
    let invalid = |reason: &str| OssServiceError::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    let len = name.len();
    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(invalid(&format!(
            "Bucket name must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        )));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(invalid(
            "Bucket name must only contain lowercase letters, numbers, and hyphens",
        ));
    }

    let bytes = name.as_bytes();
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !alnum(bytes[0]) || !alnum(bytes[len - 1]) {
        return Err(invalid("Bucket name must start and end with a letter or number"));
    }

    Ok(())
}

/// Validate an object key.
///
/// Keys are 1-1023 bytes of UTF-8 and must not start with `/` or `\`.
///
/// # Errors
///
/// Returns [`OssServiceError::InvalidObjectName`] if the key breaks a rule.
pub fn validate_object_key(key: &str) -> Result<(), OssServiceError> {
    let invalid = |reason: &str| OssServiceError::InvalidObjectName {
        key: key.to_owned(),
        reason: reason.to_owned(),
    };

    if key.is_empty() {
        return Err(invalid("Object name must not be empty"));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(invalid(&format!(
            "Object name must not exceed {MAX_KEY_BYTES} bytes"
        )));
    }
    if key.starts_with('/') || key.starts_with('\\') {
        return Err(invalid("Object name must not start with '/' or '\\'"));
    }

    Ok(())
}

/// Validate the total size of user metadata.
///
/// # Errors
///
/// Returns [`OssServiceError::InvalidArgument`] if the combined key and value
/// length exceeds 8 KB.
pub fn validate_metadata<S: BuildHasher>(
    metadata: &HashMap<String, String, S>,
) -> Result<(), OssServiceError> {
    let total_size: usize = metadata.iter().map(|(k, v)| k.len() + v.len()).sum();

    if total_size > MAX_METADATA_SIZE {
        return Err(OssServiceError::InvalidArgument {
            message: format!(
                "User metadata must not exceed {MAX_METADATA_SIZE} bytes, got {total_size}"
            ),
        });
    }

    Ok(())
}

/// Validate a part number.
///
/// # Errors
///
/// Returns [`OssServiceError::InvalidArgument`] unless the number is in
/// `1..=10000`.
pub fn validate_part_number(part_number: u32) -> Result<(), OssServiceError> {
    if (1..=MAX_PART_NUMBER).contains(&part_number) {
        Ok(())
    } else {
        Err(OssServiceError::InvalidArgument {
            message: format!("Part number must be an integer between 1 and {MAX_PART_NUMBER}"),
        })
    }
}

/// Verify a `Content-MD5` header against the body.
///
/// # Errors
///
/// Returns [`OssServiceError::InvalidDigest`] if the header is not valid
/// base64 or does not match the MD5 of `body`.
pub fn validate_content_md5(content_md5: Option<&str>, body: &[u8]) -> Result<(), OssServiceError> {
    let Some(expected_b64) = content_md5 else {
        return Ok(());
    };

    let expected_bytes = base64::engine::general_purpose::STANDARD
        .decode(expected_b64)
        .map_err(|_| OssServiceError::InvalidDigest)?;

    if Md5::digest(body).as_slice() != expected_bytes {
        return Err(OssServiceError::InvalidDigest);
    }

    Ok(())
}
