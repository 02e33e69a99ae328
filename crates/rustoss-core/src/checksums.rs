//! MD5 digests and ETag formatting.
//!
//! OSS ETags are the uppercase hex MD5 of the body, wrapped in double quotes.
//! A completed multipart upload gets a composite ETag suffixed with the part
//! count.

use md5::Digest;

/// Compute the uppercase hex MD5 digest of `data`.
///
/// # Examples
///
/// ```
/// use rustoss_core::checksums::compute_md5;
///
/// assert_eq!(compute_md5(b"hello"), "5D41402ABC4B2A76B9719D911017C592");
/// ```
#[must_use]
pub fn compute_md5(data: &[u8]) -> String {
    hex::encode_upper(md5::Md5::digest(data))
}

/// Compute the quoted ETag of `data`.
///
/// # Examples
///
/// ```
/// use rustoss_core::checksums::compute_etag;
///
/// assert_eq!(compute_etag(b""), "\"D41D8CD98F00B204E9800998ECF8427E\"");
/// ```
#[must_use]
pub fn compute_etag(data: &[u8]) -> String {
    quote_etag(&compute_md5(data))
}

/// Wrap an ETag value in double quotes.
#[must_use]
pub fn quote_etag(value: &str) -> String {
    format!("\"{value}\"")
}

/// Strip surrounding double quotes from an ETag.
///
/// # Examples
///
/// ```
/// use rustoss_core::checksums::unquote_etag;
///
/// assert_eq!(unquote_etag("\"ABC\""), "ABC");
/// assert_eq!(unquote_etag("ABC"), "ABC");
/// ```
#[must_use]
pub fn unquote_etag(etag: &str) -> &str {
    etag.trim_matches('"')
}

/// Compute the composite ETag of a completed multipart upload.
///
/// The digest covers the concatenated unquoted uppercase part ETags in part
/// order, and the result is formatted as `"<HEX>-<part_count>"`.
///
/// # Examples
///
/// ```
/// use rustoss_core::checksums::compute_multipart_etag;
///
/// let etag = compute_multipart_etag(&["\"5D41402ABC4B2A76B9719D911017C592\""]);
/// assert!(etag.ends_with("-1\""));
/// ```
#[must_use]
pub fn compute_multipart_etag(part_etags: &[impl AsRef<str>]) -> String {
    let mut hasher = md5::Md5::new();
    for etag in part_etags {
        hasher.update(unquote_etag(etag.as_ref()).to_ascii_uppercase().as_bytes());
    }
    let digest = hex::encode_upper(hasher.finalize());
    quote_etag(&format!("{digest}-{}", part_etags.len()))
}
