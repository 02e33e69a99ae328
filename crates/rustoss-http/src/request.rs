//! HTTP request to operation input extraction.
//!
//! [`FromOssRequest`] builds each typed input struct from the request head,
//! the routed bucket and key, the query parameters and the collected body.
//! The doc comment on every input field names where it travels:
//!
//! - `HTTP header: x-oss-...` from a request header
//! - `HTTP query: name` from a query parameter
//! - `HTTP label (URI path)` from the routing context
//! - `HTTP payload body` from the body, raw bytes or XML
//! - `HTTP prefix headers: x-oss-meta-` from every `x-oss-meta-*` header

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use rustoss_model::error::{OssError, OssErrorCode};
use rustoss_model::headers;
use rustoss_model::input::{
    AbortMultipartUploadInput, AppendObjectInput, CompleteMultipartUploadInput,
    CopyObjectInput, CreateBucketInput, DeleteBucketInput, DeleteObjectInput, GetObjectAclInput,
    GetObjectInput, HeadObjectInput, InitiateMultipartUploadInput, ListObjectsInput,
    ListPartsInput, PutObjectAclInput, PutObjectInput, UploadPartInput,
};
use rustoss_model::types::{CannedAccessControlList, CompletedMultipartUpload, MetadataDirective};
use rustoss_xml::from_xml;

/// Extract an operation input from HTTP request components.
pub trait FromOssRequest: Sized {
    /// Build the input.
    ///
    /// # Errors
    ///
    /// Returns an [`OssError`] if a required value is missing or a value
    /// cannot be parsed.
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, OssError>;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extract a header value as a string.
pub fn header_str(parts: &http::request::Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Extract the `x-oss-object-acl` directive.
///
/// An absent header yields `Ok(None)`.
///
/// # Errors
///
/// Returns `InvalidArgument` if the header is present but is not a canned ACL.
pub fn header_acl(
    parts: &http::request::Parts,
) -> Result<Option<CannedAccessControlList>, OssError> {
    let Some(value) = header_str(parts, headers::OBJECT_ACL) else {
        return Ok(None);
    };
    CannedAccessControlList::from_header(&value)
        .map(Some)
        .ok_or_else(|| {
            OssError::invalid_argument(format!("The specified object acl is not valid: {value}"))
        })
}

/// Get a query parameter value by name.
#[must_use]
pub fn query_param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

/// Get a query parameter and parse it.
///
/// An absent parameter yields `Ok(None)`.
///
/// # Errors
///
/// Returns `InvalidArgument` if the parameter is present but does not parse.
pub fn query_param_parse<T: FromStr>(
    params: &[(String, String)],
    name: &str,
) -> Result<Option<T>, OssError> {
    query_param(params, name)
        .map(|v| {
            v.parse().map_err(|_| {
                OssError::invalid_argument(format!("Invalid value for {name}: {v}"))
            })
        })
        .transpose()
}

/// Collect all `x-oss-meta-*` headers. Keys are the part after the prefix.
pub fn collect_metadata(parts: &http::request::Parts) -> HashMap<String, String> {
    parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let meta_key = name.as_str().strip_prefix(headers::META_PREFIX)?;
            let meta_value = value.to_str().ok()?;
            Some((meta_key.to_owned(), meta_value.to_owned()))
        })
        .collect()
}

fn require_bucket(bucket: Option<&str>) -> Result<String, OssError> {
    bucket.map(ToOwned::to_owned).ok_or_else(|| {
        OssError::with_message(OssErrorCode::InvalidRequest, "Bucket name is required")
    })
}

fn require_key(key: Option<&str>) -> Result<String, OssError> {
    key.map(ToOwned::to_owned).ok_or_else(|| {
        OssError::with_message(OssErrorCode::InvalidRequest, "Object key is required")
    })
}

fn require_query<T: FromStr>(params: &[(String, String)], name: &str) -> Result<T, OssError> {
    query_param_parse(params, name)?
        .ok_or_else(|| OssError::invalid_argument(format!("Missing required parameter: {name}")))
}

// ---------------------------------------------------------------------------
// Bucket and key only inputs
// ---------------------------------------------------------------------------

macro_rules! impl_bucket_only_input {
    ($ty:ty) => {
        impl FromOssRequest for $ty {
            fn from_oss_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                _key: Option<&str>,
                _query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, OssError> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                })
            }
        }
    };
}

macro_rules! impl_bucket_key_input {
    ($ty:ty) => {
        impl FromOssRequest for $ty {
            fn from_oss_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                key: Option<&str>,
                _query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, OssError> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                    key: require_key(key)?,
                })
            }
        }
    };
}

impl_bucket_only_input!(CreateBucketInput);
impl_bucket_only_input!(DeleteBucketInput);
impl_bucket_key_input!(GetObjectInput);
impl_bucket_key_input!(HeadObjectInput);
impl_bucket_key_input!(DeleteObjectInput);
impl_bucket_key_input!(GetObjectAclInput);

// ---------------------------------------------------------------------------
// Bucket operations
// ---------------------------------------------------------------------------

impl FromOssRequest for ListObjectsInput {
    fn from_oss_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, OssError> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            prefix: query_param(query_params, "prefix"),
            marker: query_param(query_params, "marker"),
            max_keys: query_param_parse(query_params, "max-keys")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Object operations
// ---------------------------------------------------------------------------

impl FromOssRequest for PutObjectInput {
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, OssError> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            body,
            acl: header_acl(parts)?,
            content_type: header_str(parts, "Content-Type"),
            content_md5: header_str(parts, "Content-MD5"),
            metadata: collect_metadata(parts),
        })
    }
}

impl FromOssRequest for AppendObjectInput {
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, OssError> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            position: require_query(query_params, "position")?,
            body,
            acl: header_acl(parts)?,
            content_type: header_str(parts, "Content-Type"),
            metadata: collect_metadata(parts),
        })
    }
}

impl FromOssRequest for CopyObjectInput {
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, OssError> {
        let copy_source = header_str(parts, headers::COPY_SOURCE).ok_or_else(|| {
            OssError::invalid_argument(format!("Missing header: {}", headers::COPY_SOURCE))
        })?;

        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            copy_source,
            acl: header_acl(parts)?,
            content_type: header_str(parts, "Content-Type"),
            metadata_directive: header_str(parts, headers::METADATA_DIRECTIVE)
                .map(|v| MetadataDirective::from(v.as_str())),
            metadata: collect_metadata(parts),
        })
    }
}

impl FromOssRequest for PutObjectAclInput {
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, OssError> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            acl: header_acl(parts)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Multipart operations
// ---------------------------------------------------------------------------

impl FromOssRequest for InitiateMultipartUploadInput {
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, OssError> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            acl: header_acl(parts)?,
            content_type: header_str(parts, "Content-Type"),
            metadata: collect_metadata(parts),
        })
    }
}

impl FromOssRequest for UploadPartInput {
    fn from_oss_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, OssError> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            upload_id: require_query(query_params, "uploadId")?,
            part_number: require_query(query_params, "partNumber")?,
            body,
        })
    }
}

impl FromOssRequest for CompleteMultipartUploadInput {
    fn from_oss_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, OssError> {
        let completed: CompletedMultipartUpload = from_xml(&body)
            .map_err(|e| OssError::malformed_xml(format!("Failed to parse XML body: {e}")))?;

        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            upload_id: require_query(query_params, "uploadId")?,
            parts: completed.parts,
            acl: header_acl(parts)?,
        })
    }
}

macro_rules! impl_upload_input {
    ($ty:ty) => {
        impl FromOssRequest for $ty {
            fn from_oss_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                key: Option<&str>,
                query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, OssError> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                    key: require_key(key)?,
                    upload_id: require_query(query_params, "uploadId")?,
                })
            }
        }
    };
}

impl_upload_input!(AbortMultipartUploadInput);
impl_upload_input!(ListPartsInput);
