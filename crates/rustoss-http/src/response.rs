//! Operation output to HTTP response serialization.
//!
//! [`IntoOssResponse`] turns each typed output into a response:
//!
//! - **Header-only**: put, append, upload-part and ACL updates.
//! - **XML body**: listings, ACL reads, multipart results and copy results.
//! - **Object body**: `GetObject` passes the stored bytes through.
//! - **No content**: deletes and aborts answer 204.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::HeaderValue;
use rustoss_model::error::{OssError, OssErrorCode};
use rustoss_model::headers;
use rustoss_model::output::{
    AbortMultipartUploadOutput, AppendObjectOutput, CompleteMultipartUploadOutput,
    CopyObjectOutput, CreateBucketOutput, DeleteBucketOutput, DeleteObjectOutput,
    GetObjectAclOutput, GetObjectOutput, HeadObjectOutput, InitiateMultipartUploadOutput,
    ListObjectsOutput, ListPartsOutput, ObjectMetadata, PutObjectAclOutput, PutObjectOutput,
    UploadPartOutput,
};
use rustoss_xml::{OssSerialize, to_xml};

use crate::body::OssResponseBody;

/// Convert an operation output into an HTTP response.
pub trait IntoOssResponse {
    /// Build the response.
    ///
    /// # Errors
    ///
    /// Returns an [`OssError`] if the response cannot be constructed.
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError>;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Set a header if the value is a valid header value.
fn set_header(
    builder: http::response::Builder,
    name: &str,
    value: &str,
) -> http::response::Builder {
    match HeaderValue::from_str(value) {
        Ok(hv) => builder.header(name, hv),
        Err(_) => builder,
    }
}

fn set_metadata_headers(
    mut builder: http::response::Builder,
    metadata: &HashMap<String, String>,
) -> http::response::Builder {
    for (key, value) in metadata {
        builder = set_header(builder, &format!("{}{key}", headers::META_PREFIX), value);
    }
    builder
}

/// Format a timestamp as an HTTP date.
fn http_date(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn set_object_metadata_headers(
    builder: http::response::Builder,
    meta: &ObjectMetadata,
) -> http::response::Builder {
    let mut builder = builder
        .header(http::header::CONTENT_LENGTH, meta.content_length)
        .header(headers::OBJECT_TYPE, meta.object_type.as_str());
    builder = set_header(builder, "Content-Type", &meta.content_type);
    builder = set_header(builder, "ETag", &meta.etag);
    builder = set_header(builder, "Last-Modified", &http_date(&meta.last_modified));
    if let Some(position) = meta.next_append_position {
        builder = builder.header(headers::NEXT_APPEND_POSITION, position);
    }
    set_metadata_headers(builder, &meta.metadata)
}

fn build_response(
    builder: http::response::Builder,
    body: OssResponseBody,
) -> Result<http::Response<OssResponseBody>, OssError> {
    builder
        .body(body)
        .map_err(|e| OssError::internal_error(format!("failed to build HTTP response: {e}")))
}

fn xml_response<T: OssSerialize>(
    root_element: &str,
    value: &T,
) -> Result<http::Response<OssResponseBody>, OssError> {
    let xml = to_xml(root_element, value)
        .map_err(|e| OssError::internal_error(format!("failed to serialize XML: {e}")))?;
    let builder = http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/xml");
    build_response(builder, OssResponseBody::from_bytes(xml))
}

fn etag_response(etag: &str) -> Result<http::Response<OssResponseBody>, OssError> {
    let builder = set_header(
        http::Response::builder().status(http::StatusCode::OK),
        "ETag",
        etag,
    );
    build_response(builder, OssResponseBody::empty())
}

fn no_content() -> Result<http::Response<OssResponseBody>, OssError> {
    build_response(
        http::Response::builder().status(http::StatusCode::NO_CONTENT),
        OssResponseBody::empty(),
    )
}

// ---------------------------------------------------------------------------
// Bucket operations
// ---------------------------------------------------------------------------

impl IntoOssResponse for CreateBucketOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        let builder = set_header(
            http::Response::builder().status(http::StatusCode::OK),
            "Location",
            &self.location,
        );
        build_response(builder, OssResponseBody::empty())
    }
}

impl IntoOssResponse for DeleteBucketOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        no_content()
    }
}

impl IntoOssResponse for ListObjectsOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        xml_response("ListBucketResult", &self)
    }
}

// ---------------------------------------------------------------------------
// Object operations
// ---------------------------------------------------------------------------

impl IntoOssResponse for PutObjectOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        etag_response(&self.etag)
    }
}

impl IntoOssResponse for AppendObjectOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        let builder = http::Response::builder()
            .status(http::StatusCode::OK)
            .header(headers::NEXT_APPEND_POSITION, self.next_append_position);
        build_response(set_header(builder, "ETag", &self.etag), OssResponseBody::empty())
    }
}

impl IntoOssResponse for CopyObjectOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        xml_response("CopyObjectResult", &self)
    }
}

impl IntoOssResponse for GetObjectOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        let builder = set_object_metadata_headers(
            http::Response::builder().status(http::StatusCode::OK),
            &self.metadata,
        );
        build_response(builder, OssResponseBody::from_bytes(self.body))
    }
}

impl IntoOssResponse for HeadObjectOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        let builder = set_object_metadata_headers(
            http::Response::builder().status(http::StatusCode::OK),
            &self.metadata,
        );
        build_response(builder, OssResponseBody::empty())
    }
}

impl IntoOssResponse for DeleteObjectOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        no_content()
    }
}

impl IntoOssResponse for GetObjectAclOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        xml_response("AccessControlPolicy", &self)
    }
}

impl IntoOssResponse for PutObjectAclOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        build_response(
            http::Response::builder().status(http::StatusCode::OK),
            OssResponseBody::empty(),
        )
    }
}

// ---------------------------------------------------------------------------
// Multipart operations
// ---------------------------------------------------------------------------

impl IntoOssResponse for InitiateMultipartUploadOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        xml_response("InitiateMultipartUploadResult", &self)
    }
}

impl IntoOssResponse for UploadPartOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        etag_response(&self.etag)
    }
}

impl IntoOssResponse for CompleteMultipartUploadOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        xml_response("CompleteMultipartUploadResult", &self)
    }
}

impl IntoOssResponse for AbortMultipartUploadOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        no_content()
    }
}

impl IntoOssResponse for ListPartsOutput {
    fn into_oss_response(self) -> Result<http::Response<OssResponseBody>, OssError> {
        xml_response("ListPartsResult", &self)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The `<Error>` child element that names the resource of an error, if any.
fn resource_tag(code: OssErrorCode) -> Option<&'static str> {
    match code {
        OssErrorCode::NoSuchKey
        | OssErrorCode::InvalidObjectName
        | OssErrorCode::ObjectNotAppendable
        | OssErrorCode::PositionNotEqualToLength => Some("Key"),
        OssErrorCode::NoSuchBucket
        | OssErrorCode::BucketAlreadyExists
        | OssErrorCode::BucketNotEmpty
        | OssErrorCode::InvalidBucketName => Some("BucketName"),
        OssErrorCode::NoSuchUpload => Some("UploadId"),
        OssErrorCode::InvalidPart | OssErrorCode::EntityTooSmall => Some("PartNumber"),
        OssErrorCode::MethodNotAllowed => Some("Method"),
        _ => None,
    }
}

/// Convert an [`OssError`] into an XML error response.
///
/// Headers attached to the error (such as `x-oss-next-append-position`) are
/// copied onto the response.
pub fn error_to_response(
    err: &OssError,
    request_id: &str,
    host_id: &str,
) -> http::Response<OssResponseBody> {
    let details: Vec<(&str, &str)> = resource_tag(err.code)
        .zip(err.resource.as_deref())
        .into_iter()
        .collect();
    let xml = rustoss_xml::error_to_xml(
        err.code.as_str(),
        &err.message,
        &details,
        request_id,
        host_id,
    );

    let mut builder = http::Response::builder()
        .status(err.status_code)
        .header("Content-Type", "application/xml");
    for (name, value) in &err.headers {
        builder = set_header(builder, name, value);
    }

    builder
        .body(OssResponseBody::from_bytes(Bytes::from(xml)))
        .unwrap_or_else(|_| {
            http::Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(OssResponseBody::empty())
                .expect("static response should be valid")
        })
}
