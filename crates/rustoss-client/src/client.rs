//! The [`OssClient`].

use std::collections::HashMap;

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::HeaderMap;
use reqwest::{RequestBuilder, Response};
use rustoss_model::headers;
use rustoss_model::output::{
    AppendObjectOutput, CompleteMultipartUploadOutput, CopyObjectOutput, GetObjectAclOutput,
    GetObjectOutput, InitiateMultipartUploadOutput, ListObjectsOutput, ListPartsOutput,
    ObjectMetadata,
};
use rustoss_model::types::{CompletedMultipartUpload, MetadataDirective, PartETag};
use rustoss_model::{CannedAccessControlList, ObjectPermission, ObjectType};
use rustoss_xml::{ErrorDocument, OssDeserialize, from_xml, to_xml};
use tracing::debug;

use crate::error::ClientError;
use crate::options::ObjectOptions;

/// Characters escaped in object keys. `/` is kept so keys read as paths.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Characters escaped in query values.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Path-style client for a RustOSS endpoint.
///
/// ```no_run
/// use rustoss_client::OssClient;
/// use rustoss_model::CannedAccessControlList;
///
/// # tokio_test::block_on(async {
/// let client = OssClient::new("http://127.0.0.1:9080");
/// client.create_bucket("photos").await?;
/// client
///     .put_object("photos", "cat.jpg", "meow", Some(CannedAccessControlList::PublicRead))
///     .await?;
/// let acl = client.get_object_acl("photos", "cat.jpg").await?;
/// assert_eq!(acl.as_str(), "public-read");
/// # Ok::<(), rustoss_client::ClientError>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct OssClient {
    endpoint: String,
    http: reqwest::Client,
}

impl OssClient {
    /// Create a client for `endpoint`, e.g. `http://127.0.0.1:9080`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http_client(endpoint, reqwest::Client::new())
    }

    /// Create a client that sends through an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_http_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_owned();
        Self { endpoint, http }
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // ---- buckets ----

    /// Create a bucket.
    pub async fn create_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        let req = self.http.put(self.bucket_url(bucket, &[]));
        self.send(req).await?;
        Ok(())
    }

    /// Delete an empty bucket.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        let req = self.http.delete(self.bucket_url(bucket, &[]));
        self.send(req).await?;
        Ok(())
    }

    /// List the objects in a bucket, optionally under `prefix`.
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<ListObjectsOutput, ClientError> {
        let query: Vec<(&str, &str)> = prefix.map(|p| ("prefix", p)).into_iter().collect();
        let req = self.http.get(self.bucket_url(bucket, &query));
        self.send_xml(req).await
    }

    // ---- objects ----

    /// Upload an object, replacing any existing one. Returns the ETag.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: impl Into<Bytes>,
        acl: Option<CannedAccessControlList>,
    ) -> Result<String, ClientError> {
        self.put_object_with_options(bucket, key, body, &ObjectOptions::from(acl))
            .await
    }

    /// [`put_object`](Self::put_object) with content type and user metadata.
    pub async fn put_object_with_options(
        &self,
        bucket: &str,
        key: &str,
        body: impl Into<Bytes>,
        options: &ObjectOptions,
    ) -> Result<String, ClientError> {
        let req = self
            .http
            .put(self.object_url(bucket, key, &[]))
            .body(body.into());
        let resp = self.send(options.apply(req)).await?;
        etag_header(resp.headers())
    }

    /// Append to an appendable object at `position`.
    ///
    /// Position `0` on a missing key creates the object.
    pub async fn append_object(
        &self,
        bucket: &str,
        key: &str,
        position: u64,
        body: impl Into<Bytes>,
        acl: Option<CannedAccessControlList>,
    ) -> Result<AppendObjectOutput, ClientError> {
        let options = ObjectOptions::from(acl);
        self.append_object_with_options(bucket, key, position, body, &options)
            .await
    }

    /// [`append_object`](Self::append_object) with content type and user
    /// metadata. Both only take effect on the append that creates the object.
    pub async fn append_object_with_options(
        &self,
        bucket: &str,
        key: &str,
        position: u64,
        body: impl Into<Bytes>,
        options: &ObjectOptions,
    ) -> Result<AppendObjectOutput, ClientError> {
        let position = position.to_string();
        let url = self.object_url(bucket, key, &[("append", ""), ("position", &position)]);
        let req = self.http.post(url).body(body.into());
        let resp = self.send(options.apply(req)).await?;

        let next_append_position = header_value(resp.headers(), headers::NEXT_APPEND_POSITION)
            .and_then(|v| v.parse().ok())
            .ok_or(ClientError::MissingHeader(headers::NEXT_APPEND_POSITION))?;
        Ok(AppendObjectOutput {
            etag: etag_header(resp.headers())?,
            next_append_position,
        })
    }

    /// Copy `source_bucket/source_key` to `bucket/key`, keeping the source
    /// metadata.
    pub async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        bucket: &str,
        key: &str,
        acl: Option<CannedAccessControlList>,
    ) -> Result<CopyObjectOutput, ClientError> {
        self.copy_object_with_options(
            source_bucket,
            source_key,
            bucket,
            key,
            &ObjectOptions::from(acl),
        )
        .await
    }

    /// [`copy_object`](Self::copy_object) with options.
    ///
    /// A content type or user metadata in `options` replaces the source
    /// metadata on the target (`x-oss-metadata-directive: REPLACE`).
    pub async fn copy_object_with_options(
        &self,
        source_bucket: &str,
        source_key: &str,
        bucket: &str,
        key: &str,
        options: &ObjectOptions,
    ) -> Result<CopyObjectOutput, ClientError> {
        let source = format!(
            "/{source_bucket}/{}",
            utf8_percent_encode(source_key, KEY_ENCODE_SET)
        );
        let mut req = self
            .http
            .put(self.object_url(bucket, key, &[]))
            .header(headers::COPY_SOURCE, source);
        if options.has_new_metadata() {
            req = req.header(headers::METADATA_DIRECTIVE, MetadataDirective::Replace.as_str());
        }
        let mut output: CopyObjectOutput = self.send_xml(options.apply(req)).await?;
        output.etag = unquote(&output.etag);
        Ok(output)
    }

    /// Download an object with its metadata.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput, ClientError> {
        let req = self.http.get(self.object_url(bucket, key, &[]));
        let resp = self.send(req).await?;
        let metadata = metadata_from_headers(resp.headers());
        let body = resp.bytes().await?;
        Ok(GetObjectOutput { metadata, body })
    }

    /// Fetch object metadata without the body.
    pub async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, ClientError> {
        let req = self.http.head(self.object_url(bucket, key, &[]));
        let resp = self.send(req).await?;
        Ok(metadata_from_headers(resp.headers()))
    }

    /// Delete an object. Deleting a missing key succeeds.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ClientError> {
        let req = self.http.delete(self.object_url(bucket, key, &[]));
        self.send(req).await?;
        Ok(())
    }

    // ---- object ACL ----

    /// Read the permission stored on an object.
    pub async fn get_object_acl(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<ObjectPermission, ClientError> {
        let req = self.http.get(self.object_url(bucket, key, &[("acl", "")]));
        let output: GetObjectAclOutput = self.send_xml(req).await?;
        Ok(output.permission)
    }

    /// Replace the permission stored on an object.
    ///
    /// `None` fails with [`ClientError::InvalidArgument`] without sending
    /// anything.
    pub async fn set_object_acl(
        &self,
        bucket: &str,
        key: &str,
        acl: Option<CannedAccessControlList>,
    ) -> Result<(), ClientError> {
        let Some(acl) = acl else {
            return Err(ClientError::invalid_argument(format!(
                "No canned ACL is specified in {}",
                headers::OBJECT_ACL
            )));
        };
        let req = self
            .http
            .put(self.object_url(bucket, key, &[("acl", "")]))
            .header(headers::OBJECT_ACL, acl.as_str());
        self.send(req).await?;
        Ok(())
    }

    // ---- multipart ----

    /// Start a multipart upload. Returns the upload ID.
    pub async fn initiate_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        acl: Option<CannedAccessControlList>,
    ) -> Result<String, ClientError> {
        self.initiate_multipart_upload_with_options(bucket, key, &ObjectOptions::from(acl))
            .await
    }

    /// [`initiate_multipart_upload`](Self::initiate_multipart_upload) with
    /// the content type and user metadata of the completed object.
    pub async fn initiate_multipart_upload_with_options(
        &self,
        bucket: &str,
        key: &str,
        options: &ObjectOptions,
    ) -> Result<String, ClientError> {
        let req = self.http.post(self.object_url(bucket, key, &[("uploads", "")]));
        let output: InitiateMultipartUploadOutput = self.send_xml(options.apply(req)).await?;
        Ok(output.upload_id)
    }

    /// Upload one part. Returns its ETag.
    pub async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
        body: impl Into<Bytes>,
    ) -> Result<String, ClientError> {
        let part_number = part_number.to_string();
        let url = self.object_url(
            bucket,
            key,
            &[("partNumber", &part_number), ("uploadId", upload_id)],
        );
        let resp = self.send(self.http.put(url).body(body.into())).await?;
        etag_header(resp.headers())
    }

    /// Assemble the listed parts into the final object.
    ///
    /// Without `acl` the directive given at initiation applies.
    pub async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: Vec<PartETag>,
        acl: Option<CannedAccessControlList>,
    ) -> Result<CompleteMultipartUploadOutput, ClientError> {
        let body = to_xml(
            "CompleteMultipartUpload",
            &CompletedMultipartUpload { parts },
        )?;
        let url = self.object_url(bucket, key, &[("uploadId", upload_id)]);
        let req = self.http.post(url).body(body);
        let req = match acl {
            Some(acl) => req.header(headers::OBJECT_ACL, acl.as_str()),
            None => req,
        };
        let mut output: CompleteMultipartUploadOutput = self.send_xml(req).await?;
        output.etag = unquote(&output.etag);
        Ok(output)
    }

    /// Abort a multipart upload and discard its parts.
    pub async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.object_url(bucket, key, &[("uploadId", upload_id)]);
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// List the parts uploaded so far.
    pub async fn list_parts(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<ListPartsOutput, ClientError> {
        let url = self.object_url(bucket, key, &[("uploadId", upload_id)]);
        self.send_xml(self.http.get(url)).await
    }

    // ---- plumbing ----

    fn bucket_url(&self, bucket: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{bucket}", self.endpoint);
        append_query(&mut url, query);
        url
    }

    fn object_url(&self, bucket: &str, key: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{bucket}/{}",
            self.endpoint,
            utf8_percent_encode(key, KEY_ENCODE_SET)
        );
        append_query(&mut url, query);
        url
    }

    /// Send a request and turn non-success statuses into [`ClientError::Service`].
    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!(
            url = %resp.url(),
            status = status.as_u16(),
            "OSS request finished"
        );
        if status.is_success() {
            return Ok(resp);
        }

        let request_id = header_value(resp.headers(), headers::REQUEST_ID).map(ToOwned::to_owned);
        let body = resp.bytes().await?;
        let doc = if body.is_empty() {
            ErrorDocument::default()
        } else {
            from_xml::<ErrorDocument>(&body)?
        };
        Err(ClientError::from_document(status, doc, request_id.as_deref()))
    }

    async fn send_xml<T: OssDeserialize>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let body = self.send(req).await?.bytes().await?;
        Ok(from_xml(&body)?)
    }
}

fn append_query(url: &mut String, query: &[(&str, &str)]) {
    for (i, (name, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(name);
        if !value.is_empty() {
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_ENCODE_SET));
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn etag_header(headers: &HeaderMap) -> Result<String, ClientError> {
    header_value(headers, "ETag")
        .map(unquote)
        .ok_or(ClientError::MissingHeader("ETag"))
}

fn unquote(etag: &str) -> String {
    etag.trim_matches('"').to_owned()
}

fn metadata_from_headers(map: &HeaderMap) -> ObjectMetadata {
    let metadata: HashMap<String, String> = map
        .iter()
        .filter_map(|(name, value)| {
            let key = name.as_str().strip_prefix(headers::META_PREFIX)?;
            Some((key.to_owned(), value.to_str().ok()?.to_owned()))
        })
        .collect();

    ObjectMetadata {
        content_length: header_value(map, "Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
        content_type: header_value(map, "Content-Type")
            .unwrap_or_default()
            .to_owned(),
        etag: header_value(map, "ETag").map(unquote).unwrap_or_default(),
        last_modified: header_value(map, "Last-Modified")
            .and_then(|v| chrono::DateTime::parse_from_rfc2822(v).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_default(),
        object_type: header_value(map, headers::OBJECT_TYPE)
            .map(ObjectType::from)
            .unwrap_or_default(),
        next_append_position: header_value(map, headers::NEXT_APPEND_POSITION)
            .and_then(|v| v.parse().ok()),
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn test_should_build_path_style_urls() {
        let client = OssClient::new("http://127.0.0.1:9080/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9080");
        assert_eq!(
            client.object_url("photos", "2026/cat photo.jpg", &[("acl", "")]),
            "http://127.0.0.1:9080/photos/2026/cat%20photo.jpg?acl"
        );
        assert_eq!(
            client.bucket_url("photos", &[("prefix", "a b")]),
            "http://127.0.0.1:9080/photos?prefix=a%20b"
        );
        assert_eq!(
            client.object_url("b", "k", &[("partNumber", "2"), ("uploadId", "ABC")]),
            "http://127.0.0.1:9080/b/k?partNumber=2&uploadId=ABC"
        );
    }

    #[tokio::test]
    async fn test_should_reject_missing_acl_before_sending() {
        // Nothing listens on port 9; a sent request would fail as transport.
        let client = OssClient::new("http://127.0.0.1:9");
        let err = client
            .set_object_acl("photos", "cat.jpg", None)
            .await
            .expect_err("missing acl should fail");
        assert!(err.is_precondition_violation());
        assert!(err.to_string().contains(headers::OBJECT_ACL));
    }

    #[test]
    fn test_should_read_metadata_headers() {
        let mut map = HeaderMap::new();
        map.insert("Content-Length", HeaderValue::from_static("11"));
        map.insert("Content-Type", HeaderValue::from_static("text/plain"));
        map.insert("ETag", HeaderValue::from_static("\"5EB63BBBE01EEED093CB22BB8F5ACDC3\""));
        map.insert(
            "Last-Modified",
            HeaderValue::from_static("Sun, 18 Oct 2026 08:30:00 GMT"),
        );
        map.insert(headers::OBJECT_TYPE, HeaderValue::from_static("Appendable"));
        map.insert(headers::NEXT_APPEND_POSITION, HeaderValue::from_static("11"));
        map.insert("x-oss-meta-owner", HeaderValue::from_static("alice"));

        let meta = metadata_from_headers(&map);
        assert_eq!(meta.content_length, 11);
        assert_eq!(meta.content_type, "text/plain");
        assert_eq!(meta.etag, "5EB63BBBE01EEED093CB22BB8F5ACDC3");
        assert_eq!(meta.last_modified.timestamp(), 1_792_312_200);
        assert_eq!(meta.object_type, ObjectType::Appendable);
        assert_eq!(meta.next_append_position, Some(11));
        assert_eq!(meta.metadata.get("owner").map(String::as_str), Some("alice"));
    }
}
