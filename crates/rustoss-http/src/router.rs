//! Request routing: bucket and key resolution plus operation identification.
//!
//! The [`OssRouter`] maps an HTTP request to an [`OssOperation`] from the
//! method, whether a bucket and key are present, the sub-resource query
//! parameters (`acl`, `uploads`, `uploadId`, `partNumber`, `append`) and the
//! `x-oss-copy-source` header, which turns a plain PUT into a copy.
//!
//! The bucket comes either from the `Host` header (`bucket.oss.localhost`)
//! when virtual hosting is enabled, or from the first path segment.

use http::Method;
use percent_encoding::percent_decode_str;
use rustoss_model::error::{OssError, OssErrorCode};
use rustoss_model::headers;
use rustoss_model::operations::OssOperation;

/// Routing settings.
#[derive(Debug, Clone)]
pub struct OssRouter {
    /// Base domain for virtual-hosted-style requests (e.g. `oss.localhost`).
    pub domain: String,
    /// Whether the bucket may be taken from the `Host` header.
    pub virtual_hosting: bool,
}

/// The result of routing a request.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// The resolved bucket name, if any.
    pub bucket: Option<String>,
    /// The resolved object key, if any.
    pub key: Option<String>,
    /// The identified operation.
    pub operation: OssOperation,
    /// Decoded query parameters in request order.
    pub query_params: Vec<(String, String)>,
}

impl OssRouter {
    /// Create a router for the given domain.
    #[must_use]
    pub fn new(domain: impl Into<String>, virtual_hosting: bool) -> Self {
        Self {
            domain: domain.into(),
            virtual_hosting,
        }
    }

    /// Resolve a request to a [`RoutingContext`].
    ///
    /// # Errors
    ///
    /// Returns an [`OssError`] when no bucket is addressed or the method is not
    /// valid for the addressed resource.
    pub fn resolve<B>(&self, req: &http::Request<B>) -> Result<RoutingContext, OssError> {
        let uri = req.uri();
        let query_params = parse_query_params(uri.query().unwrap_or(""));

        let virtual_bucket = if self.virtual_hosting {
            extract_virtual_host_bucket(req.headers(), &self.domain)
        } else {
            None
        };

        let path = uri.path();
        let (bucket, key) = match virtual_bucket {
            Some(bucket) => {
                let raw_key = path.strip_prefix('/').unwrap_or(path);
                let key = (!raw_key.is_empty()).then(|| decode_uri_component(raw_key));
                (Some(bucket), key)
            }
            None => parse_path(path),
        };

        let operation = identify_operation(
            req.method(),
            bucket.is_some(),
            key.is_some(),
            &query_params,
            req.headers(),
        )?;

        Ok(RoutingContext {
            bucket,
            key,
            operation,
            query_params,
        })
    }
}

/// Extract the bucket from a `Host` header of the form `bucket.{domain}[:port]`.
fn extract_virtual_host_bucket(headers: &http::HeaderMap, domain: &str) -> Option<String> {
    let host = headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())?;
    let host = host.split(':').next().unwrap_or(host);

    host.strip_suffix(domain)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|bucket| !bucket.is_empty())
        .map(ToOwned::to_owned)
}

/// Split `/{bucket}/{key...}` into its parts.
fn parse_path(path: &str) -> (Option<String>, Option<String>) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return (None, None);
    }

    match trimmed.split_once('/') {
        Some((bucket, key)) => {
            let key = (!key.is_empty()).then(|| decode_uri_component(key));
            (Some(decode_uri_component(bucket)), key)
        }
        None => (Some(decode_uri_component(trimmed)), None),
    }
}

fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Parse a query string into decoded key-value pairs. Bare keys map to `""`.
fn parse_query_params(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_uri_component(k), decode_uri_component(v)),
            None => (decode_uri_component(pair), String::new()),
        })
        .collect()
}

fn query_has_key(params: &[(String, String)], key: &str) -> bool {
    params.iter().any(|(k, _)| k == key)
}

fn identify_operation(
    method: &Method,
    has_bucket: bool,
    has_key: bool,
    params: &[(String, String)],
    header_map: &http::HeaderMap,
) -> Result<OssOperation, OssError> {
    match (has_bucket, has_key) {
        (true, false) => identify_bucket_operation(method),
        (true, true) => identify_object_operation(method, params, header_map),
        (false, _) => Err(OssError::with_message(
            OssErrorCode::InvalidRequest,
            "Bucket name is required",
        )),
    }
}

fn identify_bucket_operation(method: &Method) -> Result<OssOperation, OssError> {
    match *method {
        Method::PUT => Ok(OssOperation::CreateBucket),
        Method::DELETE => Ok(OssOperation::DeleteBucket),
        Method::GET => Ok(OssOperation::ListObjects),
        _ => Err(OssError::method_not_allowed(method.as_str())),
    }
}

fn identify_object_operation(
    method: &Method,
    params: &[(String, String)],
    header_map: &http::HeaderMap,
) -> Result<OssOperation, OssError> {
    let op = match *method {
        Method::GET if query_has_key(params, "acl") => OssOperation::GetObjectAcl,
        Method::GET if query_has_key(params, "uploadId") => OssOperation::ListParts,
        Method::GET => OssOperation::GetObject,
        Method::HEAD => OssOperation::HeadObject,
        Method::PUT if query_has_key(params, "acl") => OssOperation::PutObjectAcl,
        Method::PUT if query_has_key(params, "uploadId") => OssOperation::UploadPart,
        Method::PUT if header_map.contains_key(headers::COPY_SOURCE) => OssOperation::CopyObject,
        Method::PUT => OssOperation::PutObject,
        Method::POST if query_has_key(params, "uploads") => {
            OssOperation::InitiateMultipartUpload
        }
        Method::POST if query_has_key(params, "uploadId") => {
            OssOperation::CompleteMultipartUpload
        }
        Method::POST if query_has_key(params, "append") => OssOperation::AppendObject,
        Method::DELETE if query_has_key(params, "uploadId") => {
            OssOperation::AbortMultipartUpload
        }
        Method::DELETE => OssOperation::DeleteObject,
        _ => return Err(OssError::method_not_allowed(method.as_str())),
    };
    Ok(op)
}
