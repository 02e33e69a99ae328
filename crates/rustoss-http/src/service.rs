//! The hyper `Service` for the OSS HTTP API.
//!
//! [`OssHttpService`] runs every request through the same pipeline:
//!
//! 1. Health check interception (`GET /_rustoss/health`)
//! 2. Routing via [`OssRouter`]
//! 3. Body collection
//! 4. Dispatch to the [`OssHandler`]
//! 5. Error formatting and common headers (`x-oss-request-id`, `Server`)

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use rustoss_model::error::OssError;
use rustoss_model::headers;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::body::OssResponseBody;
use crate::dispatch::{OssHandler, dispatch_operation};
use crate::response::error_to_response;
use crate::router::OssRouter;

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/_rustoss/health";

/// HTTP service settings.
#[derive(Debug, Clone)]
pub struct OssHttpConfig {
    /// Base domain for virtual-hosted-style requests, also reported as `HostId`.
    pub domain: String,
    /// Whether the bucket may be taken from the `Host` header.
    pub virtual_hosting: bool,
}

impl Default for OssHttpConfig {
    fn default() -> Self {
        Self {
            domain: "oss.localhost".to_owned(),
            virtual_hosting: true,
        }
    }
}

/// The OSS HTTP service.
///
/// Cloning is cheap: the handler and configuration are shared.
#[derive(Debug)]
pub struct OssHttpService<H: OssHandler> {
    handler: Arc<H>,
    router: OssRouter,
    config: Arc<OssHttpConfig>,
}

impl<H: OssHandler> OssHttpService<H> {
    /// Create a service with the given handler and configuration.
    #[must_use]
    pub fn new(handler: H, config: OssHttpConfig) -> Self {
        Self::from_shared(Arc::new(handler), config)
    }

    /// Create a service from an already shared handler.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, config: OssHttpConfig) -> Self {
        let router = OssRouter::new(&config.domain, config.virtual_hosting);
        Self {
            handler,
            router,
            config: Arc::new(config),
        }
    }
}

impl<H: OssHandler> Clone for OssHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            router: self.router.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: OssHandler> Service<http::Request<Incoming>> for OssHttpService<H> {
    type Response = http::Response<OssResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let router = self.router.clone();
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let request_id = generate_request_id();
            let response =
                process_request(req, handler.as_ref(), &router, &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Generate a request ID: 24 uppercase hex characters.
#[must_use]
pub fn generate_request_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
    id.truncate(24);
    id
}

async fn process_request<H: OssHandler>(
    req: http::Request<Incoming>,
    handler: &H,
    router: &OssRouter,
    config: &OssHttpConfig,
    request_id: &str,
) -> http::Response<OssResponseBody> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!(%method, %uri, request_id, "processing OSS request");

    if is_health_check(&method, uri.path()) {
        return health_check_response();
    }

    let ctx = match router.resolve(&req) {
        Ok(ctx) => ctx,
        Err(err) => {
            warn!(%method, %uri, error = %err, request_id, "failed to route OSS request");
            return error_to_response(&err, request_id, &config.domain);
        }
    };

    info!(
        operation = %ctx.operation,
        bucket = ?ctx.bucket,
        key = ?ctx.key,
        request_id,
        "routed OSS request"
    );

    let (parts, incoming) = req.into_parts();
    let body = match collect_body(incoming).await {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, request_id, "failed to collect request body");
            let oss_err = OssError::internal_error("Failed to read request body");
            return error_to_response(&oss_err, request_id, &config.domain);
        }
    };

    match dispatch_operation(handler, parts, body, ctx).await {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, request_id, "OSS operation returned error");
            error_to_response(&err, request_id, &config.domain)
        }
    }
}

async fn collect_body(incoming: Incoming) -> Result<Bytes, hyper::Error> {
    let collected = incoming.collect().await?;
    Ok(collected.to_bytes())
}

fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && path == HEALTH_PATH
}

fn health_check_response() -> http::Response<OssResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(OssResponseBody::from_string(
            r#"{"status":"running","service":"oss"}"#,
        ))
        .expect("static health response should be valid")
}

fn add_common_headers(
    mut response: http::Response<OssResponseBody>,
    request_id: &str,
) -> http::Response<OssResponseBody> {
    let response_headers = response.headers_mut();
    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        response_headers.insert(headers::REQUEST_ID, hv);
    }
    response_headers.insert(
        http::header::SERVER,
        http::header::HeaderValue::from_static("RustOSS"),
    );
    response
}
