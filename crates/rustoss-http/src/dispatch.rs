//! Operation dispatch: hands a routed request to the store.
//!
//! [`OssHandler`] is the boundary between this crate and the store. The
//! server implements it by extracting the input with
//! [`FromOssRequest`](crate::request::FromOssRequest), calling the matching
//! `handle_*` method and serializing the output with
//! [`IntoOssResponse`](crate::response::IntoOssResponse).

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use rustoss_model::OssOperation;
use rustoss_model::error::OssError;

use crate::body::OssResponseBody;
use crate::router::RoutingContext;

/// Boxed future returned by [`OssHandler::handle_operation`].
pub type HandlerFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<OssResponseBody>, OssError>> + Send>>;

/// Trait the store implements to serve routed operations.
///
/// The future is boxed so the service can hold the handler as a plain
/// generic or behind an `Arc`.
pub trait OssHandler: Send + Sync + 'static {
    /// Handle an operation and produce an HTTP response.
    fn handle_operation(
        &self,
        op: OssOperation,
        parts: http::request::Parts,
        body: Bytes,
        ctx: RoutingContext,
    ) -> HandlerFuture;
}

/// Dispatch a routed request to the handler.
pub async fn dispatch_operation<H: OssHandler>(
    handler: &H,
    parts: http::request::Parts,
    body: Bytes,
    ctx: RoutingContext,
) -> Result<http::Response<OssResponseBody>, OssError> {
    let op = ctx.operation;
    tracing::debug!(operation = %op, bucket = ?ctx.bucket, key = ?ctx.key, "dispatching OSS operation");
    handler.handle_operation(op, parts, body, ctx).await
}

/// A handler that answers `NotImplemented` for every operation.
///
/// Useful for exercising routing and the service pipeline in isolation.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl OssHandler for NotImplementedHandler {
    fn handle_operation(
        &self,
        op: OssOperation,
        _parts: http::request::Parts,
        _body: Bytes,
        _ctx: RoutingContext,
    ) -> HandlerFuture {
        Box::pin(async move { Err(OssError::not_implemented(op.as_str())) })
    }
}
