//! Operation handler bridging the HTTP layer to [`RustOss`].
//!
//! [`RustOssHandler`] implements [`OssHandler`]: each routed operation is
//! extracted with [`FromOssRequest`], run through the matching `handle_*`
//! method and serialized with [`IntoOssResponse`].

use std::future::Future;

use bytes::Bytes;
use rustoss_core::RustOss;
use rustoss_http::body::OssResponseBody;
use rustoss_http::dispatch::{HandlerFuture, OssHandler};
use rustoss_http::request::FromOssRequest;
use rustoss_http::response::IntoOssResponse;
use rustoss_http::router::RoutingContext;
use rustoss_model::OssOperation;
use rustoss_model::error::OssError;

/// Wrapper that implements [`OssHandler`] by delegating to [`RustOss`].
#[derive(Debug, Clone)]
pub struct RustOssHandler(pub RustOss);

impl OssHandler for RustOssHandler {
    fn handle_operation(
        &self,
        op: OssOperation,
        parts: http::request::Parts,
        body: Bytes,
        ctx: RoutingContext,
    ) -> HandlerFuture {
        let provider = self.0.clone();
        Box::pin(async move {
            let request = Request {
                parts: &parts,
                bucket: ctx.bucket.as_deref(),
                key: ctx.key.as_deref(),
                query_params: &ctx.query_params,
                body,
            };

            match op {
                OssOperation::CreateBucket => {
                    request.dispatch(|i| provider.handle_create_bucket(i)).await
                }
                OssOperation::DeleteBucket => {
                    request.dispatch(|i| provider.handle_delete_bucket(i)).await
                }
                OssOperation::ListObjects => {
                    request.dispatch(|i| provider.handle_list_objects(i)).await
                }
                OssOperation::PutObject => request.dispatch(|i| provider.handle_put_object(i)).await,
                OssOperation::CopyObject => {
                    request.dispatch(|i| provider.handle_copy_object(i)).await
                }
                OssOperation::AppendObject => {
                    request.dispatch(|i| provider.handle_append_object(i)).await
                }
                OssOperation::GetObject => request.dispatch(|i| provider.handle_get_object(i)).await,
                OssOperation::HeadObject => {
                    request.dispatch(|i| provider.handle_head_object(i)).await
                }
                OssOperation::DeleteObject => {
                    request.dispatch(|i| provider.handle_delete_object(i)).await
                }
                OssOperation::GetObjectAcl => {
                    request.dispatch(|i| provider.handle_get_object_acl(i)).await
                }
                OssOperation::PutObjectAcl => {
                    request.dispatch(|i| provider.handle_put_object_acl(i)).await
                }
                OssOperation::InitiateMultipartUpload => {
                    request
                        .dispatch(|i| provider.handle_initiate_multipart_upload(i))
                        .await
                }
                OssOperation::UploadPart => {
                    request.dispatch(|i| provider.handle_upload_part(i)).await
                }
                OssOperation::CompleteMultipartUpload => {
                    request
                        .dispatch(|i| provider.handle_complete_multipart_upload(i))
                        .await
                }
                OssOperation::AbortMultipartUpload => {
                    request
                        .dispatch(|i| provider.handle_abort_multipart_upload(i))
                        .await
                }
                OssOperation::ListParts => request.dispatch(|i| provider.handle_list_parts(i)).await,
            }
        })
    }
}

/// The pieces of a routed request needed to extract an input.
struct Request<'a> {
    parts: &'a http::request::Parts,
    bucket: Option<&'a str>,
    key: Option<&'a str>,
    query_params: &'a [(String, String)],
    body: Bytes,
}

impl Request<'_> {
    /// Extract the input, run the handler and serialize its output.
    async fn dispatch<I, O, F, Fut>(
        self,
        handler_fn: F,
    ) -> Result<http::Response<OssResponseBody>, OssError>
    where
        I: FromOssRequest,
        O: IntoOssResponse,
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = Result<O, OssError>>,
    {
        let input =
            I::from_oss_request(self.parts, self.bucket, self.key, self.query_params, self.body)?;
        let output = handler_fn(input).await?;
        output.into_oss_response()
    }
}

#[cfg(test)]
mod tests {
    use rustoss_core::OssConfig;
    use rustoss_model::error::OssErrorCode;

    use super::*;

    async fn call(
        handler: &RustOssHandler,
        method: http::Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: &'static [u8],
    ) -> Result<http::Response<OssResponseBody>, OssError> {
        let mut builder = http::Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = builder
            .body(())
            .unwrap_or_else(|e| panic!("bad request: {e}"));
        let ctx = rustoss_http::router::OssRouter::new("oss.localhost", false)
            .resolve(&req)
            .unwrap_or_else(|e| panic!("route failed: {e}"));
        let (parts, ()) = req.into_parts();
        handler
            .handle_operation(ctx.operation, parts, Bytes::from_static(body), ctx)
            .await
    }

    #[tokio::test]
    async fn test_should_bridge_put_and_acl_operations() {
        let handler = RustOssHandler(RustOss::new(OssConfig::default()));

        let resp = call(&handler, http::Method::PUT, "/photos", &[], b"")
            .await
            .unwrap_or_else(|e| panic!("create failed: {e}"));
        assert_eq!(resp.status(), http::StatusCode::OK);

        let resp = call(
            &handler,
            http::Method::PUT,
            "/photos/cat.jpg",
            &[("x-oss-object-acl", "public-read")],
            b"meow",
        )
        .await
        .unwrap_or_else(|e| panic!("put failed: {e}"));
        assert!(resp.headers().contains_key("ETag"));

        let acl = handler
            .0
            .state()
            .get_bucket("photos")
            .unwrap_or_else(|e| panic!("bucket missing: {e}"))
            .get_object("cat.jpg")
            .map(|obj| obj.acl);
        assert_eq!(
            acl,
            Some(rustoss_model::types::ObjectPermission::PublicRead)
        );
    }

    #[tokio::test]
    async fn test_should_surface_store_errors() {
        let handler = RustOssHandler(RustOss::new(OssConfig::default()));
        let err = call(&handler, http::Method::GET, "/nope/k?acl", &[], b"")
            .await
            .expect_err("missing bucket should fail");
        assert_eq!(err.code, OssErrorCode::NoSuchBucket);
    }
}
