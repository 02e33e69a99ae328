//! HTTP service layer for RustOSS.
//!
//! This crate turns hyper requests into typed operation inputs and typed
//! outputs back into OSS-style HTTP responses. The store itself lives behind
//! the [`OssHandler`] trait, so this crate never touches object state.
//!
//! ```text
//! hyper request
//!      |
//!      v
//! OssHttpService  (health check, body collection, request id)
//!      |
//!      v
//! OssRouter       (path / virtual host, sub-resources -> OssOperation)
//!      |
//!      v
//! OssHandler      (FromOssRequest -> handle_* -> IntoOssResponse)
//! ```

// OssError carries a header list and boxed source, and every handler returns it
// by value, so the large-Err lint fires on nearly every function here.
#![allow(clippy::result_large_err)]

pub mod body;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

pub use body::OssResponseBody;
pub use dispatch::{HandlerFuture, NotImplementedHandler, OssHandler};
pub use request::FromOssRequest;
pub use response::IntoOssResponse;
pub use router::{OssRouter, RoutingContext};
pub use service::{OssHttpConfig, OssHttpService};
