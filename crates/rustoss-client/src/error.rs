//! Client error types.

use reqwest::StatusCode;
use rustoss_xml::{ErrorDocument, XmlError};

/// Errors returned by [`OssClient`](crate::OssClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A precondition failed locally; no request was sent.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the call.
        message: String,
    },

    /// The service answered with an error document.
    #[error("{code}: {message} (status {status}, request id {request_id})")]
    Service {
        /// HTTP status of the response.
        status: StatusCode,
        /// The OSS error code, e.g. `NoSuchKey`.
        code: String,
        /// The service message.
        message: String,
        /// `x-oss-request-id` of the failed request.
        request_id: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body was not the expected XML document.
    #[error("malformed response: {0}")]
    Xml(#[from] XmlError),

    /// A response lacked a header the operation returns its result in.
    #[error("missing response header: {0}")]
    MissingHeader(&'static str),
}

impl ClientError {
    /// Build a local precondition failure.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Build a service error from a parsed `<Error>` document.
    ///
    /// HEAD responses carry no body, so an empty document falls back to the
    /// status reason and the request ID header.
    #[must_use]
    pub fn from_document(status: StatusCode, doc: ErrorDocument, request_id: Option<&str>) -> Self {
        let code = if doc.code.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown")
                .replace(' ', "")
        } else {
            doc.code
        };
        let request_id = if doc.request_id.is_empty() {
            request_id.unwrap_or_default().to_owned()
        } else {
            doc.request_id
        };
        Self::Service {
            status,
            code,
            message: doc.message,
            request_id,
        }
    }

    /// The OSS error code, for service errors.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The service message, for service errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Service { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the call was rejected locally before any request was sent.
    ///
    /// Such failures are not retryable.
    #[must_use]
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Whether the service reported the key as missing.
    #[must_use]
    pub fn is_no_such_key(&self) -> bool {
        self.code() == Some("NoSuchKey")
    }
}
