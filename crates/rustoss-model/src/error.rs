//! OSS error codes and the wire error type.

use std::fmt;

/// Error codes returned by the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum OssErrorCode {
    /// AccessDenied error.
    AccessDenied,
    /// BucketAlreadyExists error.
    BucketAlreadyExists,
    /// BucketNotEmpty error.
    BucketNotEmpty,
    /// EntityTooSmall error.
    EntityTooSmall,
    /// InternalError error.
    #[default]
    InternalError,
    /// InvalidArgument error.
    InvalidArgument,
    /// InvalidBucketName error.
    InvalidBucketName,
    /// InvalidDigest error.
    InvalidDigest,
    /// InvalidObjectName error.
    InvalidObjectName,
    /// InvalidPart error.
    InvalidPart,
    /// InvalidPartOrder error.
    InvalidPartOrder,
    /// InvalidRequest error.
    InvalidRequest,
    /// MalformedXML error.
    MalformedXML,
    /// MethodNotAllowed error.
    MethodNotAllowed,
    /// NoSuchBucket error.
    NoSuchBucket,
    /// NoSuchKey error.
    NoSuchKey,
    /// NoSuchUpload error.
    NoSuchUpload,
    /// NotImplemented error.
    NotImplemented,
    /// ObjectNotAppendable error.
    ObjectNotAppendable,
    /// PositionNotEqualToLength error.
    PositionNotEqualToLength,
    /// A code not in the standard set.
    Custom(&'static str),
}

impl OssErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessDenied => "AccessDenied",
            Self::BucketAlreadyExists => "BucketAlreadyExists",
            Self::BucketNotEmpty => "BucketNotEmpty",
            Self::EntityTooSmall => "EntityTooSmall",
            Self::InternalError => "InternalError",
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidBucketName => "InvalidBucketName",
            Self::InvalidDigest => "InvalidDigest",
            Self::InvalidObjectName => "InvalidObjectName",
            Self::InvalidPart => "InvalidPart",
            Self::InvalidPartOrder => "InvalidPartOrder",
            Self::InvalidRequest => "InvalidRequest",
            Self::MalformedXML => "MalformedXML",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::NoSuchBucket => "NoSuchBucket",
            Self::NoSuchKey => "NoSuchKey",
            Self::NoSuchUpload => "NoSuchUpload",
            Self::NotImplemented => "NotImplemented",
            Self::ObjectNotAppendable => "ObjectNotAppendable",
            Self::PositionNotEqualToLength => "PositionNotEqualToLength",
            Self::Custom(s) => s,
        }
    }

    /// Parse a code string received on the wire.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let known = match code {
            "AccessDenied" => Self::AccessDenied,
            "BucketAlreadyExists" => Self::BucketAlreadyExists,
            "BucketNotEmpty" => Self::BucketNotEmpty,
            "EntityTooSmall" => Self::EntityTooSmall,
            "InternalError" => Self::InternalError,
            "InvalidArgument" => Self::InvalidArgument,
            "InvalidBucketName" => Self::InvalidBucketName,
            "InvalidDigest" => Self::InvalidDigest,
            "InvalidObjectName" => Self::InvalidObjectName,
            "InvalidPart" => Self::InvalidPart,
            "InvalidPartOrder" => Self::InvalidPartOrder,
            "InvalidRequest" => Self::InvalidRequest,
            "MalformedXML" => Self::MalformedXML,
            "MethodNotAllowed" => Self::MethodNotAllowed,
            "NoSuchBucket" => Self::NoSuchBucket,
            "NoSuchKey" => Self::NoSuchKey,
            "NoSuchUpload" => Self::NoSuchUpload,
            "NotImplemented" => Self::NotImplemented,
            "ObjectNotAppendable" => Self::ObjectNotAppendable,
            "PositionNotEqualToLength" => Self::PositionNotEqualToLength,
            _ => return None,
        };
        Some(known)
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::EntityTooSmall
            | Self::InvalidArgument
            | Self::InvalidBucketName
            | Self::InvalidDigest
            | Self::InvalidObjectName
            | Self::InvalidPart
            | Self::InvalidPartOrder
            | Self::InvalidRequest
            | Self::MalformedXML => http::StatusCode::BAD_REQUEST,
            Self::AccessDenied => http::StatusCode::FORBIDDEN,
            Self::NoSuchBucket | Self::NoSuchKey | Self::NoSuchUpload => {
                http::StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::BucketAlreadyExists
            | Self::BucketNotEmpty
            | Self::ObjectNotAppendable
            | Self::PositionNotEqualToLength => http::StatusCode::CONFLICT,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotImplemented => http::StatusCode::NOT_IMPLEMENTED,
            Self::Custom(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the default message for this error.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::AccessDenied => "You have no right to access this object.",
            Self::BucketAlreadyExists => "The requested bucket name is not available.",
            Self::BucketNotEmpty => "The bucket you tried to delete is not empty.",
            Self::EntityTooSmall => {
                "Your proposed upload smaller than the minimum allowed size."
            }
            Self::InternalError => "We encountered an internal error. Please try again.",
            Self::InvalidArgument => "Invalid Argument.",
            Self::InvalidBucketName => "The specified bucket is not valid.",
            Self::InvalidDigest => "The Content-MD5 you specified is not valid.",
            Self::InvalidObjectName => "The specified object is not valid.",
            Self::InvalidPart => "One or more of the specified parts could not be found.",
            Self::InvalidPartOrder => "The list of parts was not in ascending order.",
            Self::InvalidRequest => "Invalid Request.",
            Self::MalformedXML => "The XML you provided was not well-formed.",
            Self::MethodNotAllowed => "The specified method is not allowed against this resource.",
            Self::NoSuchBucket => "The specified bucket does not exist.",
            Self::NoSuchKey => "The specified key does not exist.",
            Self::NoSuchUpload => "The specified upload does not exist.",
            Self::NotImplemented => "The functionality is not implemented.",
            Self::ObjectNotAppendable => "The object is not appendable.",
            Self::PositionNotEqualToLength => "Position is not equal to file length.",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for OssErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An OSS error response.
#[derive(Debug)]
pub struct OssError {
    /// The error code.
    pub code: OssErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The resource that caused the error.
    pub resource: Option<String>,
    /// The request ID.
    pub request_id: Option<String>,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// Extra response headers carried with the error.
    pub headers: Vec<(&'static str, String)>,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for OssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OssError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for OssError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl OssError {
    /// Create a new error from a code, using its default message and status.
    #[must_use]
    pub fn new(code: OssErrorCode) -> Self {
        Self::with_message(code, code.default_message())
    }

    /// Create a new error with a custom message.
    #[must_use]
    pub fn with_message(code: OssErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            resource: None,
            request_id: None,
            headers: Vec::new(),
            source: None,
        }
    }

    /// Set the resource that caused this error.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach a response header.
    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a NoSuchBucket error.
    #[must_use]
    pub fn no_such_bucket(bucket_name: impl Into<String>) -> Self {
        Self::new(OssErrorCode::NoSuchBucket).with_resource(bucket_name)
    }

    /// Create a NoSuchKey error.
    #[must_use]
    pub fn no_such_key(key: impl Into<String>) -> Self {
        Self::new(OssErrorCode::NoSuchKey).with_resource(key)
    }

    /// Create a NoSuchUpload error.
    #[must_use]
    pub fn no_such_upload(upload_id: impl Into<String>) -> Self {
        Self::new(OssErrorCode::NoSuchUpload).with_resource(upload_id)
    }

    /// Create a BucketAlreadyExists error.
    #[must_use]
    pub fn bucket_already_exists(bucket_name: impl Into<String>) -> Self {
        Self::new(OssErrorCode::BucketAlreadyExists).with_resource(bucket_name)
    }

    /// Create a BucketNotEmpty error.
    #[must_use]
    pub fn bucket_not_empty(bucket_name: impl Into<String>) -> Self {
        Self::new(OssErrorCode::BucketNotEmpty).with_resource(bucket_name)
    }

    /// Create an InternalError error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(OssErrorCode::InternalError, message)
    }

    /// Create an InvalidArgument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(OssErrorCode::InvalidArgument, message)
    }

    /// Create an InvalidBucketName error.
    #[must_use]
    pub fn invalid_bucket_name(bucket_name: impl Into<String>) -> Self {
        Self::new(OssErrorCode::InvalidBucketName).with_resource(bucket_name)
    }

    /// Create a MalformedXML error.
    #[must_use]
    pub fn malformed_xml(detail: impl Into<String>) -> Self {
        Self::new(OssErrorCode::MalformedXML).with_resource(detail)
    }

    /// Create a MethodNotAllowed error.
    #[must_use]
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::new(OssErrorCode::MethodNotAllowed).with_resource(method)
    }

    /// Create a NotImplemented error.
    #[must_use]
    pub fn not_implemented(detail: impl Into<String>) -> Self {
        Self::new(OssErrorCode::NotImplemented).with_resource(detail)
    }

    /// Create a PositionNotEqualToLength error carrying the next valid position.
    #[must_use]
    pub fn position_not_equal_to_length(key: impl Into<String>, next_position: u64) -> Self {
        Self::new(OssErrorCode::PositionNotEqualToLength)
            .with_resource(key)
            .with_header(crate::headers::NEXT_APPEND_POSITION, next_position.to_string())
    }
}

/// Create an OssError from an error code.
///
/// # Examples
///
/// ```
/// use rustoss_model::oss_error;
/// use rustoss_model::error::OssErrorCode;
///
/// let err = oss_error!(NoSuchBucket);
/// assert_eq!(err.code, OssErrorCode::NoSuchBucket);
///
/// let err = oss_error!(InvalidArgument, "no acl given");
/// assert_eq!(err.message, "no acl given");
/// ```
#[macro_export]
macro_rules! oss_error {
    ($code:ident) => {
        $crate::error::OssError::new($crate::error::OssErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::OssError::with_message($crate::error::OssErrorCode::$code, $msg)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_use_oss_no_such_key_message() {
        let err = OssError::no_such_key("missing.txt");
        assert_eq!(err.code, OssErrorCode::NoSuchKey);
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        assert!(err.message.starts_with("The specified key does not exist"));
        assert_eq!(err.resource.as_deref(), Some("missing.txt"));
    }

    #[test]
    fn test_should_round_trip_code_strings() {
        for code in [
            OssErrorCode::NoSuchKey,
            OssErrorCode::InvalidArgument,
            OssErrorCode::PositionNotEqualToLength,
            OssErrorCode::ObjectNotAppendable,
        ] {
            assert_eq!(OssErrorCode::from_code(code.as_str()), Some(code));
        }
        assert_eq!(OssErrorCode::from_code("SomethingElse"), None);
    }

    #[test]
    fn test_should_attach_next_position_header() {
        let err = OssError::position_not_equal_to_length("log", 42);
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert_eq!(
            err.headers,
            vec![("x-oss-next-append-position", "42".to_owned())]
        );
    }
}
