//! Store error types.
//!
//! [`OssServiceError`] is the domain error for every store operation. It maps
//! onto the wire error [`OssError`] through [`OssServiceError::into_oss_error`].

use rustoss_model::error::{OssError, OssErrorCode};

/// OSS service error type.
#[derive(Debug, thiserror::Error)]
pub enum OssServiceError {
    // -----------------------------------------------------------------------
    // Bucket errors
    // -----------------------------------------------------------------------
    /// The specified bucket does not exist.
    #[error("The specified bucket does not exist: {bucket}")]
    NoSuchBucket {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// The bucket name is already taken.
    #[error("The requested bucket name is not available: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// The bucket still holds objects.
    #[error("The bucket you tried to delete is not empty: {bucket}")]
    BucketNotEmpty {
        /// The bucket name that is not empty.
        bucket: String,
    },

    // -----------------------------------------------------------------------
    // Object errors
    // -----------------------------------------------------------------------
    /// The specified key does not exist.
    #[error("The specified key does not exist: {key}")]
    NoSuchKey {
        /// The key that was not found.
        key: String,
    },

    /// Append was attempted on an object that was not created by append.
    #[error("The object is not appendable: {key}")]
    ObjectNotAppendable {
        /// The key of the non-appendable object.
        key: String,
    },

    /// The append position does not match the current object length.
    #[error("Position is not equal to file length: {key}, expected {next_position}")]
    PositionNotEqualToLength {
        /// The object key.
        key: String,
        /// The position the next append must use.
        next_position: u64,
    },

    // -----------------------------------------------------------------------
    // Multipart upload errors
    // -----------------------------------------------------------------------
    /// The specified multipart upload does not exist.
    #[error("The specified upload does not exist: {upload_id}")]
    NoSuchUpload {
        /// The upload ID that was not found.
        upload_id: String,
    },

    /// The list of parts was not in ascending order.
    #[error("The list of parts was not in ascending order")]
    InvalidPartOrder,

    /// A listed part was never uploaded or its ETag does not match.
    #[error("One or more of the specified parts could not be found: part {part_number}")]
    InvalidPart {
        /// The offending part number.
        part_number: u32,
    },

    /// A non-final part is smaller than the minimum part size.
    #[error("Your proposed upload smaller than the minimum allowed size: part {part_number}")]
    EntityTooSmall {
        /// The offending part number.
        part_number: u32,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// The specified bucket name is not valid.
    #[error("Invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The invalid bucket name.
        name: String,
        /// The reason for the error.
        reason: String,
    },

    /// The specified object key is not valid.
    #[error("Invalid object name: {key}: {reason}")]
    InvalidObjectName {
        /// The invalid key.
        key: String,
        /// The reason for the error.
        reason: String,
    },

    /// An argument provided is invalid.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The Content-MD5 header is malformed or does not match the body.
    #[error("The Content-MD5 you specified is not valid")]
    InvalidDigest,

    /// The XML body is malformed.
    #[error("The XML you provided was not well-formed")]
    MalformedXml,

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OssServiceError {
    /// Convert this error into an [`OssError`].
    #[must_use]
    pub fn into_oss_error(self) -> OssError {
        OssError::from(self)
    }
}

impl From<OssServiceError> for OssError {
    fn from(err: OssServiceError) -> Self {
        match err {
            OssServiceError::NoSuchBucket { bucket } => OssError::no_such_bucket(bucket),
            OssServiceError::BucketAlreadyExists { bucket } => {
                OssError::bucket_already_exists(bucket)
            }
            OssServiceError::BucketNotEmpty { bucket } => OssError::bucket_not_empty(bucket),
            OssServiceError::NoSuchKey { key } => OssError::no_such_key(key),
            OssServiceError::ObjectNotAppendable { key } => {
                OssError::new(OssErrorCode::ObjectNotAppendable).with_resource(key)
            }
            OssServiceError::PositionNotEqualToLength { key, next_position } => {
                OssError::position_not_equal_to_length(key, next_position)
            }
            OssServiceError::NoSuchUpload { upload_id } => OssError::no_such_upload(upload_id),
            OssServiceError::InvalidPartOrder => OssError::new(OssErrorCode::InvalidPartOrder),
            OssServiceError::InvalidPart { part_number } => {
                OssError::new(OssErrorCode::InvalidPart).with_resource(part_number.to_string())
            }
            OssServiceError::EntityTooSmall { part_number } => {
                OssError::new(OssErrorCode::EntityTooSmall)
                    .with_resource(part_number.to_string())
            }
            OssServiceError::InvalidBucketName { name, reason } => {
                OssError::with_message(OssErrorCode::InvalidBucketName, reason).with_resource(name)
            }
            OssServiceError::InvalidObjectName { key, reason } => {
                OssError::with_message(OssErrorCode::InvalidObjectName, reason).with_resource(key)
            }
            OssServiceError::InvalidArgument { message } => OssError::invalid_argument(message),
            OssServiceError::InvalidDigest => OssError::new(OssErrorCode::InvalidDigest),
            OssServiceError::MalformedXml => OssError::new(OssErrorCode::MalformedXML),
            err @ OssServiceError::Internal(_) => OssError::internal_error(err.to_string()),
        }
    }
}

/// Convenience result type for store operations.
pub type OssServiceResult<T> = Result<T, OssServiceError>;
