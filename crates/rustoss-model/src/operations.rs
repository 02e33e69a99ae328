//! The operations served by the object store.

/// All supported OSS operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OssOperation {
    /// The CreateBucket operation.
    CreateBucket,
    /// The DeleteBucket operation.
    DeleteBucket,
    /// The ListObjects operation.
    ListObjects,
    /// The PutObject operation.
    PutObject,
    /// The CopyObject operation.
    CopyObject,
    /// The AppendObject operation.
    AppendObject,
    /// The GetObject operation.
    GetObject,
    /// The HeadObject operation.
    HeadObject,
    /// The DeleteObject operation.
    DeleteObject,
    /// The GetObjectAcl operation.
    GetObjectAcl,
    /// The PutObjectAcl operation.
    PutObjectAcl,
    /// The InitiateMultipartUpload operation.
    InitiateMultipartUpload,
    /// The UploadPart operation.
    UploadPart,
    /// The CompleteMultipartUpload operation.
    CompleteMultipartUpload,
    /// The AbortMultipartUpload operation.
    AbortMultipartUpload,
    /// The ListParts operation.
    ListParts,
}

impl OssOperation {
    /// Returns the operation name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateBucket => "CreateBucket",
            Self::DeleteBucket => "DeleteBucket",
            Self::ListObjects => "ListObjects",
            Self::PutObject => "PutObject",
            Self::CopyObject => "CopyObject",
            Self::AppendObject => "AppendObject",
            Self::GetObject => "GetObject",
            Self::HeadObject => "HeadObject",
            Self::DeleteObject => "DeleteObject",
            Self::GetObjectAcl => "GetObjectAcl",
            Self::PutObjectAcl => "PutObjectAcl",
            Self::InitiateMultipartUpload => "InitiateMultipartUpload",
            Self::UploadPart => "UploadPart",
            Self::CompleteMultipartUpload => "CompleteMultipartUpload",
            Self::AbortMultipartUpload => "AbortMultipartUpload",
            Self::ListParts => "ListParts",
        }
    }

    /// Parse an operation name string into an OssOperation.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CreateBucket" => Some(Self::CreateBucket),
            "DeleteBucket" => Some(Self::DeleteBucket),
            "ListObjects" => Some(Self::ListObjects),
            "PutObject" => Some(Self::PutObject),
            "CopyObject" => Some(Self::CopyObject),
            "AppendObject" => Some(Self::AppendObject),
            "GetObject" => Some(Self::GetObject),
            "HeadObject" => Some(Self::HeadObject),
            "DeleteObject" => Some(Self::DeleteObject),
            "GetObjectAcl" => Some(Self::GetObjectAcl),
            "PutObjectAcl" => Some(Self::PutObjectAcl),
            "InitiateMultipartUpload" => Some(Self::InitiateMultipartUpload),
            "UploadPart" => Some(Self::UploadPart),
            "CompleteMultipartUpload" => Some(Self::CompleteMultipartUpload),
            "AbortMultipartUpload" => Some(Self::AbortMultipartUpload),
            "ListParts" => Some(Self::ListParts),
            _ => None,
        }
    }

    /// Whether this operation writes object content and so carries an ACL directive.
    #[must_use]
    pub fn is_object_write(&self) -> bool {
        matches!(
            self,
            Self::PutObject | Self::CopyObject | Self::AppendObject | Self::CompleteMultipartUpload
        )
    }
}

impl std::fmt::Display for OssOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
