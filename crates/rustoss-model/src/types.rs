//! Shared value types: permissions, object kinds, owners and part descriptors.

use serde::{Deserialize, Serialize};

/// The access permission attached to an object.
///
/// `Default` means the object inherits the bucket-level policy. `Unknown` is
/// what [`ObjectPermission::parse`] returns for text it does not recognize; it
/// is never stored against an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectPermission {
    /// Inherit the bucket ACL.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Only the owner may read or write.
    #[serde(rename = "private")]
    Private,
    /// Anyone may read, only the owner may write.
    #[serde(rename = "public-read")]
    PublicRead,
    /// Anyone may read or write.
    #[serde(rename = "public-read-write")]
    PublicReadWrite,
    /// Text that did not match any known permission.
    #[serde(rename = "unknown")]
    Unknown,
}

impl ObjectPermission {
    /// Returns the wire string of this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a permission from its wire string.
    ///
    /// Matching is exact and case-sensitive. Anything else yields
    /// [`ObjectPermission::Unknown`]; this never fails.
    ///
    /// ```
    /// use rustoss_model::types::ObjectPermission;
    ///
    /// assert_eq!(ObjectPermission::parse("public-read"), ObjectPermission::PublicRead);
    /// assert_eq!(ObjectPermission::parse("UnknownPermission"), ObjectPermission::Unknown);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "default" => Self::Default,
            "private" => Self::Private,
            "public-read" => Self::PublicRead,
            "public-read-write" => Self::PublicReadWrite,
            _ => Self::Unknown,
        }
    }

    /// Whether this permission came from unrecognized text.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for ObjectPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ObjectPermission {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Parse permission text into an [`ObjectPermission`].
///
/// Free-function form of [`ObjectPermission::parse`].
#[must_use]
pub fn parse_permission(text: &str) -> ObjectPermission {
    ObjectPermission::parse(text)
}

/// A canned ACL that may be attached to a write or an ACL update.
///
/// This is the directive form of a permission: it has no `Unknown` variant, so
/// an unrecognized value can never reach storage. Writes carry it as
/// `Option<CannedAccessControlList>`; `None` means "leave the permission alone"
/// and is different from `Some(Default)`, which resets to bucket inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CannedAccessControlList {
    /// Reset to bucket inheritance.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Owner only.
    #[serde(rename = "private")]
    Private,
    /// Public read access.
    #[serde(rename = "public-read")]
    PublicRead,
    /// Public read and write access.
    #[serde(rename = "public-read-write")]
    PublicReadWrite,
}

impl CannedAccessControlList {
    /// Returns the header value of this ACL.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.permission().as_str()
    }

    /// The permission this directive stores.
    #[must_use]
    pub fn permission(self) -> ObjectPermission {
        match self {
            Self::Default => ObjectPermission::Default,
            Self::Private => ObjectPermission::Private,
            Self::PublicRead => ObjectPermission::PublicRead,
            Self::PublicReadWrite => ObjectPermission::PublicReadWrite,
        }
    }

    /// Parse a header value, returning `None` when it is not a canned ACL.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        Self::try_from(ObjectPermission::parse(value)).ok()
    }
}

impl std::fmt::Display for CannedAccessControlList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CannedAccessControlList> for ObjectPermission {
    fn from(acl: CannedAccessControlList) -> Self {
        acl.permission()
    }
}

impl TryFrom<ObjectPermission> for CannedAccessControlList {
    type Error = ObjectPermission;

    fn try_from(permission: ObjectPermission) -> Result<Self, Self::Error> {
        match permission {
            ObjectPermission::Default => Ok(Self::Default),
            ObjectPermission::Private => Ok(Self::Private),
            ObjectPermission::PublicRead => Ok(Self::PublicRead),
            ObjectPermission::PublicReadWrite => Ok(Self::PublicReadWrite),
            ObjectPermission::Unknown => Err(permission),
        }
    }
}

/// How an object was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectType {
    /// Written by a single put or copy.
    #[default]
    Normal,
    /// Created and extended by append.
    Appendable,
    /// Assembled from a completed multipart upload.
    Multipart,
}

impl ObjectType {
    /// Returns the `x-oss-object-type` header value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Appendable => "Appendable",
            Self::Multipart => "Multipart",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ObjectType {
    fn from(s: &str) -> Self {
        match s {
            "Appendable" => Self::Appendable,
            "Multipart" => Self::Multipart,
            _ => Self::default(),
        }
    }
}

/// Metadata handling for copy requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetadataDirective {
    /// Keep the source object's metadata.
    #[default]
    #[serde(rename = "COPY")]
    Copy,
    /// Use the metadata supplied with the copy request.
    #[serde(rename = "REPLACE")]
    Replace,
}

impl MetadataDirective {
    /// Returns the `x-oss-metadata-directive` header value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Replace => "REPLACE",
        }
    }
}

impl From<&str> for MetadataDirective {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("REPLACE") {
            Self::Replace
        } else {
            Self::Copy
        }
    }
}

/// The owner of a bucket or object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    /// Canonical owner ID.
    pub id: String,
    /// Display name.
    pub display_name: String,
}

/// A part reference sent when completing a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartETag {
    /// Part number, 1-based.
    pub part_number: u32,
    /// ETag returned by the upload of this part.
    pub etag: String,
}

impl PartETag {
    /// Create a new part reference.
    #[must_use]
    pub fn new(part_number: u32, etag: impl Into<String>) -> Self {
        Self {
            part_number,
            etag: etag.into(),
        }
    }
}

/// The `CompleteMultipartUpload` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedMultipartUpload {
    /// Parts to assemble, in the order given by the caller.
    pub parts: Vec<PartETag>,
}

/// An entry in a `ListObjects` result.
#[derive(Debug, Clone, Default)]
pub struct ObjectSummary {
    /// Object key.
    pub key: String,
    /// Quoted ETag.
    pub etag: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: chrono::DateTime<chrono::Utc>,
    /// Object type.
    pub object_type: ObjectType,
    /// Owner.
    pub owner: Owner,
}

/// An entry in a `ListParts` result.
#[derive(Debug, Clone, Default)]
pub struct PartSummary {
    /// Part number.
    pub part_number: u32,
    /// Quoted ETag.
    pub etag: String,
    /// Part size in bytes.
    pub size: u64,
    /// Upload time.
    pub last_modified: chrono::DateTime<chrono::Utc>,
}
