//! Per-request settings for object writes.

use std::collections::HashMap;

use reqwest::RequestBuilder;
use rustoss_model::CannedAccessControlList;
use rustoss_model::headers;

/// ACL directive, content type and user metadata sent with a write.
///
/// ```
/// use rustoss_client::ObjectOptions;
/// use rustoss_model::CannedAccessControlList;
///
/// let options = ObjectOptions::new()
///     .acl(CannedAccessControlList::PublicRead)
///     .content_type("application/txt")
///     .meta("tag", "copy-object");
/// assert!(options.has_new_metadata());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectOptions {
    /// Sent as `x-oss-object-acl` when set.
    pub acl: Option<CannedAccessControlList>,
    /// Sent as `Content-Type` when set.
    pub content_type: Option<String>,
    /// Sent as `x-oss-meta-{name}` headers.
    pub metadata: HashMap<String, String>,
}

impl ObjectOptions {
    /// Empty options: no directive, server-side content type, no metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ACL directive.
    #[must_use]
    pub fn acl(mut self, acl: CannedAccessControlList) -> Self {
        self.acl = Some(acl);
        self
    }

    /// Set the content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add one user metadata entry.
    #[must_use]
    pub fn meta(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// Whether a content type or user metadata is given.
    ///
    /// A copy carrying either replaces the source's metadata.
    #[must_use]
    pub fn has_new_metadata(&self) -> bool {
        self.content_type.is_some() || !self.metadata.is_empty()
    }

    pub(crate) fn apply(&self, mut req: RequestBuilder) -> RequestBuilder {
        if let Some(acl) = self.acl {
            req = req.header(headers::OBJECT_ACL, acl.as_str());
        }
        if let Some(content_type) = &self.content_type {
            req = req.header("Content-Type", content_type.as_str());
        }
        for (name, value) in &self.metadata {
            req = req.header(format!("{}{name}", headers::META_PREFIX), value.as_str());
        }
        req
    }
}

impl From<Option<CannedAccessControlList>> for ObjectOptions {
    fn from(acl: Option<CannedAccessControlList>) -> Self {
        Self {
            acl,
            ..Self::default()
        }
    }
}
