//! Object permission resolution.
//!
//! Every write that lands bytes on a key (put, append, copy, multipart
//! completion) decides the permission stored against that key here, before
//! the object is committed.
//!
//! The rules:
//!
//! | directive | object | stored permission |
//! |-----------|--------|-------------------|
//! | `Some(acl)` | any | `acl` |
//! | `None` | new | [`ObjectPermission::Default`] |
//! | `None` | existing | unchanged |
//!
//! Put, copy and multipart completion replace the object wholesale and are
//! always framed as new. Only an append onto an existing appendable object is
//! framed as existing.

use rustoss_model::types::{CannedAccessControlList, ObjectPermission};

pub use rustoss_model::types::parse_permission;

/// Decide the permission to store for a write.
///
/// `existing` is the permission currently stored against the key, if any.
/// `directive` is the ACL the caller attached to the write; `None` means the
/// caller did not ask to change it. `is_new_object` is true when the write
/// creates the object or replaces it wholesale.
///
/// ```
/// use rustoss_core::acl::resolve_on_write;
/// use rustoss_model::types::{CannedAccessControlList, ObjectPermission};
///
/// let appended = resolve_on_write(
///     Some(ObjectPermission::PublicReadWrite),
///     None,
///     false,
/// );
/// assert_eq!(appended, ObjectPermission::PublicReadWrite);
///
/// let created = resolve_on_write(None, None, true);
/// assert_eq!(created, ObjectPermission::Default);
///
/// let explicit = resolve_on_write(
///     Some(ObjectPermission::Private),
///     Some(CannedAccessControlList::Default),
///     false,
/// );
/// assert_eq!(explicit, ObjectPermission::Default);
/// ```
#[must_use]
pub fn resolve_on_write(
    existing: Option<ObjectPermission>,
    directive: Option<CannedAccessControlList>,
    is_new_object: bool,
) -> ObjectPermission {
    match directive {
        Some(acl) => acl.permission(),
        None if is_new_object => ObjectPermission::Default,
        None => existing.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CANNED: [CannedAccessControlList; 4] = [
        CannedAccessControlList::Default,
        CannedAccessControlList::Private,
        CannedAccessControlList::PublicRead,
        CannedAccessControlList::PublicReadWrite,
    ];

    #[test]
    fn test_should_store_directive_verbatim() {
        for acl in ALL_CANNED {
            for is_new_object in [true, false] {
                for existing in [None, Some(ObjectPermission::PublicRead)] {
                    assert_eq!(
                        resolve_on_write(existing, Some(acl), is_new_object),
                        acl.permission()
                    );
                }
            }
        }
    }

    #[test]
    fn test_should_default_new_object_without_directive() {
        assert_eq!(
            resolve_on_write(
                Some(ObjectPermission::Private),
                None,
                true
            ),
            ObjectPermission::Default
        );
        assert_eq!(
            resolve_on_write(None, None, true),
            ObjectPermission::Default
        );
    }

    #[test]
    fn test_should_keep_existing_permission_without_directive() {
        for existing in [
            ObjectPermission::Default,
            ObjectPermission::Private,
            ObjectPermission::PublicRead,
            ObjectPermission::PublicReadWrite,
        ] {
            assert_eq!(
                resolve_on_write(Some(existing), None, false),
                existing
            );
        }
    }

    #[test]
    fn test_should_never_resolve_to_unknown() {
        for acl in ALL_CANNED.map(Some).into_iter().chain([None]) {
            for is_new_object in [true, false] {
                assert!(!resolve_on_write(None, acl, is_new_object).is_unknown());
            }
        }
    }

    #[test]
    fn test_should_parse_permission_without_failing() {
        assert_eq!(parse_permission("UnknownPermission"), ObjectPermission::Unknown);
        assert_eq!(parse_permission("private"), ObjectPermission::Private);
    }
}
