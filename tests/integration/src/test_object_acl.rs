//! Object ACL integration tests.

#[cfg(test)]
mod tests {
    use rustoss_model::types::parse_permission;
    use rustoss_model::{CannedAccessControlList, ObjectPermission};

    use crate::start;

    const ALL_CANNED: [CannedAccessControlList; 4] = [
        CannedAccessControlList::Default,
        CannedAccessControlList::Private,
        CannedAccessControlList::PublicRead,
        CannedAccessControlList::PublicReadWrite,
    ];

    #[tokio::test]
    async fn test_should_store_acl_given_on_put() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("putacl").await;

        for acl in ALL_CANNED {
            let key = format!("object-{}", acl.as_str());
            ctx.client
                .put_object(&bucket, &key, "content", Some(acl))
                .await
                .unwrap_or_else(|e| panic!("put with {acl:?} failed: {e}"));

            let permission = ctx
                .client
                .get_object_acl(&bucket, &key)
                .await
                .unwrap_or_else(|e| panic!("get acl failed: {e}"));
            assert_eq!(permission, acl.permission());
        }

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_default_acl_when_put_has_no_directive() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("noacl").await;

        ctx.client
            .put_object(&bucket, "plain.txt", "content", None)
            .await
            .expect("put_object");
        let permission = ctx
            .client
            .get_object_acl(&bucket, "plain.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::Default);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_update_acl_with_each_canned_value() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("setacl").await;
        ctx.client
            .put_object(&bucket, "doc.txt", "content", None)
            .await
            .expect("put_object");

        for acl in ALL_CANNED {
            ctx.client
                .set_object_acl(&bucket, "doc.txt", Some(acl))
                .await
                .unwrap_or_else(|e| panic!("set {acl:?} failed: {e}"));
            let permission = ctx
                .client
                .get_object_acl(&bucket, "doc.txt")
                .await
                .expect("get_object_acl");
            assert_eq!(permission, acl.permission());
        }

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reset_to_default_after_explicit_acl() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("reset").await;

        for acl in [
            CannedAccessControlList::Private,
            CannedAccessControlList::PublicRead,
            CannedAccessControlList::PublicReadWrite,
        ] {
            ctx.client
                .put_object(&bucket, "doc.txt", "content", Some(acl))
                .await
                .expect("put_object");
            ctx.client
                .set_object_acl(&bucket, "doc.txt", Some(CannedAccessControlList::Default))
                .await
                .expect("reset to default");
            let permission = ctx
                .client
                .get_object_acl(&bucket, "doc.txt")
                .await
                .expect("get_object_acl");
            assert_eq!(permission, ObjectPermission::Default, "after {acl:?}");
        }

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_fail_set_acl_on_missing_key_every_time() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("setmiss").await;

        for _ in 0..2 {
            let err = ctx
                .client
                .set_object_acl(
                    &bucket,
                    "missing.txt",
                    Some(CannedAccessControlList::PublicRead),
                )
                .await
                .expect_err("set acl on missing key should fail");
            assert!(err.is_no_such_key(), "unexpected error: {err}");
            assert!(
                err.message()
                    .is_some_and(|m| m.starts_with("The specified key does not exist")),
                "unexpected message: {err}"
            );
        }

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_fail_get_acl_on_missing_key() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("getmiss").await;

        let err = ctx
            .client
            .get_object_acl(&bucket, "missing.txt")
            .await
            .expect_err("get acl on missing key should fail");
        assert!(err.is_no_such_key(), "unexpected error: {err}");

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_missing_acl_locally() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("nullacl").await;
        ctx.client
            .put_object(&bucket, "doc.txt", "content", Some(CannedAccessControlList::Private))
            .await
            .expect("put_object");

        let err = ctx
            .client
            .set_object_acl(&bucket, "doc.txt", None)
            .await
            .expect_err("set acl without a value should fail");
        assert!(err.is_precondition_violation());
        assert!(!err.is_no_such_key());
        assert_eq!(err.code(), None);

        // Missing key too: the precondition wins over the lookup.
        let err = ctx
            .client
            .set_object_acl(&bucket, "missing.txt", None)
            .await
            .expect_err("set acl without a value should fail");
        assert!(err.is_precondition_violation());

        let permission = ctx
            .client
            .get_object_acl(&bucket, "doc.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::Private);

        ctx.shutdown().await;
    }

    #[test]
    fn test_should_parse_unrecognized_permission_as_unknown() {
        assert_eq!(parse_permission("UnknownPermission"), ObjectPermission::Unknown);
        assert_eq!(parse_permission("PUBLIC-READ"), ObjectPermission::Unknown);
        assert_eq!(parse_permission(""), ObjectPermission::Unknown);
        assert_eq!(parse_permission("public-read"), ObjectPermission::PublicRead);
    }
}
