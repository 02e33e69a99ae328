//! Copy integration tests.

#[cfg(test)]
mod tests {
    use rustoss_client::ObjectOptions;
    use rustoss_model::{CannedAccessControlList, ObjectPermission};

    use crate::start;

    #[tokio::test]
    async fn test_should_apply_copy_directive_to_target() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("copy").await;

        let source_etag = ctx
            .client
            .put_object(&bucket, "source.txt", "payload", Some(CannedAccessControlList::Private))
            .await
            .expect("put_object");
        let output = ctx
            .client
            .copy_object(
                &bucket,
                "source.txt",
                &bucket,
                "target.txt",
                Some(CannedAccessControlList::PublicRead),
            )
            .await
            .expect("copy_object");
        assert_eq!(output.etag, source_etag);

        let target = ctx
            .client
            .get_object_acl(&bucket, "target.txt")
            .await
            .expect("target acl");
        assert_eq!(target, ObjectPermission::PublicRead);
        let source = ctx
            .client
            .get_object_acl(&bucket, "source.txt")
            .await
            .expect("source acl");
        assert_eq!(source, ObjectPermission::Private);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_copy_with_new_metadata_and_acl() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("copymeta").await;

        let source_options = ObjectOptions::new()
            .acl(CannedAccessControlList::Private)
            .content_type("text/plain")
            .meta("tag", "source-object");
        let source_etag = ctx
            .client
            .put_object_with_options(&bucket, "source.txt", "payload", &source_options)
            .await
            .expect("put_object");

        let target_options = ObjectOptions::new()
            .acl(CannedAccessControlList::PublicRead)
            .content_type("application/txt")
            .meta("tag", "copy-object");
        let output = ctx
            .client
            .copy_object_with_options(
                &bucket,
                "source.txt",
                &bucket,
                "target.txt",
                &target_options,
            )
            .await
            .expect("copy_object");
        assert_eq!(output.etag, source_etag);

        let target = ctx
            .client
            .head_object(&bucket, "target.txt")
            .await
            .expect("head target");
        assert_eq!(target.etag, source_etag);
        assert_eq!(target.content_type, "application/txt");
        assert_eq!(
            target.metadata.get("tag").map(String::as_str),
            Some("copy-object")
        );
        let permission = ctx
            .client
            .get_object_acl(&bucket, "target.txt")
            .await
            .expect("target acl");
        assert_eq!(permission, ObjectPermission::PublicRead);

        let source = ctx
            .client
            .head_object(&bucket, "source.txt")
            .await
            .expect("head source");
        assert_eq!(source.content_type, "text/plain");
        assert_eq!(
            source.metadata.get("tag").map(String::as_str),
            Some("source-object")
        );

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_keep_source_metadata_without_new_metadata() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("copykeep").await;

        let options = ObjectOptions::new()
            .content_type("text/csv")
            .meta("origin", "export");
        ctx.client
            .put_object_with_options(&bucket, "report.csv", "a,b\n", &options)
            .await
            .expect("put_object");
        ctx.client
            .copy_object(
                &bucket,
                "report.csv",
                &bucket,
                "report-copy.csv",
                Some(CannedAccessControlList::Private),
            )
            .await
            .expect("copy_object");

        let meta = ctx
            .client
            .head_object(&bucket, "report-copy.csv")
            .await
            .expect("head_object");
        assert_eq!(meta.content_type, "text/csv");
        assert_eq!(meta.metadata.get("origin").map(String::as_str), Some("export"));

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_not_inherit_source_acl_without_directive() {
        let ctx = start().await;
        let source_bucket = ctx.create_bucket("copysrc").await;
        let target_bucket = ctx.create_bucket("copydst").await;

        ctx.client
            .put_object(
                &source_bucket,
                "dir/source file.txt",
                "payload",
                Some(CannedAccessControlList::PublicReadWrite),
            )
            .await
            .expect("put_object");
        ctx.client
            .copy_object(
                &source_bucket,
                "dir/source file.txt",
                &target_bucket,
                "copied.txt",
                None,
            )
            .await
            .expect("copy_object");

        let permission = ctx
            .client
            .get_object_acl(&target_bucket, "copied.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::Default);

        let object = ctx
            .client
            .get_object(&target_bucket, "copied.txt")
            .await
            .expect("get_object");
        assert_eq!(object.body.as_ref(), b"payload");

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_fail_copy_from_missing_source() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("copymiss").await;

        let err = ctx
            .client
            .copy_object(&bucket, "missing.txt", &bucket, "target.txt", None)
            .await
            .expect_err("copy from missing key should fail");
        assert!(err.is_no_such_key(), "unexpected error: {err}");

        ctx.shutdown().await;
    }
}
