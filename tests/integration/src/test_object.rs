//! Object CRUD integration tests.

#[cfg(test)]
mod tests {
    use rustoss_client::ObjectOptions;
    use rustoss_model::{CannedAccessControlList, ObjectPermission, ObjectType};

    use crate::start;

    #[tokio::test]
    async fn test_should_put_and_get_object() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("putget").await;

        let etag = ctx
            .client
            .put_object(&bucket, "greeting.txt", "hello, rustoss!", None)
            .await
            .expect("put_object");
        assert_eq!(etag.len(), 32);
        assert!(etag.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

        let object = ctx
            .client
            .get_object(&bucket, "greeting.txt")
            .await
            .expect("get_object");
        assert_eq!(object.body.as_ref(), b"hello, rustoss!");
        assert_eq!(object.metadata.content_length, 15);
        assert_eq!(object.metadata.etag, etag);
        assert_eq!(object.metadata.object_type, ObjectType::Normal);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_put_with_acl_and_metadata() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("putmeta").await;

        let options = ObjectOptions::new()
            .acl(CannedAccessControlList::PublicReadWrite)
            .content_type("application/txt")
            .meta("tag", "put-object")
            .meta("owner", "ops");
        ctx.client
            .put_object_with_options(&bucket, "tagged.txt", "tagged", &options)
            .await
            .expect("put_object");

        let object = ctx
            .client
            .get_object(&bucket, "tagged.txt")
            .await
            .expect("get_object");
        assert_eq!(object.metadata.content_type, "application/txt");
        assert_eq!(object.metadata.metadata.len(), 2);
        assert_eq!(
            object.metadata.metadata.get("tag").map(String::as_str),
            Some("put-object")
        );
        let permission = ctx
            .client
            .get_object_acl(&bucket, "tagged.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::PublicReadWrite);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_head_object() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("head").await;

        ctx.client
            .put_object(&bucket, "file.bin", "binary data", None)
            .await
            .expect("put_object");
        let meta = ctx
            .client
            .head_object(&bucket, "file.bin")
            .await
            .expect("head_object");
        assert_eq!(meta.content_length, 11);
        assert_eq!(meta.content_type, "application/octet-stream");

        let err = ctx
            .client
            .head_object(&bucket, "missing.bin")
            .await
            .expect_err("head on missing key should fail");
        assert!(matches!(
            err,
            rustoss_client::ClientError::Service { status, .. } if status.as_u16() == 404
        ));

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reset_acl_when_object_is_overwritten() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("overwrite").await;

        ctx.client
            .put_object(&bucket, "doc.txt", "v1", Some(CannedAccessControlList::PublicRead))
            .await
            .expect("first put");
        ctx.client
            .put_object(&bucket, "doc.txt", "v2", None)
            .await
            .expect("second put");

        let permission = ctx
            .client
            .get_object_acl(&bucket, "doc.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::Default);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_delete_object_and_its_acl() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("delete").await;

        ctx.client
            .put_object(&bucket, "doc.txt", "v1", Some(CannedAccessControlList::Private))
            .await
            .expect("put_object");
        ctx.client
            .delete_object(&bucket, "doc.txt")
            .await
            .expect("delete_object");
        // Deleting again is not an error.
        ctx.client
            .delete_object(&bucket, "doc.txt")
            .await
            .expect("second delete_object");

        let err = ctx
            .client
            .get_object_acl(&bucket, "doc.txt")
            .await
            .expect_err("acl of deleted object should be gone");
        assert!(err.is_no_such_key());

        ctx.shutdown().await;
    }
}
