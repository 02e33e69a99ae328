//! Append integration tests.

#[cfg(test)]
mod tests {
    use rustoss_model::{CannedAccessControlList, ObjectPermission, ObjectType};

    use crate::start;

    #[tokio::test]
    async fn test_should_keep_acl_when_later_append_has_no_directive() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("append").await;

        let first = ctx
            .client
            .append_object(
                &bucket,
                "log.txt",
                0,
                "first line\n",
                Some(CannedAccessControlList::PublicReadWrite),
            )
            .await
            .expect("first append");
        assert_eq!(first.next_append_position, 11);

        let second = ctx
            .client
            .append_object(
                &bucket,
                "log.txt",
                first.next_append_position,
                "second line\n",
                None,
            )
            .await
            .expect("second append");
        assert_eq!(second.next_append_position, 23);

        let permission = ctx
            .client
            .get_object_acl(&bucket, "log.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::PublicReadWrite);

        let object = ctx
            .client
            .get_object(&bucket, "log.txt")
            .await
            .expect("get_object");
        assert_eq!(object.body.as_ref(), b"first line\nsecond line\n");
        assert_eq!(object.metadata.object_type, ObjectType::Appendable);
        assert_eq!(object.metadata.next_append_position, Some(23));

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_replace_acl_when_append_has_directive() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("appendacl").await;

        let first = ctx
            .client
            .append_object(
                &bucket,
                "log.txt",
                0,
                "a",
                Some(CannedAccessControlList::PublicRead),
            )
            .await
            .expect("first append");
        ctx.client
            .append_object(
                &bucket,
                "log.txt",
                first.next_append_position,
                "b",
                Some(CannedAccessControlList::Private),
            )
            .await
            .expect("second append");

        let permission = ctx
            .client
            .get_object_acl(&bucket, "log.txt")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::Private);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_append_at_wrong_position() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("appendpos").await;

        ctx.client
            .append_object(&bucket, "log.txt", 0, "abc", None)
            .await
            .expect("first append");
        let err = ctx
            .client
            .append_object(&bucket, "log.txt", 1, "d", None)
            .await
            .expect_err("stale position should fail");
        assert_eq!(err.code(), Some("PositionNotEqualToLength"));

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_append_to_normal_object() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("appendnormal").await;

        ctx.client
            .put_object(&bucket, "plain.txt", "abc", None)
            .await
            .expect("put_object");
        let err = ctx
            .client
            .append_object(&bucket, "plain.txt", 3, "d", None)
            .await
            .expect_err("append to a normal object should fail");
        assert_eq!(err.code(), Some("ObjectNotAppendable"));

        ctx.shutdown().await;
    }
}
