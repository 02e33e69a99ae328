//! Bucket integration tests.

#[cfg(test)]
mod tests {
    use crate::{start, test_bucket_name};

    #[tokio::test]
    async fn test_should_create_list_and_delete_bucket() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("lifecycle").await;

        for key in ["a/1.txt", "a/2.txt", "b/1.txt"] {
            ctx.client
                .put_object(&bucket, key, "x", None)
                .await
                .unwrap_or_else(|e| panic!("put {key} failed: {e}"));
        }

        let listed = ctx
            .client
            .list_objects(&bucket, Some("a/"))
            .await
            .expect("list_objects");
        let keys: Vec<&str> = listed.contents.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["a/1.txt", "a/2.txt"]);

        let err = ctx
            .client
            .delete_bucket(&bucket)
            .await
            .expect_err("non-empty bucket should not be deleted");
        assert_eq!(err.code(), Some("BucketNotEmpty"));

        for key in ["a/1.txt", "a/2.txt", "b/1.txt"] {
            ctx.client
                .delete_object(&bucket, key)
                .await
                .expect("delete_object");
        }
        ctx.client
            .delete_bucket(&bucket)
            .await
            .expect("delete_bucket");

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_report_missing_bucket() {
        let ctx = start().await;
        let bucket = test_bucket_name("absent");

        let err = ctx
            .client
            .put_object(&bucket, "k", "x", None)
            .await
            .expect_err("put into missing bucket should fail");
        assert_eq!(err.code(), Some("NoSuchBucket"));

        ctx.shutdown().await;
    }
}
