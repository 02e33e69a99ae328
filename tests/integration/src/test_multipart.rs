//! Multipart upload integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use rustoss_core::checksums::compute_multipart_etag;
    use rustoss_model::types::PartETag;
    use rustoss_model::{CannedAccessControlList, ObjectPermission, ObjectType};

    use crate::{TEST_MIN_PART_SIZE, TestContext, start};

    /// Upload `count` parts of the minimum size and return their ETags.
    async fn upload_parts(
        ctx: &TestContext,
        bucket: &str,
        key: &str,
        upload_id: &str,
        count: u32,
    ) -> Vec<PartETag> {
        let mut parts = Vec::new();
        for part_number in 1..=count {
            let fill = u8::try_from(part_number).unwrap_or(u8::MAX);
            let size = usize::try_from(TEST_MIN_PART_SIZE).unwrap_or(usize::MAX);
            let etag = ctx
                .client
                .upload_part(bucket, key, upload_id, part_number, Bytes::from(vec![fill; size]))
                .await
                .unwrap_or_else(|e| panic!("upload part {part_number} failed: {e}"));
            parts.push(PartETag::new(part_number, etag));
        }
        parts
    }

    #[tokio::test]
    async fn test_should_apply_completion_acl_for_any_part_count() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("mpuacl").await;

        for count in [1, 3] {
            let key = format!("assembled-{count}.bin");
            let upload_id = ctx
                .client
                .initiate_multipart_upload(&bucket, &key, None)
                .await
                .expect("initiate_multipart_upload");
            let parts = upload_parts(&ctx, &bucket, &key, &upload_id, count).await;
            let part_etags: Vec<String> = parts.iter().map(|p| p.etag.clone()).collect();
            let expected_etag = compute_multipart_etag(&part_etags)
                .trim_matches('"')
                .to_owned();

            let output = ctx
                .client
                .complete_multipart_upload(
                    &bucket,
                    &key,
                    &upload_id,
                    parts,
                    Some(CannedAccessControlList::PublicRead),
                )
                .await
                .unwrap_or_else(|e| panic!("complete with {count} parts failed: {e}"));
            assert_eq!(output.etag, expected_etag);
            assert!(output.etag.ends_with(&format!("-{count}")), "etag: {}", output.etag);
            assert_eq!(output.location, format!("http://{bucket}.oss.localhost/{key}"));
            assert_eq!(output.bucket, bucket);
            assert_eq!(output.key, key);

            let permission = ctx
                .client
                .get_object_acl(&bucket, &key)
                .await
                .expect("get_object_acl");
            assert_eq!(permission, ObjectPermission::PublicRead, "{count} parts");

            let meta = ctx
                .client
                .head_object(&bucket, &key)
                .await
                .expect("head_object");
            assert_eq!(meta.object_type, ObjectType::Multipart);
            assert_eq!(meta.content_length, u64::from(count) * TEST_MIN_PART_SIZE);

            let object = ctx
                .client
                .get_object(&bucket, &key)
                .await
                .expect("get_object");
            assert_eq!(object.metadata.etag, expected_etag);
            let size = usize::try_from(TEST_MIN_PART_SIZE).unwrap_or(usize::MAX);
            assert!(object.body[..size].iter().all(|b| *b == 1));
        }

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_fall_back_to_initiate_acl() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("mpuinit").await;

        let upload_id = ctx
            .client
            .initiate_multipart_upload(
                &bucket,
                "big.bin",
                Some(CannedAccessControlList::PublicReadWrite),
            )
            .await
            .expect("initiate_multipart_upload");
        let parts = upload_parts(&ctx, &bucket, "big.bin", &upload_id, 2).await;
        ctx.client
            .complete_multipart_upload(&bucket, "big.bin", &upload_id, parts, None)
            .await
            .expect("complete_multipart_upload");

        let permission = ctx
            .client
            .get_object_acl(&bucket, "big.bin")
            .await
            .expect("get_object_acl");
        assert_eq!(permission, ObjectPermission::PublicReadWrite);

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_list_and_abort_parts() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("mpuabort").await;

        let upload_id = ctx
            .client
            .initiate_multipart_upload(&bucket, "big.bin", None)
            .await
            .expect("initiate_multipart_upload");
        upload_parts(&ctx, &bucket, "big.bin", &upload_id, 2).await;

        let listed = ctx
            .client
            .list_parts(&bucket, "big.bin", &upload_id)
            .await
            .expect("list_parts");
        assert_eq!(listed.upload_id, upload_id);
        let numbers: Vec<u32> = listed.parts.iter().map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![1, 2]);

        ctx.client
            .abort_multipart_upload(&bucket, "big.bin", &upload_id)
            .await
            .expect("abort_multipart_upload");
        let err = ctx
            .client
            .list_parts(&bucket, "big.bin", &upload_id)
            .await
            .expect_err("aborted upload should be gone");
        assert_eq!(err.code(), Some("NoSuchUpload"));

        let err = ctx
            .client
            .get_object_acl(&bucket, "big.bin")
            .await
            .expect_err("aborted upload leaves no object");
        assert!(err.is_no_such_key());

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_mismatched_part_etag() {
        let ctx = start().await;
        let bucket = ctx.create_bucket("mpubad").await;

        let upload_id = ctx
            .client
            .initiate_multipart_upload(&bucket, "big.bin", None)
            .await
            .expect("initiate_multipart_upload");
        upload_parts(&ctx, &bucket, "big.bin", &upload_id, 1).await;

        let err = ctx
            .client
            .complete_multipart_upload(
                &bucket,
                "big.bin",
                &upload_id,
                vec![PartETag::new(1, "00000000000000000000000000000000")],
                Some(CannedAccessControlList::PublicRead),
            )
            .await
            .expect_err("wrong etag should fail");
        assert_eq!(err.code(), Some("InvalidPart"));

        ctx.shutdown().await;
    }
}
