//! Multipart upload handlers.
//!
//! Implements `initiate_multipart_upload`, `upload_part`,
//! `complete_multipart_upload`, `abort_multipart_upload` and `list_parts`.
//!
//! Completion stores a new object. Its permission comes from the directive
//! sent with the completion request, falling back to the one sent at
//! initiation.

use chrono::Utc;
use rustoss_model::error::OssError;
use rustoss_model::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, InitiateMultipartUploadInput,
    ListPartsInput, UploadPartInput,
};
use rustoss_model::output::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, InitiateMultipartUploadOutput,
    ListPartsOutput, UploadPartOutput,
};
use rustoss_model::types::{ObjectType, PartETag};
use tracing::debug;

use crate::acl::resolve_on_write;
use crate::checksums::unquote_etag;
use crate::error::OssServiceError;
use crate::provider::RustOss;
use crate::state::{MultipartUpload, ObjectMetadata, OssObject, UploadPart};
use crate::utils::generate_upload_id;
use crate::validation::{validate_metadata, validate_object_key, validate_part_number};

/// Check the requested part list against the uploaded parts.
///
/// Part numbers must be strictly ascending, every part must exist with a
/// matching ETag, and every part but the last must reach `min_part_size`.
fn check_parts(
    upload: &MultipartUpload,
    requested: &[PartETag],
    min_part_size: u64,
) -> Result<(), OssServiceError> {
    if requested.is_empty() {
        return Err(OssServiceError::MalformedXml);
    }

    if requested
        .windows(2)
        .any(|pair| pair[0].part_number >= pair[1].part_number)
    {
        return Err(OssServiceError::InvalidPartOrder);
    }

    let last = requested.len() - 1;
    for (index, requested_part) in requested.iter().enumerate() {
        let part_number = requested_part.part_number;
        let uploaded = upload
            .get_part(part_number)
            .filter(|p| {
                unquote_etag(&p.etag).eq_ignore_ascii_case(unquote_etag(&requested_part.etag))
            })
            .ok_or(OssServiceError::InvalidPart { part_number })?;

        if index < last && uploaded.size < min_part_size {
            return Err(OssServiceError::EntityTooSmall { part_number });
        }
    }

    Ok(())
}

/// Upload IDs are scoped to a key; a mismatched key is treated as unknown.
fn no_such_upload(upload_id: &str) -> OssServiceError {
    OssServiceError::NoSuchUpload {
        upload_id: upload_id.to_owned(),
    }
}

// Handlers stay async so the HTTP bridge can await them uniformly.
#[allow(clippy::unused_async)]
impl RustOss {
    /// Start a multipart upload.
    pub async fn handle_initiate_multipart_upload(
        &self,
        input: InitiateMultipartUploadInput,
    ) -> Result<InitiateMultipartUploadOutput, OssError> {
        validate_object_key(&input.key)?;
        validate_metadata(&input.metadata)?;

        let bucket = self.state.get_bucket(&input.bucket)?;
        let upload_id = generate_upload_id();

        let upload = MultipartUpload::new(
            upload_id.clone(),
            input.key.clone(),
            bucket.owner.clone(),
            input.acl,
            ObjectMetadata::new(input.content_type, input.metadata),
        );
        bucket.multipart_uploads.insert(upload_id.clone(), upload);

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %upload_id,
            "initiate_multipart_upload completed"
        );
        Ok(InitiateMultipartUploadOutput {
            bucket: input.bucket,
            key: input.key,
            upload_id,
        })
    }

    /// Upload one part of a multipart upload.
    pub async fn handle_upload_part(
        &self,
        input: UploadPartInput,
    ) -> Result<UploadPartOutput, OssError> {
        validate_part_number(input.part_number)?;

        let bucket = self.state.get_bucket(&input.bucket)?;
        let mut upload = bucket
            .multipart_uploads
            .get_mut(&input.upload_id)
            .filter(|u| u.key == input.key)
            .ok_or_else(|| no_such_upload(&input.upload_id))?;

        let written =
            self.storage
                .write_part(&input.bucket, &input.upload_id, input.part_number, input.body);
        upload.put_part(UploadPart {
            part_number: input.part_number,
            etag: written.etag.clone(),
            size: written.size,
            last_modified: Utc::now(),
        });
        drop(upload);

        debug!(
            bucket = %input.bucket,
            upload_id = %input.upload_id,
            part_number = input.part_number,
            "upload_part completed"
        );
        Ok(UploadPartOutput { etag: written.etag })
    }

    /// Assemble the uploaded parts into an object.
    pub async fn handle_complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> Result<CompleteMultipartUploadOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;

        // Taken out of the table before checking, so no part can be replaced
        // between the check and the assembly.
        let (_, upload) = bucket
            .multipart_uploads
            .remove_if(&input.upload_id, |_, u| u.key == input.key)
            .ok_or_else(|| no_such_upload(&input.upload_id))?;
        if let Err(err) = check_parts(&upload, &input.parts, self.config.min_part_size) {
            bucket
                .multipart_uploads
                .insert(input.upload_id.clone(), upload);
            return Err(err.into());
        }

        let part_numbers: Vec<u32> = input.parts.iter().map(|p| p.part_number).collect();

        let etag = {
            let mut objects = bucket.objects.write();
            let existing = objects.get(&input.key).map(|obj| obj.acl);
            let permission = resolve_on_write(existing, input.acl.or(upload.acl), true);

            let written = self.storage.complete_multipart(
                &input.bucket,
                &input.upload_id,
                &input.key,
                &part_numbers,
            )?;
            objects.insert(
                input.key.clone(),
                OssObject {
                    key: input.key.clone(),
                    etag: written.etag.clone(),
                    size: written.size,
                    last_modified: Utc::now(),
                    object_type: ObjectType::Multipart,
                    acl: permission,
                    metadata: upload.metadata,
                    owner: upload.owner,
                },
            );
            written.etag
        };

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            parts = part_numbers.len(),
            "complete_multipart_upload completed"
        );
        Ok(CompleteMultipartUploadOutput {
            location: self.config.object_location(&input.bucket, &input.key),
            bucket: input.bucket,
            key: input.key,
            etag,
        })
    }

    /// Abort a multipart upload and discard its parts.
    pub async fn handle_abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> Result<AbortMultipartUploadOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket
            .multipart_uploads
            .remove_if(&input.upload_id, |_, u| u.key == input.key)
            .ok_or_else(|| no_such_upload(&input.upload_id))?;
        self.storage.abort_multipart(&input.bucket, &input.upload_id);

        debug!(
            bucket = %input.bucket,
            upload_id = %input.upload_id,
            "abort_multipart_upload completed"
        );
        Ok(AbortMultipartUploadOutput {})
    }

    /// List the parts uploaded so far.
    pub async fn handle_list_parts(
        &self,
        input: ListPartsInput,
    ) -> Result<ListPartsOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let parts = bucket
            .multipart_uploads
            .get(&input.upload_id)
            .filter(|u| u.key == input.key)
            .ok_or_else(|| no_such_upload(&input.upload_id))?
            .part_summaries();

        Ok(ListPartsOutput {
            bucket: input.bucket,
            key: input.key,
            upload_id: input.upload_id,
            parts,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use rustoss_model::error::OssErrorCode;
    use rustoss_model::input::{CreateBucketInput, GetObjectInput};
    use rustoss_model::types::{CannedAccessControlList, ObjectPermission};

    use super::*;
    use crate::checksums::{compute_etag, compute_multipart_etag};
    use crate::config::OssConfig;

    const BUCKET: &str = "multipart-ops";
    const KEY: &str = "big/object.bin";

    async fn provider(min_part_size: u64) -> RustOss {
        let provider = RustOss::new(OssConfig::builder().min_part_size(min_part_size).build());
        provider
            .handle_create_bucket(CreateBucketInput {
                bucket: BUCKET.to_owned(),
            })
            .await
            .unwrap_or_else(|e| panic!("create failed: {e}"));
        provider
    }

    async fn initiate(provider: &RustOss, acl: Option<CannedAccessControlList>) -> String {
        provider
            .handle_initiate_multipart_upload(InitiateMultipartUploadInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                acl,
                ..InitiateMultipartUploadInput::default()
            })
            .await
            .unwrap_or_else(|e| panic!("initiate failed: {e}"))
            .upload_id
    }

    async fn upload(provider: &RustOss, upload_id: &str, part_number: u32, body: &[u8]) -> PartETag {
        let output = provider
            .handle_upload_part(UploadPartInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                upload_id: upload_id.to_owned(),
                part_number,
                body: Bytes::copy_from_slice(body),
            })
            .await
            .unwrap_or_else(|e| panic!("upload part failed: {e}"));
        PartETag::new(part_number, output.etag)
    }

    async fn complete(
        provider: &RustOss,
        upload_id: &str,
        parts: Vec<PartETag>,
        acl: Option<CannedAccessControlList>,
    ) -> Result<CompleteMultipartUploadOutput, OssError> {
        provider
            .handle_complete_multipart_upload(CompleteMultipartUploadInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                upload_id: upload_id.to_owned(),
                parts,
                acl,
            })
            .await
    }

    fn stored_acl(provider: &RustOss) -> ObjectPermission {
        provider
            .state()
            .get_bucket(BUCKET)
            .unwrap_or_else(|e| panic!("bucket missing: {e}"))
            .get_object(KEY)
            .unwrap_or_else(|| panic!("object missing"))
            .acl
    }

    #[tokio::test]
    async fn test_should_assemble_parts_with_composite_etag() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, None).await;
        let p1 = upload(&provider, &upload_id, 1, b"hello ").await;
        let p2 = upload(&provider, &upload_id, 2, b"world").await;
        assert_eq!(p1.etag, compute_etag(b"hello "));

        let output = complete(&provider, &upload_id, vec![p1.clone(), p2.clone()], None)
            .await
            .unwrap_or_else(|e| panic!("complete failed: {e}"));
        assert_eq!(output.etag, compute_multipart_etag(&[p1.etag, p2.etag]));
        assert_eq!(
            output.location,
            format!("http://{BUCKET}.oss.localhost/{KEY}")
        );

        let got = provider
            .handle_get_object(GetObjectInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
            })
            .await
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(got.body.as_ref(), b"hello world");
        assert_eq!(got.metadata.object_type, ObjectType::Multipart);
        assert_eq!(stored_acl(&provider), ObjectPermission::Default);
    }

    #[tokio::test]
    async fn test_should_apply_completion_directive_for_any_part_count() {
        for part_count in 1..=3u32 {
            let provider = provider(1).await;
            let upload_id = initiate(&provider, None).await;
            let mut parts = Vec::new();
            for n in 1..=part_count {
                parts.push(upload(&provider, &upload_id, n, b"chunk").await);
            }
            complete(
                &provider,
                &upload_id,
                parts,
                Some(CannedAccessControlList::PublicRead),
            )
            .await
            .unwrap_or_else(|e| panic!("complete failed: {e}"));
            assert_eq!(stored_acl(&provider), ObjectPermission::PublicRead);
        }
    }

    #[tokio::test]
    async fn test_should_prefer_completion_directive_over_initiation() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, Some(CannedAccessControlList::Private)).await;
        let part = upload(&provider, &upload_id, 1, b"x").await;
        complete(
            &provider,
            &upload_id,
            vec![part],
            Some(CannedAccessControlList::PublicReadWrite),
        )
        .await
        .unwrap_or_else(|e| panic!("complete failed: {e}"));
        assert_eq!(stored_acl(&provider), ObjectPermission::PublicReadWrite);

        let upload_id = initiate(&provider, Some(CannedAccessControlList::Private)).await;
        let part = upload(&provider, &upload_id, 1, b"y").await;
        complete(&provider, &upload_id, vec![part], None)
            .await
            .unwrap_or_else(|e| panic!("complete failed: {e}"));
        assert_eq!(stored_acl(&provider), ObjectPermission::Private);
    }

    #[tokio::test]
    async fn test_should_reject_descending_parts() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, None).await;
        let p1 = upload(&provider, &upload_id, 1, b"a").await;
        let p2 = upload(&provider, &upload_id, 2, b"b").await;

        let err = complete(&provider, &upload_id, vec![p2, p1], None)
            .await
            .expect_err("descending parts should fail");
        assert_eq!(err.code, OssErrorCode::InvalidPartOrder);
    }

    #[tokio::test]
    async fn test_should_reject_unknown_or_mismatched_part() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, None).await;
        let p1 = upload(&provider, &upload_id, 1, b"a").await;

        let err = complete(&provider, &upload_id, vec![PartETag::new(1, "\"BAD\"")], None)
            .await
            .expect_err("wrong etag should fail");
        assert_eq!(err.code, OssErrorCode::InvalidPart);

        let err = complete(&provider, &upload_id, vec![p1, PartETag::new(2, "\"X\"")], None)
            .await
            .expect_err("missing part should fail");
        assert_eq!(err.code, OssErrorCode::InvalidPart);
    }

    #[tokio::test]
    async fn test_should_reject_small_non_final_part() {
        let provider = provider(4).await;
        let upload_id = initiate(&provider, None).await;
        let p1 = upload(&provider, &upload_id, 1, b"abc").await;
        let p2 = upload(&provider, &upload_id, 2, b"d").await;

        let err = complete(&provider, &upload_id, vec![p1, p2], None)
            .await
            .expect_err("small first part should fail");
        assert_eq!(err.code, OssErrorCode::EntityTooSmall);
    }

    #[tokio::test]
    async fn test_should_keep_upload_after_rejected_completion() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, Some(CannedAccessControlList::PublicRead)).await;
        let part = upload(&provider, &upload_id, 1, b"payload").await;

        let err = complete(&provider, &upload_id, vec![PartETag::new(1, "\"BAD\"")], None)
            .await
            .expect_err("wrong etag should fail");
        assert_eq!(err.code, OssErrorCode::InvalidPart);

        complete(&provider, &upload_id, vec![part], None)
            .await
            .unwrap_or_else(|e| panic!("retry failed: {e}"));
        assert_eq!(stored_acl(&provider), ObjectPermission::PublicRead);
    }

    #[tokio::test]
    async fn test_should_refuse_part_upload_once_completed() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, None).await;
        let part = upload(&provider, &upload_id, 1, b"first").await;
        let output = complete(&provider, &upload_id, vec![part.clone()], None)
            .await
            .unwrap_or_else(|e| panic!("complete failed: {e}"));

        let err = provider
            .handle_upload_part(UploadPartInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                upload_id: upload_id.clone(),
                part_number: 1,
                body: Bytes::from_static(b"replaced"),
            })
            .await
            .expect_err("completed upload should be gone");
        assert_eq!(err.code, OssErrorCode::NoSuchUpload);

        let got = provider
            .handle_get_object(GetObjectInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
            })
            .await
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(got.body.as_ref(), b"first");
        assert_eq!(output.etag, compute_multipart_etag(&[part.etag]));
    }

    #[tokio::test]
    async fn test_should_list_and_abort_upload() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, None).await;
        upload(&provider, &upload_id, 2, b"b").await;
        upload(&provider, &upload_id, 1, b"a").await;

        let listed = provider
            .handle_list_parts(ListPartsInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                upload_id: upload_id.clone(),
            })
            .await
            .unwrap_or_else(|e| panic!("list parts failed: {e}"));
        let numbers: Vec<u32> = listed.parts.iter().map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![1, 2]);

        provider
            .handle_abort_multipart_upload(AbortMultipartUploadInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                upload_id: upload_id.clone(),
            })
            .await
            .unwrap_or_else(|e| panic!("abort failed: {e}"));

        let err = complete(&provider, &upload_id, vec![PartETag::new(1, "\"A\"")], None)
            .await
            .expect_err("aborted upload should be gone");
        assert_eq!(err.code, OssErrorCode::NoSuchUpload);
    }

    #[tokio::test]
    async fn test_should_reject_part_number_out_of_range() {
        let provider = provider(1).await;
        let upload_id = initiate(&provider, None).await;
        let err = provider
            .handle_upload_part(UploadPartInput {
                bucket: BUCKET.to_owned(),
                key: KEY.to_owned(),
                upload_id,
                part_number: 0,
                body: Bytes::new(),
            })
            .await
            .expect_err("part 0 should fail");
        assert_eq!(err.code, OssErrorCode::InvalidArgument);
    }
}
