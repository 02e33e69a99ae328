//! Object operation handlers.
//!
//! Implements `put_object`, `append_object`, `copy_object`, `get_object`,
//! `head_object` and `delete_object`. Every write resolves the stored
//! permission through [`resolve_on_write`] while holding the bucket's object
//! lock, so the permission and the bytes land together.

use chrono::Utc;
use rustoss_model::error::OssError;
use rustoss_model::input::{
    AppendObjectInput, CopyObjectInput, DeleteObjectInput, GetObjectInput, HeadObjectInput,
    PutObjectInput,
};
use rustoss_model::output::{
    AppendObjectOutput, CopyObjectOutput, DeleteObjectOutput, GetObjectOutput, HeadObjectOutput,
    ObjectMetadata as MetadataHeaders, PutObjectOutput,
};
use rustoss_model::types::{MetadataDirective, ObjectType};
use tracing::debug;

use crate::acl::resolve_on_write;
use crate::error::OssServiceError;
use crate::provider::RustOss;
use crate::state::{ObjectMetadata, OssObject};
use crate::utils::parse_copy_source;
use crate::validation::{validate_content_md5, validate_metadata, validate_object_key};

/// Response headers describing a stored object.
pub(super) fn metadata_headers(obj: &OssObject) -> MetadataHeaders {
    MetadataHeaders {
        content_length: obj.size,
        content_type: obj.metadata.content_type.clone(),
        etag: obj.etag.clone(),
        last_modified: obj.last_modified,
        object_type: obj.object_type,
        next_append_position: obj.next_append_position(),
        metadata: obj.metadata.user_metadata.clone(),
    }
}

// Handlers stay async so the HTTP bridge can await them uniformly.
#[allow(clippy::unused_async)]
impl RustOss {
    /// Put an object, replacing whatever was stored under the key.
    pub async fn handle_put_object(
        &self,
        input: PutObjectInput,
    ) -> Result<PutObjectOutput, OssError> {
        let PutObjectInput {
            bucket: bucket_name,
            key,
            body,
            acl,
            content_type,
            content_md5,
            metadata,
        } = input;

        validate_object_key(&key)?;
        validate_content_md5(content_md5.as_deref(), &body)?;
        validate_metadata(&metadata)?;

        let bucket = self.state.get_bucket(&bucket_name)?;

        let etag = {
            let mut objects = bucket.objects.write();
            let existing = objects.get(&key).map(|obj| obj.acl);
            let permission = resolve_on_write(existing, acl, true);

            let written = self.storage.write_object(&bucket_name, &key, body);
            objects.insert(
                key.clone(),
                OssObject {
                    key: key.clone(),
                    etag: written.etag.clone(),
                    size: written.size,
                    last_modified: Utc::now(),
                    object_type: ObjectType::Normal,
                    acl: permission,
                    metadata: ObjectMetadata::new(content_type, metadata),
                    owner: bucket.owner.clone(),
                },
            );
            written.etag
        };

        debug!(bucket = %bucket_name, key = %key, "put_object completed");
        Ok(PutObjectOutput { etag })
    }

    /// Append to an appendable object, creating it at position 0.
    ///
    /// The first append fixes the object's metadata; later appends only keep
    /// or replace its permission.
    pub async fn handle_append_object(
        &self,
        input: AppendObjectInput,
    ) -> Result<AppendObjectOutput, OssError> {
        let AppendObjectInput {
            bucket: bucket_name,
            key,
            position,
            body,
            acl,
            content_type,
            metadata,
        } = input;

        validate_object_key(&key)?;
        validate_metadata(&metadata)?;

        let bucket = self.state.get_bucket(&bucket_name)?;
        let mut objects = bucket.objects.write();

        let output = match objects.get_mut(&key) {
            None => {
                if position != 0 {
                    return Err(OssServiceError::PositionNotEqualToLength {
                        key,
                        next_position: 0,
                    }
                    .into());
                }

                let written = self.storage.append_object(&bucket_name, &key, &body);
                objects.insert(
                    key.clone(),
                    OssObject {
                        key: key.clone(),
                        etag: written.etag.clone(),
                        size: written.size,
                        last_modified: Utc::now(),
                        object_type: ObjectType::Appendable,
                        acl: resolve_on_write(None, acl, true),
                        metadata: ObjectMetadata::new(content_type, metadata),
                        owner: bucket.owner.clone(),
                    },
                );
                AppendObjectOutput {
                    etag: written.etag,
                    next_append_position: written.size,
                }
            }
            Some(obj) => {
                if obj.object_type != ObjectType::Appendable {
                    return Err(OssServiceError::ObjectNotAppendable { key }.into());
                }
                if obj.size != position {
                    return Err(OssServiceError::PositionNotEqualToLength {
                        key,
                        next_position: obj.size,
                    }
                    .into());
                }

                let written = self.storage.append_object(&bucket_name, &key, &body);
                obj.etag.clone_from(&written.etag);
                obj.size = written.size;
                obj.last_modified = Utc::now();
                obj.acl = resolve_on_write(Some(obj.acl), acl, false);
                AppendObjectOutput {
                    etag: written.etag,
                    next_append_position: written.size,
                }
            }
        };
        drop(objects);

        debug!(
            bucket = %bucket_name,
            key = %key,
            next_position = output.next_append_position,
            "append_object completed"
        );
        Ok(output)
    }

    /// Copy an object. The target is a new normal object carrying the source
    /// ETag.
    pub async fn handle_copy_object(
        &self,
        input: CopyObjectInput,
    ) -> Result<CopyObjectOutput, OssError> {
        let CopyObjectInput {
            bucket: dst_bucket_name,
            key: dst_key,
            copy_source,
            acl,
            content_type,
            metadata_directive,
            metadata,
        } = input;

        validate_object_key(&dst_key)?;
        let (src_bucket_name, src_key) = parse_copy_source(&copy_source)?;

        // Snapshot the source record and body under the source lock, then
        // release it before locking the target.
        let (source, data) = {
            let src_bucket = self.state.get_bucket(&src_bucket_name)?;
            let objects = src_bucket.objects.read();
            let source = objects
                .get(&src_key)
                .cloned()
                .ok_or_else(|| OssServiceError::NoSuchKey {
                    key: src_key.clone(),
                })?;
            let data = self.storage.read_object(&src_bucket_name, &src_key)?;
            (source, data)
        };

        let target_metadata = match metadata_directive.unwrap_or_default() {
            MetadataDirective::Copy => source.metadata.clone(),
            MetadataDirective::Replace => {
                validate_metadata(&metadata)?;
                ObjectMetadata::new(content_type, metadata)
            }
        };

        let dst_bucket = self.state.get_bucket(&dst_bucket_name)?;
        let last_modified = Utc::now();
        {
            let mut objects = dst_bucket.objects.write();
            let existing = objects.get(&dst_key).map(|obj| obj.acl);
            let permission = resolve_on_write(existing, acl, true);

            self.storage.write_object(&dst_bucket_name, &dst_key, data);
            objects.insert(
                dst_key.clone(),
                OssObject {
                    key: dst_key.clone(),
                    etag: source.etag.clone(),
                    size: source.size,
                    last_modified,
                    object_type: ObjectType::Normal,
                    acl: permission,
                    metadata: target_metadata,
                    owner: dst_bucket.owner.clone(),
                },
            );
        }

        debug!(
            src_bucket = %src_bucket_name,
            src_key = %src_key,
            bucket = %dst_bucket_name,
            key = %dst_key,
            "copy_object completed"
        );
        Ok(CopyObjectOutput {
            etag: source.etag,
            last_modified,
        })
    }

    /// Get an object's body and metadata.
    pub async fn handle_get_object(
        &self,
        input: GetObjectInput,
    ) -> Result<GetObjectOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let objects = bucket.objects.read();
        let obj = objects
            .get(&input.key)
            .ok_or_else(|| OssServiceError::NoSuchKey {
                key: input.key.clone(),
            })?;
        let body = self.storage.read_object(&input.bucket, &input.key)?;

        Ok(GetObjectOutput {
            metadata: metadata_headers(obj),
            body,
        })
    }

    /// Get an object's metadata.
    pub async fn handle_head_object(
        &self,
        input: HeadObjectInput,
    ) -> Result<HeadObjectOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let obj = bucket
            .get_object(&input.key)
            .ok_or(OssServiceError::NoSuchKey { key: input.key })?;

        Ok(HeadObjectOutput {
            metadata: metadata_headers(&obj),
        })
    }

    /// Delete an object. Deleting an absent key succeeds.
    pub async fn handle_delete_object(
        &self,
        input: DeleteObjectInput,
    ) -> Result<DeleteObjectOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        {
            let mut objects = bucket.objects.write();
            if objects.remove(&input.key).is_some() {
                self.storage.delete_object(&input.bucket, &input.key);
            }
        }

        debug!(bucket = %input.bucket, key = %input.key, "delete_object completed");
        Ok(DeleteObjectOutput {})
    }
}
