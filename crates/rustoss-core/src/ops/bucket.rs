//! Bucket operation handlers.
//!
//! Implements `create_bucket`, `delete_bucket` and `list_objects`.

use rustoss_model::error::OssError;
use rustoss_model::input::{CreateBucketInput, DeleteBucketInput, ListObjectsInput};
use rustoss_model::output::{CreateBucketOutput, DeleteBucketOutput, ListObjectsOutput};
use tracing::debug;

use crate::error::OssServiceError;
use crate::provider::RustOss;
use crate::state::OssObject;
use crate::utils::default_owner;
use crate::validation::validate_bucket_name;

/// Page size used when `max-keys` is absent.
const DEFAULT_MAX_KEYS: usize = 100;

/// Largest accepted `max-keys`.
const MAX_MAX_KEYS: usize = 1000;

// Handlers stay async so the HTTP bridge can await them uniformly.
#[allow(clippy::unused_async)]
impl RustOss {
    /// Create a bucket.
    pub async fn handle_create_bucket(
        &self,
        input: CreateBucketInput,
    ) -> Result<CreateBucketOutput, OssError> {
        let bucket_name = input.bucket;
        validate_bucket_name(&bucket_name)?;

        self.state.create_bucket(
            bucket_name.clone(),
            self.config.default_region.clone(),
            default_owner(),
        )?;

        debug!(bucket = %bucket_name, "create_bucket completed");
        Ok(CreateBucketOutput {
            location: format!("/{bucket_name}"),
        })
    }

    /// Delete an empty bucket, dropping its in-progress uploads.
    pub async fn handle_delete_bucket(
        &self,
        input: DeleteBucketInput,
    ) -> Result<DeleteBucketOutput, OssError> {
        let bucket_name = input.bucket;

        self.state.delete_bucket(&bucket_name)?;
        self.storage.delete_bucket_data(&bucket_name);

        debug!(bucket = %bucket_name, "delete_bucket completed");
        Ok(DeleteBucketOutput {})
    }

    /// List objects in a bucket.
    pub async fn handle_list_objects(
        &self,
        input: ListObjectsInput,
    ) -> Result<ListObjectsOutput, OssError> {
        let max_keys = input.max_keys.unwrap_or(DEFAULT_MAX_KEYS);
        if max_keys > MAX_MAX_KEYS {
            return Err(OssServiceError::InvalidArgument {
                message: format!("max-keys must not exceed {MAX_MAX_KEYS}"),
            }
            .into());
        }

        let prefix = input.prefix.unwrap_or_default();
        let marker = input.marker.unwrap_or_default();

        let bucket = self.state.get_bucket(&input.bucket)?;
        let result = bucket.list_objects(&prefix, &marker, max_keys);

        debug!(
            bucket = %input.bucket,
            count = result.objects.len(),
            truncated = result.is_truncated,
            "list_objects completed"
        );

        Ok(ListObjectsOutput {
            name: input.bucket,
            prefix,
            marker,
            max_keys,
            is_truncated: result.is_truncated,
            next_marker: result.next_marker,
            contents: result.objects.iter().map(OssObject::summary).collect(),
        })
    }
}
