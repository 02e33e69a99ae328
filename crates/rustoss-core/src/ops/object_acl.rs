//! Object ACL handlers.
//!
//! `get_object_acl` reports the permission stored against a key.
//! `put_object_acl` replaces it in place under the bucket's object write lock,
//! so a concurrent reader sees either the old or the new value.

use rustoss_model::error::OssError;
use rustoss_model::input::{GetObjectAclInput, PutObjectAclInput};
use rustoss_model::output::{GetObjectAclOutput, PutObjectAclOutput};
use tracing::debug;

use crate::error::OssServiceError;
use crate::provider::RustOss;

// Handlers stay async so the HTTP bridge can await them uniformly.
#[allow(clippy::unused_async)]
impl RustOss {
    /// Get the permission stored against an object.
    pub async fn handle_get_object_acl(
        &self,
        input: GetObjectAclInput,
    ) -> Result<GetObjectAclOutput, OssError> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let objects = bucket.objects.read();
        let obj = objects
            .get(&input.key)
            .ok_or_else(|| OssServiceError::NoSuchKey {
                key: input.key.clone(),
            })?;

        Ok(GetObjectAclOutput {
            owner: obj.owner.clone(),
            permission: obj.acl,
        })
    }

    /// Replace the permission stored against an existing object.
    ///
    /// The object's bytes, ETag and modification time are left untouched.
    pub async fn handle_put_object_acl(
        &self,
        input: PutObjectAclInput,
    ) -> Result<PutObjectAclOutput, OssError> {
        let Some(acl) = input.acl else {
            return Err(OssServiceError::InvalidArgument {
                message: "No canned ACL is specified in x-oss-object-acl".to_owned(),
            }
            .into());
        };

        let bucket = self.state.get_bucket(&input.bucket)?;
        {
            let mut objects = bucket.objects.write();
            let obj = objects
                .get_mut(&input.key)
                .ok_or_else(|| OssServiceError::NoSuchKey {
                    key: input.key.clone(),
                })?;
            obj.acl = acl.permission();
        }

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            acl = %acl,
            "put_object_acl completed"
        );
        Ok(PutObjectAclOutput {})
    }
}
