//! The RustOSS store provider.
//!
//! [`RustOss`] owns all service state and the body storage. Individual
//! operations are implemented as `handle_*` methods in the `ops` submodules.

use std::sync::Arc;

use crate::config::OssConfig;
use crate::state::service::OssServiceState;
use crate::storage::InMemoryStorage;

/// The main OSS store provider.
///
/// All fields are `Arc`-wrapped for cheap cloning and shared ownership
/// across handler tasks.
///
/// # Examples
///
/// ```
/// use rustoss_core::RustOss;
/// use rustoss_core::config::OssConfig;
/// use rustoss_model::input::CreateBucketInput;
///
/// let provider = RustOss::new(OssConfig::default());
/// # tokio_test::block_on(async {
/// provider
///     .handle_create_bucket(CreateBucketInput { bucket: "photos".to_owned() })
///     .await
///     .unwrap();
/// # });
/// assert_eq!(provider.state().list_buckets(), vec!["photos"]);
/// ```
#[derive(Debug, Clone)]
pub struct RustOss {
    /// Bucket, object and upload state.
    pub(crate) state: Arc<OssServiceState>,
    /// Object and part bodies.
    pub(crate) storage: Arc<InMemoryStorage>,
    /// Provider configuration.
    pub(crate) config: Arc<OssConfig>,
}

impl RustOss {
    /// Create a new provider with empty state.
    #[must_use]
    pub fn new(config: OssConfig) -> Self {
        Self {
            state: Arc::new(OssServiceState::new()),
            storage: Arc::new(InMemoryStorage::new()),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the service state.
    #[must_use]
    pub fn state(&self) -> &OssServiceState {
        &self.state
    }

    /// Returns a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &InMemoryStorage {
        &self.storage
    }

    /// Returns a reference to the provider configuration.
    #[must_use]
    pub fn config(&self) -> &OssConfig {
        &self.config
    }

    /// Reset all buckets, objects and uploads.
    pub fn reset(&self) {
        self.state.reset();
        self.storage.reset();
    }
}
