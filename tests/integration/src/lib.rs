//! End-to-end tests for RustOSS.
//!
//! Each test starts its own server on an ephemeral port and drives it through
//! [`OssClient`], so they run with a plain `cargo test`:
//!
//! ```text
//! cargo test -p rustoss-integration
//! ```
//!
//! Set `RUST_LOG=debug` to see server and client traces.

use std::sync::Once;

use anyhow::Result;
use rustoss_client::OssClient;
use rustoss_core::OssConfig;
use rustoss_server::ServerHandle;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Part size floor used by test servers, so multipart tests stay small.
pub const TEST_MIN_PART_SIZE: u64 = 1024;

/// A running server and a client pointed at it.
#[derive(Debug)]
pub struct TestContext {
    /// The server, stopped by [`TestContext::shutdown`].
    pub server: ServerHandle,
    /// Client for the server's endpoint.
    pub client: OssClient,
}

impl TestContext {
    /// Start a server on `127.0.0.1:0` and connect a client.
    pub async fn start() -> Result<Self> {
        init_tracing();

        let config = OssConfig::builder()
            .gateway_listen("127.0.0.1:0".to_owned())
            .min_part_size(TEST_MIN_PART_SIZE)
            .build();
        let server = rustoss_server::spawn(config).await?;
        let client = OssClient::new(server.endpoint());
        Ok(Self { server, client })
    }

    /// Create a uniquely named bucket and return its name.
    pub async fn create_bucket(&self, prefix: &str) -> String {
        let name = test_bucket_name(prefix);
        self.client
            .create_bucket(&name)
            .await
            .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
        name
    }

    /// Stop the server.
    pub async fn shutdown(self) {
        self.server
            .shutdown()
            .await
            .unwrap_or_else(|e| panic!("server shutdown failed: {e}"));
    }
}

/// Start a [`TestContext`], panicking on failure.
pub async fn start() -> TestContext {
    TestContext::start()
        .await
        .unwrap_or_else(|e| panic!("failed to start test server: {e}"))
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

mod test_append;
mod test_bucket;
mod test_copy;
mod test_multipart;
mod test_object;
mod test_object_acl;
