//! Store configuration.
//!
//! Provides [`OssConfig`]. Values are loaded from environment variables.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Characters escaped in object keys written into URLs. `/` stays literal.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// OSS service configuration.
///
/// # Examples
///
/// ```
/// use rustoss_core::config::OssConfig;
///
/// let config = OssConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:9080");
/// assert_eq!(config.min_part_size, 102_400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct OssConfig {
    /// Bind address for the gateway.
    #[builder(default = String::from("0.0.0.0:9080"))]
    pub gateway_listen: String,

    /// Whether virtual-hosted-style addressing (`bucket.domain`) is enabled.
    #[builder(default = true)]
    pub oss_virtual_hosting: bool,

    /// Domain used for virtual hosting and for multipart `Location` URLs.
    #[builder(default = String::from("oss.localhost"))]
    pub oss_domain: String,

    /// Region reported for buckets.
    #[builder(default = String::from("oss-cn-hangzhou"))]
    pub default_region: String,

    /// Minimum size in bytes of every multipart part except the last.
    #[builder(default = 102_400)]
    pub min_part_size: u64,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for OssConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:9080"),
            oss_virtual_hosting: true,
            oss_domain: String::from("oss.localhost"),
            default_region: String::from("oss-cn-hangzhou"),
            min_part_size: 102_400,
            log_level: String::from("info"),
        }
    }
}

impl OssConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:9080` |
    /// | `OSS_VIRTUAL_HOSTING` | `true` |
    /// | `OSS_DOMAIN` | `oss.localhost` |
    /// | `DEFAULT_REGION` | `oss-cn-hangzhou` |
    /// | `OSS_MIN_PART_SIZE` | `102400` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("OSS_VIRTUAL_HOSTING") {
            config.oss_virtual_hosting = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("OSS_DOMAIN") {
            config.oss_domain = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.default_region = v;
        }
        if let Ok(v) = std::env::var("OSS_MIN_PART_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.min_part_size = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// URL of an object as reported in `CompleteMultipartUploadResult`.
    #[must_use]
    pub fn object_location(&self, bucket: &str, key: &str) -> String {
        format!(
            "http://{bucket}.{}/{}",
            self.oss_domain,
            utf8_percent_encode(key, KEY_ENCODE_SET)
        )
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
