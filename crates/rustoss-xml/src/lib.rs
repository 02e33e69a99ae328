//! OSS XML serialization/deserialization for RustOSS.
//!
//! Response documents are written by the server and read back by the client,
//! and the `CompleteMultipartUpload` request body goes the other way, so most
//! types here implement both [`OssSerialize`] and [`OssDeserialize`].
//!
//! # OSS XML conventions
//!
//! - No namespace on the root element
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 with milliseconds (`2026-02-03T16:45:09.000Z`)
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

pub mod deserialize;
pub mod error;
pub mod serialize;

pub use deserialize::{OssDeserialize, from_xml};
pub use error::{ErrorDocument, XmlError, error_to_xml};
pub use serialize::{OssSerialize, to_xml};
