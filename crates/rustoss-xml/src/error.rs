//! OSS error XML formatting and error types.

use std::io;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::deserialize::{OssDeserialize, element_name, read_text_content, skip_element};

/// Errors that can occur during XML serialization or deserialization.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// An unexpected XML element was encountered.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// An error parsing a value from XML text content.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}

/// Format an OSS error as XML.
///
/// `details` are extra child elements such as `("Key", "a.txt")` or
/// `("BucketName", "b")`, written after `Message`.
///
/// # Example output
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <Error>
///   <Code>NoSuchKey</Code>
///   <Message>The specified key does not exist.</Message>
///   <Key>a.txt</Key>
///   <RequestId>5C3D9175B6FC201293AD4890</RequestId>
///   <HostId>bucket.oss.localhost</HostId>
/// </Error>
/// ```
pub fn error_to_xml(
    code: &str,
    message: &str,
    details: &[(&str, &str)],
    request_id: &str,
    host_id: &str,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);
    if let Err(e) = write_error_xml(&mut buf, code, message, details, request_id, host_id) {
        tracing::error!(error = %e, "failed to serialize OSS error XML");
        buf.clear();
    }
    buf
}

fn write_error_xml(
    buf: &mut Vec<u8>,
    code: &str,
    message: &str,
    details: &[(&str, &str)],
    request_id: &str,
    host_id: &str,
) -> io::Result<()> {
    let mut writer = Writer::new(buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer.create_element("Error").write_inner_content(|w| {
        w.create_element("Code")
            .write_text_content(BytesText::new(code))?;
        w.create_element("Message")
            .write_text_content(BytesText::new(message))?;
        for (tag, value) in details {
            w.create_element(*tag)
                .write_text_content(BytesText::new(value))?;
        }
        w.create_element("RequestId")
            .write_text_content(BytesText::new(request_id))?;
        w.create_element("HostId")
            .write_text_content(BytesText::new(host_id))?;
        Ok(())
    })?;

    Ok(())
}

/// A parsed `<Error>` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDocument {
    /// `Code`.
    pub code: String,
    /// `Message`.
    pub message: String,
    /// `RequestId`.
    pub request_id: String,
    /// `HostId`.
    pub host_id: String,
}

impl OssDeserialize for ErrorDocument {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut doc = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match element_name(&e)?.as_str() {
                    "Code" => doc.code = read_text_content(reader)?,
                    "Message" => doc.message = read_text_content(reader)?,
                    "RequestId" => doc.request_id = read_text_content(reader)?,
                    "HostId" => doc.host_id = read_text_content(reader)?,
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Error".to_string(),
                    ));
                }
                _ => {}
            }
        }
        if doc.code.is_empty() {
            return Err(XmlError::MissingElement("Code".to_string()));
        }
        Ok(doc)
    }
}
