//! OSS XML serialization: converting model types to XML documents.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use rustoss_model::output::{
    CompleteMultipartUploadOutput, CopyObjectOutput, GetObjectAclOutput,
    InitiateMultipartUploadOutput, ListObjectsOutput, ListPartsOutput,
};
use rustoss_model::types::{CompletedMultipartUpload, Owner};

use crate::error::XmlError;

/// Trait for serializing types to XML.
///
/// Implementors write their content as child elements inside the current XML
/// context. The root element is written by [`to_xml`].
pub trait OssSerialize {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a complete XML document under `root_element`.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml<T: OssSerialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element(root_element)
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v)?;
    }
    Ok(())
}

/// Format a `DateTime<Utc>` as ISO 8601 with milliseconds and `Z` suffix.
pub(crate) fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn write_owner<W: Write>(writer: &mut Writer<W>, owner: &Owner) -> io::Result<()> {
    writer
        .create_element("Owner")
        .write_inner_content(|w| owner.serialize_xml(w))?;
    Ok(())
}

impl OssSerialize for Owner {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "ID", &self.id)?;
        write_text_element(writer, "DisplayName", &self.display_name)
    }
}

/// `AccessControlPolicy`: the object's single canned grant.
impl OssSerialize for GetObjectAclOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_owner(writer, &self.owner)?;
        writer
            .create_element("AccessControlList")
            .write_inner_content(|w| write_text_element(w, "Grant", self.permission.as_str()))?;
        Ok(())
    }
}

/// `InitiateMultipartUploadResult`.
impl OssSerialize for InitiateMultipartUploadOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "Bucket", &self.bucket)?;
        write_text_element(writer, "Key", &self.key)?;
        write_text_element(writer, "UploadId", &self.upload_id)
    }
}

/// `CompleteMultipartUploadResult`.
impl OssSerialize for CompleteMultipartUploadOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "Location", &self.location)?;
        write_text_element(writer, "Bucket", &self.bucket)?;
        write_text_element(writer, "Key", &self.key)?;
        write_text_element(writer, "ETag", &self.etag)
    }
}

/// `CopyObjectResult`.
impl OssSerialize for CopyObjectOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "LastModified", &format_timestamp(&self.last_modified))?;
        write_text_element(writer, "ETag", &self.etag)
    }
}

/// `ListBucketResult`.
impl OssSerialize for ListObjectsOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "Name", &self.name)?;
        write_text_element(writer, "Prefix", &self.prefix)?;
        write_text_element(writer, "Marker", &self.marker)?;
        write_text_element(writer, "MaxKeys", &self.max_keys.to_string())?;
        write_text_element(
            writer,
            "IsTruncated",
            if self.is_truncated { "true" } else { "false" },
        )?;
        write_optional_text(writer, "NextMarker", self.next_marker.as_deref())?;
        for obj in &self.contents {
            writer.create_element("Contents").write_inner_content(|w| {
                write_text_element(w, "Key", &obj.key)?;
                write_text_element(w, "LastModified", &format_timestamp(&obj.last_modified))?;
                write_text_element(w, "ETag", &obj.etag)?;
                write_text_element(w, "Type", obj.object_type.as_str())?;
                write_text_element(w, "Size", &obj.size.to_string())?;
                write_text_element(w, "StorageClass", "Standard")?;
                write_owner(w, &obj.owner)
            })?;
        }
        Ok(())
    }
}

/// `ListPartsResult`.
impl OssSerialize for ListPartsOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "Bucket", &self.bucket)?;
        write_text_element(writer, "Key", &self.key)?;
        write_text_element(writer, "UploadId", &self.upload_id)?;
        for part in &self.parts {
            writer.create_element("Part").write_inner_content(|w| {
                write_text_element(w, "PartNumber", &part.part_number.to_string())?;
                write_text_element(w, "LastModified", &format_timestamp(&part.last_modified))?;
                write_text_element(w, "ETag", &part.etag)?;
                write_text_element(w, "Size", &part.size.to_string())
            })?;
        }
        Ok(())
    }
}

/// `CompleteMultipartUpload` request body.
impl OssSerialize for CompletedMultipartUpload {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for part in &self.parts {
            writer.create_element("Part").write_inner_content(|w| {
                write_text_element(w, "PartNumber", &part.part_number.to_string())?;
                write_text_element(w, "ETag", &part.etag)
            })?;
        }
        Ok(())
    }
}
