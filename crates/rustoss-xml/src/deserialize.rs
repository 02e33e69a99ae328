//! OSS XML deserialization: parsing XML documents into model types.

use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rustoss_model::output::{
    CompleteMultipartUploadOutput, CopyObjectOutput, GetObjectAclOutput,
    InitiateMultipartUploadOutput, ListObjectsOutput, ListPartsOutput,
};
use rustoss_model::types::{
    CompletedMultipartUpload, ObjectPermission, ObjectSummary, ObjectType, Owner, PartETag,
    PartSummary,
};

use crate::error::XmlError;

/// Trait for deserializing types from XML.
///
/// The root element has already been consumed by the caller; the
/// implementation reads child elements until the matching end tag.
pub trait OssDeserialize: Sized {
    /// Deserialize an instance from the given XML reader.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or required fields are missing.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;
}

/// Deserialize an XML document into a typed value.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml<T: OssDeserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(_) => {
                return T::deserialize_xml(&mut reader);
            }
            Event::Eof => {
                return Err(XmlError::MissingElement("root element".to_string()));
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Reader helpers
// ---------------------------------------------------------------------------

pub(crate) fn element_name(e: &BytesStart<'_>) -> Result<String, XmlError> {
    let name = e.name();
    std::str::from_utf8(name.as_ref())
        .map(ToOwned::to_owned)
        .map_err(|err| XmlError::ParseError(err.to_string()))
}

/// Read the text content of the current element and consume its end tag.
pub(crate) fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::End(_) => {
                return Ok(text);
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Skip over an element and all its children.
pub(crate) fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Visit each child element of the current element, then consume its end tag.
///
/// The visitor must consume the child it is handed, typically with
/// [`read_text_content`], [`skip_element`] or a nested deserializer.
fn for_each_child<F>(reader: &mut Reader<&[u8]>, context: &str, mut visit: F) -> Result<(), XmlError>
where
    F: FnMut(&mut Reader<&[u8]>, &str) -> Result<(), XmlError>,
{
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e)?;
                visit(reader, &name)?;
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(format!(
                    "unexpected EOF in {context}"
                )));
            }
            _ => {}
        }
    }
}

fn parse_number<T>(s: &str) -> Result<T, XmlError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    s.trim()
        .parse::<T>()
        .map_err(|e| XmlError::ParseError(format!("invalid number '{s}': {e}")))
}

fn parse_bool(s: &str) -> Result<bool, XmlError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(XmlError::ParseError(format!("invalid boolean: {s}"))),
    }
}

fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, XmlError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

impl OssDeserialize for PartETag {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut part_number = None;
        let mut etag = None;
        for_each_child(reader, "Part", |reader, name| {
            match name {
                "PartNumber" => part_number = Some(parse_number(&read_text_content(reader)?)?),
                "ETag" => etag = Some(read_text_content(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(PartETag {
            part_number: part_number
                .ok_or_else(|| XmlError::MissingElement("PartNumber".to_string()))?,
            etag: etag.ok_or_else(|| XmlError::MissingElement("ETag".to_string()))?,
        })
    }
}

impl OssDeserialize for CompletedMultipartUpload {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut parts = Vec::new();
        for_each_child(reader, "CompleteMultipartUpload", |reader, name| {
            if name == "Part" {
                parts.push(PartETag::deserialize_xml(reader)?);
            } else {
                skip_element(reader)?;
            }
            Ok(())
        })?;
        Ok(Self { parts })
    }
}

// ---------------------------------------------------------------------------
// Response documents
// ---------------------------------------------------------------------------

impl OssDeserialize for Owner {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut owner = Owner::default();
        for_each_child(reader, "Owner", |reader, name| {
            match name {
                "ID" => owner.id = read_text_content(reader)?,
                "DisplayName" => owner.display_name = read_text_content(reader)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(owner)
    }
}

/// Reads an `AccessControlPolicy`. An unrecognized `Grant` becomes
/// [`ObjectPermission::Unknown`] rather than an error.
impl OssDeserialize for GetObjectAclOutput {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut owner = Owner::default();
        let mut grant = None;
        for_each_child(reader, "AccessControlPolicy", |reader, name| {
            match name {
                "Owner" => owner = Owner::deserialize_xml(reader)?,
                "AccessControlList" => {
                    for_each_child(reader, "AccessControlList", |reader, name| {
                        if name == "Grant" {
                            grant = Some(read_text_content(reader)?);
                        } else {
                            skip_element(reader)?;
                        }
                        Ok(())
                    })?;
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        let grant = grant.ok_or_else(|| XmlError::MissingElement("Grant".to_string()))?;
        Ok(Self {
            owner,
            permission: ObjectPermission::parse(&grant),
        })
    }
}

impl OssDeserialize for InitiateMultipartUploadOutput {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        for_each_child(reader, "InitiateMultipartUploadResult", |reader, name| {
            match name {
                "Bucket" => out.bucket = read_text_content(reader)?,
                "Key" => out.key = read_text_content(reader)?,
                "UploadId" => out.upload_id = read_text_content(reader)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        if out.upload_id.is_empty() {
            return Err(XmlError::MissingElement("UploadId".to_string()));
        }
        Ok(out)
    }
}

impl OssDeserialize for CompleteMultipartUploadOutput {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        for_each_child(reader, "CompleteMultipartUploadResult", |reader, name| {
            match name {
                "Location" => out.location = read_text_content(reader)?,
                "Bucket" => out.bucket = read_text_content(reader)?,
                "Key" => out.key = read_text_content(reader)?,
                "ETag" => out.etag = read_text_content(reader)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(out)
    }
}

impl OssDeserialize for CopyObjectOutput {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        for_each_child(reader, "CopyObjectResult", |reader, name| {
            match name {
                "ETag" => out.etag = read_text_content(reader)?,
                "LastModified" => out.last_modified = parse_timestamp(&read_text_content(reader)?)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(out)
    }
}

impl OssDeserialize for ObjectSummary {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut obj = Self::default();
        for_each_child(reader, "Contents", |reader, name| {
            match name {
                "Key" => obj.key = read_text_content(reader)?,
                "LastModified" => obj.last_modified = parse_timestamp(&read_text_content(reader)?)?,
                "ETag" => obj.etag = read_text_content(reader)?,
                "Type" => obj.object_type = ObjectType::from(read_text_content(reader)?.as_str()),
                "Size" => obj.size = parse_number(&read_text_content(reader)?)?,
                "Owner" => obj.owner = Owner::deserialize_xml(reader)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(obj)
    }
}

impl OssDeserialize for ListObjectsOutput {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        for_each_child(reader, "ListBucketResult", |reader, name| {
            match name {
                "Name" => out.name = read_text_content(reader)?,
                "Prefix" => out.prefix = read_text_content(reader)?,
                "Marker" => out.marker = read_text_content(reader)?,
                "MaxKeys" => out.max_keys = parse_number(&read_text_content(reader)?)?,
                "IsTruncated" => out.is_truncated = parse_bool(&read_text_content(reader)?)?,
                "NextMarker" => out.next_marker = Some(read_text_content(reader)?),
                "Contents" => out.contents.push(ObjectSummary::deserialize_xml(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(out)
    }
}

impl OssDeserialize for PartSummary {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut part = Self::default();
        for_each_child(reader, "Part", |reader, name| {
            match name {
                "PartNumber" => part.part_number = parse_number(&read_text_content(reader)?)?,
                "LastModified" => {
                    part.last_modified = parse_timestamp(&read_text_content(reader)?)?;
                }
                "ETag" => part.etag = read_text_content(reader)?,
                "Size" => part.size = parse_number(&read_text_content(reader)?)?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(part)
    }
}

impl OssDeserialize for ListPartsOutput {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        for_each_child(reader, "ListPartsResult", |reader, name| {
            match name {
                "Bucket" => out.bucket = read_text_content(reader)?,
                "Key" => out.key = read_text_content(reader)?,
                "UploadId" => out.upload_id = read_text_content(reader)?,
                "Part" => out.parts.push(PartSummary::deserialize_xml(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(out)
    }
}
