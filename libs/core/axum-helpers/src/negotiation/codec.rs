//! Encoding and decoding of representations in each [`MediaFormat`].

use super::MediaFormat;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML: {0}")]
    XmlEncode(#[from] quick_xml::se::SeError),

    #[error("XML: {0}")]
    XmlDecode(#[from] quick_xml::de::DeError),

    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// A value the API can send in any negotiated format.
///
/// JSON and YAML documents are plain serde output. XML needs a named root
/// element, which each representation declares through [`XML_ROOT`].
///
/// [`XML_ROOT`]: Representation::XML_ROOT
pub trait Representation: Serialize + Sized {
    const XML_ROOT: &'static str;

    fn to_xml(&self) -> Result<String, CodecError> {
        Ok(quick_xml::se::to_string_with_root(Self::XML_ROOT, self)?)
    }
}

/// Lists serialize as `<List><item>..</item><item>..</item></List>`.
impl<T: Serialize> Representation for Vec<T> {
    const XML_ROOT: &'static str = "List";

    fn to_xml(&self) -> Result<String, CodecError> {
        #[derive(Serialize)]
        struct Items<'a, T> {
            item: &'a [T],
        }

        Ok(quick_xml::se::to_string_with_root(
            Self::XML_ROOT,
            &Items { item: self.as_slice() },
        )?)
    }
}

pub fn encode<T: Representation>(format: MediaFormat, value: &T) -> Result<Vec<u8>, CodecError> {
    match format {
        MediaFormat::Json => Ok(serde_json::to_vec(value)?),
        MediaFormat::Xml => Ok(value.to_xml()?.into_bytes()),
        MediaFormat::Yaml => Ok(serde_yaml::to_string(value)?.into_bytes()),
    }
}

/// Decodes a request body. XML documents may use any root element name.
pub fn decode<T: DeserializeOwned>(format: MediaFormat, bytes: &[u8]) -> Result<T, CodecError> {
    match format {
        MediaFormat::Json => Ok(serde_json::from_slice(bytes)?),
        MediaFormat::Xml => Ok(quick_xml::de::from_str(std::str::from_utf8(bytes)?)?),
        MediaFormat::Yaml => Ok(serde_yaml::from_slice(bytes)?),
    }
}
