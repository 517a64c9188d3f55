//! Upload and encoding of portrait images.
//!
//! An [`EncodedImage`] carries its own MIME type so the same value can be sent
//! to the API as inline data and written back out as a `data:` URI or file.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::StudioError;

/// Uploads above this size only get a warning; nothing is enforced.
pub const SIZE_GUIDANCE_BYTES: u64 = 5 * 1024 * 1024;

/// MIME type assumed when a response part does not name one.
pub const DEFAULT_MIME: &str = "image/png";

/// A self-describing image: format plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// MIME type of the image (e.g., `"image/jpeg"`).
    pub mime_type: String,
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl EncodedImage {
    /// Wrap raw bytes with a known MIME type.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { mime_type: mime_type.into(), data }
    }

    /// Read an image file chosen by the user.
    ///
    /// The MIME type is sniffed from the file contents, falling back to the
    /// extension when the bytes are not recognised.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not look like an image.
    pub fn from_path(path: &Path) -> Result<Self, StudioError> {
        let data = std::fs::read(path)?;
        let size = data.len() as u64;
        if size > SIZE_GUIDANCE_BYTES {
            tracing::warn!(path = %path.display(), size, "upload is larger than 5MB");
        }

        let mime_type = sniff_mime(&data)
            .or_else(|| {
                path.extension()
                    .and_then(image::ImageFormat::from_extension)
                    .map(|f| f.to_mime_type().to_string())
            })
            .ok_or_else(|| {
                StudioError::InvalidImage(format!("{} is not a recognised image", path.display()))
            })?;

        tracing::debug!(path = %path.display(), %mime_type, size, "encoded upload");
        Ok(Self { mime_type, data })
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is malformed or the payload is not valid base64.
    pub fn from_data_uri(uri: &str) -> Result<Self, StudioError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::Decode("missing 'data:' prefix".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| StudioError::Decode("missing ',' separator".into()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| StudioError::Decode("only base64 data URIs are supported".into()))?;
        let mime_type = if mime_type.is_empty() { DEFAULT_MIME } else { mime_type };

        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| StudioError::Decode(format!("invalid base64 payload: {e}")))?;
        Ok(Self { mime_type: mime_type.to_string(), data })
    }

    /// Base64 payload without any prefix, as the API expects it.
    #[must_use]
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Render as a `data:` URI suitable for direct display.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64())
    }
}

fn sniff_mime(data: &[u8]) -> Option<String> {
    image::guess_format(data).ok().map(|f| f.to_mime_type().to_string())
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
