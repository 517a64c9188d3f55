//! Content generator port for the Gemini `generateContent` exchange.
//!
//! The wire types mirror the JSON shape of the API so that live, recording
//! and replaying adapters all speak the same structures.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::encode::EncodedImage;
use crate::error::StudioError;

/// Body of a `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; a portrait request always has exactly one.
    pub contents: Vec<Content>,
    /// Output configuration.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Build a single-turn request: the image first, then the prompt.
    #[must_use]
    pub fn portrait(image: &EncodedImage, prompt: &str, aspect_ratio: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.base64(),
                        }),
                    },
                    Part { text: Some(prompt.to_string()), inline_data: None },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: ImageConfig { aspect_ratio: aspect_ratio.to_string() },
            },
        }
    }
}

/// Output configuration pinned by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested response modalities.
    pub response_modalities: Vec<String>,
    /// Image output settings.
    pub image_config: ImageConfig,
}

/// Image output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Output aspect ratio, e.g. `"3:4"`.
    pub aspect_ratio: String,
}

/// A list of parts making up one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// Text and image parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One text or inline-data part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 image data with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload.
    #[serde(default)]
    pub mime_type: String,
    /// Base64 payload, no `data:` prefix.
    pub data: String,
}

/// Response of a `generateContent` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate outputs; only the first is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content, absent when the candidate was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped (`STOP`, `SAFETY`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// The first inline-data part of the first candidate, if any.
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.inline_data.as_ref()))
    }
}

/// Boxed future type returned by [`ContentGenerator::generate_content`].
pub type ContentFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerateContentResponse, StudioError>> + Send + 'a>>;

/// Performs one `generateContent` exchange with an external service.
pub trait ContentGenerator: Send + Sync {
    /// Send `request` to `model`, authenticating with `api_key`.
    fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ContentFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn portrait_request_wire_shape() {
        let image = EncodedImage::new("image/jpeg", vec![1, 2, 3]);
        let request = GenerateContentRequest::portrait(&image, "a fashion shot", "3:4");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        {"inlineData": {"mimeType": "image/jpeg", "data": "AQID"}},
                        {"text": "a fashion shot"}
                    ]
                }],
                "generationConfig": {
                    "responseModalities": ["IMAGE"],
                    "imageConfig": {"aspectRatio": "3:4"}
                }
            })
        );
    }

    #[test]
    fn first_inline_data_skips_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "here you go"},
                    {"inlineData": {"mimeType": "image/png", "data": "AQID"}},
                    {"inlineData": {"mimeType": "image/jpeg", "data": "BAUG"}}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "AQID");
    }

    #[test]
    fn first_inline_data_only_looks_at_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "no image"}]}},
                {"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "AQID"}}]}}
            ]
        }))
        .unwrap();
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn tolerates_missing_fields() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_inline_data().is_none());

        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(blocked.first_inline_data().is_none());
        assert_eq!(blocked.candidates[0].finish_reason.as_deref(), Some("SAFETY"));
    }
}
