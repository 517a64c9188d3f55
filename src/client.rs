//! Generation client: one portrait in, one fashion shot out.

use base64::Engine;

use crate::encode::{EncodedImage, DEFAULT_MIME};
use crate::error::StudioError;
use crate::model::DEFAULT_MODEL;
use crate::params::DEFAULT_ASPECT_RATIO;
use crate::ports::content_generator::{ContentGenerator, GenerateContentRequest};
use crate::prompt::FASHION_PROMPT;

/// Environment variable named in missing-key errors.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Everything the client needs, injected at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key; `None` makes every call fail before reaching the backend.
    pub api_key: Option<String>,
    /// Resolved Gemini model identifier.
    pub model: String,
    /// Output aspect ratio.
    pub aspect_ratio: String,
    /// Styling prompt sent alongside the image.
    pub prompt: String,
}

impl ClientConfig {
    /// Default model, ratio and prompt with the given key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            prompt: FASHION_PROMPT.to_string(),
        }
    }
}

/// Turns a portrait into a fashion shot via a [`ContentGenerator`] backend.
pub struct PortraitClient {
    config: ClientConfig,
    backend: Box<dyn ContentGenerator>,
}

impl PortraitClient {
    /// Create a client over the given backend.
    #[must_use]
    pub fn new(config: ClientConfig, backend: Box<dyn ContentGenerator>) -> Self {
        Self { config, backend }
    }

    /// Generate a fashion portrait from `original`.
    ///
    /// Makes exactly one backend call, or none when no API key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::MissingApiKey`] without calling the backend when
    /// no key is configured, [`StudioError::Extraction`] when the response has
    /// no image part, and any backend error unchanged.
    pub async fn generate_portrait(
        &self,
        original: &EncodedImage,
    ) -> Result<EncodedImage, StudioError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| StudioError::MissingApiKey { env_var: API_KEY_ENV.to_string() })?;

        let request = GenerateContentRequest::portrait(
            original,
            &self.config.prompt,
            &self.config.aspect_ratio,
        );
        tracing::info!(
            model = %self.config.model,
            aspect_ratio = %self.config.aspect_ratio,
            input_mime = %original.mime_type,
            "requesting fashion portrait"
        );

        let response = self.backend.generate_content(api_key, &self.config.model, &request).await?;

        let Some(inline) = response.first_inline_data() else {
            let finish_reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            tracing::warn!(finish_reason, "response carried no image part");
            return Err(StudioError::Extraction);
        };

        let data = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| StudioError::Decode(format!("Failed to decode base64: {e}")))?;
        let mime_type =
            if inline.mime_type.is_empty() { DEFAULT_MIME } else { inline.mime_type.as_str() };

        Ok(EncodedImage::new(mime_type, data))
    }
}
