//! Live adapter for the Gemini `generateContent` API.

use reqwest::Client;

use crate::error::StudioError;
use crate::ports::content_generator::{
    ContentFuture, ContentGenerator, GenerateContentRequest, GenerateContentResponse,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of a response body quoted in error messages.
const MAX_BODY_EXCERPT: usize = 500;

/// Live Gemini content generator that calls the Google AI API.
pub struct GeminiContentGenerator {
    client: Client,
    base_url: String,
}

impl GeminiContentGenerator {
    /// Create a generator talking to the public Gemini endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_BASE)
    }

    /// Create a generator talking to a different models endpoint.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.into() }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:generateContent", self.base_url.trim_end_matches('/'))
    }
}

impl Default for GeminiContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentGenerator for GeminiContentGenerator {
    fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ContentFuture<'_> {
        let api_key = api_key.to_string();
        let url = self.endpoint(model);
        let request = request.clone();
        Box::pin(async move {
            tracing::debug!(%url, "sending generateContent request");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &api_key)
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;
            tracing::debug!(status = status.as_u16(), bytes = response_text.len(), "response received");

            if !status.is_success() {
                return Err(StudioError::Api { status: status.as_u16(), message: response_text });
            }

            serde_json::from_str(&response_text).map_err(|e| StudioError::Api {
                status: status.as_u16(),
                message: format!(
                    "Failed to parse response: {e}. Body: {}",
                    excerpt(&response_text)
                ),
            })
        })
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
