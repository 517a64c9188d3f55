//! Replaying adapter for the `ContentGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::{CONTENT_GENERATOR_PORT, GENERATE_CONTENT_METHOD};
use crate::error::StudioError;
use crate::ports::content_generator::{
    ContentFuture, ContentGenerator, GenerateContentRequest, GenerateContentResponse,
};

/// Serves recorded `generateContent` responses from a cassette.
pub struct ReplayingContentGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingContentGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ContentGenerator for ReplayingContentGenerator {
    fn generate_content(
        &self,
        _api_key: &str,
        _model: &str,
        _request: &GenerateContentRequest,
    ) -> ContentFuture<'_> {
        let output = next_output(&self.replayer, CONTENT_GENERATOR_PORT, GENERATE_CONTENT_METHOD);
        Box::pin(async move {
            replay_result::<GenerateContentResponse>(output)
                .map_err(|message| StudioError::Api { status: 0, message })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::encode::EncodedImage;
    use chrono::Utc;
    use serde_json::json;

    fn replaying(outputs: Vec<serde_json::Value>) -> ReplayingContentGenerator {
        let interactions = outputs
            .into_iter()
            .zip(0..)
            .map(|(output, seq)| Interaction {
                seq,
                port: CONTENT_GENERATOR_PORT.into(),
                method: GENERATE_CONTENT_METHOD.into(),
                input: json!({}),
                output,
            })
            .collect();
        let cassette =
            Cassette { name: "t".into(), recorded_at: Utc::now(), commit: "c".into(), interactions };
        ReplayingContentGenerator::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    #[tokio::test]
    async fn serves_recorded_responses_in_order() {
        let generator = replaying(vec![
            json!({"Ok": {"candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
            ]}}]}}),
            json!({"Err": "API error (500): internal"}),
        ]);
        let request =
            GenerateContentRequest::portrait(&EncodedImage::new("image/png", vec![1]), "p", "3:4");

        let first = generator.generate_content("", "m", &request).await.unwrap();
        assert_eq!(first.first_inline_data().unwrap().data, "AQID");

        let second = generator.generate_content("", "m", &request).await.unwrap_err();
        assert!(second.to_string().contains("internal"));
    }
}
