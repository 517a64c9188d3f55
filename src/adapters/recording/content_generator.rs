//! Recording adapter for the `ContentGenerator` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::{CONTENT_GENERATOR_PORT, GENERATE_CONTENT_METHOD};
use crate::ports::content_generator::{ContentFuture, ContentGenerator, GenerateContentRequest};

/// What gets written to the cassette for each call. The API key is left out.
#[derive(Serialize)]
struct RecordedCall<'a> {
    model: &'a str,
    request: &'a GenerateContentRequest,
}

/// Records `generateContent` exchanges while delegating to an inner implementation.
pub struct RecordingContentGenerator {
    inner: Box<dyn ContentGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingContentGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn ContentGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ContentGenerator for RecordingContentGenerator {
    fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ContentFuture<'_> {
        let api_key = api_key.to_string();
        let model = model.to_string();
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_content(&api_key, &model, &request).await;
            let call = RecordedCall { model: &model, request: &request };
            record_result(&recorder, CONTENT_GENERATOR_PORT, GENERATE_CONTENT_METHOD, &call, &result);
            result
        })
    }
}
