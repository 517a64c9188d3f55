//! Drives uploads through the lifecycle using the generation client.

use std::path::Path;

use crate::client::PortraitClient;
use crate::encode::EncodedImage;
use crate::error::StudioError;
use crate::lifecycle::{Commit, GenerationResult, Lifecycle, Status, Ticket};

/// One user's session: a client plus the lifecycle it feeds.
pub struct Studio {
    client: PortraitClient,
    lifecycle: Lifecycle,
}

impl Studio {
    /// Create an idle studio.
    #[must_use]
    pub fn new(client: PortraitClient) -> Self {
        Self { client, lifecycle: Lifecycle::new() }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.lifecycle.status()
    }

    /// The latest result, if the last run succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        self.lifecycle.result()
    }

    /// The latest error message, if the last run failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    /// Return to idle ("try again" / "new style").
    ///
    /// # Errors
    ///
    /// Returns an error while a generation is in flight.
    pub fn reset(&mut self) -> Result<(), StudioError> {
        self.lifecycle.reset()
    }

    /// Read the image at `path` and run it through a full generation.
    ///
    /// Unreadable or non-image files end in [`Status::Error`] like any other failure.
    ///
    /// # Errors
    ///
    /// Only fails when the lifecycle refuses a new upload; generation failures
    /// are reported through [`Studio::error`].
    pub async fn upload(&mut self, path: &Path) -> Result<Status, StudioError> {
        let ticket = self.lifecycle.begin()?;
        match EncodedImage::from_path(path) {
            Ok(original) => Ok(self.generate(ticket, original).await),
            Err(e) => {
                let _ = self.lifecycle.fail(ticket, e.to_string());
                Ok(self.status())
            }
        }
    }

    /// Run an already encoded image through a full generation.
    ///
    /// # Errors
    ///
    /// Only fails when the lifecycle refuses a new upload.
    pub async fn submit(&mut self, original: EncodedImage) -> Result<Status, StudioError> {
        let ticket = self.lifecycle.begin()?;
        Ok(self.generate(ticket, original).await)
    }

    async fn generate(&mut self, ticket: Ticket, original: EncodedImage) -> Status {
        let outcome = self.client.generate_portrait(&original).await;
        let commit = match outcome {
            Ok(generated) => {
                let timestamp = chrono::Utc::now().timestamp_millis();
                self.lifecycle.succeed(ticket, GenerationResult { original, generated, timestamp })
            }
            Err(e) => {
                tracing::error!(error = %e, "generation failed");
                self.lifecycle.fail(ticket, e.to_string())
            }
        };
        if commit == Commit::Discarded {
            tracing::warn!("generation outcome arrived for a superseded upload");
        }
        self.status()
    }
}
