//! Service context that picks the content generator backend.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiContentGenerator;
use crate::adapters::recording::content_generator::RecordingContentGenerator;
use crate::adapters::replaying::content_generator::ReplayingContentGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::StudioError;
use crate::ports::ContentGenerator;

/// Where recorded cassettes are written, relative to the working directory.
const CASSETTE_ROOT: &str = ".vogue-ai/cassettes";

/// Bundles the port trait objects for one run.
pub struct ServiceContext {
    /// Content generator port.
    pub backend: Box<dyn ContentGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// Must be called after the backend holding the other handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to Gemini.
    #[must_use]
    pub fn live() -> Self {
        Self { backend: Box::new(GeminiContentGenerator::new()) }
    }

    /// Create a recording context that wraps the live adapter with a recorder.
    #[must_use]
    pub fn recording() -> (Self, RecordingSession) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let dir = PathBuf::from(CASSETTE_ROOT).join(&timestamp);
        Self::recording_into(Box::new(GeminiContentGenerator::new()), &dir, &timestamp)
    }

    /// Wrap `inner` with a recorder whose cassette is written under `dir`.
    #[must_use]
    pub fn recording_into(
        inner: Box<dyn ContentGenerator>,
        dir: &Path,
        name: &str,
    ) -> (Self, RecordingSession) {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            dir.join("content_generator.cassette.yaml"),
            format!("{name}-content_generator"),
            get_commit_hash(),
        )));
        let backend = RecordingContentGenerator::new(inner, Arc::clone(&recorder));

        (Self { backend: Box::new(backend) }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, StudioError> {
        let replayer = load_cassette(path)
            .map_err(|e| StudioError::Config(format!("Failed to load cassette: {e}")))?;
        let backend = ReplayingContentGenerator::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { backend: Box::new(backend) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
