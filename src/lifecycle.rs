//! Request lifecycle: Idle → Loading → Success | Error → Idle.
//!
//! Only one generation may be in flight. Every [`Lifecycle::begin`] hands out
//! a [`Ticket`]; an outcome reported with anything but the current ticket is
//! dropped, so a superseded request can never overwrite newer state.

use std::fmt;

use crate::encode::EncodedImage;
use crate::error::StudioError;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "An unexpected error occurred during generation.";

/// Which screen the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for an upload.
    Idle,
    /// A generation call is in flight.
    Loading,
    /// A result is available.
    Success,
    /// The last generation failed.
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "showing a result",
            Self::Error => "showing an error",
        };
        f.write_str(name)
    }
}

/// The original and generated images from one successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// The uploaded portrait.
    pub original: EncodedImage,
    /// The fashion shot returned by the service.
    pub generated: EncodedImage,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Identifies one `begin` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Whether an outcome was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Commit {
    /// The outcome became the current state.
    Applied,
    /// The ticket was stale; state is unchanged.
    Discarded,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Loading(Ticket),
    Success(GenerationResult),
    Error(String),
}

/// The four-state lifecycle. Result and error exist only in their own state.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
    issued: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Start in [`Status::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Idle, issued: 0 }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::Loading(_) => Status::Loading,
            Phase::Success(_) => Status::Success,
            Phase::Error(_) => Status::Error,
        }
    }

    /// The result, present only in [`Status::Success`].
    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The error message, present only in [`Status::Error`].
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Enter [`Status::Loading`] for a new upload.
    ///
    /// Starting from Success or Error drops the previous result or message.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Busy`] if a generation is already in flight.
    pub fn begin(&mut self) -> Result<Ticket, StudioError> {
        if let Phase::Loading(_) = self.phase {
            tracing::warn!("upload rejected: generation already in progress");
            return Err(StudioError::Busy);
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        tracing::debug!(from = %self.status(), ticket = ticket.0, "begin generation");
        self.phase = Phase::Loading(ticket);
        Ok(ticket)
    }

    /// Commit a successful generation for `ticket`.
    pub fn succeed(&mut self, ticket: Ticket, result: GenerationResult) -> Commit {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "discarding stale result");
            return Commit::Discarded;
        }
        tracing::debug!(ticket = ticket.0, timestamp = result.timestamp, "generation succeeded");
        self.phase = Phase::Success(result);
        Commit::Applied
    }

    /// Commit a failed generation for `ticket`.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> Commit {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "discarding stale failure");
            return Commit::Discarded;
        }
        let mut message = message.into();
        if message.trim().is_empty() {
            message = FALLBACK_ERROR.to_string();
        }
        tracing::debug!(ticket = ticket.0, %message, "generation failed");
        self.phase = Phase::Error(message);
        Commit::Applied
    }

    /// Return to [`Status::Idle`], dropping any result or error.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidTransition`] while loading; in-flight
    /// requests cannot be cancelled.
    pub fn reset(&mut self) -> Result<(), StudioError> {
        if let Phase::Loading(_) = self.phase {
            return Err(StudioError::InvalidTransition { action: "reset", status: Status::Loading });
        }
        self.phase = Phase::Idle;
        Ok(())
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        matches!(self.phase, Phase::Loading(current) if current == ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(timestamp: i64) -> GenerationResult {
        GenerationResult {
            original: EncodedImage::new("image/jpeg", vec![1]),
            generated: EncodedImage::new("image/png", vec![2]),
            timestamp,
        }
    }

    #[test]
    fn starts_idle() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.status(), Status::Idle);
        assert!(lifecycle.result().is_none());
        assert!(lifecycle.error().is_none());
    }

    #[test]
    fn success_path() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        assert_eq!(lifecycle.status(), Status::Loading);

        assert_eq!(lifecycle.succeed(ticket, result(1000)), Commit::Applied);
        assert_eq!(lifecycle.status(), Status::Success);
        assert_eq!(lifecycle.result().unwrap().timestamp, 1000);
        assert!(lifecycle.error().is_none());
    }

    #[test]
    fn error_path() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        assert_eq!(lifecycle.fail(ticket, "quota exceeded"), Commit::Applied);
        assert_eq!(lifecycle.status(), Status::Error);
        assert_eq!(lifecycle.error(), Some("quota exceeded"));
        assert!(lifecycle.result().is_none());
    }

    #[test]
    fn empty_failure_message_uses_fallback() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        let _ = lifecycle.fail(ticket, "");
        assert_eq!(lifecycle.error(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn reset_from_success_and_error() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        let _ = lifecycle.succeed(ticket, result(1));
        lifecycle.reset().unwrap();
        assert_eq!(lifecycle.status(), Status::Idle);
        assert!(lifecycle.result().is_none());

        let ticket = lifecycle.begin().unwrap();
        let _ = lifecycle.fail(ticket, "boom");
        lifecycle.reset().unwrap();
        assert_eq!(lifecycle.status(), Status::Idle);
        assert!(lifecycle.error().is_none());
    }

    #[test]
    fn reset_while_idle_is_noop() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.reset().unwrap();
        assert_eq!(lifecycle.status(), Status::Idle);
    }

    #[test]
    fn reset_while_loading_is_rejected() {
        let mut lifecycle = Lifecycle::new();
        let _ = lifecycle.begin().unwrap();
        let err = lifecycle.reset().unwrap_err();
        assert!(matches!(err, StudioError::InvalidTransition { status: Status::Loading, .. }));
        assert_eq!(lifecycle.status(), Status::Loading);
    }

    #[test]
    fn second_upload_while_loading_is_rejected() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        assert!(matches!(lifecycle.begin(), Err(StudioError::Busy)));

        // The original request still owns the lifecycle.
        assert_eq!(lifecycle.succeed(ticket, result(5)), Commit::Applied);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut lifecycle = Lifecycle::new();
        let old = lifecycle.begin().unwrap();
        let _ = lifecycle.fail(old, "first attempt failed");
        let current = lifecycle.begin().unwrap();
        assert_ne!(old, current);

        assert_eq!(lifecycle.succeed(old, result(1)), Commit::Discarded);
        assert_eq!(lifecycle.fail(old, "late"), Commit::Discarded);
        assert_eq!(lifecycle.status(), Status::Loading);

        assert_eq!(lifecycle.succeed(current, result(2)), Commit::Applied);
        assert_eq!(lifecycle.result().unwrap().timestamp, 2);
    }

    #[test]
    fn outcome_after_commit_is_discarded() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        let _ = lifecycle.succeed(ticket, result(1));
        assert_eq!(lifecycle.fail(ticket, "late"), Commit::Discarded);
        assert_eq!(lifecycle.status(), Status::Success);
    }

    #[test]
    fn failed_retry_keeps_no_stale_result() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        let _ = lifecycle.succeed(ticket, result(1));
        let ticket = lifecycle.begin().unwrap();
        assert!(lifecycle.result().is_none());
        let _ = lifecycle.fail(ticket, "boom");
        assert_eq!(lifecycle.status(), Status::Error);
        assert!(lifecycle.result().is_none());
    }

    #[test]
    fn begin_from_error_clears_message() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin().unwrap();
        let _ = lifecycle.fail(ticket, "boom");
        let _ = lifecycle.begin().unwrap();
        assert!(lifecycle.error().is_none());
        assert!(lifecycle.result().is_none());
    }
}
