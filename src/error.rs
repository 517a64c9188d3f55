//! Unified error type for vogue-ai.

use thiserror::Error;

/// Errors that can occur while turning a portrait into a fashion shot.
#[derive(Debug, Error)]
pub enum StudioError {
    /// No API key was injected into the generation client.
    #[error("API Key is not configured. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The environment variable checked first.
        env_var: String,
    },

    /// Configuration file or cassette could not be loaded.
    #[error("Config error: {0}")]
    Config(String),

    /// The generation API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response carried no image part.
    #[error("Failed to extract image from response.")]
    Extraction,

    /// Encoded image data could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The uploaded file is not an image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image compositing or re-encoding failed.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// An upload was attempted while a generation is still in flight.
    #[error("A generation is already in progress")]
    Busy,

    /// The requested lifecycle transition is not allowed from the current state.
    #[error("Cannot {action} while {status}")]
    InvalidTransition {
        /// The attempted action.
        action: &'static str,
        /// The state the lifecycle was in.
        status: crate::lifecycle::Status,
    },

    /// A generation run ended in the error state.
    #[error("{0}")]
    Generation(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
