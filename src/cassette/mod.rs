//! Record/replay of generation exchanges, so tests never hit the network.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;

/// Port name used for `generateContent` interactions.
pub const CONTENT_GENERATOR_PORT: &str = "content_generator";

/// Method name used for `generateContent` interactions.
pub const GENERATE_CONTENT_METHOD: &str = "generate_content";
