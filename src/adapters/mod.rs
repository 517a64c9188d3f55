//! Implementations of the `ContentGenerator` port.
//!
//! - `live/` — calls the Gemini API over HTTPS
//! - `recording/` — wraps a live backend and writes each exchange to a cassette
//! - `replaying/` — answers from a cassette without touching the network

pub mod live;
pub mod recording;
pub mod replaying;
