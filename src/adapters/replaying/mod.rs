//! Replaying adapters that serve recorded interactions from cassettes.

pub mod content_generator;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;

/// Retrieve the next recorded output for a given port and method.
///
/// # Panics
///
/// Panics if the cassette has no more interactions for the port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output
}

/// Turn a recorded `{"Ok": ..}` / `{"Err": ..}` output back into a result.
///
/// Bare values without either wrapper are treated as `Ok`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, String> {
    let value = match output {
        serde_json::Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                return Err(err.as_str().unwrap_or("replayed error").to_string());
            }
            map.remove("Ok").unwrap_or(serde_json::Value::Object(map))
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|e| format!("Malformed cassette output: {e}"))
}
