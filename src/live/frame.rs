use serde::Deserialize;

use crate::errors::ClientError;
use crate::models::Message;

/// Envelope of every inbound frame: `{ "type": "...", "payload": ... }`.
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// What a frame means to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveEvent {
    Message(Message),
    /// A well-formed frame of a type the client does not handle.
    Ignored(String),
}

pub fn decode_frame(text: &str) -> Result<LiveEvent, ClientError> {
    let raw: RawFrame =
        serde_json::from_str(text).map_err(|e| ClientError::Socket(e.to_string()))?;

    match raw.kind.as_str() {
        "message" => serde_json::from_value(raw.payload)
            .map(LiveEvent::Message)
            .map_err(|e| ClientError::Socket(format!("bad message payload: {e}"))),
        _ => Ok(LiveEvent::Ignored(raw.kind)),
    }
}
