//! Media-gateway WebSocket messages.
//!
//! The gateway speaks a mixed protocol: microphone audio goes up and
//! agent audio comes down as raw PCM16 binary frames, while control
//! traffic is JSON text tagged by a `type` field. Some deployments also
//! deliver agent audio as `media` messages carrying base64 payloads, and
//! a bare `stop` text frame signals an interruption rather than a
//! disconnect.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → gateway control message.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum GatewayCommand {
    /// Session configuration sent right after connecting. The payload is
    /// an opaque mapping forwarded unmodified.
    #[serde(rename = "config")]
    Config { config: Value },
}

/// Base64-encoded audio carried by a `media` message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaPayload {
    pub payload: String,
}

/// Gateway → client control message. Unrecognized types map to
/// [`GatewayMessage::Unknown`] so protocol additions never break the
/// session.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GatewayMessage {
    #[serde(rename = "media")]
    Media { media: MediaPayload },

    #[serde(rename = "first_response")]
    FirstResponse {
        #[serde(default)]
        message: String,
    },

    #[serde(rename = "transcript")]
    Transcript {
        #[serde(default = "unknown_role")]
        role: String,
        #[serde(default)]
        text: String,
    },

    #[serde(rename = "interruption")]
    Interruption,

    #[serde(rename = "agent_speaking_stop", alias = "agent_stop")]
    AgentSpeakingStop,

    #[serde(rename = "call_end", alias = "call-end")]
    CallEnd,

    #[serde(rename = "error")]
    Error {
        #[serde(default = "unknown_error")]
        message: String,
    },

    #[serde(other)]
    Unknown,
}

fn unknown_role() -> String {
    "unknown".to_string()
}

fn unknown_error() -> String {
    "Unknown error".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_command_serializes_with_type_tag() {
        let command = GatewayCommand::Config {
            config: serde_json::json!({ "first_response_message": "Hi!" }),
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["type"], "config");
        assert_eq!(value["config"]["first_response_message"], "Hi!");
    }

    #[test]
    fn transcript_parses_role_and_text() {
        let msg: GatewayMessage =
            serde_json::from_str(r#"{"type":"transcript","role":"agent","text":"Hello there"}"#)
                .unwrap();
        assert_eq!(
            msg,
            GatewayMessage::Transcript { role: "agent".to_string(), text: "Hello there".to_string() }
        );
    }

    #[test]
    fn transcript_defaults_missing_fields() {
        let msg: GatewayMessage = serde_json::from_str(r#"{"type":"transcript"}"#).unwrap();
        assert_eq!(
            msg,
            GatewayMessage::Transcript { role: "unknown".to_string(), text: String::new() }
        );
    }

    #[test]
    fn media_parses_base64_payload() {
        let msg: GatewayMessage =
            serde_json::from_str(r#"{"type":"media","media":{"payload":"AAEC"}}"#).unwrap();
        assert_eq!(msg, GatewayMessage::Media { media: MediaPayload { payload: "AAEC".to_string() } });
    }

    #[test]
    fn speaking_stop_accepts_both_spellings() {
        let canonical: GatewayMessage =
            serde_json::from_str(r#"{"type":"agent_speaking_stop"}"#).unwrap();
        let legacy: GatewayMessage = serde_json::from_str(r#"{"type":"agent_stop"}"#).unwrap();
        assert_eq!(canonical, GatewayMessage::AgentSpeakingStop);
        assert_eq!(legacy, GatewayMessage::AgentSpeakingStop);
    }

    #[test]
    fn call_end_accepts_both_spellings() {
        let snake: GatewayMessage = serde_json::from_str(r#"{"type":"call_end"}"#).unwrap();
        let dashed: GatewayMessage = serde_json::from_str(r#"{"type":"call-end"}"#).unwrap();
        assert_eq!(snake, GatewayMessage::CallEnd);
        assert_eq!(dashed, GatewayMessage::CallEnd);
    }

    #[test]
    fn unrecognized_types_map_to_unknown() {
        let msg: GatewayMessage =
            serde_json::from_str(r#"{"type":"latency_report","p50_ms":12}"#).unwrap();
        assert_eq!(msg, GatewayMessage::Unknown);
    }

    #[test]
    fn error_defaults_to_a_message() {
        let msg: GatewayMessage = serde_json::from_str(r#"{"type":"error"}"#).unwrap();
        assert_eq!(msg, GatewayMessage::Error { message: "Unknown error".to_string() });
    }
}
