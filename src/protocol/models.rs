//! REST payload types for the agent controller.
//!
//! The platform takes agent configuration as one nested document: the
//! agent's identity plus one config block per inference stage. Optional
//! fields are omitted from the wire rather than sent as null; the update
//! variants make every field optional so a request carries exactly what
//! the caller supplied.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity and feature toggles for an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub apply_noise_reduction: bool,
    pub recording_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_filler_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_response_message: Option<String>,
}

/// LLM stage configuration. `model_provider_id` is always a canonical
/// provider identifier, never a friendly name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub model_provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_prompt: Option<String>,
}

/// TTS stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TtsConfig {
    pub tts_provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_parameters: Option<Value>,
}

/// STT stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriberConfig {
    pub provider_id: String,
    pub model_name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_prompt: Option<String>,
}

/// Voice-activity-detection stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VadConfig {
    pub vad_provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_speech_duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_silence_duration_ms: Option<f64>,
}

/// Which inference stages run for the agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InferencingConfig {
    pub vad: bool,
    pub stt: bool,
    pub llm: bool,
    pub tts: bool,
}

impl Default for InferencingConfig {
    fn default() -> Self {
        Self { vad: true, stt: true, llm: true, tts: true }
    }
}

/// An attached tool. The platform treats the configuration as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    pub tool_type: String,
    pub tool_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_overrides: Option<Value>,
}

/// `POST /agents` body: a complete agent document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAgentRequest {
    pub agent: AgentProfile,
    pub agent_model_config: ModelConfig,
    pub tts_config: TtsConfig,
    pub transcriber_config: TranscriberConfig,
    pub vad_config: VadConfig,
    pub inferencing_config: InferencingConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolConfig>>,
}

/// Partial agent identity update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_noise_reduction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_filler_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_response_message: Option<String>,
}

/// Partial LLM stage update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_prompt: Option<String>,
}

/// Partial TTS stage update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TtsConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_parameters: Option<Value>,
}

/// Partial STT stage update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranscriberConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_prompt: Option<String>,
}

/// Partial VAD stage update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VadConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vad_provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_speech_duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_silence_duration_ms: Option<f64>,
}

/// `PUT /agents/{id}` body. Only the config groups the caller touched
/// are serialized; absent groups are not sent, not sent-as-null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentProfileUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_model_config: Option<ModelConfigUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_config: Option<TtsConfigUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcriber_config: Option<TranscriberConfigUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vad_config: Option<VadConfigUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolConfig>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_serializes_only_supplied_groups() {
        let request = UpdateAgentRequest {
            agent: Some(AgentProfileUpdate {
                name: Some("Support Agent".to_string()),
                ..AgentProfileUpdate::default()
            }),
            ..UpdateAgentRequest::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({ "agent": { "name": "Support Agent" } }));
    }

    #[test]
    fn empty_update_request_serializes_to_empty_object() {
        let value = serde_json::to_value(UpdateAgentRequest::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn create_request_omits_absent_optionals() {
        let request = CreateAgentRequest {
            agent: AgentProfile {
                name: "Receptionist".to_string(),
                description: None,
                is_active: true,
                apply_noise_reduction: false,
                recording_enabled: false,
                tts_filler_enabled: None,
                first_response_message: None,
            },
            agent_model_config: ModelConfig {
                model_provider_id: "8b1a0f2c-bdc8-4f36-a114-aa2638be43d0".to_string(),
                temperature: Some(0.7),
                system_prompt: None,
                max_tokens: None,
                tool_prompt: None,
            },
            tts_config: TtsConfig {
                tts_provider_id: "75880080-722d-40fb-9e49-b379f68a89b2".to_string(),
                voice_name: Some("aura-2-thalia-en".to_string()),
                voice_parameters: None,
            },
            transcriber_config: TranscriberConfig {
                provider_id: "d8606a97-63c1-416e-83fa-720bb98c69e1".to_string(),
                model_name: "nova-3".to_string(),
                language: "en".to_string(),
                initial_prompt: None,
            },
            vad_config: VadConfig {
                vad_provider_id: "c284bf92-658b-4d1b-a2ff-0cba0892fd29".to_string(),
                threshold: Some(0.5),
                min_speech_duration_ms: None,
                min_silence_duration_ms: None,
            },
            inferencing_config: InferencingConfig::default(),
            tools: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value["agent"].get("description").is_none());
        assert_eq!(value["inferencing_config"]["llm"], true);
    }
}
