use reqwest::Method;
use serde_json::Value;

use crate::catalog::{resolve_model, resolve_transcriber, resolve_tts, resolve_vad, resolve_voice};
use crate::protocol::models::{
    AgentProfile, AgentProfileUpdate, CreateAgentRequest, InferencingConfig, ModelConfig,
    ModelConfigUpdate, ToolConfig, TranscriberConfig, TranscriberConfigUpdate, TtsConfig,
    TtsConfigUpdate, UpdateAgentRequest, VadConfig, VadConfigUpdate,
};
use crate::transport::RestClient;
use crate::{Error, Result};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const DEFAULT_MAX_TOKENS: u32 = 150;
const DEFAULT_TOOL_PROMPT: &str = "Use tools when appropriate.";
const DEFAULT_VAD_THRESHOLD: f64 = 0.5;
const DEFAULT_MIN_SPEECH_MS: f64 = 250.0;
const DEFAULT_MIN_SILENCE_MS: f64 = 500.0;

fn default_voice_parameters() -> Value {
    serde_json::json!({ "speed": 1.0, "pitch": 1.0, "volume": 1.0 })
}

/// Agent CRUD against the platform's API-key controller.
#[derive(Clone, Debug)]
pub struct Agents {
    rest: RestClient,
}

impl Agents {
    pub(crate) const fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Start building a new agent. `name` is required; every other field
    /// falls back to the platform defaults.
    pub fn create(&self, name: impl Into<String>) -> CreateAgentBuilder<'_> {
        CreateAgentBuilder::new(self, name.into())
    }

    /// All agents visible to the current key, in the order the service
    /// returned them.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn list(&self) -> Result<Value> {
        self.rest.request(Method::GET, "/agents", None, None, None).await
    }

    /// Fetch one agent by id. A missing id surfaces as
    /// [`crate::ApiErrorKind::NotFound`], unchanged.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn get(&self, agent_id: &str) -> Result<Value> {
        self.rest
            .request(Method::GET, &format!("/agents/{agent_id}"), None, None, None)
            .await
    }

    /// Start building a partial update. Only the fields set on the
    /// builder are sent.
    pub fn update(&self, agent_id: impl Into<String>) -> UpdateAgentBuilder<'_> {
        UpdateAgentBuilder::new(self, agent_id.into())
    }

    /// Delete an agent. `force_delete` allows deleting agents that are
    /// still active.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn delete(&self, agent_id: &str, force_delete: bool) -> Result<Value> {
        let query = [("force_delete", force_delete.to_string())];
        self.rest
            .request(Method::DELETE, &format!("/agents/{agent_id}"), Some(&query), None, None)
            .await
    }
}

/// Builder for `POST /agents`. Friendly model/voice/transcriber/VAD names
/// are resolved to canonical provider identifiers on [`send`], falling
/// back to the catalog defaults for anything left unset.
///
/// [`send`]: CreateAgentBuilder::send
#[must_use]
pub struct CreateAgentBuilder<'a> {
    agents: &'a Agents,
    name: String,
    description: Option<String>,
    is_active: bool,
    model: Option<String>,
    temperature: f64,
    system_prompt: String,
    max_tokens: u32,
    tool_prompt: String,
    voice: Option<String>,
    voice_parameters: Option<Value>,
    transcriber: Option<String>,
    initial_prompt: Option<String>,
    vad_provider: Option<String>,
    vad_threshold: f64,
    min_speech_duration_ms: f64,
    min_silence_duration_ms: f64,
    apply_noise_reduction: bool,
    recording_enabled: bool,
    tts_filler_enabled: Option<bool>,
    first_response_message: Option<String>,
    tools: Option<Vec<ToolConfig>>,
}

impl<'a> CreateAgentBuilder<'a> {
    fn new(agents: &'a Agents, name: String) -> Self {
        Self {
            agents,
            name,
            description: None,
            is_active: true,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            tool_prompt: DEFAULT_TOOL_PROMPT.to_string(),
            voice: None,
            voice_parameters: None,
            transcriber: None,
            initial_prompt: None,
            vad_provider: None,
            vad_threshold: DEFAULT_VAD_THRESHOLD,
            min_speech_duration_ms: DEFAULT_MIN_SPEECH_MS,
            min_silence_duration_ms: DEFAULT_MIN_SILENCE_MS,
            apply_noise_reduction: false,
            recording_enabled: false,
            tts_filler_enabled: None,
            first_response_message: None,
            tools: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub const fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Friendly LLM name, e.g. `"gpt-4.1"` or `"llama-3.3-70b"`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub const fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn tool_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.tool_prompt = prompt.into();
        self
    }

    /// Friendly voice name, e.g. `"thalia"` or `"darla"`.
    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn voice_parameters(mut self, parameters: Value) -> Self {
        self.voice_parameters = Some(parameters);
        self
    }

    /// Friendly transcriber name, e.g. `"deepgram_nova_3"`.
    pub fn transcriber(mut self, transcriber: impl Into<String>) -> Self {
        self.transcriber = Some(transcriber.into());
        self
    }

    pub fn initial_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.initial_prompt = Some(prompt.into());
        self
    }

    pub fn vad_provider(mut self, provider: impl Into<String>) -> Self {
        self.vad_provider = Some(provider.into());
        self
    }

    pub const fn vad_threshold(mut self, threshold: f64) -> Self {
        self.vad_threshold = threshold;
        self
    }

    pub const fn min_speech_duration_ms(mut self, ms: f64) -> Self {
        self.min_speech_duration_ms = ms;
        self
    }

    pub const fn min_silence_duration_ms(mut self, ms: f64) -> Self {
        self.min_silence_duration_ms = ms;
        self
    }

    pub const fn apply_noise_reduction(mut self, enabled: bool) -> Self {
        self.apply_noise_reduction = enabled;
        self
    }

    pub const fn recording_enabled(mut self, enabled: bool) -> Self {
        self.recording_enabled = enabled;
        self
    }

    pub const fn tts_filler_enabled(mut self, enabled: bool) -> Self {
        self.tts_filler_enabled = Some(enabled);
        self
    }

    pub fn first_response_message(mut self, message: impl Into<String>) -> Self {
        self.first_response_message = Some(message.into());
        self
    }

    pub fn tools(mut self, tools: Vec<ToolConfig>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Issue the creation request.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRequest`] before any network call when the
    /// name is empty, otherwise propagates dispatcher errors unchanged.
    pub async fn send(self) -> Result<Value> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRequest("agent name is required".to_string()));
        }

        let model = resolve_model(self.model.as_deref());
        let voice = resolve_voice(self.voice.as_deref());
        let tts = resolve_tts(Some(voice.tts_provider));
        let transcriber = resolve_transcriber(self.transcriber.as_deref());
        let vad = resolve_vad(self.vad_provider.as_deref());

        let description = self
            .description
            .unwrap_or_else(|| format!("Agent using {}", model.name));

        let request = CreateAgentRequest {
            agent: AgentProfile {
                name: self.name,
                description: Some(description),
                is_active: self.is_active,
                apply_noise_reduction: self.apply_noise_reduction,
                recording_enabled: self.recording_enabled,
                tts_filler_enabled: self.tts_filler_enabled,
                first_response_message: self.first_response_message,
            },
            agent_model_config: ModelConfig {
                model_provider_id: model.provider_id.to_string(),
                temperature: Some(self.temperature),
                system_prompt: Some(self.system_prompt),
                max_tokens: Some(self.max_tokens),
                tool_prompt: Some(self.tool_prompt),
            },
            tts_config: TtsConfig {
                tts_provider_id: tts.provider_id.to_string(),
                voice_name: Some(voice.voice_id.to_string()),
                voice_parameters: Some(self.voice_parameters.unwrap_or_else(default_voice_parameters)),
            },
            transcriber_config: TranscriberConfig {
                provider_id: transcriber.provider_id.to_string(),
                model_name: transcriber.model.to_string(),
                language: transcriber.language.to_string(),
                initial_prompt: Some(self.initial_prompt.unwrap_or_default()),
            },
            vad_config: VadConfig {
                vad_provider_id: vad.provider_id.to_string(),
                threshold: Some(self.vad_threshold),
                min_speech_duration_ms: Some(self.min_speech_duration_ms),
                min_silence_duration_ms: Some(self.min_silence_duration_ms),
            },
            inferencing_config: InferencingConfig::default(),
            tools: self.tools,
        };

        let body = serde_json::to_value(&request)?;
        self.agents.rest.request(Method::POST, "/agents", None, Some(&body), None).await
    }
}

/// Builder for `PUT /agents/{id}` with partial-update semantics: the
/// request body carries exactly the config groups that were touched.
#[must_use]
pub struct UpdateAgentBuilder<'a> {
    agents: &'a Agents,
    agent_id: String,
    force_update: bool,
    profile: AgentProfileUpdate,
    model: Option<String>,
    temperature: Option<f64>,
    system_prompt: Option<String>,
    max_tokens: Option<u32>,
    tool_prompt: Option<String>,
    voice: Option<String>,
    voice_parameters: Option<Value>,
    transcriber: Option<String>,
    initial_prompt: Option<String>,
    vad_provider: Option<String>,
    vad_threshold: Option<f64>,
    min_speech_duration_ms: Option<f64>,
    min_silence_duration_ms: Option<f64>,
    tools: Option<Vec<ToolConfig>>,
}

impl<'a> UpdateAgentBuilder<'a> {
    fn new(agents: &'a Agents, agent_id: String) -> Self {
        Self {
            agents,
            agent_id,
            force_update: true,
            profile: AgentProfileUpdate::default(),
            model: None,
            temperature: None,
            system_prompt: None,
            max_tokens: None,
            tool_prompt: None,
            voice: None,
            voice_parameters: None,
            transcriber: None,
            initial_prompt: None,
            vad_provider: None,
            vad_threshold: None,
            min_speech_duration_ms: None,
            min_silence_duration_ms: None,
            tools: None,
        }
    }

    /// Allow updating an agent that is still active. On by default.
    pub const fn force_update(mut self, force: bool) -> Self {
        self.force_update = force;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.profile.description = Some(description.into());
        self
    }

    pub const fn is_active(mut self, is_active: bool) -> Self {
        self.profile.is_active = Some(is_active);
        self
    }

    pub const fn apply_noise_reduction(mut self, enabled: bool) -> Self {
        self.profile.apply_noise_reduction = Some(enabled);
        self
    }

    pub const fn recording_enabled(mut self, enabled: bool) -> Self {
        self.profile.recording_enabled = Some(enabled);
        self
    }

    pub const fn tts_filler_enabled(mut self, enabled: bool) -> Self {
        self.profile.tts_filler_enabled = Some(enabled);
        self
    }

    pub fn first_response_message(mut self, message: impl Into<String>) -> Self {
        self.profile.first_response_message = Some(message.into());
        self
    }

    /// Friendly LLM name; resolved on [`send`](UpdateAgentBuilder::send).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub const fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn tool_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.tool_prompt = Some(prompt.into());
        self
    }

    /// Friendly voice name; resolved on [`send`](UpdateAgentBuilder::send).
    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn voice_parameters(mut self, parameters: Value) -> Self {
        self.voice_parameters = Some(parameters);
        self
    }

    /// Friendly transcriber name; resolved on
    /// [`send`](UpdateAgentBuilder::send).
    pub fn transcriber(mut self, transcriber: impl Into<String>) -> Self {
        self.transcriber = Some(transcriber.into());
        self
    }

    pub fn initial_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.initial_prompt = Some(prompt.into());
        self
    }

    pub fn vad_provider(mut self, provider: impl Into<String>) -> Self {
        self.vad_provider = Some(provider.into());
        self
    }

    pub const fn vad_threshold(mut self, threshold: f64) -> Self {
        self.vad_threshold = Some(threshold);
        self
    }

    pub const fn min_speech_duration_ms(mut self, ms: f64) -> Self {
        self.min_speech_duration_ms = Some(ms);
        self
    }

    pub const fn min_silence_duration_ms(mut self, ms: f64) -> Self {
        self.min_silence_duration_ms = Some(ms);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolConfig>) -> Self {
        self.tools = Some(tools);
        self
    }

    fn build_request(self) -> (String, bool, UpdateAgentRequest, &'a Agents) {
        let mut request = UpdateAgentRequest::default();

        if self.profile != AgentProfileUpdate::default() {
            request.agent = Some(self.profile);
        }

        let model_group = ModelConfigUpdate {
            model_provider_id: self
                .model
                .as_deref()
                .map(|name| resolve_model(Some(name)).provider_id.to_string()),
            temperature: self.temperature,
            system_prompt: self.system_prompt,
            max_tokens: self.max_tokens,
            tool_prompt: self.tool_prompt,
        };
        if model_group != ModelConfigUpdate::default() {
            request.agent_model_config = Some(model_group);
        }

        let tts_group = if let Some(voice) = self.voice.as_deref() {
            let voice = resolve_voice(Some(voice));
            let tts = resolve_tts(Some(voice.tts_provider));
            TtsConfigUpdate {
                tts_provider_id: Some(tts.provider_id.to_string()),
                voice_name: Some(voice.voice_id.to_string()),
                voice_parameters: self.voice_parameters,
            }
        } else {
            TtsConfigUpdate { voice_parameters: self.voice_parameters, ..TtsConfigUpdate::default() }
        };
        if tts_group != TtsConfigUpdate::default() {
            request.tts_config = Some(tts_group);
        }

        let transcriber_group = if let Some(name) = self.transcriber.as_deref() {
            let spec = resolve_transcriber(Some(name));
            TranscriberConfigUpdate {
                provider_id: Some(spec.provider_id.to_string()),
                model_name: Some(spec.model.to_string()),
                language: Some(spec.language.to_string()),
                initial_prompt: self.initial_prompt,
            }
        } else {
            TranscriberConfigUpdate {
                initial_prompt: self.initial_prompt,
                ..TranscriberConfigUpdate::default()
            }
        };
        if transcriber_group != TranscriberConfigUpdate::default() {
            request.transcriber_config = Some(transcriber_group);
        }

        let vad_group = VadConfigUpdate {
            vad_provider_id: self
                .vad_provider
                .as_deref()
                .map(|name| resolve_vad(Some(name)).provider_id.to_string()),
            threshold: self.vad_threshold,
            min_speech_duration_ms: self.min_speech_duration_ms,
            min_silence_duration_ms: self.min_silence_duration_ms,
        };
        if vad_group != VadConfigUpdate::default() {
            request.vad_config = Some(vad_group);
        }

        request.tools = self.tools;

        (self.agent_id, self.force_update, request, self.agents)
    }

    /// Issue the update request.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn send(self) -> Result<Value> {
        let (agent_id, force_update, request, agents) = self.build_request();

        let body = serde_json::to_value(&request)?;
        let query = [("force_update", "true".to_string())];
        let query = force_update.then_some(&query[..]);

        agents
            .rest
            .request(Method::PUT, &format!("/agents/{agent_id}"), query, Some(&body), None)
            .await
    }
}
