#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Rust SDK for the `VoxHub` Voice Agent Platform.
//!
//! The [`Client`] wraps the platform's HTTP API: agent CRUD, outbound
//! calls and realtime voice sessions over the media gateway. Friendly
//! model/voice/transcriber names are resolved against the [`catalog`]
//! before anything reaches the wire, and every platform failure surfaces
//! as a typed [`Error::Api`] carrying the status code and error body.

pub mod catalog;
pub mod error;
pub mod protocol;
pub mod sdk;
pub mod transport;

pub use error::{ApiErrorKind, ApiFailure, Error, Result};
pub use protocol::gateway::{GatewayCommand, GatewayMessage, MediaPayload};
pub use protocol::models::{
    AgentProfile, AgentProfileUpdate, CreateAgentRequest, InferencingConfig, ModelConfig,
    ModelConfigUpdate, ToolConfig, TranscriberConfig, TranscriberConfigUpdate, TtsConfig,
    TtsConfigUpdate, UpdateAgentRequest, VadConfig, VadConfigUpdate,
};
pub use sdk::{
    Agents, Calls, CreateAgentBuilder, SessionStats, UpdateAgentBuilder, VoiceClient, VoiceEvent,
};

use transport::RestClient;

/// Default platform endpoint: the local development gateway. Production
/// deployments pass their own URL via [`Client::with_base_url`].
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// The main client. Credentials are fixed at construction; the instance
/// is safe for sequential reuse and adds no locking of its own.
#[must_use]
pub struct Client {
    api_key: String,
    base_url: String,
    agents: Agents,
    calls: Calls,
}

impl Client {
    /// Create a client against [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    /// Returns an error if the API key produces an invalid header or the
    /// HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a specific deployment.
    ///
    /// # Errors
    /// Returns an error if the API key produces an invalid header or the
    /// HTTP client cannot be built.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let base_url = base_url.into();
        let rest = RestClient::new(&api_key, &base_url)?;

        Ok(Self {
            agents: Agents::new(rest.clone()),
            calls: Calls::new(rest),
            api_key,
            base_url,
        })
    }

    /// Agent CRUD.
    #[must_use]
    pub const fn agents(&self) -> &Agents {
        &self.agents
    }

    /// Outbound telephony.
    #[must_use]
    pub const fn calls(&self) -> &Calls {
        &self.calls
    }

    /// A realtime voice client sharing this client's credentials. Each
    /// call returns an independent instance with its own session state.
    #[must_use]
    pub fn voice_client(&self) -> VoiceClient {
        VoiceClient::new(self.api_key.clone(), self.base_url.clone())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
