//! Static catalog of friendly names for the platform's provider ecosystem.
//!
//! The platform addresses models, voices, transcribers, TTS and VAD
//! providers by opaque canonical identifiers. The catalog maps the
//! human-friendly names used throughout the SDK surface onto those
//! identifiers, together with the default parameters each category needs.
//! All tables are process-wide immutable constants; nothing here performs
//! I/O or mutation.

mod resolve;

pub use resolve::{Category, Resolved, resolve, resolve_model, resolve_tts, resolve_transcriber,
    resolve_vad, resolve_voice};

/// A large-language-model entry: friendly name → model provider id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: &'static str,
    pub provider_id: &'static str,
}

/// A voice entry: friendly name → voice id plus the TTS provider that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoiceSpec {
    pub name: &'static str,
    pub voice_id: &'static str,
    /// Friendly name of the owning provider in [`TTS_PROVIDERS`].
    pub tts_provider: &'static str,
}

/// A speech-to-text entry. The platform wants provider id, model name and
/// language together, so the catalog carries all three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranscriberSpec {
    pub name: &'static str,
    pub provider_id: &'static str,
    pub model: &'static str,
    pub language: &'static str,
}

/// A text-to-speech provider entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtsProviderSpec {
    pub name: &'static str,
    pub provider_id: &'static str,
}

/// A voice-activity-detection provider entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VadProviderSpec {
    pub name: &'static str,
    pub provider_id: &'static str,
}

/// Default entry per category, used whenever resolution falls through.
/// These are part of the public contract, not an implementation accident.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_VOICE: &str = "thalia";
pub const DEFAULT_TRANSCRIBER: &str = "deepgram_nova_3";
pub const DEFAULT_TTS_PROVIDER: &str = "deepgram";
pub const DEFAULT_VAD_PROVIDER: &str = "default";

pub static LLM_MODELS: &[ModelSpec] = &[
    // Azure
    ModelSpec { name: "gpt-oss-120b", provider_id: "19e29673-0885-4a78-9021-372da3647fc2" },
    ModelSpec { name: "gpt-4.1", provider_id: "186b748d-e3a2-49bc-8a4a-53fe66208e4c" },
    ModelSpec { name: "model-router", provider_id: "813c7c9a-fed1-4630-9150-f0ac0c15ef8d" },
    ModelSpec { name: "gpt-4.1-mini", provider_id: "8b1a0f2c-bdc8-4f36-a114-aa2638be43d0" },
    // DeepInfra
    ModelSpec { name: "mistral-small", provider_id: "d66a9798-5aab-41a0-b944-ca33a4046c2e" },
    ModelSpec { name: "llama-3.3-70b", provider_id: "608bc6d2-ea00-4cd8-a511-cc6f2aa3d5c2" },
    ModelSpec { name: "qwen-14b", provider_id: "50ef990e-ca6b-42ca-a5d1-4a48f2e42b8b" },
    ModelSpec { name: "hermes-3-70b", provider_id: "7bc7813e-3c5e-4aa1-adec-2c0694d79269" },
    ModelSpec { name: "glm-4.5", provider_id: "571ec61c-5998-4c50-95fc-f32fe3020434" },
    ModelSpec { name: "deepinfra-gpt-oss-120b", provider_id: "7c4322da-5b40-485a-878f-c7f450233473" },
    ModelSpec { name: "llama-4-scout", provider_id: "449c577d-92f1-493a-a99a-e469029b7117" },
    ModelSpec { name: "kimi-k2", provider_id: "9031cf36-95d2-4946-9da8-cd015a1391d0" },
    // Fireworks
    ModelSpec { name: "fireworks-gpt-oss-120b", provider_id: "be9b6fec-45ba-479c-9c1d-a48b85068c48" },
    ModelSpec { name: "deepseek-v3", provider_id: "02ca1ec7-674f-45d3-9f89-20a1ea571852" },
    // Gemini
    ModelSpec { name: "gemini-2.5-flash-lite", provider_id: "3793b663-01d1-4dc3-a4b3-4fb10b1ccaac" },
    ModelSpec { name: "gemini-2.5-flash", provider_id: "cfee3ffc-b806-4ea0-bd20-6fe6f24ab9d8" },
    ModelSpec { name: "gemini-2.0-flash", provider_id: "89e55bca-3e17-4eae-a9ec-6cbc2a6c275b" },
    // Groq
    ModelSpec { name: "groq-qwen-32b", provider_id: "3988e495-744d-4331-aede-06193c5157e8" },
    ModelSpec { name: "groq-llama-3.3-70b", provider_id: "2daa90f6-c0ac-4a90-abfd-d4b5e0390989" },
    ModelSpec { name: "groq-gpt-oss-20b", provider_id: "d7b3a48c-8bbf-4d13-ab32-067e49d9eda5" },
    ModelSpec { name: "groq-compound", provider_id: "3aee8cef-f02d-4732-9c96-21092b8bc972" },
    ModelSpec { name: "groq-gpt-oss-120b", provider_id: "56e7ece1-91e9-498c-8925-de558e48e524" },
    // OpenAI
    ModelSpec { name: "openai-gpt-4.1-nano", provider_id: "a0570122-69d3-427a-89ae-73839825c123" },
    ModelSpec { name: "openai-gpt-4.1", provider_id: "b3714a39-3689-4b15-b15f-3f51af9dfad4" },
    ModelSpec { name: "openai-gpt-4.1-mini", provider_id: "223f117d-90d3-4598-ae6b-8f1c49ae6266" },
];

pub static VOICES: &[VoiceSpec] = &[
    // Cartesia
    VoiceSpec { name: "darla", voice_id: "996a8b96-4804-46f0-8e05-3fd4ef1a87cd", tts_provider: "cartesia" },
    VoiceSpec { name: "jacqline", voice_id: "9626c31c-bec5-4cca-baa8-f8ba9e84c8bc", tts_provider: "cartesia" },
    VoiceSpec { name: "priya", voice_id: "f6141af3-5f94-418c-80ed-a45d450e7e2e", tts_provider: "cartesia" },
    VoiceSpec { name: "carolina", voice_id: "f9836c6e-a0bd-460e-9d3c-f7299fa60f94", tts_provider: "cartesia" },
    VoiceSpec { name: "blake", voice_id: "a167e0f3-df7e-4d52-a9c3-f949145efdab", tts_provider: "cartesia" },
    VoiceSpec { name: "ronald", voice_id: "5ee9feff-1265-424a-9d7f-8e4d431a12c7", tts_provider: "cartesia" },
    VoiceSpec { name: "jake", voice_id: "729651dc-c6c3-4ee5-97fa-350da1f88600", tts_provider: "cartesia" },
    // Deepgram
    VoiceSpec { name: "thalia", voice_id: "aura-2-thalia-en", tts_provider: "deepgram" },
    VoiceSpec { name: "aries", voice_id: "aura-2-aries-en", tts_provider: "deepgram" },
    VoiceSpec { name: "apollo", voice_id: "aura-2-apollo-en", tts_provider: "deepgram" },
    VoiceSpec { name: "andromeda", voice_id: "aura-2-andromeda-en", tts_provider: "deepgram" },
    VoiceSpec { name: "asteria", voice_id: "aura-2-asteria-en", tts_provider: "deepgram" },
];

pub static TRANSCRIBERS: &[TranscriberSpec] = &[
    TranscriberSpec { name: "cartesia", provider_id: "5add9b5d-cbd0-4e0a-886b-2eecb0bf1b10", model: "ink-whisper", language: "en" },
    TranscriberSpec { name: "deepgram_flux", provider_id: "63f5e32a-c163-4a4f-8000-e8a996abb183", model: "flux-general-en", language: "en" },
    TranscriberSpec { name: "soniox", provider_id: "9f653d3b-2c9d-4c9a-9c58-e1a50b81b7dd", model: "stt-rt-preview-v2", language: "en" },
    TranscriberSpec { name: "faster_whisper", provider_id: "a92491c1-e177-43a1-84dc-08dd3e7309b7", model: "faster_whisper", language: "en" },
    TranscriberSpec { name: "sarvam", provider_id: "b9d43de9-1728-4a43-ac2c-c4f97f0beffe", model: "saarika:v2.5", language: "en-IN" },
    TranscriberSpec { name: "assembly_ai", provider_id: "ce6aeefc-fe9b-4710-b16d-907ffca8e2b9", model: "universal", language: "en" },
    TranscriberSpec { name: "deepgram_nova_3", provider_id: "d8606a97-63c1-416e-83fa-720bb98c69e1", model: "nova-3", language: "en" },
];

pub static TTS_PROVIDERS: &[TtsProviderSpec] = &[
    TtsProviderSpec { name: "eleven_labs", provider_id: "13ad1a5f-f2cf-46fe-be29-3ef0f9a3d211" },
    TtsProviderSpec { name: "cartesia", provider_id: "3889f8c4-039f-4f28-9b3a-67d4be8ada40" },
    TtsProviderSpec { name: "deepgram", provider_id: "75880080-722d-40fb-9e49-b379f68a89b2" },
    TtsProviderSpec { name: "inworld", provider_id: "bd248e98-da0d-4d30-b2df-99021e4821de" },
    TtsProviderSpec { name: "azure", provider_id: "ef36e21c-5cb5-4d2d-a55b-7b5a80ae5f64" },
];

pub static VAD_PROVIDERS: &[VadProviderSpec] = &[
    VadProviderSpec { name: "default", provider_id: "c284bf92-658b-4d1b-a2ff-0cba0892fd29" },
    // Same engine as the platform default.
    VadProviderSpec { name: "silero", provider_id: "c284bf92-658b-4d1b-a2ff-0cba0892fd29" },
];

/// Friendly name for a model provider id, or the id itself when unknown.
#[must_use]
pub fn model_name_for(provider_id: &str) -> &str {
    LLM_MODELS
        .iter()
        .find(|spec| spec.provider_id == provider_id)
        .map_or(provider_id, |spec| spec.name)
}

/// Friendly name for a voice id, or the id itself when unknown.
#[must_use]
pub fn voice_name_for(voice_id: &str) -> &str {
    VOICES
        .iter()
        .find(|spec| spec.voice_id == voice_id)
        .map_or(voice_id, |spec| spec.name)
}

/// Friendly name for a transcriber provider id, or the id itself when unknown.
#[must_use]
pub fn transcriber_name_for(provider_id: &str) -> &str {
    TRANSCRIBERS
        .iter()
        .find(|spec| spec.provider_id == provider_id)
        .map_or(provider_id, |spec| spec.name)
}

/// Friendly name for a TTS provider id, or the id itself when unknown.
#[must_use]
pub fn tts_provider_name_for(provider_id: &str) -> &str {
    TTS_PROVIDERS
        .iter()
        .find(|spec| spec.provider_id == provider_id)
        .map_or(provider_id, |spec| spec.name)
}

/// Friendly name for a VAD provider id, or the id itself when unknown.
#[must_use]
pub fn vad_provider_name_for(provider_id: &str) -> &str {
    VAD_PROVIDERS
        .iter()
        .find(|spec| spec.provider_id == provider_id)
        .map_or(provider_id, |spec| spec.name)
}
