//! Total resolution from friendly names to catalog entries.
//!
//! Resolution never fails: an unknown, empty or absent name yields the
//! category's designated default entry. Lookup is ASCII-case-insensitive
//! and ignores surrounding whitespace.

use super::{
    DEFAULT_MODEL, DEFAULT_TRANSCRIBER, DEFAULT_TTS_PROVIDER, DEFAULT_VAD_PROVIDER, DEFAULT_VOICE,
    LLM_MODELS, ModelSpec, TRANSCRIBERS, TTS_PROVIDERS, TranscriberSpec, TtsProviderSpec,
    VAD_PROVIDERS, VOICES, VadProviderSpec, VoiceSpec,
};

/// Catalog category tag for the unified [`resolve`] entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Model,
    Voice,
    Transcriber,
    Tts,
    Vad,
}

/// A resolved catalog entry, tagged by category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved {
    Model(&'static ModelSpec),
    Voice(&'static VoiceSpec),
    Transcriber(&'static TranscriberSpec),
    Tts(&'static TtsProviderSpec),
    Vad(&'static VadProviderSpec),
}

impl Resolved {
    /// The canonical provider identifier. Always present: resolution is
    /// total and every table entry carries one.
    #[must_use]
    pub const fn provider_id(&self) -> &'static str {
        match self {
            Self::Model(spec) => spec.provider_id,
            Self::Voice(spec) => spec.voice_id,
            Self::Transcriber(spec) => spec.provider_id,
            Self::Tts(spec) => spec.provider_id,
            Self::Vad(spec) => spec.provider_id,
        }
    }

    /// The friendly name the entry is listed under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Model(spec) => spec.name,
            Self::Voice(spec) => spec.name,
            Self::Transcriber(spec) => spec.name,
            Self::Tts(spec) => spec.name,
            Self::Vad(spec) => spec.name,
        }
    }
}

/// Resolve a friendly name within a category, falling back to the
/// category default for unknown, empty or absent input.
#[must_use]
pub fn resolve(category: Category, name: Option<&str>) -> Resolved {
    match category {
        Category::Model => Resolved::Model(resolve_model(name)),
        Category::Voice => Resolved::Voice(resolve_voice(name)),
        Category::Transcriber => Resolved::Transcriber(resolve_transcriber(name)),
        Category::Tts => Resolved::Tts(resolve_tts(name)),
        Category::Vad => Resolved::Vad(resolve_vad(name)),
    }
}

#[must_use]
pub fn resolve_model(name: Option<&str>) -> &'static ModelSpec {
    lookup(LLM_MODELS, name, |spec| spec.name, DEFAULT_MODEL)
}

#[must_use]
pub fn resolve_voice(name: Option<&str>) -> &'static VoiceSpec {
    lookup(VOICES, name, |spec| spec.name, DEFAULT_VOICE)
}

#[must_use]
pub fn resolve_transcriber(name: Option<&str>) -> &'static TranscriberSpec {
    lookup(TRANSCRIBERS, name, |spec| spec.name, DEFAULT_TRANSCRIBER)
}

#[must_use]
pub fn resolve_tts(name: Option<&str>) -> &'static TtsProviderSpec {
    lookup(TTS_PROVIDERS, name, |spec| spec.name, DEFAULT_TTS_PROVIDER)
}

#[must_use]
pub fn resolve_vad(name: Option<&str>) -> &'static VadProviderSpec {
    lookup(VAD_PROVIDERS, name, |spec| spec.name, DEFAULT_VAD_PROVIDER)
}

fn lookup<T>(
    table: &'static [T],
    name: Option<&str>,
    key: impl Fn(&T) -> &'static str,
    default_name: &str,
) -> &'static T {
    let wanted = name.map(str::trim).filter(|n| !n.is_empty());
    if let Some(wanted) = wanted {
        if let Some(spec) = table.iter().find(|spec| key(spec).eq_ignore_ascii_case(wanted)) {
            return spec;
        }
        tracing::debug!(name = wanted, "unknown catalog name, using default {default_name}");
    }
    // Tables are static and every default is listed; the first entry is a
    // last-resort guard, not a reachable path.
    table
        .iter()
        .find(|spec| key(spec) == default_name)
        .map_or(&table[0], |spec| spec)
}
