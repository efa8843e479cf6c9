//! High-level SDK facade over the platform API.
//!
//! The facades assemble request payloads (resolving friendly names
//! through the catalog) and delegate to the REST dispatcher, returning
//! the parsed response envelope unchanged. The voice client manages a
//! realtime media-gateway session.

mod agents;
mod calls;
mod voice;

pub use agents::{Agents, CreateAgentBuilder, UpdateAgentBuilder};
pub use calls::Calls;
pub use voice::{SessionStats, VoiceClient, VoiceEvent};
