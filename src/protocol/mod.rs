//! Wire types for the platform API: REST payloads and the media-gateway
//! WebSocket messages.

pub mod gateway;
pub mod models;
