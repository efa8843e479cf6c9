//! Realtime voice sessions against the media gateway.
//!
//! A session is a background pump task owning the WebSocket: caller
//! commands arrive over an mpsc channel, gateway frames are translated
//! into [`VoiceEvent`]s. Audio travels as raw PCM16 binary frames in both
//! directions; capture and playback stay with the caller.

use base64::Engine as _;
use base64::engine::general_purpose;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::future::Future;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;

use crate::protocol::gateway::{GatewayCommand, GatewayMessage};
use crate::transport::ws::{self, WsStream};
use crate::{Error, Result};

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One WebSocket frame exchanged with the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Transport seam for the session pump, mockable in tests.
pub(crate) trait Gateway: Send {
    fn send(&mut self, frame: Frame) -> BoxFuture<'_, Result<()>>;
    fn next_frame(&mut self) -> BoxFuture<'_, Result<Option<Frame>>>;
}

struct WsGateway {
    stream: WsStream,
}

impl Gateway for WsGateway {
    fn send(&mut self, frame: Frame) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let message = match frame {
                Frame::Text(text) => Message::Text(text.into()),
                Frame::Binary(bytes) => Message::Binary(bytes.into()),
            };
            self.stream.send(message).await?;
            Ok(())
        })
    }

    fn next_frame(&mut self) -> BoxFuture<'_, Result<Option<Frame>>> {
        Box::pin(async move {
            while let Some(message) = self.stream.next().await {
                match message? {
                    Message::Text(text) => return Ok(Some(Frame::Text(text.to_string()))),
                    Message::Binary(bytes) => return Ok(Some(Frame::Binary(bytes.to_vec()))),
                    Message::Ping(payload) => self.stream.send(Message::Pong(payload)).await?,
                    Message::Close(_) => {
                        tracing::info!("gateway closed the connection");
                        return Ok(None);
                    }
                    _ => (),
                }
            }
            Ok(None)
        })
    }
}

/// Session event surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// The gateway accepted the connection.
    Connected,
    /// Raw PCM16 agent audio, ready for playback.
    AgentAudio { pcm: Vec<u8> },
    /// The agent's opening message.
    FirstResponse { message: String },
    /// A finished transcript line for either side of the conversation.
    Transcript { role: String, text: String },
    /// The caller spoke over the agent; playback should be flushed.
    Interruption,
    AgentSpeakingStarted,
    AgentSpeakingStopped,
    /// The gateway ended the call; the session is over.
    CallEnded,
    ServerError { message: String },
    /// The pump exited; no further events will arrive.
    Disconnected,
}

/// Snapshot of session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub messages_received: u64,
    pub audio_bytes_sent: u64,
    pub audio_bytes_received: u64,
}

#[derive(Default)]
struct StatsInner {
    messages_received: AtomicU64,
    audio_bytes_sent: AtomicU64,
    audio_bytes_received: AtomicU64,
}

impl StatsInner {
    fn snapshot(&self) -> SessionStats {
        SessionStats {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            audio_bytes_sent: self.audio_bytes_sent.load(Ordering::Relaxed),
            audio_bytes_received: self.audio_bytes_received.load(Ordering::Relaxed),
        }
    }
}

enum Command {
    SendAudio(Vec<u8>),
    Stop,
}

struct ActiveSession {
    cmd_tx: mpsc::Sender<Command>,
    event_rx: mpsc::Receiver<VoiceEvent>,
    stats: Arc<StatsInner>,
    task: tokio::task::JoinHandle<()>,
}

/// Realtime voice client. One session at a time per instance; starting
/// while a session is active is a no-op, as is stopping without one.
pub struct VoiceClient {
    api_key: String,
    base_url: String,
    active: Option<ActiveSession>,
}

impl VoiceClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            active: None,
        }
    }

    /// Whether a session is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|session| !session.task.is_finished())
    }

    /// Start a voice session with an agent. Returns `false` without
    /// side effects when a session is already active.
    ///
    /// `assistant_overrides` is an opaque configuration mapping passed
    /// through to the gateway unmodified.
    ///
    /// # Errors
    /// Returns an error if the WebSocket handshake or the initial
    /// configuration message fails.
    pub async fn start(
        &mut self,
        agent_id: &str,
        assistant_overrides: Option<Value>,
    ) -> Result<bool> {
        if self.is_active() {
            tracing::warn!("voice session already running");
            return Ok(false);
        }
        self.active = None;

        let stream = ws::connect(&self.base_url, &self.api_key, agent_id).await?;
        self.start_with_gateway(Box::new(WsGateway { stream }), assistant_overrides).await?;
        Ok(true)
    }

    pub(crate) async fn start_with_gateway(
        &mut self,
        mut gateway: Box<dyn Gateway>,
        assistant_overrides: Option<Value>,
    ) -> Result<()> {
        if let Some(config) = assistant_overrides {
            let message = serde_json::to_string(&GatewayCommand::Config { config })?;
            gateway.send(Frame::Text(message)).await?;
        }

        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (event_tx, event_rx) = mpsc::channel(128);
        let stats = Arc::new(StatsInner::default());

        let _ = event_tx.send(VoiceEvent::Connected).await;
        let task = tokio::spawn(pump(gateway, cmd_rx, event_tx, Arc::clone(&stats)));

        self.active = Some(ActiveSession { cmd_tx, event_rx, stats, task });
        Ok(())
    }

    /// Stop the active session and wait for the pump to exit. A no-op
    /// when no session is active.
    pub async fn stop(&mut self) {
        let Some(session) = self.active.take() else {
            return;
        };
        let _ = session.cmd_tx.send(Command::Stop).await;
        let _ = session.task.await;
    }

    /// Push raw PCM16 microphone audio into the session.
    ///
    /// # Errors
    /// Returns [`Error::ConnectionClosed`] when no session is active.
    pub async fn send_audio(&self, pcm: &[u8]) -> Result<()> {
        let session = self.active.as_ref().ok_or(Error::ConnectionClosed)?;
        session
            .cmd_tx
            .send(Command::SendAudio(pcm.to_vec()))
            .await
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Await the next session event. `None` once the session has fully
    /// drained after a disconnect, or when no session was started.
    pub async fn next_event(&mut self) -> Option<VoiceEvent> {
        let session = self.active.as_mut()?;
        session.event_rx.recv().await
    }

    /// Counters for the active session, or the last one if it ended.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.active
            .as_ref()
            .map_or_else(SessionStats::default, |session| session.stats.snapshot())
    }
}

async fn pump(
    mut gateway: Box<dyn Gateway>,
    mut cmd_rx: mpsc::Receiver<Command>,
    event_tx: mpsc::Sender<VoiceEvent>,
    stats: Arc<StatsInner>,
) {
    // Tracks the edge between agent audio flowing and silence, so callers
    // get speaking start/stop events rather than watching frames.
    let mut agent_speaking = false;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::SendAudio(pcm)) => {
                    let len = pcm.len() as u64;
                    if let Err(err) = gateway.send(Frame::Binary(pcm)).await {
                        tracing::warn!(error = %err, "failed to send audio");
                        break;
                    }
                    stats.audio_bytes_sent.fetch_add(len, Ordering::Relaxed);
                }
                Some(Command::Stop) | None => break,
            },
            frame = gateway.next_frame() => match frame {
                Ok(Some(frame)) => {
                    stats.messages_received.fetch_add(1, Ordering::Relaxed);
                    let flow = handle_frame(frame, &event_tx, &stats, &mut agent_speaking).await;
                    if flow.is_break() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    let _ = event_tx
                        .send(VoiceEvent::ServerError { message: err.to_string() })
                        .await;
                    break;
                }
            },
        }
    }

    let _ = event_tx.send(VoiceEvent::Disconnected).await;
    tracing::info!("voice session ended");
}

async fn handle_frame(
    frame: Frame,
    event_tx: &mpsc::Sender<VoiceEvent>,
    stats: &StatsInner,
    agent_speaking: &mut bool,
) -> ControlFlow<()> {
    match frame {
        Frame::Binary(pcm) => {
            emit_agent_audio(pcm, event_tx, stats, agent_speaking).await;
            ControlFlow::Continue(())
        }
        Frame::Text(text) => match serde_json::from_str::<GatewayMessage>(&text) {
            Ok(message) => handle_message(message, event_tx, stats, agent_speaking).await,
            Err(_) => {
                handle_raw_text(&text, event_tx, agent_speaking).await;
                ControlFlow::Continue(())
            }
        },
    }
}

async fn handle_message(
    message: GatewayMessage,
    event_tx: &mpsc::Sender<VoiceEvent>,
    stats: &StatsInner,
    agent_speaking: &mut bool,
) -> ControlFlow<()> {
    match message {
        GatewayMessage::Media { media } => {
            match general_purpose::STANDARD.decode(media.payload.as_bytes()) {
                Ok(pcm) => emit_agent_audio(pcm, event_tx, stats, agent_speaking).await,
                Err(err) => tracing::warn!(error = %err, "undecodable media payload"),
            }
        }
        GatewayMessage::FirstResponse { message } => {
            let _ = event_tx.send(VoiceEvent::FirstResponse { message }).await;
        }
        GatewayMessage::Transcript { role, text } => {
            let _ = event_tx.send(VoiceEvent::Transcript { role, text }).await;
        }
        GatewayMessage::Interruption => {
            *agent_speaking = false;
            let _ = event_tx.send(VoiceEvent::Interruption).await;
        }
        GatewayMessage::AgentSpeakingStop => {
            *agent_speaking = false;
            let _ = event_tx.send(VoiceEvent::AgentSpeakingStopped).await;
        }
        GatewayMessage::CallEnd => {
            let _ = event_tx.send(VoiceEvent::CallEnded).await;
            return ControlFlow::Break(());
        }
        GatewayMessage::Error { message } => {
            let _ = event_tx.send(VoiceEvent::ServerError { message }).await;
        }
        GatewayMessage::Unknown => {
            tracing::trace!("unrecognized gateway message");
        }
    }
    ControlFlow::Continue(())
}

/// A bare `stop` text frame is an interruption signal, not a disconnect:
/// playback should stop but the connection stays alive.
async fn handle_raw_text(
    text: &str,
    event_tx: &mpsc::Sender<VoiceEvent>,
    agent_speaking: &mut bool,
) {
    if text.to_ascii_lowercase().contains("stop") {
        *agent_speaking = false;
        let _ = event_tx.send(VoiceEvent::Interruption).await;
    } else {
        tracing::trace!("non-JSON gateway text frame");
    }
}

async fn emit_agent_audio(
    pcm: Vec<u8>,
    event_tx: &mpsc::Sender<VoiceEvent>,
    stats: &StatsInner,
    agent_speaking: &mut bool,
) {
    stats.audio_bytes_received.fetch_add(pcm.len() as u64, Ordering::Relaxed);
    if !*agent_speaking {
        *agent_speaking = true;
        let _ = event_tx.send(VoiceEvent::AgentSpeakingStarted).await;
    }
    let _ = event_tx.send(VoiceEvent::AgentAudio { pcm }).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    struct MockGateway {
        incoming: mpsc::Receiver<Frame>,
        outgoing: mpsc::Sender<Frame>,
    }

    impl Gateway for MockGateway {
        fn send(&mut self, frame: Frame) -> BoxFuture<'_, Result<()>> {
            let outgoing = self.outgoing.clone();
            Box::pin(async move {
                outgoing.send(frame).await.map_err(|_| Error::ConnectionClosed)?;
                Ok(())
            })
        }

        fn next_frame(&mut self) -> BoxFuture<'_, Result<Option<Frame>>> {
            Box::pin(async move { Ok(self.incoming.recv().await) })
        }
    }

    async fn started_client(
        overrides: Option<Value>,
    ) -> (VoiceClient, mpsc::Sender<Frame>, mpsc::Receiver<Frame>) {
        let (in_tx, in_rx) = mpsc::channel(16);
        let (out_tx, out_rx) = mpsc::channel(16);
        let mut client = VoiceClient::new("k", "http://localhost:5050");
        client
            .start_with_gateway(Box::new(MockGateway { incoming: in_rx, outgoing: out_tx }), overrides)
            .await
            .unwrap();
        (client, in_tx, out_rx)
    }

    #[tokio::test]
    async fn connected_is_the_first_event() {
        let (mut client, _in_tx, _out_rx) = started_client(None).await;
        assert_eq!(client.next_event().await, Some(VoiceEvent::Connected));
        assert!(client.is_active());
    }

    #[tokio::test]
    async fn overrides_are_sent_as_a_config_message() {
        let overrides = serde_json::json!({ "first_response_message": "Hello!" });
        let (_client, _in_tx, mut out_rx) = started_client(Some(overrides)).await;

        let Some(Frame::Text(text)) = out_rx.recv().await else {
            panic!("expected a text frame");
        };
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "config");
        assert_eq!(value["config"]["first_response_message"], "Hello!");
    }

    #[tokio::test]
    async fn transcripts_surface_as_events() {
        let (mut client, in_tx, _out_rx) = started_client(None).await;

        in_tx
            .send(Frame::Text(
                r#"{"type":"transcript","role":"user","text":"hi there"}"#.to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(client.next_event().await, Some(VoiceEvent::Connected));
        assert_eq!(
            client.next_event().await,
            Some(VoiceEvent::Transcript { role: "user".to_string(), text: "hi there".to_string() })
        );
    }

    #[tokio::test]
    async fn binary_audio_emits_speaking_edge_then_audio() {
        let (mut client, in_tx, _out_rx) = started_client(None).await;

        in_tx.send(Frame::Binary(vec![1, 2, 3, 4])).await.unwrap();
        in_tx.send(Frame::Binary(vec![5, 6])).await.unwrap();

        assert_eq!(client.next_event().await, Some(VoiceEvent::Connected));
        assert_eq!(client.next_event().await, Some(VoiceEvent::AgentSpeakingStarted));
        assert_eq!(client.next_event().await, Some(VoiceEvent::AgentAudio { pcm: vec![1, 2, 3, 4] }));
        // No second speaking edge while audio keeps flowing.
        assert_eq!(client.next_event().await, Some(VoiceEvent::AgentAudio { pcm: vec![5, 6] }));

        let stats = client.stats();
        assert_eq!(stats.audio_bytes_received, 6);
        assert_eq!(stats.messages_received, 2);
    }

    #[tokio::test]
    async fn media_messages_decode_base64_audio() {
        let (mut client, in_tx, _out_rx) = started_client(None).await;

        let payload = general_purpose::STANDARD.encode([9u8, 8, 7]);
        in_tx
            .send(Frame::Text(format!(r#"{{"type":"media","media":{{"payload":"{payload}"}}}}"#)))
            .await
            .unwrap();

        assert_eq!(client.next_event().await, Some(VoiceEvent::Connected));
        assert_eq!(client.next_event().await, Some(VoiceEvent::AgentSpeakingStarted));
        assert_eq!(client.next_event().await, Some(VoiceEvent::AgentAudio { pcm: vec![9, 8, 7] }));
    }

    #[tokio::test]
    async fn bare_stop_text_is_an_interruption_not_a_disconnect() {
        let (mut client, in_tx, _out_rx) = started_client(None).await;

        in_tx.send(Frame::Text("stop".to_string())).await.unwrap();
        in_tx
            .send(Frame::Text(r#"{"type":"transcript","role":"agent","text":"still here"}"#.to_string()))
            .await
            .unwrap();

        assert_eq!(client.next_event().await, Some(VoiceEvent::Connected));
        assert_eq!(client.next_event().await, Some(VoiceEvent::Interruption));
        assert_eq!(
            client.next_event().await,
            Some(VoiceEvent::Transcript { role: "agent".to_string(), text: "still here".to_string() })
        );
    }

    #[tokio::test]
    async fn call_end_finishes_the_session() {
        let (mut client, in_tx, _out_rx) = started_client(None).await;

        in_tx.send(Frame::Text(r#"{"type":"call_end"}"#.to_string())).await.unwrap();

        assert_eq!(client.next_event().await, Some(VoiceEvent::Connected));
        assert_eq!(client.next_event().await, Some(VoiceEvent::CallEnded));
        assert_eq!(client.next_event().await, Some(VoiceEvent::Disconnected));
        assert_eq!(client.next_event().await, None);
    }

    #[tokio::test]
    async fn send_audio_forwards_binary_frames() {
        let (client, _in_tx, mut out_rx) = started_client(None).await;

        client.send_audio(&[1, 2, 3]).await.unwrap();

        assert_eq!(out_rx.recv().await, Some(Frame::Binary(vec![1, 2, 3])));
    }

    #[tokio::test]
    async fn send_audio_without_session_is_rejected() {
        let client = VoiceClient::new("k", "http://localhost:5050");
        assert!(matches!(client.send_audio(&[1]).await, Err(Error::ConnectionClosed)));
    }

    #[tokio::test]
    async fn second_start_is_a_no_op_while_active() {
        let (mut client, _in_tx, _out_rx) = started_client(None).await;

        // A second start must not touch the network; an unroutable base
        // URL would fail loudly if it tried.
        let started = client.start("agent-1", None).await.unwrap();
        assert!(!started);
        assert!(client.is_active());
    }

    #[tokio::test]
    async fn stop_without_session_is_a_no_op() {
        let mut client = VoiceClient::new("k", "http://localhost:5050");
        client.stop().await;
        assert!(!client.is_active());
    }

    #[tokio::test]
    async fn stop_ends_the_pump() {
        let (mut client, _in_tx, _out_rx) = started_client(None).await;
        client.stop().await;
        assert!(!client.is_active());
        assert!(matches!(client.send_audio(&[1]).await, Err(Error::ConnectionClosed)));
    }
}
