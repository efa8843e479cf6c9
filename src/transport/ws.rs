use crate::error::{Error, Result};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

/// Path of the media-gateway endpoint, relative to the platform base URL.
const GATEWAY_PATH: &str = "/api/call/web-media-stream";

/// WebSocket stream to the media gateway.
#[derive(Debug)]
pub struct WsStream(WebSocketStream<MaybeTlsStream<TcpStream>>);

impl WsStream {
    pub(crate) const fn new(stream: WebSocketStream<MaybeTlsStream<TcpStream>>) -> Self {
        Self(stream)
    }
}

impl futures::Stream for WsStream {
    type Item = std::result::Result<
        tokio_tungstenite::tungstenite::Message,
        tokio_tungstenite::tungstenite::Error,
    >;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        std::pin::Pin::new(&mut self.0).poll_next(cx)
    }
}

impl futures::Sink<tokio_tungstenite::tungstenite::Message> for WsStream {
    type Error = tokio_tungstenite::tungstenite::Error;

    fn poll_ready(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        std::pin::Pin::new(&mut self.0).poll_ready(cx)
    }

    fn start_send(
        mut self: std::pin::Pin<&mut Self>,
        item: tokio_tungstenite::tungstenite::Message,
    ) -> std::result::Result<(), Self::Error> {
        std::pin::Pin::new(&mut self.0).start_send(item)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        std::pin::Pin::new(&mut self.0).poll_flush(cx)
    }

    fn poll_close(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        std::pin::Pin::new(&mut self.0).poll_close(cx)
    }
}

/// Derive the gateway URL from the platform base URL: swap the scheme to
/// ws/wss and append the media-stream path and agent id.
fn gateway_url(base_url: &str, agent_id: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    if url.set_scheme(scheme).is_err() {
        return Err(Error::InvalidRequest(format!(
            "cannot derive a WebSocket URL from {base_url}"
        )));
    }

    let path = format!("{}{GATEWAY_PATH}", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut().append_pair("agent_id", agent_id);

    Ok(url)
}

/// Establish a WebSocket connection to the media gateway.
///
/// The gateway accepts either authentication header; both are sent so the
/// handshake works against every deployment.
///
/// # Errors
/// Returns an error if the URL cannot be derived or the handshake fails.
pub async fn connect(base_url: &str, api_key: &str, agent_id: &str) -> Result<WsStream> {
    let url = gateway_url(base_url, agent_id)?;

    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
    let api_key_value = HeaderValue::from_str(api_key)?;

    let mut request = tokio_tungstenite::tungstenite::client::IntoClientRequest::into_client_request(
        url.as_str(),
    )?;
    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert("x-api-key", api_key_value);

    let (stream, _) = connect_async(request).await?;

    tracing::info!(agent_id, "connected to the voice gateway");

    Ok(WsStream::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_swaps_scheme_and_appends_path() {
        let url = gateway_url("http://localhost:5050", "agent-1").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:5050/api/call/web-media-stream?agent_id=agent-1");

        let url = gateway_url("https://voice.example.com", "agent-1").unwrap();
        assert_eq!(
            url.as_str(),
            "wss://voice.example.com/api/call/web-media-stream?agent_id=agent-1"
        );
    }

    #[test]
    fn gateway_url_keeps_base_path_prefixes() {
        let url = gateway_url("http://localhost:5050/gateway/", "a").unwrap();
        assert_eq!(url.path(), "/gateway/api/call/web-media-stream");
    }

    #[test]
    fn gateway_url_escapes_agent_id() {
        let url = gateway_url("http://localhost:5050", "agent one").unwrap();
        assert_eq!(url.query(), Some("agent_id=agent+one"));
    }
}
