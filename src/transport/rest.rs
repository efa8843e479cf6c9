use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::error::{ApiErrorKind, ApiFailure, Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const SDK_USER_AGENT: &str = concat!("voxhub-rs/", env!("CARGO_PKG_VERSION"));

/// Header used for opaque (non-JWT) API keys.
const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Single-shot request dispatcher for the platform's REST API.
///
/// Builds the absolute URL, attaches authentication, issues the call with
/// a bounded timeout and classifies the response. It never retries;
/// retry policy belongs to the caller.
#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
    auth_name: HeaderName,
    auth_value: HeaderValue,
}

impl RestClient {
    /// Create a dispatcher with the default timeouts.
    ///
    /// # Errors
    /// Returns an error if the API key produces an invalid header or the
    /// HTTP client cannot be built.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        Self::new_with_timeouts(api_key, base_url, DEFAULT_TIMEOUT, DEFAULT_POOL_IDLE_TIMEOUT)
    }

    /// Create a dispatcher with explicit timeouts.
    ///
    /// # Errors
    /// Returns an error if the API key produces an invalid header or the
    /// HTTP client cannot be built.
    pub fn new_with_timeouts(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
        pool_idle_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(pool_idle_timeout)
            .build()
            .map_err(Error::Http)?;

        // JWT-shaped keys authenticate as a bearer token, opaque keys via
        // the platform's key header.
        let (auth_name, mut auth_value) = if looks_like_jwt(api_key) {
            (AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {api_key}"))?)
        } else {
            (API_KEY_HEADER, HeaderValue::from_str(api_key)?)
        };
        auth_value.set_sensitive(true);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_name,
            auth_value,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one HTTP request and interpret the response.
    ///
    /// A 2xx response returns the parsed JSON body, or `{"raw": <text>}`
    /// when the body is not JSON. Anything else becomes
    /// [`Error::Api`] with the status mapped to an [`ApiErrorKind`] and
    /// the error body attached for caller inspection.
    ///
    /// # Errors
    /// Returns [`Error::Api`] for non-2xx statuses, connection failures
    /// and timeouts.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(%method, %url, "dispatching request");

        let mut builder = self
            .client
            .request(method, &url)
            .header(USER_AGENT, SDK_USER_AGENT);

        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(extra) = headers {
            for (name, value) in &extra {
                // Caller-supplied headers never override authentication.
                if *name == AUTHORIZATION || *name == API_KEY_HEADER {
                    continue;
                }
                builder = builder.header(name, value);
            }
        }
        builder = builder.header(self.auth_name.clone(), self.auth_value.clone());

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return Err(Error::Api(classify_transport_error(&err))),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(Error::Api(classify_transport_error(&err))),
        };

        if status.is_success() {
            return Ok(parse_success_body(&text));
        }

        tracing::debug!(status = status.as_u16(), "request failed");
        Err(Error::Api(classify_status(status, &text)))
    }
}

/// Whether a key looks like a JWT: three non-empty dot-separated segments.
fn looks_like_jwt(token: &str) -> bool {
    let mut segments = token.trim().split('.');
    matches!(
        (segments.next(), segments.next(), segments.next(), segments.next()),
        (Some(a), Some(b), Some(c), None) if !a.is_empty() && !b.is_empty() && !c.is_empty()
    )
}

/// A successful body is returned as parsed JSON; non-JSON success bodies
/// are wrapped rather than rejected.
fn parse_success_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

fn classify_transport_error(err: &reqwest::Error) -> ApiFailure {
    let kind = if err.is_timeout() { ApiErrorKind::Timeout } else { ApiErrorKind::Connection };
    ApiFailure {
        kind,
        message: format!("Error communicating with VoxHub: {err}"),
        status_code: None,
        body: None,
    }
}

fn classify_status(status: StatusCode, text: &str) -> ApiFailure {
    let parsed: Option<Value> = serde_json::from_str(text).ok();

    let message = parsed
        .as_ref()
        .and_then(|body| body.get("error").or_else(|| body.get("detail")))
        .and_then(Value::as_str)
        .map_or_else(|| text.to_string(), str::to_string);

    let kind = match status.as_u16() {
        401 => ApiErrorKind::Authentication,
        403 => ApiErrorKind::Permission,
        404 => ApiErrorKind::NotFound,
        429 => ApiErrorKind::RateLimit,
        500..=599 => ApiErrorKind::Server,
        _ => ApiErrorKind::Other,
    };

    ApiFailure {
        kind,
        message,
        status_code: Some(status.as_u16()),
        body: Some(parsed.unwrap_or_else(|| Value::String(text.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_shape_detection() {
        assert!(looks_like_jwt("aaa.bbb.ccc"));
        assert!(looks_like_jwt("  aaa.bbb.ccc  "));
        assert!(!looks_like_jwt("1317d2fdec128bfd086fbcc2f10de57d"));
        assert!(!looks_like_jwt("a.b"));
        assert!(!looks_like_jwt("a.b.c.d"));
        assert!(!looks_like_jwt(".."));
        assert!(!looks_like_jwt(""));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = RestClient::new("k", "http://localhost:5050/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5050");

        let client = RestClient::new("k", "http://localhost:5050").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5050");
    }

    #[test]
    fn opaque_key_uses_api_key_header() {
        let client = RestClient::new("plain-key", "http://localhost:5050").unwrap();
        assert_eq!(client.auth_name, API_KEY_HEADER);
    }

    #[test]
    fn jwt_key_uses_bearer_header() {
        let client = RestClient::new("h.p.s", "http://localhost:5050").unwrap();
        assert_eq!(client.auth_name, AUTHORIZATION);
    }

    #[test]
    fn non_json_success_body_is_wrapped() {
        assert_eq!(parse_success_body("OK"), serde_json::json!({ "raw": "OK" }));
        assert_eq!(parse_success_body(""), serde_json::json!({ "raw": "" }));
        assert_eq!(parse_success_body(r#"{"ok":true}"#), serde_json::json!({ "ok": true }));
    }

    #[test]
    fn status_classification_covers_the_taxonomy() {
        let cases = [
            (StatusCode::UNAUTHORIZED, ApiErrorKind::Authentication),
            (StatusCode::FORBIDDEN, ApiErrorKind::Permission),
            (StatusCode::NOT_FOUND, ApiErrorKind::NotFound),
            (StatusCode::TOO_MANY_REQUESTS, ApiErrorKind::RateLimit),
            (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorKind::Server),
            (StatusCode::BAD_GATEWAY, ApiErrorKind::Server),
            (StatusCode::IM_A_TEAPOT, ApiErrorKind::Other),
        ];
        for (status, kind) in cases {
            let failure = classify_status(status, "{}");
            assert_eq!(failure.kind, kind);
            assert_eq!(failure.status_code, Some(status.as_u16()));
        }
    }

    #[test]
    fn error_message_prefers_error_then_detail() {
        let failure = classify_status(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#);
        assert_eq!(failure.message, "not found");

        let failure = classify_status(StatusCode::NOT_FOUND, r#"{"detail":"missing agent"}"#);
        assert_eq!(failure.message, "missing agent");

        let failure = classify_status(StatusCode::NOT_FOUND, "plain text body");
        assert_eq!(failure.message, "plain text body");
        assert_eq!(failure.body, Some(Value::String("plain text body".to_string())));
    }

    #[test]
    fn error_body_keeps_parsed_json() {
        let failure = classify_status(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#);
        assert_eq!(failure.body, Some(serde_json::json!({ "error": "not found" })));
    }
}
