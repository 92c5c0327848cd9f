use serde_json::Value;

/// Longest plain-text body that is still treated as a human-readable message.
const MAX_PLAIN_MESSAGE_LEN: usize = 200;

/// Failure of a single API call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, TLS error, broken body stream.
    #[error("network error: {0}")]
    Transport(String),

    /// Non-2xx response.
    #[error("HTTP {status}{}", status_suffix(.message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose body doesn't match the expected schema.
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The persisted session could not be read or written.
    #[error("session error: {0}")]
    Session(String),
}

impl ApiError {
    /// Builds a status error, extracting the server's message from the body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: extract_server_message(body),
        }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Message provided by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The server-provided message, or `fallback` when there is none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// True for 401/403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Accepts a JSON string, a JSON object with `message` / `error` / `msg`
/// (nested `error.message` too), or a short plain-text body.
fn extract_server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        return match json {
            Value::String(s) => non_empty(&s),
            Value::Object(map) => ["message", "error", "msg"].iter().find_map(|key| {
                match map.get(*key) {
                    Some(Value::String(s)) => non_empty(s),
                    Some(Value::Object(inner)) => inner
                        .get("message")
                        .and_then(Value::as_str)
                        .and_then(non_empty),
                    _ => None,
                }
            }),
            _ => None,
        };
    }

    if trimmed.len() <= MAX_PLAIN_MESSAGE_LEN && !trimmed.starts_with('<') {
        return Some(trimmed.to_string());
    }
    None
}

fn status_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
