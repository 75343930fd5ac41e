//! Typed errors for language-model provider calls.

use thiserror::Error;

/// Category of an LLM call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Connection failure, timeout, or other transport problem.
    Network,
    /// Provider returned 429.
    RateLimited,
    /// Provider returned a 5xx status.
    ServerError,
    /// Provider returned a 4xx status other than 429.
    ClientError,
    /// Provider returned a body we could not make sense of.
    Parse,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LlmErrorKind::Network => "network error",
            LlmErrorKind::RateLimited => "rate limited",
            LlmErrorKind::ServerError => "server error",
            LlmErrorKind::ClientError => "client error",
            LlmErrorKind::Parse => "parse error",
        };
        f.write_str(name)
    }
}

/// An error from a language-model provider call.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status code, when the provider answered at all.
    pub status: Option<u16>,
}

impl LlmError {
    /// Transport-level failure; no HTTP status available.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Network,
            message: message.into(),
            status: None,
        }
    }

    /// Provider returned 429.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::RateLimited,
            message: message.into(),
            status: Some(429),
        }
    }

    /// Provider returned a 5xx status.
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::ServerError,
            message: message.into(),
            status: Some(status),
        }
    }

    /// Provider returned a 4xx status other than 429.
    pub fn client_error(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::ClientError,
            message: message.into(),
            status: Some(status),
        }
    }

    /// Provider answered 2xx but the body was not usable.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Parse,
            message: message.into(),
            status: None,
        }
    }
}

/// Classify an HTTP status code into an error kind.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        400..=499 => LlmErrorKind::ClientError,
        _ => LlmErrorKind::ServerError,
    }
}
