use std::error::Error as StdError;
use std::time::Duration;

use crate::domain::{ErrorCode, ResponseParameters, ValidationError};
use crate::transport::{DecodeError, Failure};

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`crate::Bot`].
///
/// Kinds are kept apart so callers can decide on retries:
/// - [`BotError::Transport`], [`BotError::Timeout`]: retry with backoff,
/// - [`BotError::Auth`]: the token is bad, don't retry,
/// - [`BotError::Api`]: depends on the code, see [`ErrorCode::is_retryable`],
/// - [`BotError::Decode`]: contract mismatch, never retry.
///
/// The client never retries on its own.
pub enum BotError {
    /// HTTP client / transport failure (DNS, TLS, connection reset, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status without a Bot API envelope in the body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Telegram rejected the bot token.
    #[error("authentication failed ({}): {description}", .code.as_i32())]
    Auth {
        code: ErrorCode,
        description: String,
    },

    /// Telegram returned `ok: false` for any other reason.
    #[error("API error ({}): {description}", .code.as_i32())]
    Api {
        code: ErrorCode,
        description: String,
        parameters: Option<ResponseParameters>,
    },

    /// Response body could not be decoded into the expected type.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Request parameters could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The call's cancellation token fired before a response arrived.
    #[error("call cancelled")]
    Cancelled,

    /// The call's timeout elapsed before a response arrived.
    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl BotError {
    pub(crate) fn from_failure(failure: Failure) -> Self {
        if failure.code.is_auth_error() {
            Self::Auth {
                code: failure.code,
                description: failure.description,
            }
        } else {
            Self::Api {
                code: failure.code,
                description: failure.description,
                parameters: failure.parameters,
            }
        }
    }

    /// Whether repeating the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::Api { code, .. } => code.is_retryable(),
            Self::Auth { .. }
            | Self::Decode(_)
            | Self::Encode(_)
            | Self::Cancelled
            | Self::Validation(_) => false,
        }
    }

    /// Delay requested by Telegram's flood control, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api {
                parameters: Some(parameters),
                ..
            } => parameters
                .retry_after
                .map(|secs| Duration::from_secs(u64::from(secs))),
            _ => None,
        }
    }

    /// The Bot API `error_code`, for [`BotError::Auth`] and [`BotError::Api`].
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Auth { code, .. } | Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
