use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Telegram user or bot identifier.
///
/// Values may exceed 32 bits but stay below 52 bits, so `i64` holds them exactly.
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Telegram chat identifier.
///
/// Supergroup and channel ids are large negative numbers (`-100…`). The full `i64`
/// range is preserved without going through a floating point representation.
pub struct ChatId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Message identifier, unique only inside its chat.
pub struct MessageId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Sequential identifier of an incoming update.
pub struct UpdateId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Unix timestamp in seconds.
pub struct UnixTime(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// File identifier usable to download or re-send a file.
///
/// Only valid for the bot that received it.
pub struct FileId(pub String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier that is stable over time and across bots.
///
/// It can't be used to download or reuse the file; compare files with it instead.
pub struct FileUniqueId(pub String);

impl FileUniqueId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bot API token issued by @BotFather.
///
/// Invariant: `<bot id>:<secret>` where the bot id is decimal digits, the secret is
/// non-empty, and neither part contains whitespace. `Debug` never prints the secret.
pub struct BotToken(String);

impl BotToken {
    /// Name used in error messages.
    pub const FIELD: &'static str = "token";

    /// Create a validated [`BotToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let (id, secret) = trimmed
            .split_once(':')
            .ok_or(ValidationError::MalformedToken)?;
        if id.is_empty()
            || !id.bytes().all(|b| b.is_ascii_digit())
            || secret.is_empty()
            || secret.chars().any(char::is_whitespace)
        {
            return Err(ValidationError::MalformedToken);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the full token, secret included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric bot id embedded in the token.
    pub fn bot_id(&self) -> &str {
        self.0.split_once(':').map_or("", |(id, _)| id)
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BotToken({}:***)", self.bot_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Type of a chat (`type` on the wire).
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Bot API `error_code`.
///
/// The value is preserved as-is even when unknown to this crate.
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Construct an error code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as returned by Telegram.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(self.0)
    }

    /// Returns `true` if the call may succeed when repeated later.
    pub fn is_retryable(self) -> bool {
        match self.known() {
            Some(kind) => kind.is_retryable(),
            None => (500..=599).contains(&self.0),
        }
    }

    /// Returns `true` if Telegram rejected the bot token.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_auth_error())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Error codes the Bot API is documented to return.
pub enum KnownErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    TooManyRequests,
    InternalServerError,
    BadGateway,
}

impl KnownErrorCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::TooManyRequests,
            500 => Self::InternalServerError,
            502 => Self::BadGateway,
            _ => return None,
        })
    }

    /// Flood control and server-side hiccups.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::TooManyRequests | Self::InternalServerError | Self::BadGateway
        )
    }

    /// `403 Forbidden` means the bot was blocked or kicked, not that the token is bad.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Extra information attached to some failed requests.
pub struct ResponseParameters {
    /// The group has been migrated to a supergroup with this id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<ChatId>,
    /// Seconds to wait before the request can be repeated (flood control).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u32>,
}
