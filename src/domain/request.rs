use crate::domain::entity::{MessageEntity, utf16_len};
use crate::domain::validation::ValidationError;
use crate::domain::value::{ChatId, MessageId, UpdateId};

/// Maximum `sendMessage` text length, in UTF-16 units.
pub const SEND_MESSAGE_MAX_TEXT: usize = 4096;
/// Bounds of the `getUpdates` `limit` parameter.
pub const GET_UPDATES_MIN_LIMIT: u8 = 1;
pub const GET_UPDATES_MAX_LIMIT: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Chat addressed by a request: numeric id, or `@username` of a public channel.
pub enum ChatTarget {
    Id(ChatId),
    Username(String),
}

impl ChatTarget {
    /// Field name used in error messages.
    pub const FIELD: &'static str = "chat_id";

    /// Create a [`ChatTarget::Username`]; the value must start with `@`.
    pub fn username(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        match trimmed.strip_prefix('@') {
            Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => {
                Ok(Self::Username(trimmed.to_owned()))
            }
            _ => Err(ValidationError::InvalidUsername {
                input: trimmed.to_owned(),
            }),
        }
    }
}

impl From<ChatId> for ChatTarget {
    fn from(value: ChatId) -> Self {
        Self::Id(value)
    }
}

impl From<i64> for ChatTarget {
    fn from(value: i64) -> Self {
        Self::Id(ChatId(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// `getMe`: the bot's own identity.
pub struct GetMe;

#[derive(Debug, Clone, PartialEq, Eq)]
/// `getChat`: up-to-date information about a chat.
pub struct GetChat {
    chat_id: ChatTarget,
}

impl GetChat {
    pub fn new(chat_id: impl Into<ChatTarget>) -> Self {
        Self {
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &ChatTarget {
        &self.chat_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Markup used to parse entities out of the message text.
pub enum ParseMode {
    MarkdownV2,
    Html,
    /// Legacy mode, kept for backwards compatibility.
    Markdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Mutually exclusive with `entities` on Telegram's side.
    pub parse_mode: Option<ParseMode>,
    pub entities: Option<Vec<MessageEntity>>,
    pub disable_web_page_preview: bool,
    /// Deliver silently.
    pub disable_notification: bool,
    pub reply_to_message_id: Option<MessageId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `sendMessage`: send a text message.
pub struct SendMessage {
    chat_id: ChatTarget,
    text: String,
    options: SendOptions,
}

impl SendMessage {
    /// Validate the text: non-empty after trimming, at most
    /// [`SEND_MESSAGE_MAX_TEXT`] UTF-16 units. Whitespace is preserved.
    pub fn new(
        chat_id: impl Into<ChatTarget>,
        text: impl Into<String>,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }
        let len = utf16_len(&text);
        if len > SEND_MESSAGE_MAX_TEXT {
            return Err(ValidationError::TextTooLong {
                max: SEND_MESSAGE_MAX_TEXT,
                actual: len,
            });
        }
        Ok(Self {
            chat_id: chat_id.into(),
            text,
            options,
        })
    }

    pub fn chat_id(&self) -> &ChatTarget {
        &self.chat_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `forwardMessage`: forward any kind of message.
pub struct ForwardMessage {
    pub chat_id: ChatTarget,
    pub from_chat_id: ChatTarget,
    pub message_id: MessageId,
    pub disable_notification: bool,
}

impl ForwardMessage {
    pub fn new(
        chat_id: impl Into<ChatTarget>,
        from_chat_id: impl Into<ChatTarget>,
        message_id: MessageId,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            disable_notification: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// `getUpdates`: fetch incoming updates with long polling.
pub struct GetUpdates {
    offset: Option<UpdateId>,
    limit: Option<u8>,
    timeout: Option<u32>,
    allowed_updates: Option<Vec<String>>,
}

impl GetUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// First update to return. Earlier updates are confirmed and forgotten.
    pub fn with_offset(mut self, offset: UpdateId) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Number of updates to return, `1..=100`.
    pub fn with_limit(mut self, limit: u8) -> Result<Self, ValidationError> {
        if !(GET_UPDATES_MIN_LIMIT..=GET_UPDATES_MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::LimitOutOfRange {
                min: GET_UPDATES_MIN_LIMIT,
                max: GET_UPDATES_MAX_LIMIT,
                actual: limit,
            });
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Long polling timeout in seconds. The HTTP timeout must be longer.
    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Update kinds to receive, e.g. `["message", "channel_post"]`.
    pub fn with_allowed_updates(mut self, kinds: Vec<String>) -> Self {
        self.allowed_updates = Some(kinds);
        self
    }

    pub fn offset(&self) -> Option<UpdateId> {
        self.offset
    }

    pub fn limit(&self) -> Option<u8> {
        self.limit
    }

    pub fn timeout(&self) -> Option<u32> {
        self.timeout
    }

    pub fn allowed_updates(&self) -> Option<&[String]> {
        self.allowed_updates.as_deref()
    }
}
