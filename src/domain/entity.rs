use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::domain::validation::ValidationError;

/// The length of a string as Telegram measures it: UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count as two.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// A special span in message text: hashtag, link, formatting, etc.
///
/// `offset` and `length` are UTF-16 code units, describing the half-open range
/// `[offset, offset + length)` of the owning message's text or caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMessageEntity", into = "WireMessageEntity")]
pub struct MessageEntity {
    pub kind: EntityKind,
    pub offset: u32,
    pub length: u32,
}

/// Kind of a [`MessageEntity`], keyed by the wire `type` field.
///
/// Kinds carrying extra data hold it in the variant, so a `text_link` without a URL
/// can't be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// `@username`
    Mention,
    Hashtag,
    /// `$USD`
    Cashtag,
    /// `/start@jobs_bot`
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Monowidth string.
    Code,
    /// Monowidth block.
    Pre { language: Option<String> },
    /// Clickable text URL.
    TextLink { url: String },
    /// Mention of a user without a username.
    TextMention { user: User },
    /// A kind this crate does not model, such as `spoiler`.
    ///
    /// The wire name is kept so the entity encodes back unchanged. Any extra
    /// fields of such a kind are dropped.
    Other { kind: String },
}

impl EntityKind {
    /// The wire `type` of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mention => "mention",
            Self::Hashtag => "hashtag",
            Self::Cashtag => "cashtag",
            Self::BotCommand => "bot_command",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::Pre { .. } => "pre",
            Self::TextLink { .. } => "text_link",
            Self::TextMention { .. } => "text_mention",
            Self::Other { kind } => kind,
        }
    }
}

/// Flat wire shape. Decoding goes through plain fields (no `flatten`) so errors
/// inside `user` keep their full path.
#[derive(Clone, Serialize, Deserialize)]
struct WireMessageEntity {
    #[serde(rename = "type")]
    kind: String,
    offset: u32,
    length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl TryFrom<WireMessageEntity> for MessageEntity {
    type Error = ValidationError;

    fn try_from(wire: WireMessageEntity) -> Result<Self, Self::Error> {
        let WireMessageEntity {
            kind: name,
            offset,
            length,
            url,
            user,
            language,
        } = wire;

        let kind = match name.as_str() {
            "mention" => EntityKind::Mention,
            "hashtag" => EntityKind::Hashtag,
            "cashtag" => EntityKind::Cashtag,
            "bot_command" => EntityKind::BotCommand,
            "url" => EntityKind::Url,
            "email" => EntityKind::Email,
            "phone_number" => EntityKind::PhoneNumber,
            "bold" => EntityKind::Bold,
            "italic" => EntityKind::Italic,
            "underline" => EntityKind::Underline,
            "strikethrough" => EntityKind::Strikethrough,
            "code" => EntityKind::Code,
            "pre" => EntityKind::Pre { language },
            "text_link" => EntityKind::TextLink {
                url: url.ok_or(ValidationError::MissingEntityField {
                    kind: "text_link",
                    field: "url",
                })?,
            },
            "text_mention" => EntityKind::TextMention {
                user: user.ok_or(ValidationError::MissingEntityField {
                    kind: "text_mention",
                    field: "user",
                })?,
            },
            _ => EntityKind::Other { kind: name },
        };
        Ok(Self::new(kind, offset, length))
    }
}

impl From<MessageEntity> for WireMessageEntity {
    fn from(entity: MessageEntity) -> Self {
        let mut wire = Self {
            kind: entity.kind.as_str().to_owned(),
            offset: entity.offset,
            length: entity.length,
            url: None,
            user: None,
            language: None,
        };
        match entity.kind {
            EntityKind::Pre { language } => wire.language = language,
            EntityKind::TextLink { url } => wire.url = Some(url),
            EntityKind::TextMention { user } => wire.user = Some(user),
            _ => {}
        }
        wire
    }
}

impl MessageEntity {
    pub fn new(kind: EntityKind, offset: u32, length: u32) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// Build an entity covering `bytes` (a byte range of `text`), converting the
    /// bounds to UTF-16 units.
    pub fn spanning(
        text: &str,
        bytes: Range<usize>,
        kind: EntityKind,
    ) -> Result<Self, ValidationError> {
        let (Some(before), Some(inside)) = (text.get(..bytes.start), text.get(bytes.clone()))
        else {
            return Err(ValidationError::SpanOutOfBounds {
                end: bytes.end,
                len: text.len(),
            });
        };
        let offset = to_u32(utf16_len(before))?;
        let length = to_u32(utf16_len(inside))?;
        Ok(Self::new(kind, offset, length))
    }

    /// One past the last UTF-16 unit covered.
    pub fn end(&self) -> usize {
        self.offset as usize + self.length as usize
    }

    /// The part of `text` this entity covers.
    pub fn extract(&self, text: &str) -> Result<String, ValidationError> {
        let units = text.encode_utf16().collect::<Vec<_>>();
        let start = self.offset as usize;
        let end = self.end();
        if end > units.len() {
            return Err(ValidationError::SpanOutOfBounds {
                end,
                len: units.len(),
            });
        }
        for at in [start, end] {
            if units.get(at).is_some_and(|unit| is_low_surrogate(*unit)) {
                return Err(ValidationError::SplitsSurrogatePair { at });
            }
        }

        char::decode_utf16(units[start..end].iter().copied())
            .collect::<Result<String, _>>()
            .map_err(|_| ValidationError::SplitsSurrogatePair { at: start })
    }

    /// Returns the URL of a `text_link` entity.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::TextLink { url } => Some(url),
            _ => None,
        }
    }

    /// Returns the mentioned user of a `text_mention` entity.
    pub fn user(&self) -> Option<&User> {
        match &self.kind {
            EntityKind::TextMention { user } => Some(user),
            _ => None,
        }
    }
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

fn to_u32(units: usize) -> Result<u32, ValidationError> {
    u32::try_from(units).map_err(|_| ValidationError::TextTooLong {
        max: u32::MAX as usize,
        actual: units,
    })
}
