use serde::{Deserialize, Serialize};

use crate::domain::message::Message;
use crate::domain::user::is_false;
use crate::domain::value::{ChatId, ChatKind, FileId, FileUniqueId};

/// A chat: private conversation, group, supergroup or channel.
///
/// Fields documented as "`getChat` only" are absent in chats embedded in messages.
/// The model does not tell "not requested" apart from "not set"; both are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    /// Supergroups, channels and group chats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Private chats, supergroups and channels, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// `getChat` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ChatPhoto>,
    /// `getChat` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `getChat` only. Each administrator has their own link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    /// `getChat` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    /// Default member permissions for groups and supergroups. `getChat` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<ChatPermissions>,
    /// Supergroups: minimum delay in seconds between messages of unprivileged users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_mode_delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_set_sticker_set: Option<bool>,
}

impl Chat {
    /// Minimal chat with only the always-present fields set.
    pub fn new(id: ChatId, kind: ChatKind) -> Self {
        Self {
            id,
            kind,
            title: None,
            username: None,
            first_name: None,
            last_name: None,
            photo: None,
            description: None,
            invite_link: None,
            pinned_message: None,
            permissions: None,
            slow_mode_delay: None,
            sticker_set_name: None,
            can_set_sticker_set: None,
        }
    }

    /// Depth of the deepest message chain hanging off this chat.
    pub fn nesting_depth(&self) -> usize {
        self.pinned_message
            .as_deref()
            .map_or(0, Message::nesting_depth)
    }
}

/// One resolution of a chat photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatPhotoSize {
    /// Download handle, valid while the photo is unchanged.
    pub file_id: FileId,
    pub file_unique_id: FileUniqueId,
}

/// Chat photo in small (160x160) and big (640x640) resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireChatPhoto", into = "WireChatPhoto")]
pub struct ChatPhoto {
    pub small: ChatPhotoSize,
    pub big: ChatPhotoSize,
}

#[derive(Clone, Serialize, Deserialize)]
struct WireChatPhoto {
    small_file_id: FileId,
    small_file_unique_id: FileUniqueId,
    big_file_id: FileId,
    big_file_unique_id: FileUniqueId,
}

impl From<WireChatPhoto> for ChatPhoto {
    fn from(value: WireChatPhoto) -> Self {
        Self {
            small: ChatPhotoSize {
                file_id: value.small_file_id,
                file_unique_id: value.small_file_unique_id,
            },
            big: ChatPhotoSize {
                file_id: value.big_file_id,
                file_unique_id: value.big_file_unique_id,
            },
        }
    }
}

impl From<ChatPhoto> for WireChatPhoto {
    fn from(value: ChatPhoto) -> Self {
        Self {
            small_file_id: value.small.file_id,
            small_file_unique_id: value.small.file_unique_id,
            big_file_id: value.big.file_id,
            big_file_unique_id: value.big.file_unique_id,
        }
    }
}

/// Actions a non-administrator is allowed to take in a chat.
///
/// Telegram documents implications between flags (media implies text, other
/// messages and web page previews imply media, polls imply text). They are not
/// enforced here: every flag is stored as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChatPermissions {
    /// Text messages, contacts, locations and venues.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_send_messages: bool,
    /// Audios, documents, photos, videos, video notes and voice notes.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_send_media_messages: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_send_polls: bool,
    /// Animations, games, stickers and inline bots.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_send_other_messages: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_add_web_page_previews: bool,
    /// Ignored in public supergroups.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_change_info: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_invite_users: bool,
    /// Ignored in public supergroups.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_pin_messages: bool,
}

impl ChatPermissions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            can_send_messages: true,
            can_send_media_messages: true,
            can_send_polls: true,
            can_send_other_messages: true,
            can_add_web_page_previews: true,
            can_change_info: true,
            can_invite_users: true,
            can_pin_messages: true,
        }
    }
}
