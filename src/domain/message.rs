use serde::{Deserialize, Serialize};

use crate::domain::chat::Chat;
use crate::domain::entity::MessageEntity;
use crate::domain::user::User;
use crate::domain::value::{MessageId, UnixTime};

/// A message in a chat.
///
/// Only `message_id` and `date` are required. Nested messages are owned and may
/// nest to any depth the response contains; the client bounds that depth when
/// decoding (see [`crate::BotBuilder::max_nesting_depth`]).
///
/// `entities` and `caption_entities` keep "absent" (`None`) apart from "present but
/// empty" (`Some(vec![])`) so a decoded message re-encodes to the same JSON. A
/// message normally carries either text or a caption, never both, but this is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    /// Sender; absent for messages sent to channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub date: UnixTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<Chat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from: Option<User>,
    /// Channel the message was forwarded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from_chat: Option<Chat>,
    /// Id of the original message in the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from_message_id: Option<MessageId>,
    /// Author signature of a channel post, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_signature: Option<String>,
    /// Set when the original sender hides the link to their account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_sender_name: Option<String>,
    /// Date the original message was sent. `Some(UnixTime(0))` is a valid date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_date: Option<UnixTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<UnixTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
}

impl Message {
    /// Message with only the required fields set.
    pub fn new(message_id: MessageId, date: UnixTime) -> Self {
        Self {
            message_id,
            from: None,
            date,
            chat: None,
            forward_from: None,
            forward_from_chat: None,
            forward_from_message_id: None,
            forward_signature: None,
            forward_sender_name: None,
            forward_date: None,
            reply_to_message: None,
            edit_date: None,
            media_group_id: None,
            author_signature: None,
            text: None,
            entities: None,
            caption: None,
            caption_entities: None,
        }
    }

    /// Text entities, empty when absent.
    pub fn entities(&self) -> &[MessageEntity] {
        self.entities.as_deref().unwrap_or_default()
    }

    /// Caption entities, empty when absent.
    pub fn caption_entities(&self) -> &[MessageEntity] {
        self.caption_entities.as_deref().unwrap_or_default()
    }

    pub fn is_forwarded(&self) -> bool {
        self.forward_date.is_some()
    }

    /// Number of message levels in the deepest chain rooted here, this one included.
    ///
    /// Follows replies and pinned messages of embedded chats.
    pub fn nesting_depth(&self) -> usize {
        let reply = self
            .reply_to_message
            .as_deref()
            .map_or(0, Message::nesting_depth);
        let chats = [self.chat.as_ref(), self.forward_from_chat.as_ref()]
            .into_iter()
            .flatten()
            .map(Chat::nesting_depth)
            .max()
            .unwrap_or(0);
        1 + reply.max(chats)
    }
}
