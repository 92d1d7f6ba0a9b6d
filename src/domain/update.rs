use serde::{Deserialize, Serialize};

use crate::domain::message::Message;
use crate::domain::value::UpdateId;

/// An incoming update as returned by `getUpdates`.
///
/// At most one of the payload fields is present. Kinds this crate does not model
/// (inline queries, callbacks, ...) leave all of them `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: UpdateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
}

impl Update {
    /// Whichever message payload this update carries.
    pub fn message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
            .or(self.edited_channel_post.as_ref())
    }

    pub fn nesting_depth(&self) -> usize {
        self.message().map_or(0, Message::nesting_depth)
    }
}
