use serde::Serialize;

use crate::domain::{ChatTarget, GetChat};

/// `chat_id` as sent on the wire: integer id or `@username` string.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum TransportChatTarget<'a> {
    Id(i64),
    Username(&'a str),
}

impl<'a> From<&'a ChatTarget> for TransportChatTarget<'a> {
    fn from(value: &'a ChatTarget) -> Self {
        match value {
            ChatTarget::Id(id) => Self::Id(id.0),
            ChatTarget::Username(name) => Self::Username(name),
        }
    }
}

#[derive(Debug, Serialize)]
struct GetChatBody<'a> {
    chat_id: TransportChatTarget<'a>,
}

pub fn encode_get_chat_body(request: &GetChat) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(GetChatBody {
        chat_id: request.chat_id().into(),
    })
}
