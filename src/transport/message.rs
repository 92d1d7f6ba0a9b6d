use serde::Serialize;

use super::chat::TransportChatTarget;
use crate::domain::{ForwardMessage, MessageEntity, MessageId, ParseMode, SendMessage};

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: TransportChatTarget<'a>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<&'a [MessageEntity]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<MessageId>,
}

#[derive(Debug, Serialize)]
struct ForwardMessageBody<'a> {
    chat_id: TransportChatTarget<'a>,
    from_chat_id: TransportChatTarget<'a>,
    message_id: MessageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_notification: Option<bool>,
}

pub fn encode_send_message_body(
    request: &SendMessage,
) -> Result<serde_json::Value, serde_json::Error> {
    let options = request.options();
    serde_json::to_value(SendMessageBody {
        chat_id: request.chat_id().into(),
        text: request.text(),
        parse_mode: options.parse_mode.map(parse_mode_str),
        entities: options.entities.as_deref(),
        disable_web_page_preview: flag(options.disable_web_page_preview),
        disable_notification: flag(options.disable_notification),
        reply_to_message_id: options.reply_to_message_id,
    })
}

pub fn encode_forward_message_body(
    request: &ForwardMessage,
) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(ForwardMessageBody {
        chat_id: (&request.chat_id).into(),
        from_chat_id: (&request.from_chat_id).into(),
        message_id: request.message_id,
        disable_notification: flag(request.disable_notification),
    })
}

fn parse_mode_str(mode: ParseMode) -> &'static str {
    match mode {
        ParseMode::MarkdownV2 => "MarkdownV2",
        ParseMode::Html => "HTML",
        ParseMode::Markdown => "Markdown",
    }
}

fn flag(value: bool) -> Option<bool> {
    value.then_some(true)
}
