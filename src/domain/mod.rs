//! Domain layer: Bot API objects, strong value types and validated requests (no I/O).

mod chat;
mod entity;
mod message;
mod request;
mod update;
mod user;
mod validation;
mod value;

pub use chat::{Chat, ChatPermissions, ChatPhoto, ChatPhotoSize};
pub use entity::{EntityKind, MessageEntity, utf16_len};
pub use message::Message;
pub use request::{
    ChatTarget, ForwardMessage, GET_UPDATES_MAX_LIMIT, GET_UPDATES_MIN_LIMIT, GetChat, GetMe,
    GetUpdates, ParseMode, SEND_MESSAGE_MAX_TEXT, SendMessage, SendOptions,
};
pub use update::Update;
pub use user::User;
pub use validation::ValidationError;
pub use value::{
    BotToken, ChatId, ChatKind, ErrorCode, FileId, FileUniqueId, KnownErrorCode, MessageId,
    ResponseParameters, UnixTime, UpdateId, UserId,
};
