//! Typed Rust client for the Telegram Bot HTTP API.
//!
//! The crate has three layers: a domain layer of Bot API objects and validated
//! requests, a transport layer for the JSON wire format and the response envelope,
//! and a small client layer sending requests and mapping errors.
//!
//! ```rust,no_run
//! use tgbot::{Bot, ChatId, SendMessage, SendOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tgbot::BotError> {
//!     let bot = Bot::new("123456:ABC-DEF").await?;
//!     println!("running as {}", bot.me().first_name);
//!
//!     let request = SendMessage::new(ChatId(42), "hello", SendOptions::default())?;
//!     let _message = bot.send_message(request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Bot, BotBuilder, BotError, CallOptions, Method, Nesting};
pub use domain::{
    BotToken, Chat, ChatId, ChatKind, ChatPermissions, ChatPhoto, ChatPhotoSize, ChatTarget,
    EntityKind, ErrorCode, FileId, FileUniqueId, ForwardMessage, GetChat, GetMe, GetUpdates,
    KnownErrorCode, Message, MessageEntity, MessageId, ParseMode, ResponseParameters,
    SendMessage, SendOptions, UnixTime, Update, UpdateId, User, UserId, ValidationError,
    utf16_len,
};
pub use transport::DecodeError;
pub use tokio_util::sync::CancellationToken;
