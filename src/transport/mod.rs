//! Transport layer: JSON request bodies and response envelope decoding.

mod chat;
mod envelope;
mod me;
mod message;
mod updates;

pub use chat::encode_get_chat_body;
pub use envelope::{DecodeError, Envelope, Failure, decode_envelope, decode_result};
pub use me::encode_get_me_body;
pub use message::{encode_forward_message_body, encode_send_message_body};
pub use updates::encode_get_updates_body;
