use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::client::BotError;
use crate::domain::{
    Chat, ForwardMessage, GetChat, GetMe, GetUpdates, Message, SendMessage, Update, User,
};

mod sealed {
    pub trait Sealed {}
}

/// A Bot API method: its name, JSON parameters and result type.
///
/// Every call goes through the same pipeline in [`crate::Bot::execute_with`]:
/// encode the parameters, POST them to `bot<token>/<NAME>`, branch on the response
/// envelope, decode `result` into [`Method::Output`].
pub trait Method: sealed::Sealed + Sync {
    /// Method name as it appears in the URL (`getMe`, `sendMessage`, ...).
    const NAME: &'static str;

    type Output: DeserializeOwned + Nesting + Send;

    /// JSON body carrying the method parameters.
    fn body(&self) -> Result<serde_json::Value, serde_json::Error>;
}

/// Depth of nested messages inside a decoded value.
pub trait Nesting {
    fn nesting_depth(&self) -> usize;
}

impl Nesting for User {
    fn nesting_depth(&self) -> usize {
        0
    }
}

impl Nesting for Chat {
    fn nesting_depth(&self) -> usize {
        Chat::nesting_depth(self)
    }
}

impl Nesting for Message {
    fn nesting_depth(&self) -> usize {
        Message::nesting_depth(self)
    }
}

impl Nesting for Vec<Update> {
    fn nesting_depth(&self) -> usize {
        self.iter().map(Update::nesting_depth).max().unwrap_or(0)
    }
}

impl sealed::Sealed for GetMe {}

impl Method for GetMe {
    const NAME: &'static str = "getMe";
    type Output = User;

    fn body(&self) -> Result<serde_json::Value, serde_json::Error> {
        crate::transport::encode_get_me_body()
    }
}

impl sealed::Sealed for GetChat {}

impl Method for GetChat {
    const NAME: &'static str = "getChat";
    type Output = Chat;

    fn body(&self) -> Result<serde_json::Value, serde_json::Error> {
        crate::transport::encode_get_chat_body(self)
    }
}

impl sealed::Sealed for SendMessage {}

impl Method for SendMessage {
    const NAME: &'static str = "sendMessage";
    type Output = Message;

    fn body(&self) -> Result<serde_json::Value, serde_json::Error> {
        crate::transport::encode_send_message_body(self)
    }
}

impl sealed::Sealed for ForwardMessage {}

impl Method for ForwardMessage {
    const NAME: &'static str = "forwardMessage";
    type Output = Message;

    fn body(&self) -> Result<serde_json::Value, serde_json::Error> {
        crate::transport::encode_forward_message_body(self)
    }
}

impl sealed::Sealed for GetUpdates {}

impl Method for GetUpdates {
    const NAME: &'static str = "getUpdates";
    type Output = Vec<Update>;

    fn body(&self) -> Result<serde_json::Value, serde_json::Error> {
        crate::transport::encode_get_updates_body(self)
    }
}

#[derive(Debug, Clone, Default)]
/// Per-call limits.
///
/// Both are checked while the request is in flight: the call returns as soon as
/// the token is cancelled or the timeout elapses, dropping the HTTP request.
pub struct CallOptions {
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: None,
        }
    }

    pub fn cancel_on(token: CancellationToken) -> Self {
        Self {
            timeout: None,
            cancel: Some(token),
        }
    }

    pub(crate) async fn run<F, T>(&self, call: F) -> Result<T, BotError>
    where
        F: Future<Output = T>,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .map_err(|_| BotError::Timeout(limit)),
                None => Ok(call.await),
            }
        };

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(BotError::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }
}
