//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod error;
mod method;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};

use crate::domain::{
    BotToken, Chat, ChatTarget, ForwardMessage, GetChat, GetMe, GetUpdates, Message,
    SendMessage, Update, UpdateId, User, ValidationError,
};
use crate::transport::{DecodeError, Envelope};

pub use error::BotError;
pub use method::{CallOptions, Method, Nesting};

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            // reqwest errors carry the request URL, and the URL carries the token.
            let response = self
                .client
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(reqwest::Error::without_url)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Where and how calls are sent. Shared by a [`Bot`] and its clones.
#[derive(Clone)]
struct Endpoint {
    token: BotToken,
    api_url: String,
    max_nesting_depth: usize,
    http: Arc<dyn HttpTransport>,
}

impl Endpoint {
    /// `<api_url>/bot<token>/<method>`; the token travels in the path on every call.
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token.as_str(), method)
    }

    async fn call<M: Method>(
        &self,
        method: &M,
        options: &CallOptions,
    ) -> Result<M::Output, BotError> {
        let body = method.body().map_err(BotError::Encode)?;
        let url = self.method_url(M::NAME);

        log::debug!("calling {}", M::NAME);
        let response = options
            .run(self.http.post_json(&url, body))
            .await?
            .map_err(BotError::Transport)?;

        let result = match crate::transport::decode_envelope(&response.body) {
            Ok(Envelope::Success(result)) => result,
            Ok(Envelope::Failure(failure)) => {
                log::warn!(
                    "{} failed with {}: {}",
                    M::NAME,
                    failure.code.as_i32(),
                    failure.description
                );
                return Err(BotError::from_failure(failure));
            }
            Err(_) if !(200..=299).contains(&response.status) => {
                let body = if response.body.trim().is_empty() {
                    None
                } else {
                    Some(response.body)
                };
                return Err(BotError::HttpStatus {
                    status: response.status,
                    body,
                });
            }
            Err(err) => return Err(err.into()),
        };

        let output: M::Output = crate::transport::decode_result(result)?;
        let depth = output.nesting_depth();
        if depth > self.max_nesting_depth {
            return Err(DecodeError::NestingTooDeep {
                depth,
                max: self.max_nesting_depth,
            }
            .into());
        }
        Ok(output)
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Bot`].
///
/// Use this when you need to customize the API URL, timeout, user-agent, or the
/// nesting limit for decoded messages.
pub struct BotBuilder {
    token: BotToken,
    api_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    max_nesting_depth: usize,
}

impl BotBuilder {
    /// Create a builder with the default API URL and no timeout/user-agent override.
    pub fn new(token: BotToken) -> Self {
        Self {
            token,
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: None,
            user_agent: None,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Override the Bot API base URL (e.g. a self-hosted Bot API server).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set an HTTP client timeout applied to every request.
    ///
    /// Must exceed the long polling timeout used with `getUpdates`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Reject responses whose messages nest deeper than `depth` levels
    /// (replies, pinned messages).
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Build the HTTP client and resolve the bot identity with `getMe`.
    pub async fn connect(self) -> Result<Bot, BotError> {
        self.connect_with(&CallOptions::default()).await
    }

    /// Like [`BotBuilder::connect`], with a timeout or cancellation for `getMe`.
    pub async fn connect_with(self, options: &CallOptions) -> Result<Bot, BotError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|err| BotError::Transport(Box::new(err)))?;

        self.finish(Arc::new(ReqwestTransport { client }), options)
            .await
    }

    async fn finish(
        self,
        http: Arc<dyn HttpTransport>,
        options: &CallOptions,
    ) -> Result<Bot, BotError> {
        let endpoint = Endpoint {
            token: self.token,
            api_url: normalize_api_url(&self.api_url)?,
            max_nesting_depth: self.max_nesting_depth,
            http,
        };

        let me = endpoint.call(&GetMe, options).await?;
        log::debug!(
            "authorized as {} (@{})",
            me.id.0,
            me.username.as_deref().unwrap_or("-")
        );

        Ok(Bot {
            endpoint,
            me,
            offset: Arc::new(UpdateOffset::default()),
        })
    }
}

fn normalize_api_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim().trim_end_matches('/');
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Ok(trimmed.to_owned())
        }
        _ => Err(ValidationError::InvalidUrl {
            input: input.to_owned(),
        }),
    }
}

/// Update offset shared by a bot and its clones.
///
/// `poll` serializes `poll_updates` calls; `next` can be read while a poll is in
/// flight.
#[derive(Debug)]
struct UpdateOffset {
    poll: Mutex<()>,
    next: watch::Sender<Option<UpdateId>>,
}

impl Default for UpdateOffset {
    fn default() -> Self {
        Self {
            poll: Mutex::new(()),
            next: watch::channel(None).0,
        }
    }
}

#[derive(Clone)]
/// High-level Telegram Bot API client.
///
/// A `Bot` only exists once its token has been accepted by `getMe`; the resolved
/// identity is available through [`Bot::me`] and never changes afterwards. Each
/// instance owns its token, so several bots can run in one process.
///
/// Clones share the HTTP client and the update offset used by
/// [`Bot::poll_updates`].
pub struct Bot {
    endpoint: Endpoint,
    me: User,
    offset: Arc<UpdateOffset>,
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("token", &self.endpoint.token)
            .field("api_url", &self.endpoint.api_url)
            .field("me", &self.me)
            .finish_non_exhaustive()
    }
}

impl Bot {
    /// Validate `token` and connect with default settings.
    ///
    /// Errors:
    /// - [`BotError::Validation`] for a malformed token (no request is made),
    /// - [`BotError::Auth`] when Telegram rejects the token,
    /// - [`BotError::Transport`] / [`BotError::HttpStatus`] / [`BotError::Decode`]
    ///   when `getMe` can't be completed.
    pub async fn new(token: impl Into<String>) -> Result<Self, BotError> {
        Self::builder(BotToken::new(token)?).connect().await
    }

    /// Start building a bot with custom settings.
    pub fn builder(token: BotToken) -> BotBuilder {
        BotBuilder::new(token)
    }

    /// The identity resolved when this bot was created.
    pub fn me(&self) -> &User {
        &self.me
    }

    pub fn token(&self) -> &BotToken {
        &self.endpoint.token
    }

    /// Run any [`Method`] with default call options.
    pub async fn execute<M: Method>(&self, method: &M) -> Result<M::Output, BotError> {
        self.execute_with(method, &CallOptions::default()).await
    }

    /// Run any [`Method`] with a timeout and/or cancellation token.
    pub async fn execute_with<M: Method>(
        &self,
        method: &M,
        options: &CallOptions,
    ) -> Result<M::Output, BotError> {
        self.endpoint.call(method, options).await
    }

    /// Fetch the bot identity again. [`Bot::me`] is left untouched.
    pub async fn get_me(&self) -> Result<User, BotError> {
        self.execute(&GetMe).await
    }

    /// Full information about a chat, including `getChat`-only fields.
    ///
    /// This and the other shortcuts below use default [`CallOptions`]; pass the
    /// request to [`Bot::execute_with`] for a timeout or cancellation.
    pub async fn get_chat(&self, chat_id: impl Into<ChatTarget>) -> Result<Chat, BotError> {
        self.execute(&GetChat::new(chat_id)).await
    }

    /// Send a text message; returns the message as stored by Telegram.
    pub async fn send_message(&self, request: SendMessage) -> Result<Message, BotError> {
        self.execute(&request).await
    }

    /// Forward a message; returns the copy in the target chat.
    pub async fn forward_message(&self, request: ForwardMessage) -> Result<Message, BotError> {
        self.execute(&request).await
    }

    /// Plain `getUpdates`; the caller manages offsets.
    pub async fn get_updates(&self, request: GetUpdates) -> Result<Vec<Update>, BotError> {
        self.execute(&request).await
    }

    /// Fetch the next batch of updates, tracking the offset on this bot.
    ///
    /// The stored offset replaces any offset set on `request`. It moves past the
    /// highest `update_id` received only when the call succeeds. Concurrent calls on
    /// the same bot (or its clones) run one after another.
    pub async fn poll_updates(
        &self,
        request: GetUpdates,
        options: &CallOptions,
    ) -> Result<Vec<Update>, BotError> {
        let _polling = self.offset.poll.lock().await;
        let current = *self.offset.next.borrow();
        let request = match current {
            Some(offset) => request.with_offset(offset),
            None => request,
        };

        let updates = self.endpoint.call(&request, options).await?;
        if let Some(last) = updates.iter().map(|update| update.update_id).max() {
            // Saturates at i64::MAX.
            self.offset
                .next
                .send_replace(Some(UpdateId(last.0.saturating_add(1))));
        }
        Ok(updates)
    }

    /// Offset the next [`Bot::poll_updates`] call will send.
    ///
    /// Does not wait for a poll in flight.
    pub fn next_update_offset(&self) -> Option<UpdateId> {
        *self.offset.next.borrow()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    use crate::domain::{ChatId, ChatKind, ErrorCode, MessageId, SendOptions, UserId};

    use super::*;

    const TOKEN: &str = "123456:test-secret";
    const ME: &str = r#"{"ok": true, "result": {"id": 123456, "is_bot": true, "first_name": "Uploader", "username": "uploader_bot", "can_join_groups": true}}"#;

    #[derive(Debug, Clone)]
    enum FakeResponse {
        Reply(u16, String),
        Fail(String),
        Hang,
        /// Reply once the gate is opened.
        Gated(Arc<tokio::sync::Notify>, u16, String),
    }

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<StdMutex<FakeTransportState>>,
    }

    #[derive(Debug, Default)]
    struct FakeTransportState {
        requests: Vec<(String, serde_json::Value)>,
        responses: VecDeque<FakeResponse>,
    }

    impl FakeTransport {
        fn new() -> Self {
            Self {
                state: Arc::new(StdMutex::new(FakeTransportState::default())),
            }
        }

        fn reply(self, status: u16, body: impl Into<String>) -> Self {
            self.push(FakeResponse::Reply(status, body.into()))
        }

        fn push(self, response: FakeResponse) -> Self {
            self.state.lock().unwrap().responses.push_back(response);
            self
        }

        fn requests(&self) -> Vec<(String, serde_json::Value)> {
            self.state.lock().unwrap().requests.clone()
        }

        fn last_request(&self) -> (String, serde_json::Value) {
            self.requests().pop().unwrap()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json<'a>(
            &'a self,
            url: &'a str,
            body: serde_json::Value,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let response = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push((url.to_owned(), body));
                    state.responses.pop_front().unwrap_or(FakeResponse::Hang)
                };
                match response {
                    FakeResponse::Reply(status, body) => Ok(HttpResponse { status, body }),
                    FakeResponse::Fail(message) => Err(message.into()),
                    FakeResponse::Hang => std::future::pending().await,
                    FakeResponse::Gated(gate, status, body) => {
                        gate.notified().await;
                        Ok(HttpResponse { status, body })
                    }
                }
            })
        }
    }

    fn builder() -> BotBuilder {
        Bot::builder(BotToken::new(TOKEN).unwrap()).api_url("https://api.example.invalid/")
    }

    async fn connect(transport: &FakeTransport) -> Result<Bot, BotError> {
        builder()
            .finish(Arc::new(transport.clone()), &CallOptions::default())
            .await
    }

    #[tokio::test]
    async fn connect_resolves_me_with_token_in_path() {
        let transport = FakeTransport::new().reply(200, ME);
        let bot = connect(&transport).await.unwrap();

        assert_eq!(bot.me().id, UserId(123_456));
        assert!(bot.me().can_join_groups);
        assert!(!bot.me().supports_inline_queries);

        let (url, body) = transport.last_request();
        assert_eq!(url, "https://api.example.invalid/bot123456:test-secret/getMe");
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn connect_maps_unauthorized_to_auth_error() {
        let transport = FakeTransport::new().reply(
            401,
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        );
        let err = connect(&transport).await.unwrap_err();
        match err {
            BotError::Auth { code, description } => {
                assert_eq!(code, ErrorCode::new(401));
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_maps_invalid_json_to_decode_error() {
        let transport = FakeTransport::new().reply(200, "{ not json }");
        let err = connect(&transport).await.unwrap_err();
        assert!(matches!(err, BotError::Decode(DecodeError::Envelope { .. })));
    }

    #[tokio::test]
    async fn connect_maps_wrong_identity_shape_to_decode_error() {
        let transport =
            FakeTransport::new().reply(200, r#"{"ok": true, "result": {"id": "x"}}"#);
        let err = connect(&transport).await.unwrap_err();
        match err {
            BotError::Decode(decode) => assert_eq!(decode.path(), Some("result.id")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_maps_transport_failure() {
        let transport = FakeTransport::new().push(FakeResponse::Fail("connection reset".into()));
        let err = connect(&transport).await.unwrap_err();
        assert!(matches!(err, BotError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn new_rejects_malformed_token_without_request() {
        let err = Bot::new("not-a-token").await.unwrap_err();
        assert!(matches!(
            err,
            BotError::Validation(ValidationError::MalformedToken)
        ));
    }

    #[tokio::test]
    async fn connect_rejects_invalid_api_url() {
        let transport = FakeTransport::new().reply(200, ME);
        let err = Bot::builder(BotToken::new(TOKEN).unwrap())
            .api_url("ftp://example.invalid")
            .finish(Arc::new(transport.clone()), &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BotError::Validation(ValidationError::InvalidUrl { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn debug_output_hides_token_secret() {
        let transport = FakeTransport::new().reply(200, ME);
        let bot = connect(&transport).await.unwrap();
        let printed = format!("{bot:?}");
        assert!(printed.contains("123456"));
        assert!(!printed.contains("test-secret"));
    }

    #[tokio::test]
    async fn send_message_posts_json_and_decodes_message() {
        let transport = FakeTransport::new().reply(200, ME).reply(
            200,
            r#"{
              "ok": true,
              "result": {
                "message_id": 77,
                "date": 1600000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "text": "hello",
                "entities": [{"type": "bold", "offset": 0, "length": 5}]
              }
            }"#,
        );
        let bot = connect(&transport).await.unwrap();

        let request = SendMessage::new(ChatId(42), "hello", SendOptions::default()).unwrap();
        let message = bot.send_message(request).await.unwrap();
        assert_eq!(message.message_id, MessageId(77));
        assert_eq!(message.chat.as_ref().map(|c| c.kind), Some(ChatKind::Private));
        assert_eq!(message.entities().len(), 1);

        let (url, body) = transport.last_request();
        assert!(url.ends_with("/bot123456:test-secret/sendMessage"));
        assert_eq!(body, json!({"chat_id": 42, "text": "hello"}));
    }

    #[tokio::test]
    async fn get_chat_keeps_large_ids_exact() {
        let transport = FakeTransport::new().reply(200, ME).reply(
            200,
            r#"{"ok": true, "result": {"id": 9007199254740993, "type": "supergroup", "title": "Big"}}"#,
        );
        let bot = connect(&transport).await.unwrap();

        let chat = bot.get_chat(ChatId(9_007_199_254_740_993)).await.unwrap();
        assert_eq!(chat.id, ChatId(9_007_199_254_740_993));

        let (_, body) = transport.last_request();
        assert_eq!(body.to_string(), r#"{"chat_id":9007199254740993}"#);
    }

    #[tokio::test]
    async fn api_errors_keep_code_description_and_parameters() {
        let transport = FakeTransport::new().reply(200, ME).reply(
            429,
            r#"{"ok": false, "error_code": 429, "description": "Too Many Requests: retry after 3", "parameters": {"retry_after": 3}}"#,
        );
        let bot = connect(&transport).await.unwrap();

        let err = bot.get_chat(ChatId(1)).await.unwrap_err();
        match &err {
            BotError::Api {
                code, description, ..
            } => {
                assert_eq!(code.as_i32(), 429);
                assert_eq!(description, "Too Many Requests: retry after 3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn non_envelope_error_body_maps_to_http_status() {
        let transport = FakeTransport::new()
            .reply(200, ME)
            .reply(502, "<html>Bad Gateway</html>")
            .reply(503, "   ");
        let bot = connect(&transport).await.unwrap();

        let err = bot.get_me().await.unwrap_err();
        assert!(matches!(
            err,
            BotError::HttpStatus {
                status: 502,
                body: Some(_)
            }
        ));

        let err = bot.get_me().await.unwrap_err();
        assert!(matches!(
            err,
            BotError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn nesting_beyond_limit_is_rejected() {
        let transport = FakeTransport::new().reply(200, ME).reply(
            200,
            r#"{"ok": true, "result": {
                "message_id": 3, "date": 3,
                "reply_to_message": {
                    "message_id": 2, "date": 2,
                    "reply_to_message": {"message_id": 1, "date": 1}
                }
            }}"#,
        );
        let bot = builder()
            .max_nesting_depth(2)
            .finish(Arc::new(transport.clone()), &CallOptions::default())
            .await
            .unwrap();

        let request = ForwardMessage::new(ChatId(1), ChatId(2), MessageId(3));
        let err = bot.forward_message(request).await.unwrap_err();
        assert!(matches!(
            err,
            BotError::Decode(DecodeError::NestingTooDeep { depth: 3, max: 2 })
        ));
    }

    #[tokio::test]
    async fn cancelled_call_returns_promptly() {
        let transport = FakeTransport::new().reply(200, ME).push(FakeResponse::Hang);
        let bot = connect(&transport).await.unwrap();

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        let err = bot
            .execute_with(&GetMe, &CallOptions::cancel_on(token))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Cancelled));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn hanging_call_times_out() {
        let transport = FakeTransport::new().reply(200, ME).push(FakeResponse::Hang);
        let bot = connect(&transport).await.unwrap();

        let limit = Duration::from_millis(10);
        let err = bot
            .execute_with(&GetMe, &CallOptions::timeout(limit))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Timeout(d) if d == limit));
    }

    #[tokio::test]
    async fn poll_updates_advances_offset_only_on_success() {
        let transport = FakeTransport::new()
            .reply(200, ME)
            .reply(
                200,
                r#"{"ok": true, "result": [
                    {"update_id": 5, "message": {"message_id": 1, "date": 1, "text": "a"}},
                    {"update_id": 6, "edited_message": {"message_id": 1, "date": 1, "text": "b"}}
                ]}"#,
            )
            .reply(
                409,
                r#"{"ok": false, "error_code": 409, "description": "Conflict"}"#,
            )
            .reply(200, r#"{"ok": true, "result": []}"#);
        let bot = connect(&transport).await.unwrap();
        assert_eq!(bot.next_update_offset(), None);

        let request = GetUpdates::new().with_limit(10).unwrap();
        let updates = bot
            .poll_updates(request.clone(), &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(bot.next_update_offset(), Some(UpdateId(7)));
        assert_eq!(transport.last_request().1, json!({"limit": 10}));

        let err = bot
            .poll_updates(request.clone(), &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Api { .. }));
        assert_eq!(bot.next_update_offset(), Some(UpdateId(7)));

        let updates = bot
            .poll_updates(request, &CallOptions::default())
            .await
            .unwrap();
        assert!(updates.is_empty());
        assert_eq!(bot.next_update_offset(), Some(UpdateId(7)));
        assert_eq!(transport.last_request().1, json!({"offset": 7, "limit": 10}));
    }

    #[tokio::test]
    async fn concurrent_polls_run_one_after_another() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let transport = FakeTransport::new()
            .reply(200, ME)
            .push(FakeResponse::Gated(
                gate.clone(),
                200,
                r#"{"ok": true, "result": [{"update_id": 41}]}"#.to_owned(),
            ))
            .reply(200, r#"{"ok": true, "result": []}"#);
        let bot = connect(&transport).await.unwrap();

        let first = tokio::spawn({
            let bot = bot.clone();
            async move {
                bot.poll_updates(GetUpdates::new(), &CallOptions::default())
                    .await
            }
        });
        while transport.requests().len() < 2 {
            tokio::task::yield_now().await;
        }

        let second = tokio::spawn({
            let bot = bot.clone();
            async move {
                bot.poll_updates(GetUpdates::new(), &CallOptions::default())
                    .await
            }
        });
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(bot.next_update_offset(), None);

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap().len(), 1);
        assert!(second.await.unwrap().unwrap().is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].1, json!({}));
        assert_eq!(requests[2].1, json!({"offset": 42}));
        assert_eq!(bot.next_update_offset(), Some(UpdateId(42)));
    }

    #[tokio::test]
    async fn offset_saturates_at_max_update_id() {
        let transport = FakeTransport::new().reply(200, ME).reply(
            200,
            r#"{"ok": true, "result": [{"update_id": 9223372036854775807}]}"#,
        );
        let bot = connect(&transport).await.unwrap();

        bot.poll_updates(GetUpdates::new(), &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(bot.next_update_offset(), Some(UpdateId(i64::MAX)));
    }

    #[tokio::test]
    async fn shortcut_requests_accept_call_options_through_execute_with() {
        let transport = FakeTransport::new().reply(200, ME).push(FakeResponse::Hang);
        let bot = connect(&transport).await.unwrap();

        let limit = Duration::from_millis(10);
        let err = bot
            .execute_with(&GetChat::new(ChatId(5)), &CallOptions::timeout(limit))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Timeout(d) if d == limit));
        assert_eq!(transport.last_request().1, json!({"chat_id": 5}));
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_token() {
        let err = Bot::builder(BotToken::new(TOKEN).unwrap())
            .api_url("http://127.0.0.1:1")
            .timeout(Duration::from_secs(5))
            .connect()
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Transport(_)));

        let printed = format!("{err} {err:?}");
        assert!(!printed.contains("test-secret"), "{printed}");
    }

    #[test]
    fn api_url_is_normalized() {
        assert_eq!(
            normalize_api_url(" https://api.telegram.org/ ").unwrap(),
            "https://api.telegram.org"
        );
        assert!(normalize_api_url("not a url").is_err());
    }
}
