use serde::{Deserialize, Serialize};

use crate::domain::value::UserId;

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IETF language tag of the user's language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    // The flags below are only returned by `getMe`; absent means `false`.
    /// The bot can be invited to groups.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_join_groups: bool,
    /// Privacy mode is disabled for the bot.
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_read_all_group_messages: bool,
    /// The bot supports inline queries.
    #[serde(default, skip_serializing_if = "is_false")]
    pub supports_inline_queries: bool,
}

impl User {
    /// `first_name` followed by `last_name`, if any.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
