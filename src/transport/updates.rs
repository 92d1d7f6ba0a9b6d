use serde::Serialize;

use crate::domain::{GetUpdates, UpdateId};

#[derive(Debug, Serialize)]
struct GetUpdatesBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<UpdateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_updates: Option<&'a [String]>,
}

pub fn encode_get_updates_body(
    request: &GetUpdates,
) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(GetUpdatesBody {
        offset: request.offset(),
        limit: request.limit(),
        timeout: request.timeout(),
        allowed_updates: request.allowed_updates(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_request_sends_empty_object() {
        let body = encode_get_updates_body(&GetUpdates::new()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn all_parameters_are_encoded() {
        let request = GetUpdates::new()
            .with_offset(UpdateId(10))
            .with_limit(50)
            .unwrap()
            .with_timeout(30)
            .with_allowed_updates(vec!["message".to_owned()]);
        let body = encode_get_updates_body(&request).unwrap();
        assert_eq!(
            body,
            json!({"offset": 10, "limit": 50, "timeout": 30, "allowed_updates": ["message"]})
        );
    }
}
