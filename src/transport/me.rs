use serde::Serialize;

#[derive(Debug, Serialize)]
struct GetMeBody {}

pub fn encode_get_me_body() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(GetMeBody {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_me_sends_empty_object() {
        assert_eq!(encode_get_me_body().unwrap(), serde_json::json!({}));
    }
}
