use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{ErrorCode, ResponseParameters};

/// Why a response body could not be turned into the expected value.
///
/// Never retryable: it means the client and Telegram disagree on the contract.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not JSON, or its top-level object has the wrong shape.
    #[error("invalid response envelope at `{path}`: {source}")]
    Envelope {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required envelope field is absent (`result` on success, `error_code` on failure).
    #[error("response envelope is missing `{field}`")]
    MissingField { field: &'static str },

    /// The `result` payload does not match the expected type.
    #[error("unexpected payload at `{path}`: {source}")]
    Payload {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Nested messages go deeper than the configured limit.
    #[error("message nesting depth {depth} exceeds the limit of {max}")]
    NestingTooDeep { depth: usize, max: usize },
}

impl DecodeError {
    /// Dotted path of the offending field, when one is known (e.g. `result.chat.type`).
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Envelope { path, .. } | Self::Payload { path, .. } => Some(path),
            Self::MissingField { field } => Some(field),
            Self::NestingTooDeep { .. } => None,
        }
    }
}

/// Top-level response, branched on `ok` before the payload is looked at.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(serde_json::Value),
    Failure(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub code: ErrorCode,
    pub description: String,
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct TransportEnvelope {
    ok: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error_code: Option<i32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

pub fn decode_envelope(body: &str) -> Result<Envelope, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    let parsed: TransportEnvelope = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| {
            let path = err.path().to_string();
            DecodeError::Envelope {
                path,
                source: err.into_inner(),
            }
        })?;
    deserializer.end().map_err(|source| DecodeError::Envelope {
        path: ".".to_owned(),
        source,
    })?;

    if parsed.ok {
        return parsed
            .result
            .map(Envelope::Success)
            .ok_or(DecodeError::MissingField { field: "result" });
    }

    let code = parsed
        .error_code
        .ok_or(DecodeError::MissingField { field: "error_code" })?;
    Ok(Envelope::Failure(Failure {
        code: ErrorCode::new(code),
        description: parsed.description.unwrap_or_default(),
        parameters: parsed.parameters,
    }))
}

pub fn decode_result<T: DeserializeOwned>(result: serde_json::Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(result).map_err(|err| {
        let inner = err.path().to_string();
        let path = if inner == "." {
            "result".to_owned()
        } else {
            format!("result.{inner}")
        };
        DecodeError::Payload {
            path,
            source: err.into_inner(),
        }
    })
}
