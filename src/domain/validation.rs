use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MalformedToken,
    TextTooLong { max: usize, actual: usize },
    LimitOutOfRange { min: u8, max: u8, actual: u8 },
    InvalidUsername { input: String },
    SpanOutOfBounds { end: usize, len: usize },
    SplitsSurrogatePair { at: usize },
    InvalidUrl { input: String },
    MissingEntityField { kind: &'static str, field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MalformedToken => {
                write!(f, "bot token must look like <bot id>:<secret>")
            }
            Self::TextTooLong { max, actual } => {
                write!(f, "text too long: {actual} UTF-16 units (max {max})")
            }
            Self::LimitOutOfRange { min, max, actual } => {
                write!(f, "limit out of range: {actual} (expected {min}..={max})")
            }
            Self::InvalidUsername { input } => {
                write!(f, "invalid chat username: {input} (expected @name)")
            }
            Self::SpanOutOfBounds { end, len } => {
                write!(f, "entity span ends at {end} but text has {len} UTF-16 units")
            }
            Self::SplitsSurrogatePair { at } => {
                write!(f, "entity span boundary {at} splits a surrogate pair")
            }
            Self::InvalidUrl { input } => write!(f, "invalid URL: {input}"),
            Self::MissingEntityField { kind, field } => {
                write!(f, "{kind} entity requires `{field}`")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
