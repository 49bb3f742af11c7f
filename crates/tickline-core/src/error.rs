pub type Result<T> = std::result::Result<T, Error>;

/// Fatal parse errors. Every variant carries the 1-based source line it was raised on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("line {line}: unknown config key `{key}`")]
    UnknownConfigKey { line: usize, key: String },

    #[error("line {line}: invalid value `{value}` for config key `{key}`: {reason}")]
    InvalidConfigValue {
        line: usize,
        key: String,
        value: String,
        reason: String,
    },

    #[error("line {line}: unknown lifeline style `{style}` (expected Normal, Simplified or Slice)")]
    InvalidStyle { line: usize, style: String },

    #[error("line {line}: lifeline \"{name}\" is not declared")]
    UnknownLifeline { line: usize, name: String },

    #[error("line {line}: state \"{state}\" is not declared for lifeline \"{lifeline}\"")]
    UnknownState {
        line: usize,
        lifeline: String,
        state: String,
    },

    #[error("line {line}: invalid state index `{token}`")]
    InvalidStateIndex { line: usize, token: String },

    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: {what} {value} exceeds the maximum of {max}")]
    LimitExceeded {
        line: usize,
        what: &'static str,
        value: usize,
        max: usize,
    },

    #[error("line {line}: unrecognized statement: {text}")]
    UnrecognizedStatement { line: usize, text: String },
}

impl Error {
    /// The 1-based source line that raised the error.
    pub fn line(&self) -> usize {
        match self {
            Error::UnknownConfigKey { line, .. }
            | Error::InvalidConfigValue { line, .. }
            | Error::InvalidStyle { line, .. }
            | Error::UnknownLifeline { line, .. }
            | Error::UnknownState { line, .. }
            | Error::InvalidStateIndex { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::LimitExceeded { line, .. }
            | Error::UnrecognizedStatement { line, .. } => *line,
        }
    }
}
