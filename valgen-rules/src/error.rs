use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a field directive into a rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed annotation '{text}'")]
    MalformedAnnotation { text: String },

    #[error("unsupported rule '{name}'")]
    UnsupportedRule { name: String },

    #[error("invalid value '{value}' for {rule}.{key}: expected {expected}")]
    InvalidValue {
        rule: &'static str,
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl Error {
    /// Short hint shown next to the error.
    pub fn help(&self) -> String {
        match self {
            Error::MalformedAnnotation { .. } => {
                "directives look like `+validate(rule(key=value, ...))` or `+validate(skip)`"
                    .to_string()
            }
            Error::UnsupportedRule { .. } => {
                "run `valgen rules` to list the available rules".to_string()
            }
            Error::InvalidValue { expected, .. } => format!("use {} here", expected),
        }
    }
}
