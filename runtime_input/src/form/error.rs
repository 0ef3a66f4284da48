//! Form validation failures

use crate::logging::{codes, Code};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Invalid regex '{pattern}': {message}")]
    MalformedRegex { pattern: String, message: String },

    #[error("Regex is {length} bytes, limit is {limit}")]
    RegexTooLong { length: usize, limit: usize },

    #[error("Regex validation selected but no pattern given")]
    MissingRegex,

    #[error("Allowed values validation selected but no values given")]
    MissingAllowedValues,

    #[error("{count} allowed values given, limit is {limit}")]
    TooManyAllowedValues { count: usize, limit: usize },

    #[error("Allowed value '{value}' is not a number")]
    InvalidNumber { value: String },

    #[error("Allowed value '{value}' is not a time duration")]
    InvalidTime { value: String },

    #[error("Allowed value '{value}' is not a URL")]
    InvalidUrl { value: String },

    #[error("Default value '{value}' is not one of the allowed values")]
    DefaultNotAllowed { value: String },

    #[error("Advanced allowed values are not enabled for this field")]
    AdvancedModeDisabled,
}

impl FormError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::MalformedRegex { .. } => codes::form::MALFORMED_REGEX,
            Self::RegexTooLong { .. } => codes::form::REGEX_TOO_LONG,
            Self::MissingRegex => codes::form::MISSING_REGEX,
            Self::MissingAllowedValues => codes::form::MISSING_ALLOWED_VALUES,
            Self::TooManyAllowedValues { .. } => codes::form::TOO_MANY_ALLOWED_VALUES,
            Self::InvalidNumber { .. } => codes::form::INVALID_NUMBER,
            Self::InvalidTime { .. } => codes::form::INVALID_TIME,
            Self::InvalidUrl { .. } => codes::form::INVALID_URL,
            Self::DefaultNotAllowed { .. } => codes::form::DEFAULT_NOT_ALLOWED,
            Self::AdvancedModeDisabled => codes::form::ADVANCED_MODE_DISABLED,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}
