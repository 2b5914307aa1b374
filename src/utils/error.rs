use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Service error: {message}")]
    ServiceError { message: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl AdminError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::ServiceError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Validation failures are the caller's fault and never trigger the
    /// development fallback.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Message stored in slice state and shown to the user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => "The server did not respond in time".to_string(),
            Self::ApiError(e) if e.is_connect() => "Could not connect to the server".to_string(),
            Self::ServiceError { message } => message.clone(),
            Self::ValidationError { message } => message.clone(),
            Self::UnexpectedStatus { status, .. } => {
                format!("The server answered with HTTP {}", status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
