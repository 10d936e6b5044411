use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the request never reached the server.
pub const SERVER_NOT_RESPONDING: &str = "Сервер не отвечает";

/// Shown when the server answered with something that is not JSON.
pub const MALFORMED_RESPONSE: &str = "Некорректный ответ сервера";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Response for section '{section}' arrived after it was superseded")]
    Superseded { section: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::AuthRequired => Self::AuthRequired,
            Self::Server { status, message } => Self::Server {
                status: *status,
                message: message.clone(),
            },
            Self::Network(s) => Self::Network(s.clone()),
            Self::MalformedResponse(s) => Self::MalformedResponse(s.clone()),
            Self::Validation(s) => Self::Validation(s.clone()),
            Self::Config(s) => Self::Config(s.clone()),
            Self::InvalidUrl(s) => Self::InvalidUrl(s.clone()),
            Self::Superseded { section } => Self::Superseded {
                section: section.clone(),
            },
            // For errors that can't be cloned, keep the string representation
            Self::Serialization(e) => Self::MalformedResponse(e.to_string()),
            Self::Yaml(e) => Self::Config(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Config(format!("IO error: {}", e)),
        }
    }
}

impl Error {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network(detail.into())
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn superseded(section: impl Into<String>) -> Self {
        Self::Superseded {
            section: section.into(),
        }
    }

    /// Text shown to the operator in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Network(_) => SERVER_NOT_RESPONDING.to_string(),
            Self::MalformedResponse(_) | Self::Serialization(_) => MALFORMED_RESPONSE.to_string(),
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}
