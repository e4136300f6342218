//! Error types for RepoChat
//!
//! Every request error is handled where the request was made: the landing view
//! turns it into an alert, a chat view turns it into a bot bubble. The `Display`
//! text of each variant is what the user reads after the `Error: ` prefix.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoChatError {
    /// The request could not complete (connection refused, DNS, reset, ...)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The background task carrying the request died before settling
    #[error("Request task failed: {0}")]
    Task(String),

    /// Non-success HTTP status
    #[error("Server returned {status} {detail}")]
    Server { status: u16, detail: String },

    /// Success status but no `message` in the body
    #[error("Response does not contain a message.")]
    MissingMessage,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RepoChatError {
    /// Text shown to the user, in the same shape for alerts and chat bubbles.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

impl From<tokio::task::JoinError> for RepoChatError {
    fn from(err: tokio::task::JoinError) -> Self {
        RepoChatError::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepoChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_includes_status_and_detail() {
        let err = RepoChatError::Server {
            status: 500,
            detail: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Error: Server returned 500 Internal Server Error"
        );
    }

    #[test]
    fn missing_message_text() {
        assert_eq!(
            RepoChatError::MissingMessage.user_message(),
            "Error: Response does not contain a message."
        );
    }

    #[test]
    fn decode_error_is_prefixed() {
        let err: RepoChatError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(err.user_message().starts_with("Error: Invalid response body:"));
    }
}
