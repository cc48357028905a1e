use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Operation requires a signed-in user")]
    Unauthenticated,

    #[error("GraphQL error (status {status}): {}", .messages.join("; "))]
    Graphql { status: u16, messages: Vec<String> },

    #[error("Invalid guest cart id: `{0}`")]
    InvalidGuestCartId(String),
}
