use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("API response contained no data.")]
    MissingData,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}
