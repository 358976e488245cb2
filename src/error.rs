/// Failure of the single HTTP round-trip. Rendered into the result warning,
/// never returned to callers of `search`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Job feed returned HTTP {0}")]
    Status(u16),

    #[error("Job feed returned an empty body")]
    EmptyBody,

    #[error("Failed to parse job feed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse job feed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Transport("timed out".to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed vocabulary data: {0}")]
    Csv(#[from] csv::Error),
}
