use reqwest::Response;
use survey_builder::SurveyError;

/// Error type for the REST client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unable to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error(transparent)]
    Survey(#[from] SurveyError),
}

impl ClientError {
    /// The HTTP status of a rejected request, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub(crate) trait ResponseExt {
    /// Turn a non-success status into [`ClientError::Status`].
    async fn map_client_error(self) -> Result<Response, ClientError>;
}

impl ResponseExt for Response {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let url = self.url().to_string();
        let body = self.text().await.unwrap_or_default();
        log::error!("request to {url} failed with status {status}: {body}");
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
