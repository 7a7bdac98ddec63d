use serde::Deserialize;
use strum::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Commits,
    Profile,
}

/// Why a fetch cycle ended without updating the widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{endpoint} request failed: {message}")]
    Transport { endpoint: Endpoint, message: String },

    #[error("{endpoint} request was rejected by GitHub: {message}")]
    Status { endpoint: Endpoint, message: String },

    #[error("{endpoint} response could not be decoded: {message}")]
    Decode { endpoint: Endpoint, message: String },
}

#[derive(Deserialize)]
struct GithubErrorBody {
    message: String,
}

impl FetchError {
    /// Failures raised before a response body was received.
    pub fn from_octocrab(endpoint: Endpoint, error: octocrab::Error) -> Self {
        Self::Transport {
            endpoint,
            message: error.to_string(),
        }
    }

    /// Non-success response; GitHub's own `message` is kept when the body carries one.
    pub fn from_status(endpoint: Endpoint, status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<GithubErrorBody>(body) {
            Ok(error) => format!("{status} {}", error.message),
            Err(_) => status.to_string(),
        };
        Self::Status { endpoint, message }
    }

    pub fn decode(endpoint: Endpoint, error: serde_json::Error) -> Self {
        Self::Decode {
            endpoint,
            message: error.to_string(),
        }
    }
}
