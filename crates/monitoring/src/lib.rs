use std::error;
use std::fmt;
use std::sync::Arc;

pub mod auth;
pub mod children;
pub mod client;
pub mod institutions;
pub mod session;
pub mod users;

pub use client::ApiClient;
pub use session::{MemorySession, TokenStore};

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The backend rejected the credentials. The session token has already
    /// been cleared; reacting to this (e.g. returning to a sign-in screen)
    /// is the embedder's concern.
    Unauthorized,
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => write!(
                    f,
                    "invalid response ({}) from '{}': {}",
                    status_code, url, text
                ),
                None => {
                    write!(f, "invalid response ({}) from '{}'", status_code, url)
                }
            },
            ApiError::Unauthorized => {
                write!(f, "missing or expired credentials")
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(why: reqwest::Error) -> Self {
        Self::RequestError(Arc::new(why))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(why: serde_json::Error) -> Self {
        Self::JsonError(Arc::new(why))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
