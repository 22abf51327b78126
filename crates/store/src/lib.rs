use thiserror::Error;

pub mod auth;
pub mod collections;
pub mod http;
pub mod models;
mod remote;
mod types;

pub use auth::{AuthClient, Session};
pub use http::HttpStore;
pub use remote::RemoteStore;
pub use types::TaskStatus;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    InvalidResponse(#[from] serde_json::Error),
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("No active session")]
    Unauthorized,
}
