use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("invalid remote endpoint {endpoint:?}: {details}")]
    InvalidEndpoint { endpoint: String, details: String },
    #[error("failed to initialize async runtime: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("failed to initialize http client: {0}")]
    HttpClientInit(String),
}
