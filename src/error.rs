use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarvardError {
    #[error("invalid classification name: {0}")]
    InvalidClassification(String),

    #[error("missing API key: set HARVARD_API_KEY or add \"api_key\" to harvard-artifacts.json")]
    MissingApiKey,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("catalog request failed: {0}")]
    CatalogHttp(String),

    #[error("catalog endpoint returned status {status}: {message}")]
    CatalogStatus { status: u16, message: String },

    #[error("object request failed: {0}")]
    ObjectHttp(String),

    #[error("object endpoint returned status {status}: {message}")]
    ObjectStatus { status: u16, message: String },

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("unknown query: {0}")]
    UnknownQuery(String),

    #[error("query {0} requires an artifact id (pass --artifact-id)")]
    MissingArtifactId(String),
}

impl From<rusqlite::Error> for HarvardError {
    fn from(err: rusqlite::Error) -> Self {
        HarvardError::Storage(err.to_string())
    }
}
