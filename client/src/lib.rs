pub use crate::params::*;
pub use crate::responses::*;

pub mod params;
pub mod query;
pub mod responses;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Search terms cannot be empty")]
    EmptyTerm,
    #[error("'{0}' is a reserved operator word; quote it with a phrase to search for it")]
    ReservedWord(String),
    #[error("Word '{0}' cannot contain whitespace or quotes; use a phrase instead")]
    InvalidWord(String),
    #[error("Phrase '{0}' cannot contain double quotes")]
    InvalidPhrase(String),
    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Response is missing the {0} header")]
    MissingHeader(&'static str),
    #[error("Response header {name} has invalid value '{value}'")]
    InvalidHeader { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
