use thiserror::Error;

/// Failures of the durable save store
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("state document could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures decoding or applying a cross-origin migration blob
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration link has no `s` parameter")]
    MissingBlob,

    #[error("migration blob is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("migration blob is not a valid progress document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Rejections of a user-supplied word list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordlistError {
    #[error("word list is empty")]
    Empty,

    #[error("`{word}` is not a word (letters a-z only)")]
    InvalidWord { word: String },

    #[error("no bundled word list named `{0}`")]
    UnknownPreset(String),
}

/// Failures loading or saving the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
