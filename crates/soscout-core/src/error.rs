use thiserror::Error;

/// All the ways things can go wrong in soscout
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Bookmark store error: {0}")]
    StoreError(String),

    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("User {0} has not been fetched yet")]
    NotFetched(u64),

    #[error("User {0} is not bookmarked")]
    NotBookmarked(u64),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
