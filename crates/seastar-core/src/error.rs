pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("envelope JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
