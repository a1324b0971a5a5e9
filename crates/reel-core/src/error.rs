use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Connection(String),
    #[error("movie cannot be decoded: {0}")]
    Decode(String),
    #[error("movies cannot be persisted: {0}")]
    Persistence(String),
    #[error("movie not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// A batch insert rejected because `id` is already stored.
    pub fn duplicate_id(id: &str, position: usize) -> Self {
        StoreError::Persistence(format!(
            "insert_movies: duplicate id '{id}' at batch position {position}"
        ))
    }

    /// A batch insert called without any movie.
    pub fn empty_batch() -> Self {
        StoreError::Persistence("insert_movies: batch is empty".to_string())
    }

    pub fn not_found(id: &str) -> Self {
        StoreError::NotFound(format!("get_movie: no movie with id '{id}'"))
    }
}
