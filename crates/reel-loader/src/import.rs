use reel_core::{Movie, MovieRepository, StoreError};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read input: {0}")]
    Input(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads a JSON array of movies from `input` and inserts it as one batch.
///
/// The whole batch is decoded before anything is sent to the repository,
/// so a malformed record never results in a partial import.
pub async fn import<R, I>(repository: &R, mut input: I) -> Result<usize, ImportError>
where
    R: MovieRepository + ?Sized,
    I: AsyncRead + Unpin,
{
    let mut raw = String::new();
    let read = input.read_to_string(&mut raw).await?;
    debug!(bytes = read, "read movie batch");

    let movies = Movie::parse_batch(&raw)?;
    info!(count = movies.len(), "decoded movie batch");

    let inserted = repository.insert_movies(&movies).await?;
    Ok(inserted)
}
