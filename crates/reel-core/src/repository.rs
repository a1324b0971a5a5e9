pub mod memory;

use crate::error::Result;
use crate::movie::Movie;
use async_trait::async_trait;

/// A read-only view of a movie repository.
#[async_trait]
pub trait ReadMovieRepository: Send + Sync + 'static {
    /// Retrieves the movie stored under `id`.
    ///
    /// Returns `Err(NotFound)` if no movie has this identifier and
    /// `Err(Decode)` if the stored document is not a valid movie.
    async fn get_movie(&self, id: &str) -> Result<Movie>;
}

#[async_trait]
pub trait MovieRepository: ReadMovieRepository {
    /// Inserts a batch of new movies in order, returning how many were stored.
    ///
    /// The batch must not be empty. Insertion stops at the first identifier
    /// that already exists; movies before it stay inserted.
    async fn insert_movies(&self, movies: &[Movie]) -> Result<usize>;
}
