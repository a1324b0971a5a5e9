use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::movie::Movie;
use crate::repository::{MovieRepository, ReadMovieRepository};

/// In-memory implementation of the repository contract.
///
/// Mirrors the insertion semantics of the document store: identifiers are
/// unique and an ordered batch stops at the first duplicate.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    movies: DashMap<String, Movie>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[async_trait]
impl ReadMovieRepository for InMemoryRepository {
    async fn get_movie(&self, id: &str) -> Result<Movie> {
        self.movies
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found(id))
    }
}

#[async_trait]
impl MovieRepository for InMemoryRepository {
    async fn insert_movies(&self, movies: &[Movie]) -> Result<usize> {
        if movies.is_empty() {
            return Err(StoreError::empty_batch());
        }

        for (position, movie) in movies.iter().enumerate() {
            match self.movies.entry(movie.id.clone()) {
                Entry::Occupied(_) => return Err(StoreError::duplicate_id(&movie.id, position)),
                Entry::Vacant(slot) => {
                    slot.insert(movie.clone());
                }
            }
        }

        debug!(count = movies.len(), "inserted movies in memory");
        Ok(movies.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str, year: i32, director: &str, genre: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            year,
            director: director.to_string(),
            genre: genre.to_string(),
        }
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie("1", "A", 2000, "X", "Drama"),
            movie("2", "B", 2001, "Y", "Comedy"),
        ]
    }

    #[tokio::test]
    async fn insert_then_get() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.insert_movies(&sample()).await.unwrap(), 2);

        let got = repo.get_movie("1").await.unwrap();
        assert_eq!(got, movie("1", "A", 2000, "X", "Drama"));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let repo = InMemoryRepository::new();
        repo.insert_movies(&sample()).await.unwrap();

        let err = repo.get_movie("3").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref msg) if msg.contains("'3'")));
    }

    #[tokio::test]
    async fn duplicate_does_not_overwrite() {
        let repo = InMemoryRepository::new();
        repo.insert_movies(&sample()).await.unwrap();

        let err = repo
            .insert_movies(&[movie("1", "Other", 1990, "Z", "Horror")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(repo.get_movie("1").await.unwrap().title, "A");
    }

    #[tokio::test]
    async fn ordered_insert_stops_at_first_duplicate() {
        let repo = InMemoryRepository::new();
        let batch = vec![
            movie("1", "A", 2000, "X", "Drama"),
            movie("1", "A again", 2000, "X", "Drama"),
            movie("2", "B", 2001, "Y", "Comedy"),
        ];

        let err = repo.insert_movies(&batch).await.unwrap_err();

        assert_eq!(err, StoreError::duplicate_id("1", 1));
        assert_eq!(repo.len(), 1);
        assert!(repo.get_movie("2").await.is_err());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let repo = InMemoryRepository::new();
        let err = repo.insert_movies(&[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(repo.is_empty());
    }
}
