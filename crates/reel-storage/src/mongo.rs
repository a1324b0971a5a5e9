use async_trait::async_trait;
use mongodb::bson::{self, doc, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database};
use reel_core::{Movie, MovieRepository, ReadMovieRepository, Result, StoreError};
use tracing::{debug, info, trace, warn};

/// Collection holding every movie document.
pub const MOVIES_COLLECTION: &str = "movies";

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB implementation of the repository contract.
///
/// Both operations forward directly to the driver: a batch goes out as a
/// single ordered `insertMany`, a lookup is a `findOne` on `_id`.
/// Uniqueness of identifiers is left to the `_id` index of the collection.
#[derive(Debug, Clone)]
pub struct MongoRepository {
    database: Database,
}

impl MongoRepository {
    /// Creates a repository bound to an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Opens a session to `uri` and binds it to `database`.
    ///
    /// The session is only handed out after a `ping` succeeded.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| map_connection_error("connect", e))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_connection_error("ping", e))?;

        info!(database, "connected to MongoDB");
        Ok(Self::new(client.database(database)))
    }

    /// Returns a reference to the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn movies(&self) -> Collection<Movie> {
        self.database.collection(MOVIES_COLLECTION)
    }

    fn documents(&self) -> Collection<Document> {
        self.database.collection(MOVIES_COLLECTION)
    }
}

fn map_connection_error(operation: &str, err: mongodb::error::Error) -> StoreError {
    StoreError::Connection(format!("{operation}: {err}"))
}

fn map_insert_error(movies: &[Movie], err: mongodb::error::Error) -> StoreError {
    if let ErrorKind::InsertMany(failure) = err.kind.as_ref() {
        let duplicate = failure
            .write_errors
            .iter()
            .flatten()
            .find(|write_error| write_error.code == DUPLICATE_KEY_CODE);

        let duplicate = duplicate.and_then(|e| movies.get(e.index).map(|movie| (e.index, movie)));
        if let Some((position, movie)) = duplicate {
            return StoreError::duplicate_id(&movie.id, position);
        }
    }

    StoreError::Persistence(format!("insert_movies: {err}"))
}

fn map_lookup_error(id: &str, err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::BsonDeserialization(_) => StoreError::Decode(format!("get_movie '{id}': {err}")),
        _ => StoreError::Connection(format!("get_movie '{id}': {err}")),
    }
}

#[async_trait]
impl ReadMovieRepository for MongoRepository {
    async fn get_movie(&self, id: &str) -> Result<Movie> {
        trace!(id, "fetching movie from MongoDB");

        let document = self
            .documents()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| {
                warn!(id, error = %e, "MongoDB error on find");
                map_lookup_error(id, e)
            })?
            .ok_or_else(|| StoreError::not_found(id))?;

        bson::from_document::<Movie>(document).map_err(|e| {
            warn!(id, error = %e, "stored document is not a movie");
            StoreError::Decode(format!("get_movie '{id}': {e}"))
        })
    }
}

#[async_trait]
impl MovieRepository for MongoRepository {
    async fn insert_movies(&self, movies: &[Movie]) -> Result<usize> {
        if movies.is_empty() {
            return Err(StoreError::empty_batch());
        }

        trace!(count = movies.len(), "inserting movies into MongoDB");

        let result = self.movies().insert_many(movies).await.map_err(|e| {
            warn!(error = %e, "MongoDB error on insert");
            map_insert_error(movies, e)
        })?;

        debug!(count = result.inserted_ids.len(), "inserted movies");
        Ok(result.inserted_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_rejects_malformed_uri() {
        let err = MongoRepository::connect("not-a-mongodb-uri", "testdb")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Connection(ref msg) if msg.starts_with("connect")));
    }

    #[tokio::test]
    async fn connect_fails_when_ping_cannot_reach_server() {
        let err = MongoRepository::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
            "testdb",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Connection(ref msg) if msg.starts_with("ping")));
    }
}
