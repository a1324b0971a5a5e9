pub mod mongo;

pub use mongo::{MongoRepository, MOVIES_COLLECTION};
pub use reel_core::{Movie, MovieRepository, ReadMovieRepository, Result, StoreError};
