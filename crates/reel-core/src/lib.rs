//! Core types and traits for the reel movie loader.
//!
//! This crate provides the record model, the error taxonomy and the
//! repository contract shared by the storage backends and the loader.

pub mod error;
pub mod movie;
pub mod repository;

pub use error::{Result, StoreError};
pub use movie::Movie;
pub use repository::memory::InMemoryRepository;
pub use repository::{MovieRepository, ReadMovieRepository};
