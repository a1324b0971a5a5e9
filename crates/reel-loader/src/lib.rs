//! Batch import of movie records into a repository.

pub mod import;

pub use import::{import, ImportError};
