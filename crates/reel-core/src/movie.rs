use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// A movie record.
///
/// The identifier doubles as the stored document's primary key, so it is
/// serialized as `_id` both in JSON input and in stored documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genre: String,
}

impl Movie {
    /// Decodes a JSON array of movies.
    ///
    /// The batch is all-or-nothing: a single malformed element fails the
    /// whole decode.
    pub fn parse_batch(input: &str) -> Result<Vec<Movie>> {
        serde_json::from_str(input)
            .map_err(|e| StoreError::Decode(format!("invalid movie batch: {e}")))
    }
}
