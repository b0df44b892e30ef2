use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::models::{Movie, User};

/// Catalog fixture loaded into a fresh store
///
/// ```json
/// {
///   "users": [{"user_id": 1, "email": "ada@example.com", "age": 36}],
///   "movies": [{"movie_id": 1, "title": "Heat (1995)", "released_on": "1995-12-15"}],
///   "ratings": [{"user_id": 1, "movie_id": 1, "score": 5}]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub ratings: Vec<SeedRating>,
}

/// A rating in a fixture; ids are assigned on load
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRating {
    pub user_id: u64,
    pub movie_id: u64,
    pub score: u8,
}

impl Seed {
    /// Reads a fixture from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("Invalid seed file {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
