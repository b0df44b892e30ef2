use std::sync::Arc;

use crate::{
    config::Config,
    db::{MemoryStore, RatingStore, Seed},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RatingStore>,
    /// Cap on candidate neighbors per prediction
    pub max_candidate_neighbors: Option<usize>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state backed by an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Creates state backed by the given store
    pub fn with_store(store: Arc<dyn RatingStore>) -> Self {
        Self {
            store,
            max_candidate_neighbors: None,
        }
    }

    pub fn with_max_candidate_neighbors(mut self, max: Option<usize>) -> Self {
        self.max_candidate_neighbors = max;
        self
    }

    /// Builds state from configuration, loading the seed fixture if one is set
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = match &config.seed_file {
            Some(path) => {
                let seed = Seed::from_path(path)?;
                MemoryStore::from_seed(seed).map_err(|e| anyhow::anyhow!("Failed to seed store: {}", e))?
            }
            None => MemoryStore::new(),
        };

        Ok(Self::with_store(Arc::new(store))
            .with_max_candidate_neighbors(config.max_candidate_neighbors))
    }
}
