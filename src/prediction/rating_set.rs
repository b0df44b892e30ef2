use std::collections::BTreeMap;

use thiserror::Error;

/// Identifier of a user whose ratings feed the predictor
pub type UserId = u64;

/// Identifier of a rated item (a movie)
pub type ItemId = u64;

/// Rejected rating input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingSetError {
    #[error("Invalid rating input: user {user_id} has a non-finite score for item {item_id}")]
    NonFiniteScore { user_id: UserId, item_id: ItemId },

    #[error("Invalid rating input: user {user_id} rated item {item_id} more than once")]
    DuplicateRating { user_id: UserId, item_id: ItemId },
}

/// All scores given by one user, keyed by item
///
/// Items are kept in ascending id order so that pairing two sets always visits
/// co-rated items in the same sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSet {
    user_id: UserId,
    scores: BTreeMap<ItemId, f64>,
}

impl RatingSet {
    /// Creates an empty rating set for a user
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            scores: BTreeMap::new(),
        }
    }

    /// Builds a rating set from `(item, score)` pairs
    pub fn from_scores<I>(user_id: UserId, scores: I) -> Result<Self, RatingSetError>
    where
        I: IntoIterator<Item = (ItemId, f64)>,
    {
        let mut set = Self::new(user_id);
        for (item_id, score) in scores {
            set.insert(item_id, score)?;
        }
        Ok(set)
    }

    /// Records a score for an item
    ///
    /// Fails on NaN or infinite scores and on a second score for the same item.
    pub fn insert(&mut self, item_id: ItemId, score: f64) -> Result<(), RatingSetError> {
        if !score.is_finite() {
            return Err(RatingSetError::NonFiniteScore {
                user_id: self.user_id,
                item_id,
            });
        }

        if self.scores.contains_key(&item_id) {
            return Err(RatingSetError::DuplicateRating {
                user_id: self.user_id,
                item_id,
            });
        }

        self.scores.insert(item_id, score);
        Ok(())
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Score this user gave to an item, if any
    pub fn get(&self, item_id: ItemId) -> Option<f64> {
        self.scores.get(&item_id).copied()
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.scores.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates `(item, score)` in ascending item order
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.scores.iter().map(|(item_id, score)| (*item_id, *score))
    }
}
