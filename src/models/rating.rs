use serde::{Deserialize, Serialize};

use crate::prediction::{RatingSet, RatingSetError};

/// One user's score for one movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub rating_id: u64,
    pub user_id: u64,
    pub movie_id: u64,
    pub score: u8,
}

impl Rating {
    /// Lowest score on the rating scale
    pub const MIN_SCORE: u8 = 1;
    /// Highest score on the rating scale
    pub const MAX_SCORE: u8 = 5;

    /// Whether `score` lies on the rating scale
    pub fn is_valid_score(score: u8) -> bool {
        (Self::MIN_SCORE..=Self::MAX_SCORE).contains(&score)
    }
}

/// Builds the predictor's view of one user's rating history
///
/// Every rating must belong to `user_id`; a second rating for the same movie is
/// rejected rather than silently dropped.
pub fn to_rating_set(user_id: u64, ratings: &[Rating]) -> Result<RatingSet, RatingSetError> {
    debug_assert!(ratings.iter().all(|r| r.user_id == user_id));

    RatingSet::from_scores(
        user_id,
        ratings.iter().map(|r| (r.movie_id, f64::from(r.score))),
    )
}
