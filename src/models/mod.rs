use serde::{Deserialize, Serialize};

pub mod movie;
pub mod rating;
pub mod user;

pub use movie::{Movie, NewMovie};
pub use rating::{to_rating_set, Rating};
pub use user::{NewUser, User};

/// Request to rate a movie on behalf of a user
#[derive(Debug, Deserialize)]
pub struct RateMovieRequest {
    pub user_id: u64,
    pub score: u8,
}

/// A user together with every rating they submitted
#[derive(Debug, Clone, Serialize)]
pub struct UserHistory {
    pub user: User,
    /// Ordered by rating id
    pub ratings: Vec<Rating>,
}

/// A movie together with every rating it received
#[derive(Debug, Clone, Serialize)]
pub struct MovieHistory {
    pub movie: Movie,
    /// Ordered by rating id
    pub ratings: Vec<Rating>,
    pub rating_count: usize,
    /// Mean score, absent when nobody rated the movie yet
    pub average_score: Option<f64>,
}

impl MovieHistory {
    pub fn new(movie: Movie, ratings: Vec<Rating>) -> Self {
        let rating_count = ratings.len();
        let average_score = if ratings.is_empty() {
            None
        } else {
            let total: u32 = ratings.iter().map(|r| u32::from(r.score)).sum();
            Some(f64::from(total) / rating_count as f64)
        };

        Self {
            movie,
            ratings,
            rating_count,
            average_score,
        }
    }
}

/// Similarity of two users' tastes
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResponse {
    pub user_id: u64,
    pub other_user_id: u64,
    pub similarity: f64,
}

/// What is known about a user's score for a movie
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// The user already rated the movie
    Rated { score: u8 },
    /// Estimated from similar users; not rounded or clamped
    Predicted { score: f64, neighbors: usize },
    /// No user with positive similarity rated the movie
    Unavailable,
}

/// Prediction of one user's score for one movie
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub user_id: u64,
    pub movie_id: u64,
    #[serde(flatten)]
    pub outcome: PredictionOutcome,
}
