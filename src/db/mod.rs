//! Rating storage
//!
//! The predictor never touches storage itself; handlers and services go through
//! [`RatingStore`] to materialize users, movies and rating histories, then hand
//! plain values to [`crate::prediction`].

use crate::{
    error::AppResult,
    models::{Movie, NewMovie, NewUser, Rating, User},
};

pub mod memory;
pub mod seed;

pub use memory::MemoryStore;
pub use seed::Seed;

/// Data access for users, movies and ratings
///
/// Histories are returned ordered by rating id, i.e. in submission order.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    /// All users, ordered by id
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn get_user(&self, user_id: u64) -> AppResult<Option<User>>;

    /// Registers a user
    ///
    /// Fails with `Conflict` when another user already has the same email.
    async fn add_user(&self, new_user: NewUser) -> AppResult<User>;

    /// All movies, ordered by title
    async fn list_movies(&self) -> AppResult<Vec<Movie>>;

    async fn get_movie(&self, movie_id: u64) -> AppResult<Option<Movie>>;

    async fn add_movie(&self, new_movie: NewMovie) -> AppResult<Movie>;

    /// Every rating submitted by a user
    async fn user_ratings(&self, user_id: u64) -> AppResult<Vec<Rating>>;

    /// Every rating a movie received
    async fn movie_ratings(&self, movie_id: u64) -> AppResult<Vec<Rating>>;

    /// Stores a user's score for a movie, replacing any earlier score
    ///
    /// Returns the stored rating and whether it was newly created. A replaced
    /// rating keeps its id. Fails with `NotFound` for an unknown user or movie.
    async fn upsert_rating(&self, user_id: u64, movie_id: u64, score: u8)
        -> AppResult<(Rating, bool)>;
}
