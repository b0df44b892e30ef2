use std::collections::{BTreeMap, BTreeSet, HashMap};

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, NewMovie, NewUser, Rating, User},
};

use super::{RatingStore, Seed};

/// In-memory rating store
///
/// Nothing survives a restart; seed it with [`MemoryStore::from_seed`] to start
/// from a known catalog.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    users: BTreeMap<u64, User>,
    movies: BTreeMap<u64, Movie>,
    ratings: BTreeMap<u64, Rating>,
    /// (user, movie) -> rating id
    rating_keys: HashMap<(u64, u64), u64>,
    ratings_by_user: HashMap<u64, BTreeSet<u64>>,
    ratings_by_movie: HashMap<u64, BTreeSet<u64>>,
    next_user_id: u64,
    next_movie_id: u64,
    next_rating_id: u64,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the users, movies and ratings of a fixture
    ///
    /// Users and movies keep their ids; ratings are numbered in fixture order.
    pub fn from_seed(seed: Seed) -> AppResult<Self> {
        let mut inner = StoreInner::default();

        for user in seed.users {
            if inner.users.contains_key(&user.user_id) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate user id {} in seed",
                    user.user_id
                )));
            }
            if let Some(email) = user.email.as_deref() {
                if inner.users.values().any(|u| u.has_email(email)) {
                    return Err(AppError::InvalidInput(format!(
                        "Duplicate email {} in seed",
                        email
                    )));
                }
            }
            inner.next_user_id = inner.next_user_id.max(user.user_id);
            inner.users.insert(user.user_id, user);
        }

        for movie in seed.movies {
            if inner.movies.contains_key(&movie.movie_id) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate movie id {} in seed",
                    movie.movie_id
                )));
            }
            inner.next_movie_id = inner.next_movie_id.max(movie.movie_id);
            inner.movies.insert(movie.movie_id, movie);
        }

        for rating in seed.ratings {
            if !Rating::is_valid_score(rating.score) {
                return Err(AppError::InvalidInput(format!(
                    "Score {} for user {} on movie {} is outside {}..={}",
                    rating.score,
                    rating.user_id,
                    rating.movie_id,
                    Rating::MIN_SCORE,
                    Rating::MAX_SCORE
                )));
            }
            if inner.rating_keys.contains_key(&(rating.user_id, rating.movie_id)) {
                return Err(AppError::InvalidInput(format!(
                    "User {} rated movie {} more than once in seed",
                    rating.user_id, rating.movie_id
                )));
            }
            inner.upsert(rating.user_id, rating.movie_id, rating.score)?;
        }

        tracing::info!(
            users = inner.users.len(),
            movies = inner.movies.len(),
            ratings = inner.ratings.len(),
            "Seeded rating store"
        );

        Ok(Self {
            inner: RwLock::new(inner),
        })
    }
}

/// Advances an id counter, failing once the id space is used up
fn next_id(counter: &mut u64, kind: &str) -> AppResult<u64> {
    let id = counter
        .checked_add(1)
        .ok_or_else(|| AppError::Internal(format!("No {} ids left to assign", kind)))?;
    *counter = id;
    Ok(id)
}

impl StoreInner {
    fn upsert(&mut self, user_id: u64, movie_id: u64, score: u8) -> AppResult<(Rating, bool)> {
        if !self.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User {}", user_id)));
        }
        if !self.movies.contains_key(&movie_id) {
            return Err(AppError::NotFound(format!("Movie {}", movie_id)));
        }

        if let Some(rating_id) = self.rating_keys.get(&(user_id, movie_id)) {
            let rating = self.ratings.get_mut(rating_id).ok_or_else(|| {
                AppError::Internal(format!("Rating index points at missing rating {}", rating_id))
            })?;
            rating.score = score;
            return Ok((*rating, false));
        }

        let rating = Rating {
            rating_id: next_id(&mut self.next_rating_id, "rating")?,
            user_id,
            movie_id,
            score,
        };

        self.ratings.insert(rating.rating_id, rating);
        self.rating_keys.insert((user_id, movie_id), rating.rating_id);
        self.ratings_by_user
            .entry(user_id)
            .or_default()
            .insert(rating.rating_id);
        self.ratings_by_movie
            .entry(movie_id)
            .or_default()
            .insert(rating.rating_id);

        Ok((rating, true))
    }

    fn collect_ratings(&self, rating_ids: Option<&BTreeSet<u64>>) -> Vec<Rating> {
        rating_ids
            .into_iter()
            .flatten()
            .filter_map(|id| self.ratings.get(id).copied())
            .collect()
    }
}

#[async_trait::async_trait]
impl RatingStore for MemoryStore {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn get_user(&self, user_id: u64) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&user_id).cloned())
    }

    async fn add_user(&self, new_user: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        if let Some(email) = new_user.email.as_deref() {
            if inner.users.values().any(|u| u.has_email(email)) {
                return Err(AppError::Conflict(format!(
                    "A user with email {} already exists",
                    email
                )));
            }
        }

        let user_id = next_id(&mut inner.next_user_id, "user")?;
        let user = User::new(user_id, new_user);
        inner.users.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        let inner = self.inner.read().await;
        let mut movies: Vec<Movie> = inner.movies.values().cloned().collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title).then(a.movie_id.cmp(&b.movie_id)));
        Ok(movies)
    }

    async fn get_movie(&self, movie_id: u64) -> AppResult<Option<Movie>> {
        let inner = self.inner.read().await;
        Ok(inner.movies.get(&movie_id).cloned())
    }

    async fn add_movie(&self, new_movie: NewMovie) -> AppResult<Movie> {
        let mut inner = self.inner.write().await;
        let movie_id = next_id(&mut inner.next_movie_id, "movie")?;
        let movie = Movie::new(movie_id, new_movie);
        inner.movies.insert(movie.movie_id, movie.clone());
        Ok(movie)
    }

    async fn user_ratings(&self, user_id: u64) -> AppResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        Ok(inner.collect_ratings(inner.ratings_by_user.get(&user_id)))
    }

    async fn movie_ratings(&self, movie_id: u64) -> AppResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        Ok(inner.collect_ratings(inner.ratings_by_movie.get(&movie_id)))
    }

    async fn upsert_rating(
        &self,
        user_id: u64,
        movie_id: u64,
        score: u8,
    ) -> AppResult<(Rating, bool)> {
        let mut inner = self.inner.write().await;
        inner.upsert(user_id, movie_id, score)
    }
}
