use crate::{
    db::RatingStore,
    error::{AppError, AppResult},
    models::{MovieHistory, Rating, UserHistory},
};

/// Fetches a user and their rating history
pub async fn user_history(store: &dyn RatingStore, user_id: u64) -> AppResult<UserHistory> {
    let user = store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
    let ratings = store.user_ratings(user_id).await?;

    Ok(UserHistory { user, ratings })
}

/// Fetches a movie, its rating history and mean score
pub async fn movie_history(store: &dyn RatingStore, movie_id: u64) -> AppResult<MovieHistory> {
    let movie = store
        .get_movie(movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", movie_id)))?;
    let ratings = store.movie_ratings(movie_id).await?;

    Ok(MovieHistory::new(movie, ratings))
}

/// Records a user's score for a movie
///
/// Returns the stored rating and whether it was newly created (as opposed to
/// replacing the user's earlier score).
pub async fn rate_movie(
    store: &dyn RatingStore,
    user_id: u64,
    movie_id: u64,
    score: u8,
) -> AppResult<(Rating, bool)> {
    if !Rating::is_valid_score(score) {
        return Err(AppError::InvalidInput(format!(
            "Score must be between {} and {}, got {}",
            Rating::MIN_SCORE,
            Rating::MAX_SCORE,
            score
        )));
    }

    let (rating, created) = store.upsert_rating(user_id, movie_id, score).await?;

    tracing::info!(
        user_id,
        movie_id,
        score,
        rating_id = rating.rating_id,
        created,
        "Rating stored"
    );

    Ok((rating, created))
}
