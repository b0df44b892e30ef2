use std::time::{Duration, Instant};

use crate::{
    db::RatingStore,
    error::{AppError, AppResult},
    models::{to_rating_set, PredictionOutcome},
    prediction::{predict_with_support, similarity, Neighbor, RatingSet},
};

/// Predicts how a user would rate a movie
///
/// Users who already rated the movie get their own score back. Otherwise every
/// other rater of the movie is a candidate neighbor, taken in ascending user id
/// order and capped at `max_candidates` when set, and the collaborative
/// filtering predictor combines the ones whose taste correlates positively with
/// the user's.
pub async fn predict_rating(
    store: &dyn RatingStore,
    user_id: u64,
    movie_id: u64,
    max_candidates: Option<usize>,
) -> AppResult<PredictionOutcome> {
    let start = Instant::now();

    ensure_user(store, user_id).await?;
    if store.get_movie(movie_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Movie {}", movie_id)));
    }

    let own_ratings = store.user_ratings(user_id).await?;
    if let Some(own) = own_ratings.iter().find(|r| r.movie_id == movie_id) {
        tracing::debug!(user_id, movie_id, score = own.score, "Movie already rated");
        return Ok(PredictionOutcome::Rated { score: own.score });
    }
    let target = to_rating_set(user_id, &own_ratings)?;

    let mut rater_ids: Vec<u64> = store
        .movie_ratings(movie_id)
        .await?
        .into_iter()
        .map(|r| r.user_id)
        .filter(|&id| id != user_id)
        .collect();
    rater_ids.sort_unstable();
    rater_ids.dedup();

    if let Some(max) = max_candidates {
        if rater_ids.len() > max {
            tracing::debug!(
                movie_id,
                raters = rater_ids.len(),
                max,
                "Capping candidate neighbors"
            );
            rater_ids.truncate(max);
        }
    }

    let mut rater_sets: Vec<RatingSet> = Vec::with_capacity(rater_ids.len());
    for rater_id in rater_ids {
        let ratings = store.user_ratings(rater_id).await?;
        rater_sets.push(to_rating_set(rater_id, &ratings)?);
    }

    let neighbors: Vec<Neighbor<'_>> = rater_sets
        .iter()
        .filter_map(|set| Neighbor::for_item(set, movie_id))
        .collect();

    let outcome = match predict_with_support(&target, movie_id, &neighbors) {
        Some(prediction) => PredictionOutcome::Predicted {
            score: prediction.score,
            neighbors: prediction.neighbors,
        },
        None => PredictionOutcome::Unavailable,
    };

    tracing::info!(
        user_id,
        movie_id,
        candidates = neighbors.len(),
        outcome = ?outcome,
        processing_time_us = micros(start.elapsed()),
        "Prediction computed"
    );

    Ok(outcome)
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Taste similarity of two stored users, in `[-1.0, 1.0]`
pub async fn user_similarity(
    store: &dyn RatingStore,
    user_id: u64,
    other_user_id: u64,
) -> AppResult<f64> {
    ensure_user(store, user_id).await?;
    ensure_user(store, other_user_id).await?;

    let a = to_rating_set(user_id, &store.user_ratings(user_id).await?)?;
    let b = to_rating_set(other_user_id, &store.user_ratings(other_user_id).await?)?;

    Ok(similarity(&a, &b))
}

async fn ensure_user(store: &dyn RatingStore, user_id: u64) -> AppResult<()> {
    match store.get_user(user_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("User {}", user_id))),
    }
}
