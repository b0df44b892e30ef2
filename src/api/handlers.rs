use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        Movie, MovieHistory, NewMovie, NewUser, PredictionResponse, RateMovieRequest, Rating,
        SimilarityResponse, User, UserHistory,
    },
    services::{ratings, recommendations},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub user_id: u64,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List all users
pub async fn get_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.store.add_user(request).await?;
    tracing::info!(user_id = user.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user with their rating history
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> AppResult<Json<UserHistory>> {
    Ok(Json(ratings::user_history(state.store.as_ref(), user_id).await?))
}

/// Similarity between two users' tastes
pub async fn get_similarity(
    State(state): State<AppState>,
    Path((user_id, other_user_id)): Path<(u64, u64)>,
) -> AppResult<Json<SimilarityResponse>> {
    let similarity =
        recommendations::user_similarity(state.store.as_ref(), user_id, other_user_id).await?;

    Ok(Json(SimilarityResponse {
        user_id,
        other_user_id,
        similarity,
    }))
}

/// List all movies, ordered by title
pub async fn get_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.store.list_movies().await?))
}

/// Add a movie to the catalog
pub async fn create_movie(
    State(state): State<AppState>,
    Json(request): Json<NewMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Movie title must not be empty".to_string()));
    }

    let movie = state.store.add_movie(request).await?;
    tracing::info!(movie_id = movie.movie_id, title = %movie.title, "Movie added");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Get a movie with its rating history
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieHistory>> {
    Ok(Json(ratings::movie_history(state.store.as_ref(), movie_id).await?))
}

/// Rate a movie, replacing the user's earlier score if any
pub async fn rate_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
    Json(request): Json<RateMovieRequest>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let (rating, created) =
        ratings::rate_movie(state.store.as_ref(), request.user_id, movie_id, request.score).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(rating)))
}

/// Predict a user's score for a movie
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
    Query(query): Query<PredictionQuery>,
) -> AppResult<Json<PredictionResponse>> {
    let outcome = recommendations::predict_rating(
        state.store.as_ref(),
        query.user_id,
        movie_id,
        state.max_candidate_neighbors,
    )
    .await?;

    Ok(Json(PredictionResponse {
        user_id: query.user_id,
        movie_id,
        outcome,
    }))
}
