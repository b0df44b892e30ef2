use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id::{make_span_with_request_id, request_id_header, UuidRequestId};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route("/users", get(handlers::get_users).post(handlers::create_user))
        .route("/users/:user_id", get(handlers::get_user))
        .route(
            "/users/:user_id/similarity/:other_user_id",
            get(handlers::get_similarity),
        )
        // Movies
        .route("/movies", get(handlers::get_movies).post(handlers::create_movie))
        .route("/movies/:movie_id", get(handlers::get_movie))
        .route("/movies/:movie_id/ratings", post(handlers::rate_movie))
        .route("/movies/:movie_id/prediction", get(handlers::get_prediction))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::new(request_id_header())),
        )
        .with_state(state)
}
