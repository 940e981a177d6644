use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, state::AppState};

pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/person/new", post(handlers::create_person))
        .route("/person/detail", get(handlers::show_person_by_query))
        .route("/person/detail/:person_id", get(handlers::show_person_by_id))
        .route("/person/:person_id", put(handlers::update_person))
}

pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/contact", post(handlers::contact))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_endpoint))
}
