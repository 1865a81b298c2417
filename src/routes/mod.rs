pub mod cars;
pub mod health;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(health::router())
        .nest("/api/cars", cars::router())
        .layer(ServiceBuilder::new().layer(trace))
        .with_state(state)
}
