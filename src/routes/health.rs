use axum::{extract::State, routing::get, Router};

use crate::{db::DbPool, error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(db): State<DbPool>) -> Result<&'static str, AppError> {
    sqlx::query("SELECT 1").execute(&db).await?;
    Ok("ok")
}
