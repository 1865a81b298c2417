use axum::extract::FromRef;

use crate::db::DbPool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}
