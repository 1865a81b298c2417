//! Request-scoped database sessions.
//!
//! Every handler that touches the store takes a [`DbSession`]. It opens a
//! transaction when the request is extracted and is released on every exit
//! path: [`DbSession::commit`] on success, rollback when dropped otherwise.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::trace;

use crate::{db::DbPool, error::AppError};

pub struct DbSession {
    tx: Transaction<'static, Sqlite>,
}

impl DbSession {
    pub async fn begin(pool: &DbPool) -> Result<Self, AppError> {
        let tx = pool.begin().await?;
        trace!("session opened");
        Ok(Self { tx })
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        trace!("session committed");
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DbSession
where
    DbPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = DbPool::from_ref(state);
        Self::begin(&pool).await
    }
}
