use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{
        car::{Car, CarFilter, CarInput},
        trip::TripInput,
    },
    services::cars,
    session::DbSession,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
        .route("/:id/trips", post(add_trip))
}

async fn list_cars(
    mut session: DbSession,
    ApiQuery(filter): ApiQuery<CarFilter>,
) -> Result<Json<Vec<Car>>, AppError> {
    let found = cars::list_cars(session.conn(), &filter).await?;
    Ok(Json(found))
}

async fn get_car(
    mut session: DbSession,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Car>, AppError> {
    let car = cars::get_car(session.conn(), id).await?;
    Ok(Json(car))
}

async fn create_car(
    mut session: DbSession,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<impl IntoResponse, AppError> {
    let car = cars::create_car(session.conn(), input.into()).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    mut session: DbSession,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<Json<Car>, AppError> {
    let car = cars::update_car(session.conn(), id, input.into()).await?;
    session.commit().await?;
    Ok(Json(car))
}

async fn delete_car(
    mut session: DbSession,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    cars::delete_car(session.conn(), id).await?;
    session.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_trip(
    mut session: DbSession,
    ApiPath(car_id): ApiPath<i64>,
    ApiJson(input): ApiJson<TripInput>,
) -> Result<impl IntoResponse, AppError> {
    let trip = cars::add_trip(session.conn(), car_id, input).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(trip)))
}
