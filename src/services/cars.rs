//! Storage mapping for cars and their trips.
//!
//! Every function runs on a borrowed connection so callers decide the
//! transaction scope; nothing here commits.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::{
        car::{Car, CarFilter, NewCar},
        trip::{Trip, TripInput},
    },
};

const CAR_COLUMNS: &str = "SELECT id, size, fuel, doors, transmission FROM cars";
const TRIP_COLUMNS: &str = r#"SELECT id, car_id, start, "end", description FROM trips"#;

fn push_filter<'a>(query: &mut QueryBuilder<'a, Sqlite>, filter: &'a CarFilter) {
    query.push(" WHERE 1 = 1");
    if let Some(size) = filter.size() {
        query.push(" AND size = ").push_bind(size);
    }
    if let Some(doors) = filter.min_doors() {
        query.push(" AND doors >= ").push_bind(doors);
    }
}

pub async fn list_cars(
    conn: &mut SqliteConnection,
    filter: &CarFilter,
) -> Result<Vec<Car>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(CAR_COLUMNS);
    push_filter(&mut query, filter);
    query.push(" ORDER BY id");
    let mut cars: Vec<Car> = query.build_query_as().fetch_all(&mut *conn).await?;
    if cars.is_empty() {
        return Ok(cars);
    }

    let mut query = QueryBuilder::<Sqlite>::new(TRIP_COLUMNS);
    query.push(" WHERE car_id IN (SELECT id FROM cars");
    push_filter(&mut query, filter);
    query.push(") ORDER BY id");
    let trips: Vec<Trip> = query.build_query_as().fetch_all(&mut *conn).await?;

    let mut by_car: HashMap<i64, Vec<Trip>> = HashMap::new();
    for trip in trips {
        by_car.entry(trip.car_id).or_default().push(trip);
    }
    for car in &mut cars {
        car.trips = by_car.remove(&car.id).unwrap_or_default();
    }
    debug!(count = cars.len(), ?filter, "listed cars");
    Ok(cars)
}

pub async fn get_car(conn: &mut SqliteConnection, id: i64) -> Result<Car, AppError> {
    let mut car: Car = sqlx::query_as(&format!("{CAR_COLUMNS} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AppError::CarNotFound(id))?;
    car.trips = sqlx::query_as(&format!("{TRIP_COLUMNS} WHERE car_id = ?1 ORDER BY id"))
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(car)
}

pub async fn create_car(conn: &mut SqliteConnection, car: NewCar) -> Result<Car, AppError> {
    let id = sqlx::query("INSERT INTO cars (size, fuel, doors, transmission) VALUES (?1, ?2, ?3, ?4)")
        .bind(&car.size)
        .bind(&car.fuel)
        .bind(car.doors)
        .bind(&car.transmission)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    info!(car_id = id, size = %car.size, doors = car.doors, "car created");
    Ok(Car {
        id,
        size: car.size,
        fuel: car.fuel,
        doors: car.doors,
        transmission: car.transmission,
        trips: Vec::new(),
    })
}

/// Replaces every attribute of car `id`; its trips are left alone.
pub async fn update_car(
    conn: &mut SqliteConnection,
    id: i64,
    car: NewCar,
) -> Result<Car, AppError> {
    let updated = sqlx::query(
        "UPDATE cars SET size = ?1, fuel = ?2, doors = ?3, transmission = ?4 WHERE id = ?5",
    )
    .bind(&car.size)
    .bind(&car.fuel)
    .bind(car.doors)
    .bind(&car.transmission)
    .bind(id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    if updated == 0 {
        return Err(AppError::CarNotFound(id));
    }
    info!(car_id = id, "car updated");
    get_car(conn, id).await
}

/// Deletes car `id`. Its trips go with it through `ON DELETE CASCADE`.
pub async fn delete_car(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM cars WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(AppError::CarNotFound(id));
    }
    info!(car_id = id, "car deleted");
    Ok(())
}

/// Appends a trip to car `car_id`.
///
/// An unknown car reports `CarNotFound` even when the trip itself is also
/// invalid. A valid trip is written by a single `INSERT ... WHERE EXISTS` so
/// the first statement of the session takes the write lock; a read followed
/// by a write would let two sessions deadlock on the lock upgrade.
pub async fn add_trip(
    conn: &mut SqliteConnection,
    car_id: i64,
    input: TripInput,
) -> Result<Trip, AppError> {
    let trip = match input.validate() {
        Ok(trip) => trip,
        Err(err) => {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM cars WHERE id = ?1")
                .bind(car_id)
                .fetch_optional(&mut *conn)
                .await?;
            return Err(match exists {
                Some(_) => err,
                None => AppError::CarNotFound(car_id),
            });
        }
    };

    let inserted = sqlx::query(
        r#"INSERT INTO trips (car_id, start, "end", description)
        SELECT ?1, ?2, ?3, ?4 WHERE EXISTS (SELECT 1 FROM cars WHERE id = ?1)"#,
    )
    .bind(car_id)
    .bind(trip.start())
    .bind(trip.end())
    .bind(trip.description())
    .execute(&mut *conn)
    .await?;
    if inserted.rows_affected() == 0 {
        return Err(AppError::CarNotFound(car_id));
    }
    let id = inserted.last_insert_rowid();
    info!(car_id, trip_id = id, "trip added");
    Ok(Trip {
        id,
        car_id,
        start: trip.start(),
        end: trip.end(),
        description: trip.description().to_string(),
    })
}
