//! Car sharing service: cars, their trips, and a JSON API over SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
