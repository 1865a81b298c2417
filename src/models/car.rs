use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::trip::Trip;

pub const DEFAULT_FUEL: &str = "electric";
pub const DEFAULT_TRANSMISSION: &str = "auto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub size: String,
    pub fuel: String,
    pub doors: i64,
    pub transmission: String,
    #[sqlx(skip)]
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// Client payload for creating or replacing a car.
///
/// `fuel` and `transmission` fall back to their defaults when absent or
/// `null`, on update as well as on create.
#[derive(Debug, Clone, Deserialize)]
pub struct CarInput {
    pub size: String,
    #[serde(default)]
    pub fuel: Option<String>,
    pub doors: i64,
    #[serde(default)]
    pub transmission: Option<String>,
}

/// A car record with defaults resolved, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub size: String,
    pub fuel: String,
    pub doors: i64,
    pub transmission: String,
}

impl From<CarInput> for NewCar {
    fn from(input: CarInput) -> Self {
        Self {
            size: input.size,
            fuel: input.fuel.unwrap_or_else(|| DEFAULT_FUEL.to_string()),
            doors: input.doors,
            transmission: input
                .transmission
                .unwrap_or_else(|| DEFAULT_TRANSMISSION.to_string()),
        }
    }
}

/// Query filters for listing cars. Both filters apply together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarFilter {
    pub size: Option<String>,
    pub doors: Option<i64>,
}

impl CarFilter {
    /// An empty `size` matches every car, like an absent one.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref().filter(|size| !size.is_empty())
    }

    /// `doors=0` is a no-op threshold and is dropped.
    pub fn min_doors(&self) -> Option<i64> {
        self.doors.filter(|doors| *doors != 0)
    }
}
