use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: i64,
    pub car_id: i64,
    pub start: i64,
    pub end: i64,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripInput {
    pub start: i64,
    pub end: i64,
    pub description: String,
}

/// A trip that passed validation. Only [`TripInput::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrip {
    start: i64,
    end: i64,
    description: String,
}

impl TripInput {
    pub fn validate(self) -> Result<NewTrip, AppError> {
        if self.end < self.start {
            return Err(AppError::BadTrip(format!(
                "Trip end before start (start={}, end={})",
                self.start, self.end
            )));
        }
        Ok(NewTrip {
            start: self.start,
            end: self.end,
            description: self.description,
        })
    }
}

impl NewTrip {
    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(start: i64, end: i64) -> TripInput {
        TripInput {
            start,
            end,
            description: "x".into(),
        }
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = input(10, 5).validate().unwrap_err();
        assert!(matches!(err, AppError::BadTrip(_)));
    }

    #[test]
    fn zero_length_trip_is_allowed() {
        let trip = input(7, 7).validate().unwrap();
        assert_eq!(trip.start(), 7);
        assert_eq!(trip.end(), 7);
    }

    #[test]
    fn car_id_is_not_taken_from_the_payload() {
        let parsed: TripInput = serde_json::from_str(
            r#"{"start": 1, "end": 2, "description": "d", "car_id": 99}"#,
        )
        .unwrap();
        let trip = parsed.validate().unwrap();
        assert_eq!(trip.description(), "d");
    }
}
