use serde_derive::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

/// Body for `POST /api/v1/rental/new`. Dates travel as ISO `YYYY-MM-DD`
/// calendar dates, no time-of-day component.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewRentalRequest {
    pub car_id: i32,
    pub customer_id: i32,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RentalConfirmation {
    pub rental_id: i32,
    pub total_cost: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewCarRequest {
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
}

/// Body for `PUT /api/v1/car/update`. Deliberately has no status field:
/// only the reservation workflows move a car between Available and Rented.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdateCarRequest {
    pub car_id: i32,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
}

#[derive(Debug)]
pub enum RentalError {
    /// Dates do not parse, or the range spans less than one whole day.
    /// Rejected before any store interaction.
    InvalidDateRange,
    CarNotFound,
    CarUnavailable,
    /// The rental does not exist or is not `Ongoing`. A second completion
    /// attempt fails here cleanly instead of mutating the car again.
    InvalidOrCompletedRental,
    /// Transient store condition: pool checkout timeout, lock wait timeout,
    /// serialization failure, lost connection. Retry is safe because every
    /// workflow re-validates its preconditions under lock on each attempt.
    Busy,
    /// Anything else the store reports. Surfaced opaquely, never masked.
    Store(diesel::result::Error),
}

impl From<diesel::result::Error> for RentalError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;
        use diesel::result::Error as DieselError;
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _)
            | DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                RentalError::Busy
            }
            // Postgres reports deadlock_detected (40P01) and
            // lock_not_available (55P03) under DatabaseErrorKind::Unknown,
            // and diesel's error info carries no SQLSTATE, so those two are
            // classified on the server message.
            DieselError::DatabaseError(DatabaseErrorKind::Unknown, ref info)
                if is_lock_contention(info.message()) =>
            {
                RentalError::Busy
            }
            other => RentalError::Store(other),
        }
    }
}

fn is_lock_contention(message: &str) -> bool {
    message.contains("deadlock detected")
        || message.contains("lock timeout")
        || message.contains("could not obtain lock")
}

impl From<diesel::r2d2::PoolError> for RentalError {
    fn from(_: diesel::r2d2::PoolError) -> Self {
        RentalError::Busy
    }
}
