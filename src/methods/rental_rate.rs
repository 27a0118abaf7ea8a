//! Date and cost arithmetic for rentals. Everything here is pure; the
//! reservation workflows call it before and inside their transactions.

use chrono::NaiveDate;

use crate::helper_model::RentalError;

/// Parse an ISO calendar date (`YYYY-MM-DD`, no time-of-day).
pub fn parse_date(raw: &str) -> Result<NaiveDate, RentalError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| RentalError::InvalidDateRange)
}

/// Whole-day duration of a rental as plain calendar-day subtraction.
/// A range spanning less than one day is rejected; end == start counts
/// as zero days, not one.
pub fn rental_days(start_date: NaiveDate, end_date: NaiveDate) -> Result<i64, RentalError> {
    let days = (end_date - start_date).num_days();
    if days < 1 {
        return Err(RentalError::InvalidDateRange);
    }
    Ok(days)
}

/// Total cost of a rental: the daily rate snapshotted at booking time
/// times the whole-day duration. Later price changes on the car do not
/// touch rentals already written.
pub fn total_cost(price_per_day: f64, days: i64) -> f64 {
    price_per_day * days as f64
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    #[test]
    fn three_nights_at_fifty_costs_150() {
        let days = rental_days(date("2024-01-01"), date("2024-01-04")).unwrap();
        assert_eq!(days, 3);
        assert_eq!(total_cost(50.0, days), 150.0);
    }

    #[test]
    fn single_day_is_valid() {
        let days = rental_days(date("2024-02-28"), date("2024-02-29")).unwrap();
        assert_eq!(days, 1);
    }

    #[test]
    fn same_day_range_rejected() {
        let err = rental_days(date("2024-01-01"), date("2024-01-01"));
        assert!(matches!(err, Err(RentalError::InvalidDateRange)));
    }

    #[test]
    fn end_before_start_rejected() {
        let err = rental_days(date("2024-01-04"), date("2024-01-01"));
        assert!(matches!(err, Err(RentalError::InvalidDateRange)));
    }

    #[test]
    fn month_boundary_counts_calendar_days() {
        let days = rental_days(date("2023-12-30"), date("2024-01-02")).unwrap();
        assert_eq!(days, 3);
    }

    #[test]
    fn garbage_date_rejected() {
        assert!(matches!(
            parse_date("01/04/2024"),
            Err(RentalError::InvalidDateRange)
        ));
        assert!(matches!(
            parse_date("2024-13-40"),
            Err(RentalError::InvalidDateRange)
        ));
        assert!(matches!(parse_date(""), Err(RentalError::InvalidDateRange)));
    }
}
