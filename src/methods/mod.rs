pub mod rental_rate;
pub mod reservation;
pub mod standard_replies;
