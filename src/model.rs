use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Diesel requires us to define a custom mapping between the Rust enum
// and the database type, if we are not using string.
use crate::schema::*;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::{AsExpression, FromSqlRow};
use std::io::Write;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::CarStatusEnum)]
pub enum CarStatus {
    Available,
    Rented,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::RentalStatusEnum)]
pub enum RentalStatus {
    Ongoing,
    Completed,
}

//This is for postgres. For other databases the type might be different.
impl ToSql<sql_types::CarStatusEnum, Pg> for CarStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            CarStatus::Available => out.write_all(b"Available")?,
            CarStatus::Rented => out.write_all(b"Rented")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::CarStatusEnum, Pg> for CarStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"Available" => Ok(CarStatus::Available),
            b"Rented" => Ok(CarStatus::Rented),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::RentalStatusEnum, Pg> for RentalStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            RentalStatus::Ongoing => out.write_all(b"Ongoing")?,
            RentalStatus::Completed => out.write_all(b"Completed")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::RentalStatusEnum, Pg> for RentalStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"Ongoing" => Ok(RentalStatus::Ongoing),
            b"Completed" => Ok(RentalStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = cars)]
#[diesel(primary_key(car_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Car {
    pub car_id: i32,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub status: CarStatus,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCar {
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub status: CarStatus,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = customers)]
#[diesel(primary_key(customer_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Customer {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password_hash: String, // never leaves the process
}

impl Customer {
    pub fn to_publish_customer(&self) -> PublishCustomer {
        PublishCustomer {
            customer_id: self.customer_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishCustomer {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = rentals)]
#[diesel(primary_key(rental_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Rental {
    pub rental_id: i32,
    pub customer_id: i32,
    pub car_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: f64,
    pub status: RentalStatus,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRental {
    pub customer_id: i32,
    pub car_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: f64,
    pub status: RentalStatus,
}

/// Rental joined with the customer's name and the car's model, the shape
/// the admin listings return.
#[derive(Queryable, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub rental_id: i32,
    pub customer_id: i32,
    pub car_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: f64,
    pub status: RentalStatus,
    pub first_name: String,
    pub last_name: String,
    pub model: String,
}
