//! The reservation coordinator. Turning a car's availability into a rental
//! (and releasing it later) is the one place in this daemon where several
//! statements have to land together or not at all, so both workflows run
//! inside `db::run_in_transaction` and take their row locks with
//! `.for_update()`.
//!
//! Car lifecycle: Available --create_rental--> Rented --complete_rental-->
//! Available. There are no other transitions, and nothing here expires a
//! rental by date; completion is always caller-driven.

use diesel::prelude::*;

use crate::db::{self, PgPool};
use crate::helper_model::{
    NewCarRequest, NewRentalRequest, RentalConfirmation, RentalError, UpdateCarRequest,
};
use crate::methods::rental_rate;
use crate::model::{
    Car, CarStatus, Customer, NewCar, NewRental, PublishCustomer, Rental, RentalRecord,
    RentalStatus,
};

/// Books a car for a customer over a whole-day date range.
///
/// Dates are validated before any store interaction; availability and price
/// are read under an exclusive lock on the car row, so two concurrent calls
/// against the same car serialize and the loser sees the committed `Rented`
/// status. On any error the transaction rolls back and no write survives.
pub fn create_rental(
    pool: &PgPool,
    request: &NewRentalRequest,
) -> Result<RentalConfirmation, RentalError> {
    let start_date = rental_rate::parse_date(&request.start_date)?;
    let end_date = rental_rate::parse_date(&request.end_date)?;
    let days = rental_rate::rental_days(start_date, end_date)?;

    db::run_in_transaction(pool, |conn| {
        use crate::schema::cars::dsl as car_q;
        use crate::schema::rentals::dsl as rental_q;

        // Lock first, decide second. A waiter blocked here observes the
        // winner's committed status once the lock is released.
        let car = car_q::cars
            .filter(car_q::car_id.eq(request.car_id))
            .for_update()
            .get_result::<Car>(conn)
            .optional()?;
        let Some(car) = car else {
            return Err(RentalError::CarNotFound);
        };
        if car.status != CarStatus::Available {
            return Err(RentalError::CarUnavailable);
        }

        // Price comes from the locked row; the snapshot is what the rental
        // keeps even if the car's rate changes afterwards.
        let total_cost = rental_rate::total_cost(car.price_per_day, days);

        let new_rental = NewRental {
            customer_id: request.customer_id,
            car_id: request.car_id,
            start_date,
            end_date,
            total_cost,
            status: RentalStatus::Ongoing,
        };
        let rental = diesel::insert_into(rental_q::rentals)
            .values(&new_rental)
            .get_result::<Rental>(conn)?;

        diesel::update(car_q::cars.filter(car_q::car_id.eq(car.car_id)))
            .set(car_q::status.eq(CarStatus::Rented))
            .execute(conn)?;

        Ok(RentalConfirmation {
            rental_id: rental.rental_id,
            total_cost,
        })
    })
}

/// Marks a rental `Completed` and releases its car back into the pool.
///
/// A missing rental and an already-completed one fail the same way, so a
/// duplicate completion attempt is a clean error instead of flipping the
/// car's status a second time.
pub fn complete_rental(pool: &PgPool, wanted_rental_id: i32) -> Result<(), RentalError> {
    db::run_in_transaction(pool, |conn| {
        use crate::schema::cars::dsl as car_q;
        use crate::schema::rentals::dsl as rental_q;

        let rental = rental_q::rentals
            .filter(rental_q::rental_id.eq(wanted_rental_id))
            .for_update()
            .get_result::<Rental>(conn)
            .optional()?;
        let Some(rental) = rental else {
            return Err(RentalError::InvalidOrCompletedRental);
        };
        if rental.status != RentalStatus::Ongoing {
            return Err(RentalError::InvalidOrCompletedRental);
        }

        diesel::update(rental_q::rentals.filter(rental_q::rental_id.eq(rental.rental_id)))
            .set(rental_q::status.eq(RentalStatus::Completed))
            .execute(conn)?;

        let cars_updated = diesel::update(car_q::cars.filter(car_q::car_id.eq(rental.car_id)))
            .set(car_q::status.eq(CarStatus::Available))
            .execute(conn)?;
        if cars_updated != 1 {
            // An Ongoing rental must reference an existing car. Abort the
            // whole completion instead of committing half of it.
            log::error!(
                "rental {} references missing car {}",
                rental.rental_id,
                rental.car_id
            );
            return Err(RentalError::Store(diesel::result::Error::NotFound));
        }

        Ok(())
    })
}

/// Cars currently open for booking, cheapest first, car id breaking ties.
/// Plain read at the store's default isolation; every booking decision
/// re-reads under lock anyway.
pub fn list_available_cars(pool: &PgPool) -> Result<Vec<Car>, RentalError> {
    use crate::schema::cars::dsl::*;
    let mut conn = pool.get()?;
    let list = cars
        .filter(status.eq(CarStatus::Available))
        .order((price_per_day.asc(), car_id.asc()))
        .load::<Car>(&mut conn)?;
    Ok(list)
}

/// The whole fleet, newest first. Admin view.
pub fn list_all_cars(pool: &PgPool) -> Result<Vec<Car>, RentalError> {
    use crate::schema::cars::dsl::*;
    let mut conn = pool.get()?;
    let list = cars.order(car_id.desc()).load::<Car>(&mut conn)?;
    Ok(list)
}

/// Adds a car to the fleet. New cars always start `Available`.
pub fn add_car(pool: &PgPool, request: &NewCarRequest) -> Result<Car, RentalError> {
    use crate::schema::cars::dsl::*;
    let new_car = NewCar {
        model: request.model.clone(),
        year: request.year,
        price_per_day: request.price_per_day,
        status: CarStatus::Available,
    };
    let mut conn = pool.get()?;
    let car = diesel::insert_into(cars)
        .values(&new_car)
        .get_result::<Car>(&mut conn)?;
    Ok(car)
}

/// Updates a car's listing details. Status is off limits here: only the
/// reservation workflows move a car between Available and Rented. Rentals
/// already written keep the cost snapshotted when they were booked.
pub fn update_car(pool: &PgPool, request: &UpdateCarRequest) -> Result<Car, RentalError> {
    use crate::schema::cars::dsl::*;
    let mut conn = pool.get()?;
    let car = diesel::update(cars.filter(car_id.eq(request.car_id)))
        .set((
            model.eq(request.model.clone()),
            year.eq(request.year),
            price_per_day.eq(request.price_per_day),
        ))
        .get_result::<Car>(&mut conn)
        .optional()?;
    car.ok_or(RentalError::CarNotFound)
}

/// Removes a car from the fleet. A car with rental history trips the FK
/// constraint and surfaces as a store fault.
pub fn delete_car(pool: &PgPool, wanted_car_id: i32) -> Result<(), RentalError> {
    use crate::schema::cars::dsl::*;
    let mut conn = pool.get()?;
    let deleted = diesel::delete(cars.filter(car_id.eq(wanted_car_id))).execute(&mut conn)?;
    if deleted == 0 {
        return Err(RentalError::CarNotFound);
    }
    Ok(())
}

/// Customers on file, newest first, credential hashes stripped. Admin view.
pub fn list_customers(pool: &PgPool) -> Result<Vec<PublishCustomer>, RentalError> {
    use crate::schema::customers::dsl::*;
    let mut conn = pool.get()?;
    let list = customers
        .order(customer_id.desc())
        .load::<Customer>(&mut conn)?;
    Ok(list.iter().map(Customer::to_publish_customer).collect())
}

/// Rentals joined with customer names and car models, most recent start
/// date first. `only_ongoing` narrows to the active-rentals admin view.
pub fn list_rentals(pool: &PgPool, only_ongoing: bool) -> Result<Vec<RentalRecord>, RentalError> {
    use crate::schema::{cars, customers, rentals};
    let mut conn = pool.get()?;
    let mut query = rentals::table
        .inner_join(customers::table)
        .inner_join(cars::table)
        .select((
            rentals::rental_id,
            rentals::customer_id,
            rentals::car_id,
            rentals::start_date,
            rentals::end_date,
            rentals::total_cost,
            rentals::status,
            customers::first_name,
            customers::last_name,
            cars::model,
        ))
        .order(rentals::start_date.desc())
        .into_boxed();
    if only_ongoing {
        query = query.filter(rentals::status.eq(RentalStatus::Ongoing));
    }
    let records = query.load::<RentalRecord>(&mut conn)?;
    Ok(records)
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
//
// These exercise real transactions and row locks, so they need a Postgres
// with the migrations applied, reachable through TEST_DATABASE_URL (or
// DATABASE_URL). Run them with `cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;
    use diesel::r2d2::{ConnectionManager, Pool};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn test_pool() -> PgPool {
        dotenv::dotenv().ok();
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("TEST_DATABASE_URL or DATABASE_URL must be set");
        let manager = ConnectionManager::<PgConnection>::new(url);
        Pool::builder()
            .max_size(10)
            .build(manager)
            .expect("Could not build test connection pool")
    }

    fn seed_car(pool: &PgPool, daily_rate: f64) -> i32 {
        let car = add_car(
            pool,
            &NewCarRequest {
                model: String::from("Test Hatchback"),
                year: 2022,
                price_per_day: daily_rate,
            },
        )
        .unwrap();
        car.car_id
    }

    fn seed_customer(pool: &PgPool) -> i32 {
        use crate::schema::customers::dsl::*;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut conn = pool.get().unwrap();
        diesel::insert_into(customers)
            .values((
                first_name.eq("Test"),
                last_name.eq("Renter"),
                email.eq(format!("renter{}@example.test", nanos)),
                phone.eq("0000000000"),
                address.eq("1 Test Way"),
                password_hash.eq("not-a-real-hash"),
            ))
            .returning(customer_id)
            .get_result::<i32>(&mut conn)
            .unwrap()
    }

    fn booking(car: i32, customer: i32, start: &str, end: &str) -> NewRentalRequest {
        NewRentalRequest {
            car_id: car,
            customer_id: customer,
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    fn car_status(pool: &PgPool, wanted: i32) -> CarStatus {
        use crate::schema::cars::dsl::*;
        let mut conn = pool.get().unwrap();
        cars.filter(car_id.eq(wanted))
            .select(status)
            .get_result::<CarStatus>(&mut conn)
            .unwrap()
    }

    fn rentals_for_car(pool: &PgPool, wanted: i32) -> Vec<Rental> {
        use crate::schema::rentals::dsl::*;
        let mut conn = pool.get().unwrap();
        rentals
            .filter(car_id.eq(wanted))
            .load::<Rental>(&mut conn)
            .unwrap()
    }

    #[test]
    #[ignore]
    fn concurrent_bookings_take_the_car_once() {
        let pool = test_pool();
        let car = seed_car(&pool, 50.0);
        let customer = seed_customer(&pool);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    create_rental(&pool, &booking(car, customer, "2024-01-01", "2024-01-04"))
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        for r in &results {
            match r {
                Ok(confirmation) => assert_eq!(confirmation.total_cost, 150.0),
                Err(RentalError::CarUnavailable) => {}
                Err(other) => panic!("unexpected loser error: {:?}", other),
            }
        }
        assert_eq!(car_status(&pool, car), CarStatus::Rented);
        assert_eq!(rentals_for_car(&pool, car).len(), 1);
    }

    #[test]
    #[ignore]
    fn failed_create_writes_nothing() {
        let pool = test_pool();
        let car = seed_car(&pool, 75.0);
        let customer = seed_customer(&pool);

        let degenerate = create_rental(&pool, &booking(car, customer, "2024-03-01", "2024-03-01"));
        assert!(matches!(degenerate, Err(RentalError::InvalidDateRange)));

        let missing_car = create_rental(&pool, &booking(-1, customer, "2024-03-01", "2024-03-02"));
        assert!(matches!(missing_car, Err(RentalError::CarNotFound)));

        assert_eq!(car_status(&pool, car), CarStatus::Available);
        assert!(rentals_for_car(&pool, car).is_empty());
    }

    #[test]
    #[ignore]
    fn round_trip_releases_the_car() {
        let pool = test_pool();
        let car = seed_car(&pool, 50.0);
        let customer = seed_customer(&pool);

        let confirmation =
            create_rental(&pool, &booking(car, customer, "2024-01-01", "2024-01-04")).unwrap();
        assert_eq!(confirmation.total_cost, 150.0);
        assert_eq!(car_status(&pool, car), CarStatus::Rented);

        complete_rental(&pool, confirmation.rental_id).unwrap();
        assert_eq!(car_status(&pool, car), CarStatus::Available);

        let all = rentals_for_car(&pool, car);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, RentalStatus::Completed);
        assert_eq!(all[0].total_cost, 150.0);
    }

    #[test]
    #[ignore]
    fn completion_cannot_run_twice() {
        let pool = test_pool();
        let car = seed_car(&pool, 40.0);
        let customer = seed_customer(&pool);

        let confirmation =
            create_rental(&pool, &booking(car, customer, "2024-05-01", "2024-05-03")).unwrap();
        complete_rental(&pool, confirmation.rental_id).unwrap();

        let second = complete_rental(&pool, confirmation.rental_id);
        assert!(matches!(second, Err(RentalError::InvalidOrCompletedRental)));
        assert_eq!(car_status(&pool, car), CarStatus::Available);
    }

    #[test]
    #[ignore]
    fn rebooking_needs_an_intervening_completion() {
        let pool = test_pool();
        let car = seed_car(&pool, 60.0);
        let customer = seed_customer(&pool);

        let first =
            create_rental(&pool, &booking(car, customer, "2024-06-01", "2024-06-05")).unwrap();

        let blocked = create_rental(&pool, &booking(car, customer, "2024-06-10", "2024-06-12"));
        assert!(matches!(blocked, Err(RentalError::CarUnavailable)));

        complete_rental(&pool, first.rental_id).unwrap();
        let rebooked =
            create_rental(&pool, &booking(car, customer, "2024-06-10", "2024-06-12")).unwrap();
        assert_eq!(rebooked.total_cost, 120.0);
    }

    #[test]
    #[ignore]
    fn available_listing_is_price_ordered() {
        let pool = test_pool();
        let pricey = seed_car(&pool, 90.25);
        let cheap = seed_car(&pool, 0.5);

        let listed = list_available_cars(&pool).unwrap();
        let pos = |wanted: i32| listed.iter().position(|c| c.car_id == wanted).unwrap();
        assert!(pos(cheap) < pos(pricey));
        for pair in listed.windows(2) {
            assert!(
                pair[0].price_per_day < pair[1].price_per_day
                    || (pair[0].price_per_day == pair[1].price_per_day
                        && pair[0].car_id < pair[1].car_id)
            );
        }
        assert!(listed.iter().all(|c| c.status == CarStatus::Available));
    }

    #[test]
    #[ignore]
    fn price_update_leaves_existing_cost_snapshots_alone() {
        let pool = test_pool();
        let car = seed_car(&pool, 50.0);
        let customer = seed_customer(&pool);

        let confirmation =
            create_rental(&pool, &booking(car, customer, "2024-07-01", "2024-07-04")).unwrap();
        assert_eq!(confirmation.total_cost, 150.0);

        let updated = update_car(
            &pool,
            &UpdateCarRequest {
                car_id: car,
                model: String::from("Test Hatchback Facelift"),
                year: 2024,
                price_per_day: 80.0,
            },
        )
        .unwrap();
        assert_eq!(updated.price_per_day, 80.0);
        // The update only touches listing details; the car stays Rented.
        assert_eq!(updated.status, CarStatus::Rented);

        let all = rentals_for_car(&pool, car);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].total_cost, 150.0);

        complete_rental(&pool, confirmation.rental_id).unwrap();
        let rebooked =
            create_rental(&pool, &booking(car, customer, "2024-08-01", "2024-08-03")).unwrap();
        assert_eq!(rebooked.total_cost, 160.0);
    }

    #[test]
    #[ignore]
    fn fleet_edits_require_an_existing_car() {
        let pool = test_pool();

        let missing_update = update_car(
            &pool,
            &UpdateCarRequest {
                car_id: -1,
                model: String::from("Ghost"),
                year: 2020,
                price_per_day: 10.0,
            },
        );
        assert!(matches!(missing_update, Err(RentalError::CarNotFound)));

        let missing_delete = delete_car(&pool, -1);
        assert!(matches!(missing_delete, Err(RentalError::CarNotFound)));

        let car = seed_car(&pool, 25.0);
        delete_car(&pool, car).unwrap();
        assert!(rentals_for_car(&pool, car).is_empty());
        assert!(list_all_cars(&pool).unwrap().iter().all(|c| c.car_id != car));
    }

    #[test]
    #[ignore]
    fn customer_listing_strips_password_hashes() {
        let pool = test_pool();
        let customer = seed_customer(&pool);

        let listed = list_customers(&pool).unwrap();
        let found = listed
            .iter()
            .find(|c| c.customer_id == customer)
            .expect("seeded customer should be listed");
        assert_eq!(found.first_name, "Test");

        let json = serde_json::to_value(found).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
