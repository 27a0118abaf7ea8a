use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::r2d2::Pool;
use dotenv::dotenv;
use std::env;

use crate::helper_model::RentalError;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub fn get_connection_pool() -> PgPool {
    dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    // Refer to the `r2d2` documentation for more methods to use
    // when building a connection pool
    Pool::builder()
        .build(manager)
        .expect("Could not build connection pool")
}

/// Runs `body` as one transaction: commit when it returns `Ok`, rollback on
/// any `Err`. Row locks taken with `.for_update()` inside `body` are held
/// until the transaction ends, on either path.
///
/// A pool checkout timeout surfaces as `RentalError::Busy` so callers can
/// retry instead of treating an exhausted pool as a store fault.
pub fn run_in_transaction<T>(
    pool: &PgPool,
    body: impl FnOnce(&mut PgConnection) -> Result<T, RentalError>,
) -> Result<T, RentalError> {
    let mut conn = pool.get()?;
    conn.transaction(|conn| body(conn))
}
