mod car;
mod customer;
mod rental;

use warp::Filter;

pub fn api_v1() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("v1")
        .and(
            car::api_v1_car()
                .or(rental::api_v1_rental())
                .or(customer::api_v1_customer()),
        )
        .and(warp::path::end())
}
