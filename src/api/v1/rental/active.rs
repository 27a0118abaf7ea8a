use crate::{POOL, methods};
use tokio::task::spawn_blocking;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

// Admin view of rentals still out, joined with customer and car.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("active")
        .and(warp::path::end())
        .and(warp::method())
        .and_then(async move |method: Method| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }
            let result =
                spawn_blocking(|| methods::reservation::list_rentals(&POOL, true)).await;
            let Ok(result) = result else {
                return methods::standard_replies::internal_server_error_response(String::from(
                    "rental/active: blocking task join error",
                ));
            };
            match result {
                Ok(records) => {
                    methods::standard_replies::response_with_obj(records, StatusCode::OK)
                }
                Err(err) => methods::standard_replies::rental_error_response(err),
            }
        })
}
