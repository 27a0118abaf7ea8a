use crate::{POOL, methods};
use tokio::task::spawn_blocking;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("available")
        .and(warp::path::end())
        .and(warp::method())
        .and_then(async move |method: Method| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }
            let result =
                spawn_blocking(|| methods::reservation::list_available_cars(&POOL)).await;
            let Ok(result) = result else {
                return methods::standard_replies::internal_server_error_response(String::from(
                    "car/available: blocking task join error",
                ));
            };
            match result {
                Ok(car_list) => {
                    methods::standard_replies::response_with_obj(car_list, StatusCode::OK)
                }
                Err(err) => methods::standard_replies::rental_error_response(err),
            }
        })
}
