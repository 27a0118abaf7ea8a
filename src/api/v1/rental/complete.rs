use crate::{POOL, methods};
use tokio::task::spawn_blocking;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("complete")
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(warp::method())
        .and_then(async move |wanted_rental_id: i32, method: Method| {
            if method != Method::PUT {
                return methods::standard_replies::method_not_allowed_response();
            }
            if wanted_rental_id <= 0 {
                return methods::standard_replies::bad_request("Bad request: wrong parameters. ");
            }
            let result = spawn_blocking(move || {
                methods::reservation::complete_rental(&POOL, wanted_rental_id)
            })
            .await;
            let Ok(result) = result else {
                return methods::standard_replies::internal_server_error_response(String::from(
                    "rental/complete: blocking task join error",
                ));
            };
            match result {
                Ok(()) => methods::standard_replies::response_with_obj(
                    serde_json::json!({"message": "Rental completed"}),
                    StatusCode::OK,
                ),
                Err(err) => methods::standard_replies::rental_error_response(err),
            }
        })
}
