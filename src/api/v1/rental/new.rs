use crate::helper_model::NewRentalRequest;
use crate::{POOL, methods};
use tokio::task::spawn_blocking;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: NewRentalRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            if body.car_id <= 0 || body.customer_id <= 0 {
                return methods::standard_replies::bad_request("Bad request: wrong parameters. ");
            }
            // Date parsing, the availability check and the cost computation
            // all happen inside the coordinator's transaction scope.
            let result =
                spawn_blocking(move || methods::reservation::create_rental(&POOL, &body)).await;
            let Ok(result) = result else {
                return methods::standard_replies::internal_server_error_response(String::from(
                    "rental/new: blocking task join error",
                ));
            };
            match result {
                Ok(confirmation) => {
                    methods::standard_replies::response_with_obj(confirmation, StatusCode::CREATED)
                }
                Err(err) => methods::standard_replies::rental_error_response(err),
            }
        })
}
