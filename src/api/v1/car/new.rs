use crate::helper_model::NewCarRequest;
use crate::{POOL, methods};
use tokio::task::spawn_blocking;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: NewCarRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            if body.model.trim().is_empty() {
                return methods::standard_replies::bad_request("Car model is required. ");
            }
            if body.price_per_day < 0.0 || !body.price_per_day.is_finite() {
                return methods::standard_replies::bad_request(
                    "Price per day must be a non-negative number. ",
                );
            }
            let result =
                spawn_blocking(move || methods::reservation::add_car(&POOL, &body)).await;
            let Ok(result) = result else {
                return methods::standard_replies::internal_server_error_response(String::from(
                    "car/new: blocking task join error",
                ));
            };
            match result {
                Ok(car) => methods::standard_replies::response_with_obj(car, StatusCode::CREATED),
                Err(err) => methods::standard_replies::rental_error_response(err),
            }
        })
}
