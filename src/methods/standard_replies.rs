use crate::helper_model;
use crate::helper_model::RentalError;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub fn bad_request(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Bad Request"),
        message: err_msg.to_string(),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::BAD_REQUEST,
    ).into_response(),))
}

pub fn not_found(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Not Found"),
        message: err_msg.to_string(),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::NOT_FOUND,
    ).into_response(),))
}

pub fn internal_server_error_response(msg: String) -> Result<(warp::reply::Response,), Rejection> {
    log::error!("{}", msg);
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Internal Server Error"),
        message: String::from("Please try again later. "),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::INTERNAL_SERVER_ERROR,
    ).into_response(),))
}

pub fn service_busy_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Service Busy"),
        message: String::from("The store is busy handling another booking. Please retry."),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::SERVICE_UNAVAILABLE,
    ).into_response(),))
}

pub fn method_not_allowed_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Method Not Allowed"),
        message: String::from("This endpoint does not accept that method. "),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::METHOD_NOT_ALLOWED,
    )
    .into_response(),))
}

pub fn response_with_obj<T>(obj: T, status_code: StatusCode)
    -> Result<(warp::reply::Response,), Rejection> where T: serde::Serialize {
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}

/// One place that turns a coordinator error into the wire reply. Conflict
/// errors are definitive; `Busy` tells the caller a retry is safe; store
/// faults stay opaque.
pub fn rental_error_response(err: RentalError) -> Result<(warp::reply::Response,), Rejection> {
    match err {
        RentalError::InvalidDateRange => bad_request("Invalid date range. "),
        RentalError::CarNotFound => not_found("Car not found. "),
        RentalError::CarUnavailable => bad_request("Car is not available. "),
        RentalError::InvalidOrCompletedRental => {
            bad_request("Invalid rental or already completed. ")
        }
        RentalError::Busy => service_busy_response(),
        RentalError::Store(db_err) => {
            internal_server_error_response(format!("Store error: {:?}", db_err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: RentalError) -> StatusCode {
        let (response,) = rental_error_response(err).unwrap();
        response.status()
    }

    #[test]
    fn validation_and_conflict_errors_map_to_definitive_statuses() {
        assert_eq!(
            status_for(RentalError::InvalidDateRange),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(RentalError::CarNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(RentalError::CarUnavailable),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(RentalError::InvalidOrCompletedRental),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn transient_errors_are_retryable_and_store_faults_opaque() {
        assert_eq!(
            status_for(RentalError::Busy),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(RentalError::Store(diesel::result::Error::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
