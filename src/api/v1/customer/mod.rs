mod all;

use warp::Filter;

pub fn api_v1_customer()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("customer").and(all::main()).and(warp::path::end())
}
