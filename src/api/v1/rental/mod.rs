mod active;
mod complete;
mod history;
mod new;

use warp::Filter;

pub fn api_v1_rental()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("rental")
        .and(
            new::main()
                .or(complete::main())
                .or(active::main())
                .or(history::main()),
        )
        .and(warp::path::end())
}
