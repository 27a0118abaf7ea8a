mod all;
mod available;
mod delete;
mod new;
mod update;

use warp::Filter;

pub fn api_v1_car() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("car")
        .and(
            available::main()
                .or(all::main())
                .or(new::main())
                .or(update::main())
                .or(delete::main()),
        )
        .and(warp::path::end())
}
