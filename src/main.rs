mod api;
mod db;
mod helper_model;
mod methods;
mod model;
mod schema;

use once_cell::sync::Lazy;
use warp::Filter;

pub static POOL: Lazy<db::PgPool> = Lazy::new(db::get_connection_pool);

#[tokio::main]
async fn main() {
    env_logger::init();
    // routing for the server
    let httpd = api::api().and(warp::path::end());
    // TODO: tls
    warp::serve(httpd).run(([127, 0, 0, 1], 3030)).await;
}
