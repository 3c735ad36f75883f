pub(crate) mod errors;
pub mod handlers;
pub mod models;
mod routes;
pub mod schemas;
pub mod utils;
mod tests;
pub use routes::order_route;
