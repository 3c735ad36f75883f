pub(crate) mod errors;
pub mod handlers;
mod routes;
pub mod schemas;
pub mod utils;
mod tests;
pub use routes::payment_route;
