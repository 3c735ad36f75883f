pub mod cart;
pub mod order;
pub mod payment;
pub mod product;
mod routes;
pub mod user;

pub use cart::cart_route;
pub use order::order_route;
pub use payment::payment_route;
pub use product::product_route;
pub use routes::main_route;
pub use user::user_route;
