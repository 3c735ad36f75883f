use actix_web::web;

use super::handlers::{cart_add, cart_delete, cart_fetch, cart_update};
use crate::middleware::RequireAuth;

pub fn cart_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/fetch").route(web::get().to(cart_fetch).wrap(RequireAuth)));
    cfg.service(web::resource("/add").route(web::post().to(cart_add).wrap(RequireAuth)));
    cfg.service(
        web::resource("/update/{line_id}").route(web::patch().to(cart_update).wrap(RequireAuth)),
    );
    cfg.service(
        web::resource("/delete/{line_id}").route(web::delete().to(cart_delete).wrap(RequireAuth)),
    );
}
