use actix_web::web;

use super::handlers::{order_create, order_fetch, order_list, order_status_update};
use crate::middleware::{RequireAuth, RoleValidation, VerifiedSellerValidation};
use crate::routes::user::schemas::UserRole;

pub fn order_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create").route(web::post().to(order_create).wrap(RequireAuth)));
    cfg.service(web::resource("/list").route(web::get().to(order_list).wrap(RequireAuth)));
    cfg.service(web::resource("/fetch/{id}").route(web::get().to(order_fetch).wrap(RequireAuth)));
    cfg.service(
        web::resource("/status/{id}").route(
            web::patch()
                .to(order_status_update)
                .wrap(VerifiedSellerValidation)
                .wrap(RoleValidation {
                    allowed_roles: vec![UserRole::Seller, UserRole::Admin, UserRole::SuperAdmin],
                })
                .wrap(RequireAuth),
        ),
    );
}
