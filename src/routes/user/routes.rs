use actix_web::web;

use super::handlers::{create_address, list_addresses, login, register, verify_seller};
use crate::middleware::{RequireAuth, RoleValidation};
use crate::routes::user::schemas::UserRole;

pub fn user_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)));
    cfg.service(web::resource("/login").route(web::post().to(login)));
    cfg.service(
        web::resource("/address/create")
            .route(web::post().to(create_address).wrap(RequireAuth)),
    );
    cfg.service(
        web::resource("/address/list").route(web::get().to(list_addresses).wrap(RequireAuth)),
    );
    cfg.service(
        web::resource("/seller/{seller_id}/verify").route(
            web::patch()
                .to(verify_seller)
                .wrap(RoleValidation {
                    allowed_roles: vec![UserRole::Admin, UserRole::SuperAdmin],
                })
                .wrap(RequireAuth),
        ),
    );
}
