use actix_web::web;

use super::handlers::payment_verify;
use crate::middleware::RequireAuth;

pub fn payment_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/verify").route(web::post().to(payment_verify).wrap(RequireAuth)));
}
