use actix_web::web;

use super::handlers::{
    category_list, product_create, product_delete, product_fetch, product_list, product_update,
    seller_product_list,
};
use crate::middleware::{RequireAuth, RoleValidation, VerifiedSellerValidation};
use crate::routes::user::schemas::UserRole;

pub fn product_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/list").route(web::get().to(product_list)));
    cfg.service(web::resource("/fetch/{id}").route(web::get().to(product_fetch)));
    cfg.service(web::resource("/category/list").route(web::get().to(category_list)));
    cfg.service(
        web::resource("/create").route(
            web::post()
                .to(product_create)
                .wrap(VerifiedSellerValidation)
                .wrap(RoleValidation {
                    allowed_roles: vec![UserRole::Seller],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/update/{id}").route(
            web::patch()
                .to(product_update)
                .wrap(VerifiedSellerValidation)
                .wrap(RoleValidation {
                    allowed_roles: vec![UserRole::Seller],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/delete/{id}").route(
            web::delete()
                .to(product_delete)
                .wrap(VerifiedSellerValidation)
                .wrap(RoleValidation {
                    allowed_roles: vec![UserRole::Seller],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/seller/list").route(
            web::get()
                .to(seller_product_list)
                .wrap(VerifiedSellerValidation)
                .wrap(RoleValidation {
                    allowed_roles: vec![UserRole::Seller],
                })
                .wrap(RequireAuth),
        ),
    );
}
