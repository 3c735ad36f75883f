use crate::openapi::ApiDoc;
use crate::routes::{cart_route, order_route, payment_route, product_route, user_route};
use actix_web::{web, HttpResponse, Responder};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("Running Server")
}

pub fn main_route(cfg: &mut web::ServiceConfig) {
    let openapi = ApiDoc::openapi();
    cfg.route("/health_check", web::get().to(health_check))
        .service(web::scope("/user").configure(user_route))
        .service(web::scope("/product").configure(product_route))
        .service(web::scope("/cart").configure(cart_route))
        .service(web::scope("/order").configure(order_route))
        .service(web::scope("/payment").configure(payment_route))
        .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", openapi));
}
