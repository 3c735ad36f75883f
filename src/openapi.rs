use utoipa::OpenApi;
use utoipauto::utoipauto;

#[utoipauto]
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Marketplace REST API", description = "Retail Marketplace API Endpoints")
    ),
)]
pub struct ApiDoc {}
