use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::copy_book,
        api::category::copy_category,
    ),
    tags(
        (name = "vocabook", description = "Vocabulary book catalog API")
    )
)]
pub struct ApiDoc;
