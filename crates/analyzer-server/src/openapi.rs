use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Page Analyzer API",
        version = "0.1.0",
        description = "Register websites and record SEO checks of their front page."
    ),
    paths(
        crate::routes::create_url,
        crate::routes::list_urls,
        crate::routes::get_url,
        crate::routes::create_check,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::CreateUrlRequest,
        crate::dto::RegistrationResponse,
        crate::dto::SiteResponse,
        crate::dto::SiteSummaryResponse,
        crate::dto::SiteListResponse,
        crate::dto::SiteDetailResponse,
        crate::dto::CheckResponse,
        crate::dto::CheckRunResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "sites", description = "Site registration and listing"),
        (name = "checks", description = "Page checks"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
