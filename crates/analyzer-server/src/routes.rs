use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use analyzer_core::{CheckService, register_url, site_details};

use crate::dto::{
    CheckResponse, CheckRunResponse, CreateUrlRequest, HealthResponse, RegistrationResponse,
    SiteDetailResponse, SiteListResponse, SiteSummaryResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/urls", post(create_url))
        .route("/v1/urls", get(list_urls))
        .route("/v1/urls/{id}", get(get_url))
        .route("/v1/urls/{id}/checks", post(create_check));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Sites
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/v1/urls",
    request_body = CreateUrlRequest,
    responses(
        (status = 201, description = "Site registered", body = RegistrationResponse),
        (status = 200, description = "Site already registered", body = RegistrationResponse),
        (status = 422, description = "Invalid URL", body = crate::dto::ErrorResponse),
    ),
    tag = "sites"
)]
pub async fn create_url(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateUrlRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let registration = register_url(&state.db.site_repo(), &body.url).await?;

    let status = if registration.is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, axum::Json(RegistrationResponse::from(registration))))
}

#[utoipa::path(
    get,
    path = "/v1/urls",
    responses(
        (status = 200, description = "Sites with their latest check", body = SiteListResponse),
    ),
    tag = "sites"
)]
pub async fn list_urls(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let sites = state.db.site_repo().list_sites().await?;
    let total = sites.len();

    let response = SiteListResponse {
        sites: sites.into_iter().map(SiteSummaryResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/v1/urls/{id}",
    params(
        ("id" = Uuid, Path, description = "Site ID")
    ),
    responses(
        (status = 200, description = "Site with check history", body = SiteDetailResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "sites"
)]
pub async fn get_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (site, checks) = site_details(&state.db.site_repo(), &state.db.check_repo(), id).await?;

    let response = SiteDetailResponse {
        site: site.into(),
        checks: checks.into_iter().map(CheckResponse::from).collect(),
    };

    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/v1/urls/{id}/checks",
    params(
        ("id" = Uuid, Path, description = "Site ID")
    ),
    responses(
        (status = 201, description = "Check recorded", body = CheckRunResponse),
        (status = 502, description = "Page could not be fetched; attempt recorded", body = CheckRunResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "checks"
)]
pub async fn create_check(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let service = CheckService::new(
        state.fetcher.clone(),
        state.inspector.clone(),
        state.db.site_repo(),
        state.db.check_repo(),
    );
    let report = service.check_site(id).await?;

    let status = if report.is_success() {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, axum::Json(CheckRunResponse::from(report))))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_ok = state.db.health_check().await.is_ok();

    let (status, response) = if db_ok {
        (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: "ok",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "unhealthy",
                database: "error",
            },
        )
    };

    (status, axum::Json(response))
}
