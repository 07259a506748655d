use axum::{
    http::Method,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use utoipa::ToSchema;

use crate::AppState;

pub mod reports;

/// Build the API router
pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_origin(Any);

    Router::new()
        .route("/", get(root))
        .route(
            "/reports",
            post(reports::submit_report::submit_report).get(reports::fetch_reports::fetch_reports),
        )
        .route(
            "/reports/{report_id}/reference",
            patch(reports::add_reference::add_reference),
        )
        .layer(cors)
}

/// Successful root response
#[derive(Serialize, Debug, ToSchema)]
pub struct RootResponse {
    murmur: &'static str,
    version: &'static str,
}

/// Capture crate version from Cargo
static CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Root response from service
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Echo response", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        murmur: "Someone out there remembers it too.",
        version: CRATE_VERSION,
    })
}
