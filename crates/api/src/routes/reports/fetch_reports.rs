use axum::{extract::State, Json};

use murmur_config::config;
use murmur_database::Database;
use murmur_models::v0;
use murmur_result::Result;

/// Fetch the most recently submitted reports, newest first
#[utoipa::path(
    get,
    path = "/reports",
    responses(
        (status = 200, description = "Recent reports", body = Vec<v0::Report>)
    ),
    tag = "Reports"
)]
pub async fn fetch_reports(State(db): State<Database>) -> Result<Json<Vec<v0::Report>>> {
    let limit = config().await.features.limits.recent_reports;

    db.fetch_recent_reports(limit).await.map(|reports| {
        Json(
            reports
                .into_iter()
                .map(|report| report.into_v0())
                .collect(),
        )
    })
}
