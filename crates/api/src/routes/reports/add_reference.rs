use axum::{
    extract::{Path, State},
    Json,
};
use ulid::Ulid;

use murmur_database::{Database, Report};
use murmur_models::v0;
use murmur_result::{create_error, Result};

/// Mark a report as referenced by one more visitor
#[utoipa::path(
    patch,
    path = "/reports/{report_id}/reference",
    params(
        ("report_id" = String, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Updated report", body = v0::Report),
        (status = 404, description = "No such report")
    ),
    tag = "Reports"
)]
pub async fn add_reference(
    State(db): State<Database>,
    Path(report_id): Path<String>,
) -> Result<Json<v0::Report>> {
    // A malformed id is a caller error, not a lookup miss
    if Ulid::from_string(&report_id).is_err() {
        return Err(create_error!(InvalidInput));
    }

    Report::add_reference(&db, &report_id)
        .await
        .map(|report| Json(report.into_v0()))
}
