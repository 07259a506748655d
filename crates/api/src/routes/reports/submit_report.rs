use axum::{extract::State, Json};

use murmur_database::{Database, Report};
use murmur_models::v0;
use murmur_result::Result;

use crate::util::ip::ClientIp;

/// Submit a new anecdote report
///
/// Runs the admission pipeline; rejections deliberately carry no
/// detail about which check fired.
#[utoipa::path(
    post,
    path = "/reports",
    request_body = v0::DataSubmitReport,
    responses(
        (status = 200, description = "Persisted report", body = v0::Report),
        (status = 400, description = "Submission rejected"),
        (status = 429, description = "Submission rejected, try again later")
    ),
    tag = "Reports"
)]
pub async fn submit_report(
    State(db): State<Database>,
    ClientIp(source_ip): ClientIp,
    Json(data): Json<v0::DataSubmitReport>,
) -> Result<Json<v0::Report>> {
    Report::create(&db, data, source_ip)
        .await
        .map(|report| Json(report.into_v0()))
}
