use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::{Error, ErrorType};

/// HTTP response builder for Error enum
///
/// Responses carry only a status code and a fixed per-class message;
/// the error's internal detail (variant, location) never leaves the
/// process.
impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error_type {
            ErrorType::LabelMe => StatusCode::INTERNAL_SERVER_ERROR,

            ErrorType::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorType::Flagged => StatusCode::BAD_REQUEST,
            ErrorType::RateLimited => StatusCode::TOO_MANY_REQUESTS,

            ErrorType::NotFound => StatusCode::NOT_FOUND,

            ErrorType::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(serde_json::json!({
                "message": self.message()
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};

    use crate::{create_database_error, create_error, Error};

    async fn response_parts(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn store_failures_fail_closed_as_an_opaque_500() {
        let (status, body) =
            response_parts(create_database_error!("count_documents", "reports")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].is_string());

        // Only the generic message; operation and collection stay internal
        assert_eq!(body.as_object().unwrap().len(), 1);
        assert!(body.get("type").is_none());
        assert!(body.get("location").is_none());
    }

    #[tokio::test]
    async fn internal_errors_share_the_generic_500_body() {
        let (database_status, database_body) =
            response_parts(create_database_error!("insert_one", "reports")).await;
        let (internal_status, internal_body) = response_parts(create_error!(InternalError)).await;

        assert_eq!(database_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(database_body, internal_body);
    }
}
