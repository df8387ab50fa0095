use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::ingestion::{CheckError, FetchError, ScrapeError};
use crate::services::threshold_tracker::ThresholdError;
use crate::threeds::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Upstream collaborator (page host or lookup service) failed.
    #[error("Upstream error: {0}")]
    BadGateway(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<ScrapeError> for AppError {
    fn from(e: ScrapeError) -> Self {
        match e {
            ScrapeError::InvalidUrl => AppError::BadRequest(e.to_string()),
            ScrapeError::Fetch(FetchError::Status(_) | FetchError::TooLarge { .. }) => {
                AppError::BadGateway(e.to_string())
            }
            ScrapeError::Fetch(FetchError::Http(inner)) => {
                AppError::BadGateway(format!("Error scraping URL: {inner}"))
            }
        }
    }
}

impl From<CheckError> for AppError {
    fn from(e: CheckError) -> Self {
        match e {
            CheckError::InvalidInput => AppError::BadRequest(e.to_string()),
            // Upstream bodies stay in the log, clients only see the status.
            CheckError::Lookup(LookupError::Status { status, body }) => {
                tracing::warn!(status, body = %body, "3DS lookup rejected");
                AppError::BadGateway(format!("Error: lookup API returned status {status}"))
            }
            CheckError::Lookup(inner) => AppError::BadGateway(format!("Error: {inner}")),
        }
    }
}

impl From<ThresholdError> for AppError {
    fn from(e: ThresholdError) -> Self {
        match e {
            ThresholdError::UnknownBin(_) => AppError::NotFound(e.to_string()),
            ThresholdError::AmountTooSmall(_) => AppError::BadRequest(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_status_body_is_not_returned() {
        let err = CheckError::Lookup(LookupError::Status {
            status: 500,
            body: "<html>internal stack trace</html>".into(),
        });

        match AppError::from(err) {
            AppError::BadGateway(msg) => {
                assert_eq!(msg, "Error: lookup API returned status 500");
                assert!(!msg.contains("stack trace"));
            }
            other => panic!("expected bad gateway, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_api_error_keeps_message() {
        let err = CheckError::Lookup(LookupError::Api("invalid card".into()));
        assert!(matches!(
            AppError::from(err),
            AppError::BadGateway(ref m) if m == "Error: lookup API error: invalid card"
        ));
    }

    #[test]
    fn test_oversized_page_is_bad_gateway() {
        let err = ScrapeError::Fetch(FetchError::TooLarge { limit: 10 });
        assert!(matches!(AppError::from(err), AppError::BadGateway(_)));
    }
}
