use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use leakwatch_core::error::error_response;
use leakwatch_domain::validation::Violation;

/// Inspections service error variants.
#[derive(Debug, thiserror::Error)]
pub enum InspectionsError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation failed")]
    Validation(Vec<Violation>),
    #[error("page and limit must be at least 1")]
    InvalidPage,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl InspectionsError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::InvalidPage => "INVALID_PAGE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for InspectionsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidPage => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let extra = match &self {
            Self::Validation(violations) => Some(("violations", serde_json::json!(violations))),
            _ => None,
        };
        error_response(status, self.kind(), &self.to_string(), extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn assert_error(
        error: InspectionsError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) -> serde_json::Value {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
        json
    }

    #[tokio::test]
    async fn should_return_not_found_with_resource_name() {
        assert_error(
            InspectionsError::NotFound("campaign"),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "campaign not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_violations_on_validation_failure() {
        let json = assert_error(
            InspectionsError::Validation(vec![Violation::new(
                "gazName",
                "Gaz name cannot be blank or null",
            )]),
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "validation failed",
        )
        .await;
        assert_eq!(json["violations"][0]["propertyPath"], "gazName");
        assert_eq!(
            json["violations"][0]["message"],
            "Gaz name cannot be blank or null"
        );
    }

    #[tokio::test]
    async fn should_return_invalid_page() {
        assert_error(
            InspectionsError::InvalidPage,
            StatusCode::BAD_REQUEST,
            "INVALID_PAGE",
            "page and limit must be at least 1",
        )
        .await;
    }

    #[tokio::test]
    async fn should_hide_internal_details() {
        let json = assert_error(
            InspectionsError::Internal(anyhow::anyhow!("connection refused")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
        assert!(json.get("violations").is_none());
    }
}
