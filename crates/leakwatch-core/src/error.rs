use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// Render the shared JSON error body `{"kind", "message", ...extra}`.
///
/// `extra` entries are merged into the top-level object; they never override
/// `kind` or `message`.
pub fn error_response(
    status: StatusCode,
    kind: &str,
    message: &str,
    extra: Option<(&str, Value)>,
) -> Response {
    let mut body = Map::new();
    if let Some((key, value)) = extra {
        body.insert(key.to_owned(), value);
    }
    body.insert("kind".to_owned(), Value::from(kind));
    body.insert("message".to_owned(), Value::from(message));
    (status, axum::Json(Value::Object(body))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_render_kind_and_message() {
        let resp = error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "not found", None);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_of(resp).await;
        assert_eq!(json["kind"], "NOT_FOUND");
        assert_eq!(json["message"], "not found");
    }

    #[tokio::test]
    async fn should_merge_extra_field() {
        let resp = error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "validation failed",
            Some(("violations", serde_json::json!([{"propertyPath": "name"}]))),
        );
        let json = body_of(resp).await;
        assert_eq!(json["violations"][0]["propertyPath"], "name");
        assert_eq!(json["kind"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn should_not_let_extra_override_kind() {
        let resp = error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_PAGE",
            "invalid page",
            Some(("kind", Value::from("OTHER"))),
        );
        assert_eq!(body_of(resp).await["kind"], "INVALID_PAGE");
    }
}
