use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{BridgeError, HttpStatusCode};

// Include the client module
pub mod client;

/// Resolves the axum status code for any error that knows its HTTP status.
pub fn status_for<E: HttpStatusCode>(err: &E) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Extension trait for BridgeError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BridgeError {
    fn into_http_response(self) -> Response {
        let status_code = status_for(&self);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for BridgeError to make it easier to use in Axum handlers.
impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{not_found, validation_error};

    #[test]
    fn test_status_for_maps_error_codes() {
        assert_eq!(status_for(&not_found("empty response")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&validation_error("batch too large")),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_error_into_response_body() {
        let response = validation_error("batch too large").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["error"]["code"], 400);
        assert_eq!(
            body["error"]["message"],
            "Validation error: batch too large"
        );
    }
}
