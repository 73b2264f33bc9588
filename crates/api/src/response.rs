//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, is
//! `{ "success": bool, "message": string, "data": T | null, "errors": object | null }`.
//! Handlers build success bodies with [`ok`], [`created`] and [`message`];
//! failures are rendered by [`AppError`](crate::error::AppError).

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// The `{success, message, data, errors}` envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, errors: serde_json::Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

/// Handler return type for a successful envelope.
pub type Envelope<T> = Json<ApiResponse<T>>;

/// 200 with a payload.
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Envelope<T> {
    Json(ApiResponse::success(message, data))
}

/// 201 with the created resource.
pub fn created<T: Serialize>(
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Envelope<T>) {
    (StatusCode::CREATED, ok(message, data))
}

/// 200 with `data: null`.
pub fn message(message: impl Into<String>) -> Envelope<()> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: None,
        errors: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let Json(body) = ok("Lead retrieved", json!({ "id": 1 }));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "success": true,
                "message": "Lead retrieved",
                "data": { "id": 1 },
                "errors": null,
            })
        );
    }

    #[test]
    fn message_only_has_null_data() {
        let Json(body) = message("Logged out");
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["success"], true);
    }
}
