//! Request extractors shared by every area.

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ErrorResponse;

/// JSON request body.
///
/// Behaves like [`Json`] but rejects malformed bodies, wrong field types and
/// missing content types with a 400 `VALIDATION_FAILED` [`ErrorResponse`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(JsonBodyRejection(rejection)),
        }
    }
}

/// Rejection for [`JsonBody`].
#[derive(Debug)]
pub struct JsonBodyRejection(pub JsonRejection);

impl JsonBodyRejection {
    fn reason(&self) -> &'static str {
        match &self.0 {
            JsonRejection::MissingJsonContentType(_) => "content_type",
            JsonRejection::JsonDataError(_) => "schema",
            JsonRejection::JsonSyntaxError(_) => "syntax",
            _ => "body",
        }
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        tracing::debug!(rejection = %self.0.body_text(), "Rejected request body");
        let body = ErrorResponse::with_details(
            "VALIDATION_FAILED",
            self.0.body_text(),
            serde_json::json!({ "field": "body", "reason": self.reason() }),
        );
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
