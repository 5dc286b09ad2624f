//! Webhook intake: normalize, optionally verify, enqueue, acknowledge.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde_json::{Map, Value};

use crate::adapters::mercadopago::WebhookVerifier;
use crate::application::handlers::webhook::NotificationQueue;
use crate::domain::billing::NotificationPayload;

const SIGNATURE_HEADER: &str = "x-signature";
const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct WebhookAppState {
    pub queue: NotificationQueue,
    /// Present only when a webhook secret is configured.
    pub verifier: Option<Arc<WebhookVerifier>>,
}

impl WebhookAppState {
    pub fn new(queue: NotificationQueue) -> Self {
        Self {
            queue,
            verifier: None,
        }
    }

    pub fn with_verifier(mut self, verifier: WebhookVerifier) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }
}

/// POST /webhooks/payment-provider
pub async fn receive_notification(
    State(state): State<WebhookAppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if let Some(notification) = intake(&state, &params, &headers, &body) {
        tracing::info!(
            kind = notification.kind(),
            reference = notification.reference().unwrap_or("-"),
            "Notification received"
        );
        if let Err(e) = state.queue.enqueue(notification) {
            tracing::warn!(error = %e, "Notification dropped");
        }
    }

    acknowledge()
}

fn acknowledge() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    )
}

/// Returns the notification to enqueue, or `None` when the request carries
/// nothing usable or fails signature verification.
fn intake(
    state: &WebhookAppState,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    body: &[u8],
) -> Option<NotificationPayload> {
    let merged = merge_query(parse_body(body), params)?;
    let notification = NotificationPayload::parse(&merged);

    if let Some(verifier) = &state.verifier {
        let data_id = params
            .get("data.id")
            .map(String::as_str)
            .or_else(|| notification.reference())
            .unwrap_or_default();
        let signature = header_str(headers, SIGNATURE_HEADER);
        let request_id = header_str(headers, REQUEST_ID_HEADER);

        if let Err(e) = verifier.verify(data_id, request_id, signature) {
            tracing::warn!(error = %e, data_id = %data_id, "Rejected unsigned or forged notification");
            return None;
        }
    }

    Some(notification)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn parse_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Notification body is not JSON");
            None
        }
    }
}

/// Fills in fields from the query string that the body lacks. The gateway
/// sends `?type=payment&data.id=...` or `?topic=...&id=...` alongside the
/// body, and sometimes only the query.
fn merge_query(body: Option<Value>, params: &HashMap<String, String>) -> Option<Value> {
    let mut object = match body {
        Some(Value::Object(map)) => map,
        Some(other) if params.is_empty() => return Some(other),
        None if params.is_empty() => return None,
        _ => Map::new(),
    };

    for (key, value) in params {
        if key == "data.id" {
            let data = object
                .entry("data")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(data) = data {
                data.entry("id")
                    .or_insert_with(|| Value::String(value.clone()));
            }
        } else {
            object
                .entry(key.clone())
                .or_insert_with(|| Value::String(value.clone()));
        }
    }

    Some(Value::Object(object))
}
