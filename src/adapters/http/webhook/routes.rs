//! Route configuration for webhook endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{receive_notification, WebhookAppState};

pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .route("/webhooks/payment-provider", post(receive_notification))
        .route("/webhooks/mercadopago", post(receive_notification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Mutex;
    use tower::ServiceExt;

    use crate::adapters::mercadopago::{manifest, WebhookVerifier};
    use crate::application::handlers::webhook::{NotificationWorker, RetryPolicy};
    use crate::domain::billing::NotificationPayload;
    use crate::ports::{NotificationOutcome, NotificationProcessor, ProcessingError};

    // ════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct RecordingProcessor {
        seen: Mutex<Vec<NotificationPayload>>,
    }

    #[async_trait]
    impl NotificationProcessor for RecordingProcessor {
        async fn process(
            &self,
            notification: &NotificationPayload,
        ) -> Result<NotificationOutcome, ProcessingError> {
            self.seen.lock().unwrap().push(notification.clone());
            Ok(NotificationOutcome::Payments(vec![]))
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════

    fn state() -> (WebhookAppState, NotificationWorker) {
        let processor = Arc::new(RecordingProcessor::default());
        let (worker, queue) = NotificationWorker::new(processor, RetryPolicy::no_retry(), 8);
        (WebhookAppState::new(queue), worker)
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn text_body(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_notification_is_acknowledged_and_queued() {
        let (state, mut worker) = state();
        let app = webhook_router().with_state(state.clone());

        let response = app
            .oneshot(post(
                "/webhooks/payment-provider",
                r#"{"type":"payment","data":{"id":"PAY1"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text_body(response).await, "OK");
        let job = worker.try_next_job().unwrap();
        assert_eq!(
            job.notification,
            NotificationPayload::Payment {
                id: "PAY1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn garbage_body_is_still_acknowledged() {
        let (state, mut worker) = state();
        let app = webhook_router().with_state(state.clone());

        let response = app
            .oneshot(post("/webhooks/mercadopago", "{{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(worker.try_next_job().is_none());
    }

    #[tokio::test]
    async fn full_queue_is_still_acknowledged() {
        let processor = Arc::new(RecordingProcessor::default());
        let (_worker, queue) = NotificationWorker::new(processor, RetryPolicy::no_retry(), 1);
        let app = webhook_router().with_state(WebhookAppState::new(queue));

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(post(
                    "/webhooks/payment-provider",
                    r#"{"type":"payment","data":{"id":"PAY1"}}"#,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn query_string_notification_is_queued() {
        let (state, mut worker) = state();
        let app = webhook_router().with_state(state);

        app.oneshot(post("/webhooks/payment-provider?topic=merchant_order&id=77", ""))
            .await
            .unwrap();

        let job = worker.try_next_job().unwrap();
        assert_eq!(
            job.notification,
            NotificationPayload::MerchantOrder {
                order_id: "77".to_string()
            }
        );
    }

    #[tokio::test]
    async fn bad_signature_is_acknowledged_but_not_queued() {
        let (state, mut worker) = state();
        let state = state.with_verifier(WebhookVerifier::new("secret"));
        let app = webhook_router().with_state(state);

        let request = Request::builder()
            .method("POST")
            .uri("/webhooks/payment-provider?data.id=PAY1&type=payment")
            .header("x-signature", "ts=1700000000,v1=00ff")
            .header("x-request-id", "req-1")
            .body(Body::from(r#"{"type":"payment","data":{"id":"PAY1"}}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(worker.try_next_job().is_none());
    }

    #[tokio::test]
    async fn good_signature_is_queued() {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        let (state, mut worker) = state();
        let state = state.with_verifier(WebhookVerifier::new("secret"));
        let app = webhook_router().with_state(state);

        let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
        mac.update(manifest("PAY1", "req-1", "1700000000").as_bytes());
        let v1 = hex::encode(mac.finalize().into_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/webhooks/payment-provider?data.id=PAY1&type=payment")
            .header("x-signature", format!("ts=1700000000,v1={}", v1))
            .header("x-request-id", "req-1")
            .body(Body::from(r#"{"type":"payment","data":{"id":"PAY1"}}"#))
            .unwrap();
        app.oneshot(request).await.unwrap();

        assert!(worker.try_next_job().is_some());
    }
}
