//! Route configuration for payment endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{check_payment, create_existing, create_preference, PaymentAppState};

pub fn payment_router() -> Router<PaymentAppState> {
    Router::new()
        .route("/payments/create-preference", post(create_preference))
        .route("/payments/create-existing", post(create_existing))
        .route("/payments/check-payment", post(check_payment))
}
