//! Route configuration for account endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    find_by_email, list_accounts, register_account, verify_email, verify_username,
    AccountAppState,
};

pub fn account_router() -> Router<AccountAppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/register", post(register_account))
        .route("/accounts/verify-email", post(verify_email))
        .route("/accounts/verify-username", post(verify_username))
        .route("/accounts/find-by-email", post(find_by_email))
}
