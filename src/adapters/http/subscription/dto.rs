//! Request and response bodies for subscription endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::billing::Plan;
use crate::domain::foundation::{AccountId, SubscriptionId, Timestamp};
use crate::domain::subscription::{Subscription, SubscriptionStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterSubscriptionRequest {
    #[serde(alias = "plano")]
    pub plan: String,
    #[serde(alias = "gestorId", alias = "account_id")]
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: SubscriptionId,
    pub plan: Plan,
    pub account_id: AccountId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: SubscriptionStatus,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            plan: sub.plan,
            account_id: sub.account_id,
            start_date: sub.start_date,
            end_date: sub.end_date,
            status: sub.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionMessageResponse {
    pub message: String,
    pub subscription: SubscriptionResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionListResponse {
    pub total: usize,
    pub subscriptions: Vec<SubscriptionResponse>,
}
