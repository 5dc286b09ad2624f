//! Subscription aggregate.

use crate::domain::billing::Plan;
use crate::domain::foundation::{
    AccountId, StateMachine, SubscriptionId, Timestamp, ValidationError,
};

use super::SubscriptionStatus;

/// Plan purchase record for an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub plan: Plan,
    pub account_id: AccountId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// Starts an active subscription at `start`, ending after the plan's
    /// duration in calendar months.
    pub fn start(account_id: AccountId, plan: Plan, start: Timestamp) -> Self {
        Self {
            id: SubscriptionId::new(),
            plan,
            account_id,
            start_date: start,
            end_date: start.add_calendar_months(plan.duration_months()),
            status: SubscriptionStatus::Active,
        }
    }

    /// Cancels an active subscription.
    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SubscriptionStatus::Cancelled)?;
        Ok(())
    }

    /// Marks the subscription expired once `now` has passed the end date.
    ///
    /// Returns whether the status changed.
    pub fn expire_if_due(&mut self, now: Timestamp) -> bool {
        if self.status == SubscriptionStatus::Active && !now.is_before(&self.end_date) {
            self.status = SubscriptionStatus::Expired;
            return true;
        }
        false
    }
}
