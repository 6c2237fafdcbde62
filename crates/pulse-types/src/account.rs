//! Account balance snapshot types

use serde::{Deserialize, Serialize};

/// Account balance record as supplied by the account store.
///
/// Every field may be absent, and numeric fields are signed because the
/// store does not guarantee non-negative values. Consumers must read tiers
/// through a clamping accessor rather than use these fields directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountBalance {
    /// Recurring allotment, resets each billing cycle
    pub subscription_credits: Option<i64>,
    /// Purchased credits, persistent until spent
    pub topped_up_balance: Option<i64>,
    /// One-time promotional credits
    pub trial_credits: Option<i64>,
    /// Raw plan identifier
    pub plan_id: Option<String>,
}

impl AccountBalance {
    /// Create an empty record (all tiers absent, no plan)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subscription allotment
    #[must_use]
    pub fn with_subscription_credits(mut self, credits: i64) -> Self {
        self.subscription_credits = Some(credits);
        self
    }

    /// Set the topped-up balance
    #[must_use]
    pub fn with_topped_up_balance(mut self, credits: i64) -> Self {
        self.topped_up_balance = Some(credits);
        self
    }

    /// Set the trial credits
    #[must_use]
    pub fn with_trial_credits(mut self, credits: i64) -> Self {
        self.trial_credits = Some(credits);
        self
    }

    /// Set the raw plan identifier
    #[must_use]
    pub fn with_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }
}
