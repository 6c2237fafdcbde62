//! Tier accessors and breakdown visibility policy

use pulse_types::{AccountBalance, CreditTier, PlanType};

/// Read a stored tier value, treating absent and negative values as zero.
///
/// This is the only way tier amounts enter the ledger, so the clamping
/// invariant holds for every aggregate built on top of it.
pub fn credits_or_zero(raw: Option<i64>) -> u64 {
    raw.map_or(0, |value| u64::try_from(value).unwrap_or(0))
}

/// Read the clamped amount for one tier of an account
pub fn tier_credits(account: &AccountBalance, tier: CreditTier) -> u64 {
    let raw = match tier {
        CreditTier::Subscription => account.subscription_credits,
        CreditTier::TopUp => account.topped_up_balance,
        CreditTier::Trial => account.trial_credits,
    };

    if let Some(value) = raw.filter(|v| *v < 0) {
        tracing::warn!(tier = %tier, value, "Negative stored balance clamped to zero");
    }

    credits_or_zero(raw)
}

/// Decide whether a breakdown row is shown.
///
/// Visibility is a display decision only; hidden rows still count towards
/// the total.
pub fn row_visible(tier: CreditTier, amount: u64, plan_type: PlanType) -> bool {
    match tier {
        CreditTier::Subscription => plan_type.has_monthly_allotment(),
        CreditTier::TopUp | CreditTier::Trial => amount > 0,
    }
}
