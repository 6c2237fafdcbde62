//! Display balance and plan resolution

use pulse_types::{
    AccountBalance, BreakdownRow, CreditTier, DisplayBalance, PlanDescriptor, PlanId, PulseError,
};
use serde::{Deserialize, Serialize};

use crate::policy::{row_visible, tier_credits};

/// Plan and balance resolved together for one account snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAccount {
    /// Resolved plan
    pub plan: PlanDescriptor,
    /// Resolved balance
    pub balance: DisplayBalance,
}

/// Look up a raw plan identifier in the plan catalogue
pub fn lookup_plan(raw: &str) -> Result<PlanDescriptor, PulseError> {
    let plan_id: PlanId = raw.parse()?;
    Ok(PlanDescriptor::for_plan(plan_id))
}

/// Resolve the plan of an account.
///
/// Missing or unknown plan identifiers resolve to the free plan.
pub fn resolve_plan(account: &AccountBalance) -> PlanDescriptor {
    let Some(raw) = account.plan_id.as_deref() else {
        return PlanDescriptor::free();
    };

    lookup_plan(raw).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "Unknown plan, falling back to free");
        PlanDescriptor::free()
    })
}

/// Resolve the displayed balance and breakdown of an account.
///
/// Every tier is clamped to zero before aggregation, and the breakdown
/// always carries one row per tier so the total equals the sum of the rows.
pub fn resolve_display_balance(account: &AccountBalance) -> DisplayBalance {
    let plan_type = resolve_plan(account).plan_type;

    let mut display_credits = 0u64;
    let mut trial_credits = 0u64;
    let mut breakdown = Vec::with_capacity(CreditTier::ALL.len());

    for tier in CreditTier::ALL {
        let amount = tier_credits(account, tier);
        if tier.is_display_tier() {
            display_credits = display_credits.saturating_add(amount);
        } else {
            trial_credits = trial_credits.saturating_add(amount);
        }

        breakdown.push(BreakdownRow {
            tier,
            label: tier.label().to_string(),
            amount,
            visible: row_visible(tier, amount, plan_type),
        });
    }

    DisplayBalance {
        display_credits,
        trial_credits,
        total_credits: display_credits.saturating_add(trial_credits),
        breakdown,
    }
}

/// Resolve plan and balance in one call
pub fn resolve_account(account: &AccountBalance) -> ResolvedAccount {
    ResolvedAccount {
        plan: resolve_plan(account),
        balance: resolve_display_balance(account),
    }
}
