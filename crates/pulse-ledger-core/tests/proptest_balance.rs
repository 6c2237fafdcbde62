//! Property-based tests for display balance resolution
//!
//! These tests verify the ledger properties:
//! - Totals are the sum of the clamped tiers
//! - Negative or missing tiers never reduce the visible total
//! - Breakdown rows account for every credit in the total
//! - Row visibility never changes totals

use pulse_ledger_core::{credits_or_zero, resolve_display_balance};
use pulse_types::{AccountBalance, CreditTier};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Generate a stored tier value: absent, corrupt (negative) or ordinary
fn arb_tier_value() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        Just(None),
        (i64::MIN..0i64).prop_map(Some),
        (0i64..1_000_000i64).prop_map(Some),
        any::<i64>().prop_map(Some),
    ]
}

/// Generate a raw plan identifier, known or not
fn arb_plan_id() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("free".to_string())),
        Just(Some("pro".to_string())),
        Just(Some("starter".to_string())),
        Just(Some("team".to_string())),
        Just(Some("automation".to_string())),
        "[a-z-]{1,20}".prop_map(Some),
    ]
}

fn arb_account() -> impl Strategy<Value = AccountBalance> {
    (arb_tier_value(), arb_tier_value(), arb_tier_value(), arb_plan_id()).prop_map(
        |(subscription, topped_up, trial, plan_id)| AccountBalance {
            subscription_credits: subscription,
            topped_up_balance: topped_up,
            trial_credits: trial,
            plan_id,
        },
    )
}

// ============================================================================
// Aggregation Properties
// ============================================================================

proptest! {
    /// Property: total is display plus trial
    #[test]
    fn prop_total_is_display_plus_trial(account in arb_account()) {
        let balance = resolve_display_balance(&account);
        prop_assert_eq!(
            balance.total_credits,
            balance.display_credits.saturating_add(balance.trial_credits)
        );
    }

    /// Property: display credits are the clamped subscription and top-up tiers
    #[test]
    fn prop_display_is_clamped_subscription_plus_top_up(account in arb_account()) {
        let balance = resolve_display_balance(&account);
        let expected = credits_or_zero(account.subscription_credits)
            .saturating_add(credits_or_zero(account.topped_up_balance));
        prop_assert_eq!(balance.display_credits, expected);
        prop_assert_eq!(balance.trial_credits, credits_or_zero(account.trial_credits));
    }

    /// Property: a negative subscription contributes nothing
    #[test]
    fn prop_negative_subscription_excluded(
        subscription in i64::MIN..0i64,
        topped_up in 0i64..1_000_000i64,
        plan_id in arb_plan_id(),
    ) {
        let account = AccountBalance {
            subscription_credits: Some(subscription),
            topped_up_balance: Some(topped_up),
            trial_credits: None,
            plan_id,
        };
        let balance = resolve_display_balance(&account);
        prop_assert_eq!(balance.display_credits, topped_up as u64);
    }

    /// Property: breakdown rows add up to the total, shown or not
    #[test]
    fn prop_breakdown_accounts_for_total(account in arb_account()) {
        let balance = resolve_display_balance(&account);
        prop_assert_eq!(balance.breakdown.len(), CreditTier::ALL.len());
        prop_assert_eq!(balance.breakdown_sum(), balance.total_credits);
    }

    /// Property: a zero top-up never shows the Topped Up row
    #[test]
    fn prop_zero_top_up_row_hidden(
        subscription in arb_tier_value(),
        trial in arb_tier_value(),
        plan_id in arb_plan_id(),
    ) {
        let account = AccountBalance {
            subscription_credits: subscription,
            topped_up_balance: Some(0),
            trial_credits: trial,
            plan_id,
        };
        let balance = resolve_display_balance(&account);
        prop_assert!(!balance.is_visible(CreditTier::TopUp));
        prop_assert!(balance.visible_rows().all(|row| row.tier != CreditTier::TopUp));
    }

    /// Property: changing only the plan never changes any total
    #[test]
    fn prop_plan_does_not_change_totals(
        account in arb_account(),
        other_plan in arb_plan_id(),
    ) {
        let original = resolve_display_balance(&account);
        let replanned = resolve_display_balance(&AccountBalance { plan_id: other_plan, ..account });

        prop_assert_eq!(original.display_credits, replanned.display_credits);
        prop_assert_eq!(original.trial_credits, replanned.trial_credits);
        prop_assert_eq!(original.total_credits, replanned.total_credits);
    }
}

// ============================================================================
// Visibility Edge Cases (Non-Property Tests)
// ============================================================================

#[test]
fn test_monthly_row_hidden_for_free_and_unknown_plans() {
    for plan_id in [None, Some("free"), Some("unknown-value")] {
        let account = AccountBalance {
            subscription_credits: Some(300),
            plan_id: plan_id.map(str::to_string),
            ..AccountBalance::default()
        };
        let balance = resolve_display_balance(&account);
        assert!(
            !balance.is_visible(CreditTier::Subscription),
            "Monthly row should be hidden for plan {plan_id:?}"
        );
        assert_eq!(balance.total_credits, 300);
    }
}

#[test]
fn test_monthly_row_shown_for_paid_plans_even_when_empty() {
    for plan_id in ["starter", "pro", "team", "automation"] {
        let account = AccountBalance::new().with_plan_id(plan_id);
        let balance = resolve_display_balance(&account);
        assert!(
            balance.is_visible(CreditTier::Subscription),
            "Monthly row should be shown for plan {plan_id}"
        );
    }
}

#[test]
fn test_trial_row_only_when_positive() {
    let with_trial = resolve_display_balance(&AccountBalance::new().with_trial_credits(15));
    assert!(with_trial.is_visible(CreditTier::Trial));
    assert_eq!(with_trial.display_credits, 0);
    assert_eq!(with_trial.total_credits, 15);

    let negative_trial = resolve_display_balance(&AccountBalance::new().with_trial_credits(-15));
    assert!(!negative_trial.is_visible(CreditTier::Trial));
    assert_eq!(negative_trial.total_credits, 0);
}
