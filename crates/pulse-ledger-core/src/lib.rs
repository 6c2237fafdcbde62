//! Pulse Ledger Core - Credit ledger and entitlement resolution
//!
//! Pure functions that turn an account balance snapshot into the values a
//! dashboard renders: the displayed credit total, the per-tier breakdown and
//! the plan classification. Nothing here holds state, so every function may
//! be called concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use pulse_ledger_core::{resolve_display_balance, resolve_plan};
//! use pulse_types::{AccountBalance, PlanType};
//!
//! let account = AccountBalance::new()
//!     .with_subscription_credits(500)
//!     .with_topped_up_balance(20)
//!     .with_plan_id("pro");
//!
//! let balance = resolve_display_balance(&account);
//! assert_eq!(balance.total_credits, 520);
//! assert_eq!(resolve_plan(&account).plan_type, PlanType::Subscription);
//! ```

pub mod policy;
pub mod resolver;

pub use policy::{credits_or_zero, row_visible, tier_credits};
pub use resolver::{
    lookup_plan, resolve_account, resolve_display_balance, resolve_plan, ResolvedAccount,
};
