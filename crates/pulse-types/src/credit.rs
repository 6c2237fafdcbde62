//! Credit tier and display balance types

use serde::{Deserialize, Serialize};

/// One named source of credit balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    /// Recurring subscription allotment
    Subscription,
    /// Purchased credits
    TopUp,
    /// Promotional trial credits
    Trial,
}

impl CreditTier {
    /// Tiers in breakdown order
    pub const ALL: [Self; 3] = [Self::Subscription, Self::TopUp, Self::Trial];

    /// Get the breakdown row label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Subscription => "Monthly",
            Self::TopUp => "Topped Up",
            Self::Trial => "Trial",
        }
    }

    /// Whether this tier counts towards the display (non-trial) credits
    pub const fn is_display_tier(&self) -> bool {
        !matches!(self, Self::Trial)
    }
}

impl std::fmt::Display for CreditTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the balance breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Tier this row describes
    pub tier: CreditTier,
    /// Row label
    pub label: String,
    /// Clamped amount
    pub amount: u64,
    /// Whether the row is shown
    pub visible: bool,
}

/// Display balance derived from an account snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBalance {
    /// Subscription plus topped-up credits
    pub display_credits: u64,
    /// Trial credits
    pub trial_credits: u64,
    /// Display plus trial credits
    pub total_credits: u64,
    /// One row per tier, including suppressed rows
    pub breakdown: Vec<BreakdownRow>,
}

impl DisplayBalance {
    /// Rows that should be shown
    pub fn visible_rows(&self) -> impl Iterator<Item = &BreakdownRow> {
        self.breakdown.iter().filter(|row| row.visible)
    }

    /// Look up the row for a tier
    pub fn row(&self, tier: CreditTier) -> Option<&BreakdownRow> {
        self.breakdown.iter().find(|row| row.tier == tier)
    }

    /// Whether the row for a tier is shown
    pub fn is_visible(&self, tier: CreditTier) -> bool {
        self.row(tier).is_some_and(|row| row.visible)
    }

    /// Sum of every breakdown row, shown or not
    pub fn breakdown_sum(&self) -> u64 {
        self.breakdown
            .iter()
            .fold(0u64, |acc, row| acc.saturating_add(row.amount))
    }
}
