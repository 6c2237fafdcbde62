//! Plan types

use serde::{Deserialize, Serialize};

/// Plan identifiers known to the account store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    /// No paid plan
    Free,
    /// Entry-level monthly subscription
    Starter,
    /// Standard monthly subscription
    Pro,
    /// Multi-seat monthly subscription
    Team,
    /// Automation plan with scheduled workloads
    Automation,
}

impl PlanId {
    /// Every plan in the catalogue, cheapest first
    pub const ALL: [Self; 5] = [
        Self::Free,
        Self::Starter,
        Self::Pro,
        Self::Team,
        Self::Automation,
    ];

    /// Get the plan type this plan belongs to
    pub const fn plan_type(&self) -> PlanType {
        match self {
            Self::Free => PlanType::Free,
            Self::Starter | Self::Pro | Self::Team => PlanType::Subscription,
            Self::Automation => PlanType::Automation,
        }
    }

    /// Get the display name for this plan
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Team => "Team",
            Self::Automation => "Automation",
        }
    }

    /// Get the identifier as stored by the account store
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Team => "team",
            Self::Automation => "automation",
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanId {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "pro" | "professional" => Ok(Self::Pro),
            "team" => Ok(Self::Team),
            "automation" => Ok(Self::Automation),
            _ => Err(PlanParseError(s.to_string())),
        }
    }
}

/// Error parsing a plan identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanParseError(pub String);

impl std::fmt::Display for PlanParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid plan: {}", self.0)
    }
}

impl std::error::Error for PlanParseError {}

/// Plan classification used for entitlement decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Free plan, no recurring allotment
    Free,
    /// Recurring monthly subscription
    Subscription,
    /// Automation plan
    Automation,
}

impl PlanType {
    /// Get the plan type as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Subscription => "subscription",
            Self::Automation => "automation",
        }
    }

    /// Whether this plan type comes with a recurring credit allotment
    pub const fn has_monthly_allotment(&self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Get features available for this plan type
    pub const fn features(&self) -> &'static [PlanFeature] {
        match self {
            Self::Free => &[PlanFeature::TopUp],
            Self::Subscription => &[PlanFeature::MonthlyCredits, PlanFeature::TopUp],
            Self::Automation => &[
                PlanFeature::MonthlyCredits,
                PlanFeature::TopUp,
                PlanFeature::Automation,
            ],
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features a plan may grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFeature {
    /// Recurring credits that reset each billing cycle
    MonthlyCredits,
    /// Purchasing extra credits
    TopUp,
    /// Scheduled automation runs
    Automation,
    /// Additional seats for team members
    TeamSeats,
}

impl PlanFeature {
    /// Get the feature ID string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyCredits => "monthly_credits",
            Self::TopUp => "top_up",
            Self::Automation => "automation",
            Self::TeamSeats => "team_seats",
        }
    }
}

impl std::fmt::Display for PlanFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved plan classification and label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDescriptor {
    /// Plan the descriptor was resolved to
    pub plan_id: PlanId,
    /// Plan type
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    /// Display label
    pub name: String,
}

impl PlanDescriptor {
    /// Build the descriptor for a known plan
    pub fn for_plan(plan_id: PlanId) -> Self {
        Self {
            plan_id,
            plan_type: plan_id.plan_type(),
            name: plan_id.display_name().to_string(),
        }
    }

    /// The free plan descriptor
    pub fn free() -> Self {
        Self::for_plan(PlanId::Free)
    }

    /// Whether this is the free plan type
    pub fn is_free(&self) -> bool {
        self.plan_type == PlanType::Free
    }

    /// Check if the plan grants a feature
    pub fn allows(&self, feature: PlanFeature) -> bool {
        if feature == PlanFeature::TeamSeats {
            return self.plan_id == PlanId::Team;
        }
        self.plan_type.features().contains(&feature)
    }
}

impl Default for PlanDescriptor {
    fn default() -> Self {
        Self::free()
    }
}
