//! Feedback prompt types

use serde::{Deserialize, Serialize};

/// Answer recorded by a feedback prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Positive answer
    Yes,
    /// Undecided answer
    Maybe,
    /// Negative answer
    No,
}

impl Rating {
    /// Get the rating as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Rating {
    type Err = RatingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "maybe" => Ok(Self::Maybe),
            "no" => Ok(Self::No),
            _ => Err(RatingParseError(s.to_string())),
        }
    }
}

/// Error parsing a rating string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingParseError(pub String);

impl std::fmt::Display for RatingParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid rating: {}", self.0)
    }
}

impl std::error::Error for RatingParseError {}

/// Observable phase of a feedback prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPhase {
    /// Nothing shown
    Hidden,
    /// Opened, waiting for the entrance delay
    Entering,
    /// Shown and awaiting a rating
    Visible,
    /// Rating recorded, acknowledgement shown
    Submitted,
    /// Exit animation running, teardown pending
    Fading,
}
