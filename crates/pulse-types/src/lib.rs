//! Pulse Types - Shared domain types
//!
//! This crate contains domain types used across Pulse components:
//! - Account balance snapshots supplied by the account store
//! - Plans, plan types and plan features
//! - Credit tiers and the derived display balance
//! - Feedback prompt ratings

pub mod account;
pub mod credit;
pub mod error;
pub mod feedback;
pub mod plan;

pub use account::*;
pub use credit::*;
pub use error::*;
pub use feedback::*;
pub use plan::*;
