//! Pulse Utils - Shared utilities for Pulse binaries

pub mod config;

pub use config::load_env;
