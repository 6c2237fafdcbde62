//! `pulse balance`: resolve an account snapshot

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pulse_ledger_core::{resolve_account, ResolvedAccount};
use pulse_types::AccountBalance;

/// Read an account snapshot from a file, or stdin when no path is given
pub fn read_account(path: Option<&Path>) -> anyhow::Result<AccountBalance> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read account snapshot from stdin")?;
            raw
        }
    };

    parse_account(&raw)
}

/// Parse an account snapshot
pub fn parse_account(raw: &str) -> anyhow::Result<AccountBalance> {
    serde_json::from_str(raw).context("account snapshot is not valid JSON")
}

/// Resolve an account and render it as pretty JSON
pub fn render(account: &AccountBalance, visible_only: bool) -> anyhow::Result<String> {
    let mut resolved: ResolvedAccount = resolve_account(account);
    if visible_only {
        resolved.balance.breakdown.retain(|row| row.visible);
    }

    tracing::debug!(
        plan = %resolved.plan.plan_id,
        total_credits = resolved.balance.total_credits,
        "Resolved account"
    );

    serde_json::to_string_pretty(&resolved).context("failed to serialize resolved account")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full_breakdown() {
        let account = parse_account(r#"{"subscriptionCredits": 100, "planId": "free"}"#).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&account, false).unwrap()).unwrap();

        assert_eq!(json["plan"]["type"], "free");
        assert_eq!(json["balance"]["total_credits"], 100);
        assert_eq!(json["balance"]["breakdown"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_render_visible_only() {
        let account = parse_account(r#"{"toppedUpBalance": 40, "planId": "free"}"#).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&account, true).unwrap()).unwrap();

        let rows = json["balance"]["breakdown"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["label"], "Topped Up");
        assert_eq!(json["balance"]["total_credits"], 40);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_account("not json").is_err());
    }
}
