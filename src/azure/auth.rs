//! Azure CLI login check.
//!
//! Queries are only run with a working `az login`; a missing or expired login
//! is an error for the caller instead of an unauthenticated query.

use super::cli;
use serde::Deserialize;
use std::error::Error;

const ACCOUNT_SHOW_CMD: &str = "az account show --output json";

/// Signed-in user of the Azure CLI.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AccountUser {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Output of `az account show`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Default subscription id.
    pub id: String,
    /// Default subscription name.
    pub name: String,
    pub tenant_id: String,
    #[serde(default)]
    pub user: AccountUser,
}

/// Fail unless the Azure CLI has a usable login.
pub fn ensure_logged_in() -> Result<Account, Box<dyn Error>> {
    let output = cli::run(ACCOUNT_SHOW_CMD)
        .map_err(|e| format!("Azure CLI not logged in, run 'az login' first: {e}"))?;
    let account = parse_account(&output)?;
    log::info!(
        "Logged in as '{}' ({}) tenant={}",
        account.user.name,
        account.user.kind,
        account.tenant_id
    );
    Ok(account)
}

fn parse_account(json: &str) -> Result<Account, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let account = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing az account: path={} error={}", e.path(), e))?;
    Ok(account)
}
