//! `keyward scenarios`: list every scenario outcome of a guardian policy.

use crate::config::KeywardConfig;
use crate::report::{render_scenario_report, ScenarioReport};
use crate::wallet::{load_wallet, WalletFile};
use anyhow::{Context, Result};
use keyward_recovery::evaluate_all_guardian_scenarios;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
#[error("variant {variant} of {wallet} has no guardian recovery policy")]
pub struct NoGuardianPolicy {
    pub wallet: String,
    pub variant: String,
}

pub fn scenario_report(wallet: &WalletFile, variant: Option<&str>) -> Result<ScenarioReport> {
    let (variant, features) = wallet.variant(variant)?;
    let policy = features
        .security
        .account_recovery
        .as_ref()
        .and_then(|recovery| recovery.guardian_policy())
        .ok_or_else(|| NoGuardianPolicy {
            wallet: wallet.name.clone(),
            variant: variant.to_string(),
        })?;

    let outcomes = evaluate_all_guardian_scenarios(policy)
        .with_context(|| format!("Failed to analyze {} [{variant}]", wallet.name))?;

    Ok(ScenarioReport {
        wallet: wallet.name.clone(),
        variant: variant.to_string(),
        policy: policy.to_string(),
        outcomes,
    })
}

pub fn handle_scenarios(file: &Path, variant: Option<&str>, config: &KeywardConfig) -> Result<()> {
    let wallet = load_wallet(file)?;
    let report = scenario_report(&wallet, variant)?;
    print!("{}", render_scenario_report(&report, config)?);
    Ok(())
}
