//! `keyward rate`: rate wallet files against every attribute.

use crate::config::KeywardConfig;
use crate::report::{
    render_wallet_reports, AttributeOutcome, AttributeReport, VariantRating, WalletReport,
};
use crate::wallet::{load_wallet, WalletFile};
use anyhow::Result;
use keyward_attributes::{all_attributes, Attribute};
use std::path::PathBuf;

/// Rate one attribute across all variants of a wallet.
///
/// The first analysis error fails the attribute as a whole.
pub fn rate_attribute(attribute: &dyn Attribute, wallet: &WalletFile) -> AttributeOutcome {
    let mut evaluations = Vec::with_capacity(wallet.variants.len());
    let mut variants = Vec::with_capacity(wallet.variants.len());

    for (variant, features) in &wallet.variants {
        match attribute.evaluate(features) {
            Ok(evaluation) => {
                variants.push(VariantRating {
                    variant: variant.clone(),
                    rating: evaluation.rating(),
                    verdict: evaluation.id(),
                });
                evaluations.push(evaluation);
            }
            Err(err) => {
                tracing::error!(
                    wallet = %wallet.name,
                    variant = %variant,
                    attribute = attribute.id(),
                    error = %err,
                    "Attribute analysis failed"
                );
                return AttributeOutcome::Error {
                    message: format!("{variant}: {err}"),
                };
            }
        }
    }

    match attribute.aggregate(evaluations) {
        Ok(aggregate) => AttributeOutcome::Rated {
            aggregate,
            variants,
        },
        Err(err) => AttributeOutcome::Error {
            message: err.to_string(),
        },
    }
}

pub fn rate_wallet(wallet: &WalletFile) -> WalletReport {
    let attributes = all_attributes()
        .iter()
        .map(|attribute| AttributeReport {
            attribute: attribute.id(),
            display_name: attribute.display_name(),
            outcome: rate_attribute(attribute.as_ref(), wallet),
        })
        .collect();

    WalletReport {
        wallet: wallet.name.clone(),
        attributes,
    }
}

/// Whether a set of reports should make the process exit non-zero.
pub fn reports_failed(reports: &[WalletReport], config: &KeywardConfig) -> bool {
    reports
        .iter()
        .any(|report| report.has_errors() || (config.fail_on_unrated && report.has_unrated()))
}

/// Run the command; returns `false` when the exit status should be non-zero.
pub fn handle_rate(files: &[PathBuf], config: &KeywardConfig) -> Result<bool> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let wallet = load_wallet(path)?;
        reports.push(rate_wallet(&wallet));
    }

    print!("{}", render_wallet_reports(&reports, config)?);
    Ok(!reports_failed(&reports, config))
}
