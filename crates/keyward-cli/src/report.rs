//! Rating reports and their text or JSON rendering.

use crate::config::{KeywardConfig, OutputFormat};
use keyward_attributes::{Details, Evaluation, Rating};
use keyward_core::WALLET_NAME_PLACEHOLDER;
use keyward_recovery::GuardianScenarioOutcome;
use serde::Serialize;
use std::fmt::Write;

/// Rating of one attribute for one variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantRating {
    pub variant: String,
    pub rating: Rating,
    pub verdict: &'static str,
}

/// Result of rating one attribute across all variants.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttributeOutcome {
    Rated {
        aggregate: Evaluation,
        variants: Vec<VariantRating>,
    },
    /// Analysis failed; never defaulted to a rating.
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeReport {
    pub attribute: &'static str,
    pub display_name: &'static str,
    #[serde(flatten)]
    pub outcome: AttributeOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletReport {
    pub wallet: String,
    pub attributes: Vec<AttributeReport>,
}

impl WalletReport {
    pub fn has_errors(&self) -> bool {
        self.attributes
            .iter()
            .any(|report| matches!(report.outcome, AttributeOutcome::Error { .. }))
    }

    pub fn has_unrated(&self) -> bool {
        self.attributes.iter().any(|report| {
            matches!(
                &report.outcome,
                AttributeOutcome::Rated { aggregate, .. } if aggregate.rating() == Rating::Unrated
            )
        })
    }
}

/// Scenario outcomes of one variant's guardian policy.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub wallet: String,
    pub variant: String,
    pub policy: String,
    pub outcomes: Vec<GuardianScenarioOutcome>,
}

pub fn render_wallet_reports(
    reports: &[WalletReport],
    config: &KeywardConfig,
) -> anyhow::Result<String> {
    match config.output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for report in reports {
                writeln!(out, "{}", report.wallet)?;
                for attribute in &report.attributes {
                    match &attribute.outcome {
                        AttributeOutcome::Rated {
                            aggregate,
                            variants,
                        } => {
                            writeln!(
                                out,
                                "  {}: {} ({})",
                                attribute.display_name,
                                aggregate.rating(),
                                aggregate.id()
                            )?;
                            writeln!(
                                out,
                                "    {}",
                                aggregate
                                    .value
                                    .short_explanation
                                    .render(WALLET_NAME_PLACEHOLDER, &report.wallet)
                            )?;
                            if let Details::Markdown(details) = &aggregate.details {
                                let details = details
                                    .render(WALLET_NAME_PLACEHOLDER, &report.wallet);
                                for line in details.lines().filter(|line| !line.is_empty()) {
                                    writeln!(out, "    | {line}")?;
                                }
                            }
                            for variant in variants {
                                writeln!(
                                    out,
                                    "    [{}] {} ({})",
                                    variant.variant, variant.rating, variant.verdict
                                )?;
                            }
                        }
                        AttributeOutcome::Error { message } => {
                            writeln!(out, "  {}: error", attribute.display_name)?;
                            writeln!(out, "    {message}")?;
                        }
                    }
                }
            }
            Ok(out)
        }
    }
}

pub fn render_scenario_report(
    report: &ScenarioReport,
    config: &KeywardConfig,
) -> anyhow::Result<String> {
    match config.output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "{} [{}]: {}", report.wallet, report.variant, report.policy)?;
            for outcome in &report.outcomes {
                let scenario = outcome.scenario();
                writeln!(
                    out,
                    "  {} ({}): {}",
                    scenario.id(),
                    outcome.outcome_id(),
                    scenario.description()
                )?;
                match outcome.recovery().reason() {
                    None => writeln!(out, "    recovery: possible")?,
                    Some(reason) => writeln!(out, "    recovery: blocked, {reason}")?,
                }
                match outcome.takeover().reason() {
                    None => writeln!(out, "    takeover: not possible")?,
                    Some(reason) => writeln!(out, "    takeover: possible, {reason}")?,
                }
                if let Some(improvement) = outcome.how_to_improve() {
                    writeln!(
                        out,
                        "    improve: {}",
                        improvement.render(WALLET_NAME_PLACEHOLDER, &report.wallet)
                    )?;
                }
            }
            Ok(out)
        }
    }
}
