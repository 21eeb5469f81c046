//! # Keyward Recovery - Guardian Scenario Analysis
//!
//! Given a guardian policy, enumerates every plausible adversarial or
//! failure scenario and decides for each whether the account stays
//! recoverable by its owner and safe from unilateral takeover.
//!
//! ## Scenario Kinds
//!
//! - **Data loss**: one guardian, or a shared failure domain (the user's
//!   device, one entity's infrastructure), loses its share
//! - **Entity turns evil**: an organization controlling guardians becomes
//!   adversarial or is compromised
//!
//! ## Design Principles
//!
//! - Possibilistic, not probabilistic: every generated scenario counts
//! - Every generator and evaluator is a pure function of its inputs
//! - Broken invariants are returned as errors, never defaulted to a verdict
//! - K-of-N timelock policies are routed but not evaluated yet
//!
//! ## Entry Point
//!
//! [`evaluate_all_guardian_scenarios`] validates a policy, expands all of its
//! scenarios and evaluates each one.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Guardians losing their shares
pub mod data_loss;

/// Entities turning evil or colluding
pub mod entity_turns_evil;

/// Expander registry and evaluation dispatch
pub mod expansion;

/// Scenario and outcome value types
pub mod scenario;

pub use data_loss::{evaluate_guardian_share_lost_scenario, possible_guardians_losing_shares};
pub use entity_turns_evil::{
    evaluate_guardian_policy_evil_scenario, possible_entities_turning_evil,
};
pub use expansion::{
    evaluate_all_guardian_scenarios, evaluate_guardian_scenario, expand_guardian_scenarios,
    guardian_scenario_id, ScenarioExpander, SCENARIO_EXPANDERS,
};
pub use scenario::{
    DataLossScenario, EntityTurnsEvilScenario, GuardianScenario, GuardianScenarioKind,
    GuardianScenarioOutcome, RecoveryOutcome, ScenarioId, TakeoverOutcome,
};
