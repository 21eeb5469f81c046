//! Scenario expansion: generate every scenario for a policy and evaluate it.
//!
//! Expanders are registered in a static table; each one handles a single
//! policy kind and yields nothing for the others. Evaluation dispatches on
//! the scenario kind with an exhaustive match.

use crate::data_loss::{evaluate_guardian_share_lost_scenario, possible_guardians_losing_shares};
use crate::entity_turns_evil::{
    evaluate_guardian_policy_evil_scenario, possible_entities_turning_evil,
};
use crate::scenario::{GuardianScenario, GuardianScenarioOutcome, ScenarioId};
use keyward_core::{GuardianPolicy, KeywardError, Result};
use std::collections::HashSet;

/// Produces the scenarios relevant to one policy kind.
pub type ScenarioExpander = fn(&GuardianPolicy) -> Vec<GuardianScenario>;

/// Registered expanders, one per policy kind.
pub const SCENARIO_EXPANDERS: &[ScenarioExpander] = &[
    expand_guardian_k_of_n_timelock_scenarios,
    expand_guardian_secret_split_scenarios,
];

fn scenarios_for_guardians(guardians: &[keyward_core::Guardian]) -> Vec<GuardianScenario> {
    possible_guardians_losing_shares(guardians)
        .into_iter()
        .map(GuardianScenario::from)
        .chain(
            possible_entities_turning_evil(guardians)
                .into_iter()
                .map(GuardianScenario::from),
        )
        .collect()
}

/// Scenarios for K-of-N timelock policies (evaluation not supported yet).
pub fn expand_guardian_k_of_n_timelock_scenarios(policy: &GuardianPolicy) -> Vec<GuardianScenario> {
    match policy {
        GuardianPolicy::KOfNWithTimelock(timelock) => {
            scenarios_for_guardians(&timelock.configured_guardians)
        }
        GuardianPolicy::SecretSplitAcrossGuardians(_) => Vec::new(),
    }
}

/// Scenarios for secret-split policies, over required and optional guardians.
pub fn expand_guardian_secret_split_scenarios(policy: &GuardianPolicy) -> Vec<GuardianScenario> {
    match policy {
        GuardianPolicy::SecretSplitAcrossGuardians(split) => {
            scenarios_for_guardians(&split.all_guardians())
        }
        GuardianPolicy::KOfNWithTimelock(_) => Vec::new(),
    }
}

/// Stable identifier of a scenario.
pub fn guardian_scenario_id(scenario: &GuardianScenario) -> ScenarioId {
    scenario.id()
}

/// Run every registered expander and reject duplicate scenarios.
pub fn expand_guardian_scenarios(policy: &GuardianPolicy) -> Result<Vec<GuardianScenario>> {
    policy.validate()?;

    let scenarios: Vec<GuardianScenario> = SCENARIO_EXPANDERS
        .iter()
        .flat_map(|expander| expander(policy))
        .collect();

    ensure_distinct_scenarios(&scenarios)?;

    tracing::debug!(
        policy = %policy.kind(),
        scenarios = scenarios.len(),
        "Expanded guardian scenarios"
    );

    Ok(scenarios)
}

/// Fail on the first scenario whose identifier was already produced.
pub(crate) fn ensure_distinct_scenarios(scenarios: &[GuardianScenario]) -> Result<()> {
    let mut seen = HashSet::with_capacity(scenarios.len());
    for scenario in scenarios {
        let id = guardian_scenario_id(scenario);
        if !seen.insert(id.clone()) {
            tracing::error!(scenario_id = %id, "Duplicate guardian scenario");
            return Err(KeywardError::duplicate_scenario(id.to_string()));
        }
    }
    Ok(())
}

/// Evaluate one scenario with the evaluator matching its kind.
pub fn evaluate_guardian_scenario(
    policy: &GuardianPolicy,
    scenario: &GuardianScenario,
) -> Result<GuardianScenarioOutcome> {
    match scenario {
        GuardianScenario::DataLoss(loss) => evaluate_guardian_share_lost_scenario(policy, loss),
        GuardianScenario::EntityTurnsEvil(evil) => {
            evaluate_guardian_policy_evil_scenario(policy, evil)
        }
    }
}

/// Evaluate every plausible scenario for `policy`.
///
/// The result is never empty: a policy with guardians always yields at least
/// one scenario per guardian.
pub fn evaluate_all_guardian_scenarios(
    policy: &GuardianPolicy,
) -> Result<Vec<GuardianScenarioOutcome>> {
    let outcomes = expand_guardian_scenarios(policy)?
        .iter()
        .map(|scenario| evaluate_guardian_scenario(policy, scenario))
        .collect::<Result<Vec<_>>>()?;

    if outcomes.is_empty() {
        return Err(KeywardError::no_scenarios(policy.to_string()));
    }

    tracing::debug!(
        policy = %policy.kind(),
        outcomes = outcomes.len(),
        at_risk = outcomes.iter().filter(|outcome| !outcome.is_fully_safe()).count(),
        "Evaluated guardian scenarios"
    );

    Ok(outcomes)
}
