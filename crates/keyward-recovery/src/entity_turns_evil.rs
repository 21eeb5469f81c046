//! Entities turning evil, being compromised, or colluding.

use crate::scenario::{
    EntityTurnsEvilScenario, GuardianScenarioOutcome, RecoveryOutcome, TakeoverOutcome,
};
use keyward_core::{
    guardians_with_entities, Entity, Guardian, GuardianPolicy, KeywardError, Result,
    SecretSplitPolicy, Sentence,
};
use std::collections::{BTreeSet, HashSet};

pub const SECRET_SPLIT_DENIABLE_AND_TAKEOVERABLE: &str = "secret_split_deniable_and_takeoverable";
pub const SECRET_SPLIT_DENIABLE: &str = "secret_split_deniable";
pub const SECRET_SPLIT_NON_DENIABLE_NO_TAKEOVER: &str = "secret_split_non_deniable_no_takeover";

/// Computes the entities that may turn evil.
///
/// Only guardians controlled by an organization are considered; the user's
/// own factors never turn against them. Scenarios naming the same set of
/// entities are merged, keeping the first.
pub fn possible_entities_turning_evil(guardians: &[Guardian]) -> Vec<EntityTurnsEvilScenario> {
    let mut scenarios = Vec::new();

    for guardian in guardians {
        match guardian {
            Guardian::WalletProvider { entity, .. }
            | Guardian::UserExternalAccount { entity, .. } => {
                scenarios.push(EntityTurnsEvilScenario {
                    turns_evil: vec![entity.clone()],
                    description: Sentence::new(format!(
                        "{} turns evil or is compromised",
                        entity.name
                    )),
                });
            }
            // No wildcard: a new guardian kind must be classified here.
            Guardian::Passkey
            | Guardian::WalletPassword
            | Guardian::SelfCustody
            | Guardian::ZkId { .. } => {}
        }
    }

    let mut seen: HashSet<BTreeSet<String>> = HashSet::new();
    scenarios.retain(|scenario| {
        let entity_set = scenario
            .turns_evil
            .iter()
            .map(|entity| entity.id.to_string())
            .collect::<BTreeSet<_>>();
        seen.insert(entity_set)
    });
    scenarios
}

/// What happens if the entities of `scenario` turn evil and collude?
pub fn evaluate_guardian_policy_evil_scenario(
    policy: &GuardianPolicy,
    scenario: &EntityTurnsEvilScenario,
) -> Result<GuardianScenarioOutcome> {
    match policy {
        GuardianPolicy::KOfNWithTimelock(_) => Err(KeywardError::unsupported(format!(
            "{} entity collusion evaluation not implemented yet",
            policy.kind()
        ))),
        GuardianPolicy::SecretSplitAcrossGuardians(split) => evaluate_secret_split(split, scenario),
    }
}

fn non_recoverable_reason(
    policy: &SecretSplitPolicy,
    evil: &[Entity],
    evil_optional: usize,
) -> Option<Sentence> {
    for required in &policy.required_guardians {
        if let Some(entity) = required.entity() {
            if evil.iter().any(|e| e.id == entity.id) {
                return Some(Sentence::new(format!(
                    "{} is in a position to block the account recovery process.",
                    entity.name
                )));
            }
        }
    }

    if let Some(reconstitutor) = policy.secret_reconstitution.entity() {
        if let Some(evil_reconstitutor) = evil.iter().find(|e| e.id == reconstitutor.id) {
            return Some(Sentence::new(format!(
                "{} is in a position to block the secret reconstitution process.",
                evil_reconstitutor.name
            )));
        }
    }

    let honest_optional = i64::from(policy.optional_min_configurable) - evil_optional as i64;
    if honest_optional < i64::from(policy.optional_min_needed_for_recovery) {
        return Some(Sentence::new(
            "Not enough honest guardians left to perform account recovery.",
        ));
    }

    None
}

fn takeover_reason(
    policy: &SecretSplitPolicy,
    evil: &[Entity],
    evil_optional: usize,
) -> Option<Sentence> {
    let evil_required = guardians_with_entities(evil, &policy.required_guardians).len();
    if evil_required != policy.required_guardians.len() {
        // At least one honest required guardian.
        return None;
    }
    if (evil_optional as u64) < u64::from(policy.optional_min_needed_for_recovery) {
        return None;
    }
    Some(Sentence::new("Account can be unilaterally taken over."))
}

fn evaluate_secret_split(
    policy: &SecretSplitPolicy,
    scenario: &EntityTurnsEvilScenario,
) -> Result<GuardianScenarioOutcome> {
    let evil = &scenario.turns_evil;
    let evil_optional = guardians_with_entities(evil, &policy.optional_guardians).len();

    let non_recoverable = non_recoverable_reason(policy, evil, evil_optional);
    let takeover = takeover_reason(policy, evil, evil_optional);

    match (non_recoverable, takeover) {
        (Some(denial), Some(seizure)) => GuardianScenarioOutcome::at_risk(
            scenario.clone(),
            SECRET_SPLIT_DENIABLE_AND_TAKEOVERABLE,
            RecoveryOutcome::cannot_recover(denial),
            TakeoverOutcome::can_be_taken_over(seizure),
            "
                {{WALLET_NAME}} should ensure that account recovery cannot be
                leveraged by any single actor to take over the user's account,
                and that account recovery can still be done even in the face
                of one actor being uncooperative.
            ",
        ),
        (None, Some(_)) => {
            tracing::error!(
                scenario = %scenario.description,
                "Takeover possible while recovery is not deniable"
            );
            Err(KeywardError::inconsistent(format!(
                "takeover possible without recovery being deniable in scenario '{}'",
                scenario.description
            )))
        }
        (Some(denial), None) => GuardianScenarioOutcome::at_risk(
            scenario.clone(),
            SECRET_SPLIT_DENIABLE,
            RecoveryOutcome::cannot_recover(denial),
            TakeoverOutcome::CannotBeTakenOver,
            "
                {{WALLET_NAME}} should ensure account recovery can be done
                even when any single required actor is uncooperative.
            ",
        ),
        (None, None) => Ok(GuardianScenarioOutcome::fully_safe(
            scenario.clone(),
            SECRET_SPLIT_NON_DENIABLE_NO_TAKEOVER,
        )),
    }
}
