//! Guardians losing their share of the recovery secret.

use crate::scenario::{
    DataLossScenario, GuardianScenarioOutcome, RecoveryOutcome, TakeoverOutcome,
};
use indexmap::IndexMap;
use keyward_core::{
    guardians_include, Entity, EntityId, Guardian, GuardianPolicy, KeywardError, Result,
    SecretSplitPolicy, Sentence,
};

pub const SECRET_SPLIT_REQUIRED_GUARDIAN: &str = "secret_split_required_guardian";
pub const SECRET_SPLIT_NOT_ENOUGH_OPTIONAL_GUARDIAN: &str =
    "secret_split_not_enough_optional_guardian";
pub const SECRET_SPLIT_RECOVERABLE: &str = "secret_split_recoverable";

fn describe_single_loss(guardian: &Guardian) -> Sentence {
    match guardian {
        Guardian::Passkey => Sentence::new("User loses access to their Passkey device"),
        Guardian::WalletPassword => Sentence::new("User forgets their wallet password"),
        Guardian::SelfCustody => Sentence::new("User accidentally wipes their device"),
        Guardian::UserExternalAccount {
            entity,
            description,
        } => {
            if description.trim().is_empty() {
                Sentence::new(format!("User loses access to their account at {}", entity.name))
            } else {
                Sentence::new(format!("User loses access to their {description}"))
            }
        }
        Guardian::WalletProvider {
            entity,
            description,
        } => {
            let service = if description.trim().is_empty() {
                format!("{}'s service", entity.name)
            } else {
                description.clone()
            };
            Sentence::new(format!(
                "{service} loses data or {} goes out of business",
                entity.name
            ))
        }
        Guardian::ZkId { id, description } => {
            let credential = if description.trim().is_empty() {
                id
            } else {
                description
            };
            Sentence::new(format!("User loses their {credential}"))
        }
    }
}

/// Computes the sets of guardians that may lose shares at the same time.
///
/// One scenario per guardian, then the shared failure domains: the user's
/// device (self-custody key and passkey together) and every entity holding
/// more than one guardian.
pub fn possible_guardians_losing_shares(guardians: &[Guardian]) -> Vec<DataLossScenario> {
    let mut scenarios: Vec<DataLossScenario> = guardians
        .iter()
        .map(|guardian| DataLossScenario {
            guardians_with_data_loss: vec![guardian.clone()],
            description: describe_single_loss(guardian),
        })
        .collect();

    let same_device: Vec<Guardian> = guardians
        .iter()
        .filter(|guardian| guardian.is_on_user_device())
        .cloned()
        .collect();
    if same_device.len() > 1 {
        scenarios.push(DataLossScenario {
            guardians_with_data_loss: same_device,
            description: Sentence::new(
                "User loses access to their device which also holds their Passkey",
            ),
        });
    }

    let mut by_entity: IndexMap<EntityId, (Entity, Vec<Guardian>)> = IndexMap::new();
    for guardian in guardians {
        if let Some(entity) = guardian.entity() {
            by_entity
                .entry(entity.id.clone())
                .or_insert_with(|| (entity.clone(), Vec::new()))
                .1
                .push(guardian.clone());
        }
    }
    for (entity, same_entity) in by_entity.into_values() {
        if same_entity.len() > 1 {
            scenarios.push(DataLossScenario {
                guardians_with_data_loss: same_entity,
                description: Sentence::new(format!("{} loses all their data", entity.name)),
            });
        }
    }

    scenarios
}

/// What happens if the guardians of `scenario` lose their shares?
pub fn evaluate_guardian_share_lost_scenario(
    policy: &GuardianPolicy,
    scenario: &DataLossScenario,
) -> Result<GuardianScenarioOutcome> {
    match policy {
        GuardianPolicy::KOfNWithTimelock(_) => Err(KeywardError::unsupported(format!(
            "{} data loss evaluation not implemented yet",
            policy.kind()
        ))),
        GuardianPolicy::SecretSplitAcrossGuardians(split) => evaluate_secret_split(split, scenario),
    }
}

fn evaluate_secret_split(
    policy: &SecretSplitPolicy,
    scenario: &DataLossScenario,
) -> Result<GuardianScenarioOutcome> {
    let lost = &scenario.guardians_with_data_loss;

    if policy
        .required_guardians
        .iter()
        .any(|required| guardians_include(required, lost))
    {
        return GuardianScenarioOutcome::at_risk(
            scenario.clone(),
            SECRET_SPLIT_REQUIRED_GUARDIAN,
            RecoveryOutcome::cannot_recover("Recovery is no longer possible."),
            TakeoverOutcome::CannotBeTakenOver,
            "
                {{WALLET_NAME}} should diversify the role of guardians to ensure
                no single guardian is absolutely required to perform account recovery.
            ",
        );
    }

    let lost_optional = policy
        .optional_guardians
        .iter()
        .filter(|optional| guardians_include(optional, lost))
        .count();

    if lost_optional as i64 > policy.tolerable_optional_losses() {
        return GuardianScenarioOutcome::at_risk(
            scenario.clone(),
            SECRET_SPLIT_NOT_ENOUGH_OPTIONAL_GUARDIAN,
            RecoveryOutcome::cannot_recover(
                "Recovery is not possible as not enough recovery shares are left.",
            ),
            TakeoverOutcome::CannotBeTakenOver,
            "
                {{WALLET_NAME}} should require the user to configure a
                larger number of guardians to keep the account recoverable
                in this scenario.
            ",
        );
    }

    Ok(GuardianScenarioOutcome::fully_safe(
        scenario.clone(),
        SECRET_SPLIT_RECOVERABLE,
    ))
}
