//! Scenario evaluation at the edges of the secret-split rules.

#![allow(clippy::unwrap_used)]

use assert_matches::assert_matches;
use keyward_core::{Entity, Guardian, KeywardError, Sentence};
use keyward_recovery::data_loss::SECRET_SPLIT_REQUIRED_GUARDIAN;
use keyward_recovery::entity_turns_evil::{
    SECRET_SPLIT_DENIABLE, SECRET_SPLIT_DENIABLE_AND_TAKEOVERABLE,
    SECRET_SPLIT_NON_DENIABLE_NO_TAKEOVER,
};
use keyward_recovery::*;
use keyward_testkit::*;

fn three_services(configurable: u32, needed: u32) -> SecretSplitPolicyBuilder {
    SecretSplitPolicyBuilder::new()
        .optional(developer_cloud())
        .optional(cex_account())
        .optional(auditor_account())
        .threshold(configurable, needed)
}

fn turning_evil(entities: Vec<Entity>) -> EntityTurnsEvilScenario {
    EntityTurnsEvilScenario {
        turns_evil: entities,
        description: Sentence::new("collusion"),
    }
}

#[test]
fn single_entity_below_collusion_threshold_is_safe() {
    // Needs a spare enrolled share. Under `configurable - evil < needed` a
    // 2-of-2 enrollment is already deniable by one entity (pinned below), so
    // this boundary is 3/2 and must not be tightened to 2/2.
    let policy = three_services(3, 2).build();
    let outcome =
        evaluate_guardian_policy_evil_scenario(&policy, &turning_evil(vec![example_cex()]))
            .unwrap();
    assert!(outcome.is_fully_safe());
    assert_eq!(outcome.outcome_id(), SECRET_SPLIT_NON_DENIABLE_NO_TAKEOVER);
}

#[test]
fn two_colluding_entities_reach_the_threshold() {
    let policy = three_services(3, 2).build();
    let outcome = evaluate_guardian_policy_evil_scenario(
        &policy,
        &turning_evil(vec![example_cex(), example_security_auditor()]),
    )
    .unwrap();
    assert!(outcome.takeover().is_takeover_possible());
    assert!(!outcome.recovery().is_recoverable());
    assert_eq!(outcome.outcome_id(), SECRET_SPLIT_DENIABLE_AND_TAKEOVERABLE);
}

#[test]
fn one_entity_can_deny_when_every_enrolled_share_is_needed() {
    // Only two optional guardians get enrolled and both are needed, so any
    // one of them withholding its share blocks recovery.
    let policy = three_services(2, 2).build();
    let outcome =
        evaluate_guardian_policy_evil_scenario(&policy, &turning_evil(vec![example_cex()]))
            .unwrap();
    assert_eq!(outcome.outcome_id(), SECRET_SPLIT_DENIABLE);
    assert_eq!(
        outcome.recovery().reason().unwrap().as_str(),
        "Not enough honest guardians left to perform account recovery."
    );
    assert!(!outcome.takeover().is_takeover_possible());
}

#[test]
fn reconstitution_site_can_block_recovery() {
    let policy = three_services(3, 2)
        .reconstituted_by(example_wallet_development_company())
        .build();
    let outcome = evaluate_guardian_policy_evil_scenario(
        &policy,
        &turning_evil(vec![example_wallet_development_company()]),
    )
    .unwrap();
    assert_eq!(outcome.outcome_id(), SECRET_SPLIT_DENIABLE);
    assert_eq!(
        outcome.recovery().reason().unwrap().as_str(),
        "Example Wallet Development Company is in a position to block the secret reconstitution process."
    );
    assert!(!outcome.takeover().is_takeover_possible());
}

#[test]
fn required_provider_losing_data_is_unrecoverable() {
    let acme = Entity::new("acme", "Acme");
    let policy = SecretSplitPolicyBuilder::new()
        .required(Guardian::wallet_provider(acme.clone(), "Acme Vault"))
        .build();

    let outcomes = evaluate_all_guardian_scenarios(&policy).unwrap();
    let data_loss: Vec<_> = outcomes
        .iter()
        .filter(|outcome| outcome.scenario().kind() == GuardianScenarioKind::DataLoss)
        .collect();
    assert_eq!(data_loss.len(), 1);
    assert_eq!(data_loss[0].outcome_id(), SECRET_SPLIT_REQUIRED_GUARDIAN);
    assert_eq!(
        data_loss[0].recovery().reason().unwrap().as_str(),
        "Recovery is no longer possible."
    );
    assert_eq!(
        data_loss[0].scenario().description().as_str(),
        "Acme Vault loses data or Acme goes out of business"
    );
    assert!(data_loss[0].how_to_improve().is_some());
}

#[test]
fn shared_failure_domains_are_enumerated() {
    let policy = SecretSplitPolicyBuilder::new()
        .required(Guardian::SelfCustody)
        .optional(Guardian::Passkey)
        .optional(Guardian::wallet_provider(example_cex(), "Custody"))
        .optional(cex_account())
        .optional(auditor_account())
        .threshold(4, 1)
        .build();

    let scenarios = expand_guardian_scenarios(&policy).unwrap();
    let ids: Vec<String> = scenarios
        .iter()
        .map(|scenario| guardian_scenario_id(scenario).to_string())
        .collect();

    // 5 single losses, the device, the exchange, then one per entity.
    assert_eq!(scenarios.len(), 9);
    assert!(ids.contains(&"data_loss:passkey&self_custody".to_string()));
    assert!(ids.contains(
        &"data_loss:user_external_account:example-cex&wallet_provider:example-cex".to_string()
    ));
    assert!(ids.contains(&"entity_turns_evil:example-auditor".to_string()));
}

#[test]
fn user_only_guardians_cannot_be_taken_over() {
    let policy = SecretSplitPolicyBuilder::new()
        .required(Guardian::SelfCustody)
        .required(Guardian::WalletPassword)
        .build();
    let outcomes = evaluate_all_guardian_scenarios(&policy).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|outcome| !outcome.takeover().is_takeover_possible()));
}

#[test]
fn takeover_without_denial_is_reported_as_inconsistent() {
    // Any one of three services recovers the account: one of them turning
    // evil takes over without blocking the honest ones.
    let policy = three_services(3, 1).build();
    let err = evaluate_all_guardian_scenarios(&policy).unwrap_err();
    assert_matches!(err, KeywardError::Inconsistent { .. });
}

#[test]
fn timelock_policies_are_unsupported() {
    let err = evaluate_all_guardian_scenarios(&timelock_policy()).unwrap_err();
    assert_matches!(err, KeywardError::Unsupported { .. });
}
