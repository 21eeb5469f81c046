//! Account unruggability: can anyone other than the user take over the
//! account without their consent?
//!
//! Key handling gates are checked first and short-circuit before any
//! guardian scenario is generated.

use crate::attribute::{unrated, Attribute};
use crate::rating::{AttributeValue, Details, DetailsComponent, Evaluation, Rating};
use keyward_core::{
    AccountRecovery, GuardianPolicy, KeyGenerationLocation, KeysHandling, KeywardError, Markdown,
    MultiPartyKeyReconstruction, ResolvedFeatures, Result, Sentence,
};
use keyward_recovery::{evaluate_all_guardian_scenarios, GuardianScenarioOutcome};

pub const ACCOUNT_UNRUGGABILITY: &str = "accountUnruggability";

pub const KEY_OFF_DEVICE: &str = "key_off_device";
pub const MULTIPARTY_RECONSTRUCTED_WITHOUT_USER_DEVICE: &str =
    "multiparty_reconstructed_without_user_device";
pub const PASS_NO_GUARDIAN_RECOVERY: &str = "pass_no_guardian_recovery";
pub const GUARDIAN_POLICY_UNRUGGABLE: &str = "guardian_policy_unruggable";
pub const GUARDIAN_POLICY_RUGGABLE_SPECIFIC_SCENARIO: &str =
    "guardian_policy_ruggable_specific_scenario";
pub const GUARDIAN_POLICY_RUGGABLE_MULTIPLE_SCENARIOS: &str =
    "guardian_policy_ruggable_multiple_scenarios";

fn gate_failure(id: &'static str, display_name: &str, short: &str, details: &str) -> Evaluation {
    Evaluation {
        value: AttributeValue {
            id,
            rating: Rating::Fail,
            display_name: display_name.to_string(),
            short_explanation: Sentence::new(short),
            minimum_guardian_policy: None,
            outcomes: None,
        },
        details: Details::Markdown(Markdown::new(details)),
    }
}

fn key_handling_gate(keys: &KeysHandling) -> Option<Evaluation> {
    match keys.key_generation {
        KeyGenerationLocation::FullyOnUserDevice
        | KeyGenerationLocation::MultipartyComputedIncludingUserDevice => {}
        KeyGenerationLocation::FullyOffUserDevice => {
            return Some(gate_failure(
                KEY_OFF_DEVICE,
                "Key generated off-device",
                "When generating a key with {{WALLET_NAME}}, the key is generated
                by an external service which can use this to rug your account.",
                "
                Key generation with {{WALLET_NAME}} occurs off-device. This means
                your private key is not confined to your device, and the service
                that has your private key can take over your account.

                **\"Not your keys, not your coins.\"**
                ",
            ));
        }
    }

    match keys.multiparty_key_reconstruction {
        MultiPartyKeyReconstruction::NonMultiparty
        | MultiPartyKeyReconstruction::OnUserDevice
        | MultiPartyKeyReconstruction::MultipartyComputedIncludingUserDevice => None,
        MultiPartyKeyReconstruction::MultipartyComputedWithoutUserDevice => Some(gate_failure(
            MULTIPARTY_RECONSTRUCTED_WITHOUT_USER_DEVICE,
            "MPC key reconstructed without user",
            "{{WALLET_NAME}} uses MPC, but the key reconstruction process can
            occur without requiring the user's device.",
            "
            {{WALLET_NAME}} uses multi-party computation to derive the account's
            private key. However, this key can be reconstructed by external
            services without your device being involved. This allows these
            external services to conspire to reconstruct your private key, and
            take over your account.

            **\"Not your keys, not your coins.\"**
            ",
        )),
    }
}

/// Reduce scenario outcomes to an unruggability verdict.
pub fn guardian_policy_unruggability_verdict(
    policy: &GuardianPolicy,
    outcomes: Vec<GuardianScenarioOutcome>,
) -> Result<Evaluation> {
    if outcomes.is_empty() {
        return Err(KeywardError::invalid_input(
            "got no scenarios for the given guardian policy",
        ));
    }

    let takeovers: Vec<&Sentence> = outcomes
        .iter()
        .filter_map(|outcome| outcome.takeover().reason())
        .collect();

    let (id, rating, display_name, short_explanation) = match takeovers.as_slice() {
        [] => (
            GUARDIAN_POLICY_UNRUGGABLE,
            Rating::Pass,
            "Account unruggable in all likely scenarios",
            Sentence::new(
                "{{WALLET_NAME}} does not allow any external service to take over
                your account.",
            ),
        ),
        [reason] => (
            GUARDIAN_POLICY_RUGGABLE_SPECIFIC_SCENARIO,
            Rating::Fail,
            "Account may be ruggable",
            (*reason).clone(),
        ),
        _ => (
            GUARDIAN_POLICY_RUGGABLE_MULTIPLE_SCENARIOS,
            Rating::Fail,
            "Account may be ruggable",
            Sentence::new(
                "{{WALLET_NAME}}'s account recovery feature leaves the account
                vulnerable to being rugged in multiple scenarios.",
            ),
        ),
    };

    tracing::debug!(
        policy = %policy.kind(),
        verdict = id,
        takeovers = takeovers.len(),
        "Account unruggability verdict"
    );

    Ok(Evaluation {
        value: AttributeValue {
            id,
            rating,
            display_name: display_name.to_string(),
            short_explanation,
            minimum_guardian_policy: Some(policy.clone()),
            outcomes: Some(outcomes),
        },
        details: Details::Component(DetailsComponent::AccountUnruggabilityDetails),
    })
}

/// Rate a wallet's key handling and account recovery for unruggability.
pub fn account_unruggability_verdict(
    keys: &KeysHandling,
    recovery: &AccountRecovery,
) -> Result<Evaluation> {
    if let Some(failure) = key_handling_gate(keys) {
        tracing::debug!(verdict = failure.id(), "Key handling gate failed");
        return Ok(failure);
    }

    match recovery.guardian_policy() {
        Some(policy) => {
            let outcomes = evaluate_all_guardian_scenarios(policy)?;
            guardian_policy_unruggability_verdict(policy, outcomes)
        }
        None => Ok(Evaluation {
            value: AttributeValue {
                id: PASS_NO_GUARDIAN_RECOVERY,
                rating: Rating::Pass,
                display_name: "Unruggable account".to_string(),
                short_explanation: Sentence::new(
                    "Private key material never leaves {{WALLET_NAME}}, so no external
                    entity may take over your account.",
                ),
                minimum_guardian_policy: None,
                outcomes: None,
            },
            details: Details::Component(DetailsComponent::AccountUnruggabilityDetails),
        }),
    }
}

/// Can the wallet developer take over your account without your consent?
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountUnruggabilityAttribute;

impl Attribute for AccountUnruggabilityAttribute {
    fn id(&self) -> &'static str {
        ACCOUNT_UNRUGGABILITY
    }

    fn display_name(&self) -> &'static str {
        "Account unruggability"
    }

    fn question(&self) -> Sentence {
        Sentence::new("Can the wallet developer take over your account without your consent?")
    }

    fn why(&self) -> Markdown {
        Markdown::new(
            "
            The promise of crypto is to make your accounts and your funds truly
            yours. This is what is most commonly meant by \"self-sovereignty\".

            The underlying property is that nobody other than yourself can act
            on your behalf or take over your account without prior consent.
            ",
        )
    }

    fn methodology(&self) -> Markdown {
        Markdown::new(
            "
            Wallets are evaluated on whether any entity other than the user may
            sign or approve transactions for the user's account, or transfer
            ownership of the account away from the user. This includes seed
            phrase backups where the wallet developer learns the seed phrase,
            and recovery features that let the developer recover the account
            unilaterally.

            Fully-custodial wallets are ruggable by definition.
            ",
        )
    }

    fn evaluate(&self, features: &ResolvedFeatures) -> Result<Evaluation> {
        match (
            &features.security.keys_handling,
            &features.security.account_recovery,
        ) {
            (Some(keys), Some(recovery)) => account_unruggability_verdict(keys, recovery),
            _ => Ok(unrated(self)),
        }
    }
}
