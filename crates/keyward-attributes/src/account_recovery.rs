//! Account recovery: can the user get their account back in every likely
//! catastrophic scenario?

use crate::attribute::{unrated, Attribute};
use crate::rating::{AttributeValue, Details, DetailsComponent, Evaluation, Rating};
use keyward_core::{
    AccountRecovery, GuardianPolicy, KeywardError, Markdown, ResolvedFeatures, Result, Sentence,
};
use keyward_recovery::{evaluate_all_guardian_scenarios, GuardianScenarioOutcome};

pub const ACCOUNT_RECOVERY: &str = "accountRecovery";

pub const GUARDIAN_POLICY_RECOVERABLE: &str = "guardian_policy_recoverable";
pub const GUARDIAN_POLICY_NONRECOVERABLE_SPECIFIC_SCENARIO: &str =
    "guardian_policy_nonrecoverable_specific_scenario";
pub const GUARDIAN_POLICY_NONRECOVERABLE_MULTIPLE_SCENARIOS: &str =
    "guardian_policy_nonrecoverable_multiple_scenarios";
pub const NO_GUARDIAN_RECOVERY: &str = "no_guardian_recovery";

/// Reduce scenario outcomes to an account recovery verdict.
///
/// PASS iff every outcome is recoverable. A single non-recoverable outcome
/// is explained by its own reason; several get a generic explanation.
pub fn account_recovery_verdict(
    policy: &GuardianPolicy,
    outcomes: Vec<GuardianScenarioOutcome>,
) -> Result<Evaluation> {
    if outcomes.is_empty() {
        return Err(KeywardError::invalid_input(
            "got no scenarios for the given guardian policy",
        ));
    }

    let failures: Vec<&Sentence> = outcomes
        .iter()
        .filter_map(|outcome| outcome.recovery().reason())
        .collect();

    let (id, rating, display_name, short_explanation) = match failures.as_slice() {
        [] => (
            GUARDIAN_POLICY_RECOVERABLE,
            Rating::Pass,
            "Account recoverable in all likely scenarios",
            Sentence::new(
                "{{WALLET_NAME}} lets the user recover their account in all
                likely catastrophic scenarios.",
            ),
        ),
        [reason] => (
            GUARDIAN_POLICY_NONRECOVERABLE_SPECIFIC_SCENARIO,
            Rating::Fail,
            "Account may be non-recoverable",
            (*reason).clone(),
        ),
        _ => (
            GUARDIAN_POLICY_NONRECOVERABLE_MULTIPLE_SCENARIOS,
            Rating::Fail,
            "Account may be non-recoverable",
            Sentence::new(
                "{{WALLET_NAME}}'s account recovery feature cannot be
                relied upon in multiple scenarios.",
            ),
        ),
    };

    tracing::debug!(
        policy = %policy.kind(),
        verdict = id,
        non_recoverable = failures.len(),
        "Account recovery verdict"
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
        details: Details::Component(DetailsComponent::AccountRecoveryDetails),
    })
}

/// Rate an account recovery feature.
pub fn evaluate_account_recovery(recovery: &AccountRecovery) -> Result<Evaluation> {
    match recovery.guardian_policy() {
        Some(policy) => {
            let outcomes = evaluate_all_guardian_scenarios(policy)?;
            account_recovery_verdict(policy, outcomes)
        }
        None => Ok(Evaluation {
            value: AttributeValue {
                id: NO_GUARDIAN_RECOVERY,
                rating: Rating::Fail,
                display_name: "No account recovery mechanism".to_string(),
                short_explanation: Sentence::new(
                    "{{WALLET_NAME}} does not implement guardian-based account recovery.
                    The user will lose access to their account if they lose their seed phrase.",
                ),
                minimum_guardian_policy: None,
                outcomes: None,
            },
            details: Details::Component(DetailsComponent::AccountRecoveryDetails),
        }),
    }
}

/// How easy does the wallet make it to recover your account?
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountRecoveryAttribute;

impl Attribute for AccountRecoveryAttribute {
    fn id(&self) -> &'static str {
        ACCOUNT_RECOVERY
    }

    fn display_name(&self) -> &'static str {
        "Account recovery"
    }

    fn question(&self) -> Sentence {
        Sentence::new("How easy does the wallet make it to recover your account?")
    }

    fn why(&self) -> Markdown {
        Markdown::new(
            "
            What if you forget your seed phrase?

            Self-custody is difficult for most users compared to typical web2
            accounts, which usually come with easy recovery. Losing a seed
            phrase can be a devastating and irrecoverable financial loss.

            Guardian-based recovery (also known as \"social recovery\") makes
            self-custody safe and practical for everyday users while keeping
            its self-sovereignty benefits day to day.
            ",
        )
    }

    fn methodology(&self) -> Markdown {
        Markdown::new(
            "
            Wallets must implement at least one form of guardian-based recovery.
            Whatever option the user picks, all of the following must hold:

            - If the user loses access to their device (including their
              passkeys), they can still recover their account on another device.
            - If any single external provider goes out of business, the user
              can still recover their account.
            - If any single external provider is compromised or turns evil, it
              cannot take over the user's account.
            ",
        )
    }

    fn evaluate(&self, features: &ResolvedFeatures) -> Result<Evaluation> {
        match &features.security.account_recovery {
            Some(recovery) => evaluate_account_recovery(recovery),
            None => Ok(unrated(self)),
        }
    }
}
