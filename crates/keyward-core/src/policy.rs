//! Guardian policies: how guardians combine into a recovery mechanism.

use crate::entity::Entity;
use crate::errors::{KeywardError, Result};
use crate::guardian::{find_duplicate_guardian, guardians_include, Guardian};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the recovery secret is reassembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecretReconstitution {
    /// On the user's own device.
    ClientSide,
    /// On infrastructure run by this entity.
    Entity(Entity),
}

impl SecretReconstitution {
    /// The reconstituting entity, if reconstitution is not client side.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            SecretReconstitution::ClientSide => None,
            SecretReconstitution::Entity(entity) => Some(entity),
        }
    }
}

/// A recovery secret split into shares spread across guardians.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSplitPolicy {
    /// Human-readable description of the setup
    #[serde(default)]
    pub description: String,
    /// Guardians that must all cooperate
    #[serde(default)]
    pub required_guardians: Vec<Guardian>,
    /// Pool of guardians from which a threshold must cooperate
    #[serde(default)]
    pub optional_guardians: Vec<Guardian>,
    /// How many optional guardians the user is forced to enroll
    pub optional_min_configurable: u32,
    /// How many enrolled optional guardians must cooperate to recover
    pub optional_min_needed_for_recovery: u32,
    /// Where the secret is reconstituted
    pub secret_reconstitution: SecretReconstitution,
}

impl SecretSplitPolicy {
    /// Required guardians followed by optional guardians.
    pub fn all_guardians(&self) -> Vec<Guardian> {
        self.required_guardians
            .iter()
            .chain(self.optional_guardians.iter())
            .cloned()
            .collect()
    }

    /// How many enrolled optional guardians may be lost before recovery fails.
    pub fn tolerable_optional_losses(&self) -> i64 {
        i64::from(self.optional_min_configurable) - i64::from(self.optional_min_needed_for_recovery)
    }

    fn validate(&self) -> Result<()> {
        if self.required_guardians.is_empty() && self.optional_guardians.is_empty() {
            return Err(KeywardError::invalid_policy(
                "secret split policy has no guardians",
            ));
        }
        if let Some(duplicate) = find_duplicate_guardian(
            self.required_guardians
                .iter()
                .chain(self.optional_guardians.iter()),
        ) {
            return Err(KeywardError::invalid_policy(format!(
                "guardian {duplicate} appears more than once"
            )));
        }
        if self.optional_min_needed_for_recovery > self.optional_min_configurable {
            return Err(KeywardError::invalid_policy(format!(
                "optional guardians needed for recovery ({}) exceeds minimum configurable ({})",
                self.optional_min_needed_for_recovery, self.optional_min_configurable
            )));
        }
        if self.optional_min_configurable as usize > self.optional_guardians.len() {
            return Err(KeywardError::invalid_policy(format!(
                "minimum configurable optional guardians ({}) exceeds available ({})",
                self.optional_min_configurable,
                self.optional_guardians.len()
            )));
        }
        Ok(())
    }
}

/// K of N equally-weighted guardians approving recovery under a timelock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KOfNTimelockPolicy {
    #[serde(default)]
    pub description: String,
    /// Configured guardians, each with identical weight
    pub configured_guardians: Vec<Guardian>,
    /// Subset of configured guardians whose signature is mandatory
    #[serde(default)]
    pub required_guardians: Vec<Guardian>,
    /// Entities responsible for warning the user while the timelock runs
    pub timelock_warning_entities: Vec<Entity>,
    /// Signatures needed for a recovery action that waits out the timelock
    pub minimum_signatures_with_timelock: u32,
    /// Signatures needed for a recovery action that bypasses the timelock
    pub minimum_signatures_bypass_timelock: u32,
}

impl KOfNTimelockPolicy {
    fn validate(&self) -> Result<()> {
        if self.configured_guardians.is_empty() {
            return Err(KeywardError::invalid_policy(
                "timelock policy has no configured guardians",
            ));
        }
        if let Some(duplicate) = find_duplicate_guardian(&self.configured_guardians) {
            return Err(KeywardError::invalid_policy(format!(
                "guardian {duplicate} appears more than once"
            )));
        }
        if let Some(stray) = self
            .required_guardians
            .iter()
            .find(|guardian| !guardians_include(guardian, &self.configured_guardians))
        {
            return Err(KeywardError::invalid_policy(format!(
                "required guardian {stray} is not a configured guardian"
            )));
        }
        if self.timelock_warning_entities.is_empty() {
            return Err(KeywardError::invalid_policy(
                "timelock policy has no warning entities",
            ));
        }
        let total = self.configured_guardians.len();
        for (name, value) in [
            ("minimum_signatures_with_timelock", self.minimum_signatures_with_timelock),
            ("minimum_signatures_bypass_timelock", self.minimum_signatures_bypass_timelock),
        ] {
            if value == 0 || value as usize > total {
                return Err(KeywardError::invalid_policy(format!(
                    "{name} must be between 1 and {total} (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Discriminant of [`GuardianPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardianPolicyKind {
    SecretSplitAcrossGuardians,
    #[serde(rename = "K_OF_N_WITH_TIMELOCK")]
    KOfNWithTimelock,
}

impl GuardianPolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GuardianPolicyKind::SecretSplitAcrossGuardians => "SECRET_SPLIT_ACROSS_GUARDIANS",
            GuardianPolicyKind::KOfNWithTimelock => "K_OF_N_WITH_TIMELOCK",
        }
    }
}

impl fmt::Display for GuardianPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single specific configuration of guardians.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GuardianPolicy {
    #[serde(rename = "SECRET_SPLIT_ACROSS_GUARDIANS")]
    SecretSplitAcrossGuardians(SecretSplitPolicy),
    #[serde(rename = "K_OF_N_WITH_TIMELOCK")]
    KOfNWithTimelock(KOfNTimelockPolicy),
}

impl GuardianPolicy {
    pub fn kind(&self) -> GuardianPolicyKind {
        match self {
            GuardianPolicy::SecretSplitAcrossGuardians(_) => {
                GuardianPolicyKind::SecretSplitAcrossGuardians
            }
            GuardianPolicy::KOfNWithTimelock(_) => GuardianPolicyKind::KOfNWithTimelock,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            GuardianPolicy::SecretSplitAcrossGuardians(policy) => &policy.description,
            GuardianPolicy::KOfNWithTimelock(policy) => &policy.description,
        }
    }

    /// Every guardian taking part in the policy.
    pub fn guardians(&self) -> Vec<Guardian> {
        match self {
            GuardianPolicy::SecretSplitAcrossGuardians(policy) => policy.all_guardians(),
            GuardianPolicy::KOfNWithTimelock(policy) => policy.configured_guardians.clone(),
        }
    }

    /// Check the policy for authoring mistakes.
    pub fn validate(&self) -> Result<()> {
        match self {
            GuardianPolicy::SecretSplitAcrossGuardians(policy) => policy.validate(),
            GuardianPolicy::KOfNWithTimelock(policy) => policy.validate(),
        }
    }
}

impl fmt::Display for GuardianPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description().is_empty() {
            write!(f, "{}", self.kind())
        } else {
            write!(f, "{} ({})", self.kind(), self.description())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn provider() -> Guardian {
        Guardian::wallet_provider(Entity::new("dev", "Wallet Dev"), "cloud backup")
    }

    fn split(
        required: Vec<Guardian>,
        optional: Vec<Guardian>,
        configurable: u32,
        needed: u32,
    ) -> GuardianPolicy {
        GuardianPolicy::SecretSplitAcrossGuardians(SecretSplitPolicy {
            description: String::new(),
            required_guardians: required,
            optional_guardians: optional,
            optional_min_configurable: configurable,
            optional_min_needed_for_recovery: needed,
            secret_reconstitution: SecretReconstitution::ClientSide,
        })
    }

    #[test]
    fn valid_secret_split() {
        let policy = split(vec![provider()], vec![Guardian::Passkey], 1, 1);
        assert!(policy.validate().is_ok());
        assert_eq!(policy.guardians().len(), 2);
    }

    #[test]
    fn rejects_empty_policy() {
        assert_matches!(
            split(vec![], vec![], 0, 0).validate(),
            Err(KeywardError::InvalidPolicy { .. })
        );
    }

    #[test]
    fn rejects_duplicates_across_sets() {
        let policy = split(vec![provider()], vec![provider()], 1, 1);
        assert_matches!(policy.validate(), Err(KeywardError::InvalidPolicy { .. }));
    }

    #[test]
    fn rejects_impossible_thresholds() {
        let needed_too_high = split(vec![], vec![Guardian::Passkey, provider()], 1, 2);
        assert_matches!(needed_too_high.validate(), Err(KeywardError::InvalidPolicy { .. }));

        let configurable_too_high = split(vec![], vec![Guardian::Passkey], 2, 1);
        assert_matches!(
            configurable_too_high.validate(),
            Err(KeywardError::InvalidPolicy { .. })
        );
    }

    #[test]
    fn timelock_validation() {
        let dev = Entity::new("dev", "Wallet Dev");
        let mut policy = KOfNTimelockPolicy {
            description: String::new(),
            configured_guardians: vec![Guardian::Passkey, provider()],
            required_guardians: vec![Guardian::Passkey],
            timelock_warning_entities: vec![dev],
            minimum_signatures_with_timelock: 1,
            minimum_signatures_bypass_timelock: 2,
        };
        assert!(GuardianPolicy::KOfNWithTimelock(policy.clone()).validate().is_ok());

        policy.required_guardians = vec![Guardian::SelfCustody];
        assert_matches!(
            GuardianPolicy::KOfNWithTimelock(policy.clone()).validate(),
            Err(KeywardError::InvalidPolicy { .. })
        );

        policy.required_guardians.clear();
        policy.minimum_signatures_bypass_timelock = 3;
        assert_matches!(
            GuardianPolicy::KOfNWithTimelock(policy).validate(),
            Err(KeywardError::InvalidPolicy { .. })
        );
    }

    #[test]
    fn deserializes_policy() {
        let json = r#"{
            "type": "SECRET_SPLIT_ACROSS_GUARDIANS",
            "required_guardians": [{"type": "SELF_CUSTODY"}],
            "optional_guardians": [],
            "optional_min_configurable": 0,
            "optional_min_needed_for_recovery": 0,
            "secret_reconstitution": {"ENTITY": {"id": "dev", "name": "Wallet Dev"}}
        }"#;
        let policy: GuardianPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.kind(), GuardianPolicyKind::SecretSplitAcrossGuardians);
        assert_matches!(
            policy,
            GuardianPolicy::SecretSplitAcrossGuardians(SecretSplitPolicy {
                secret_reconstitution: SecretReconstitution::Entity(_),
                ..
            })
        );
    }
}
