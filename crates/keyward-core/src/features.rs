//! Wallet features consumed by the security attributes.
//!
//! `None` in [`SecurityFeatures`] means nobody has determined the feature for
//! this wallet variant yet; attributes depending on it are unrated.

use crate::policy::GuardianPolicy;
use serde::{Deserialize, Serialize};

/// Whether a wallet supports a feature, carrying its details when it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "support", rename_all = "snake_case")]
pub enum Support<T> {
    Supported(T),
    NotSupported,
}

impl<T> Support<T> {
    pub fn supported(value: T) -> Self {
        Support::Supported(value)
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Support::Supported(_))
    }

    pub fn as_supported(&self) -> Option<&T> {
        match self {
            Support::Supported(value) => Some(value),
            Support::NotSupported => None,
        }
    }
}

/// Guardian-based ("social") recovery as offered by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianRecovery {
    /// The weakest policy the wallet lets the user set up
    pub minimum_guardian_policy: GuardianPolicy,
}

/// How the wallet makes it possible for the user to recover their account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecovery {
    pub guardian_recovery: Support<GuardianRecovery>,
}

impl AccountRecovery {
    pub fn not_supported() -> Self {
        Self {
            guardian_recovery: Support::NotSupported,
        }
    }

    pub fn with_policy(policy: GuardianPolicy) -> Self {
        Self {
            guardian_recovery: Support::supported(GuardianRecovery {
                minimum_guardian_policy: policy,
            }),
        }
    }

    /// The configured minimum guardian policy, if guardian recovery is offered.
    pub fn guardian_policy(&self) -> Option<&GuardianPolicy> {
        self.guardian_recovery
            .as_supported()
            .map(|recovery| &recovery.minimum_guardian_policy)
    }
}

/// Where key material is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyGenerationLocation {
    FullyOnUserDevice,
    FullyOffUserDevice,
    MultipartyComputedIncludingUserDevice,
}

/// If the key is split between parties, how reconstruction happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiPartyKeyReconstruction {
    NonMultiparty,
    #[serde(rename = "RECONSTRUCTED_ON_USER_DEVICE")]
    OnUserDevice,
    MultipartyComputedIncludingUserDevice,
    MultipartyComputedWithoutUserDevice,
}

/// How private key material is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysHandling {
    pub key_generation: KeyGenerationLocation,
    pub multiparty_key_reconstruction: MultiPartyKeyReconstruction,
}

/// Security-related features of one wallet variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFeatures {
    #[serde(default)]
    pub account_recovery: Option<AccountRecovery>,
    #[serde(default)]
    pub keys_handling: Option<KeysHandling>,
}

/// All features of one wallet variant, as resolved from the wallet database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFeatures {
    #[serde(default)]
    pub security: SecurityFeatures,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_helpers() {
        let recovery = AccountRecovery::not_supported();
        assert!(!recovery.guardian_recovery.is_supported());
        assert!(recovery.guardian_policy().is_none());
    }

    #[test]
    fn deserializes_keys_handling() {
        let json = r#"{
            "key_generation": "FULLY_ON_USER_DEVICE",
            "multiparty_key_reconstruction": "RECONSTRUCTED_ON_USER_DEVICE"
        }"#;
        let keys: KeysHandling = serde_json::from_str(json).unwrap();
        assert_eq!(keys.multiparty_key_reconstruction, MultiPartyKeyReconstruction::OnUserDevice);
    }

    #[test]
    fn deserializes_unsupported_recovery() {
        let json = r#"{"guardian_recovery": {"support": "not_supported"}}"#;
        let recovery: AccountRecovery = serde_json::from_str(json).unwrap();
        assert_eq!(recovery, AccountRecovery::not_supported());
    }
}
