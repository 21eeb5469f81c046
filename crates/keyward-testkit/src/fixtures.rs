//! Example entities, guardians and policies.
//!
//! The three example entities stand in for the parties a real wallet
//! typically relies on: its own developer, a centralized exchange where the
//! user has an account, and an independent auditor.

use crate::builders::SecretSplitPolicyBuilder;
use keyward_core::{
    AccountRecovery, Entity, Guardian, GuardianPolicy, KOfNTimelockPolicy, KeyGenerationLocation,
    KeysHandling, MultiPartyKeyReconstruction, ResolvedFeatures, SecurityFeatures,
};

pub fn example_wallet_development_company() -> Entity {
    Entity::new("example-wallet-dev", "Example Wallet Development Company")
}

pub fn example_cex() -> Entity {
    Entity::new("example-cex", "Example Exchange")
}

pub fn example_security_auditor() -> Entity {
    Entity::new("example-auditor", "Example Security Auditor")
}

/// The wallet developer's storage cloud.
pub fn developer_cloud() -> Guardian {
    Guardian::wallet_provider(
        example_wallet_development_company(),
        "Wallet developer storage cloud",
    )
}

pub fn cex_account() -> Guardian {
    Guardian::user_external_account(example_cex(), "")
}

pub fn auditor_account() -> Guardian {
    Guardian::user_external_account(example_security_auditor(), "")
}

/// Three independent services, any two of which recover on the user's device.
pub fn two_of_three_client_side() -> GuardianPolicy {
    SecretSplitPolicyBuilder::new()
        .optional(developer_cloud())
        .optional(cex_account())
        .optional(auditor_account())
        .threshold(3, 2)
        .build()
}

/// Same guardians as [`two_of_three_client_side`], reassembled by the developer.
pub fn two_of_three_developer_reconstituted() -> GuardianPolicy {
    SecretSplitPolicyBuilder::new()
        .optional(developer_cloud())
        .optional(cex_account())
        .optional(auditor_account())
        .threshold(3, 2)
        .reconstituted_by(example_wallet_development_company())
        .build()
}

/// Encrypted backup at the developer, key held at an exchange.
pub fn developer_required_with_cex() -> GuardianPolicy {
    SecretSplitPolicyBuilder::new()
        .required(developer_cloud())
        .optional(cex_account())
        .threshold(1, 1)
        .build()
}

/// Seed phrase backed up to the developer, reassembled by the developer.
pub fn developer_custodied_backup() -> GuardianPolicy {
    SecretSplitPolicyBuilder::new()
        .required(developer_cloud())
        .reconstituted_by(example_wallet_development_company())
        .build()
}

/// A timelocked K-of-N setup; evaluation of this shape is unsupported.
pub fn timelock_policy() -> GuardianPolicy {
    GuardianPolicy::KOfNWithTimelock(KOfNTimelockPolicy {
        description: "2 of 3 with a 48h timelock".to_string(),
        configured_guardians: vec![Guardian::Passkey, developer_cloud(), cex_account()],
        required_guardians: vec![],
        timelock_warning_entities: vec![example_wallet_development_company()],
        minimum_signatures_with_timelock: 2,
        minimum_signatures_bypass_timelock: 3,
    })
}

pub fn keys_on_device() -> KeysHandling {
    KeysHandling {
        key_generation: KeyGenerationLocation::FullyOnUserDevice,
        multiparty_key_reconstruction: MultiPartyKeyReconstruction::NonMultiparty,
    }
}

pub fn keys_off_device() -> KeysHandling {
    KeysHandling {
        key_generation: KeyGenerationLocation::FullyOffUserDevice,
        multiparty_key_reconstruction: MultiPartyKeyReconstruction::NonMultiparty,
    }
}

pub fn mpc_without_user_device() -> KeysHandling {
    KeysHandling {
        key_generation: KeyGenerationLocation::MultipartyComputedIncludingUserDevice,
        multiparty_key_reconstruction:
            MultiPartyKeyReconstruction::MultipartyComputedWithoutUserDevice,
    }
}

/// Resolved features with both security features known.
pub fn features(
    keys_handling: KeysHandling,
    account_recovery: AccountRecovery,
) -> ResolvedFeatures {
    ResolvedFeatures {
        security: SecurityFeatures {
            account_recovery: Some(account_recovery),
            keys_handling: Some(keys_handling),
        },
    }
}

/// Resolved features where nothing has been determined yet.
pub fn unknown_features() -> ResolvedFeatures {
    ResolvedFeatures::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_policies_are_valid() {
        for policy in [
            two_of_three_client_side(),
            two_of_three_developer_reconstituted(),
            developer_required_with_cex(),
            developer_custodied_backup(),
            timelock_policy(),
        ] {
            assert!(policy.validate().is_ok(), "{policy}");
        }
    }

    #[test]
    fn example_entities_are_distinct() {
        assert_ne!(example_cex(), example_security_auditor());
        assert_ne!(example_cex(), example_wallet_development_company());
    }
}
