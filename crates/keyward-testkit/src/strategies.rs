//! Property test strategies for Keyward types
//!
//! Guardians are drawn from a fixed pool over a handful of entities, so that
//! generated policies exercise shared failure domains (one entity holding
//! several guardians, passkey and self-custody on the same device) while
//! never containing duplicate guardians.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use keyward_core::{Entity, Guardian, GuardianPolicy, SecretReconstitution, SecretSplitPolicy};

/// Entities guardians are drawn from.
pub fn entity_pool() -> Vec<Entity> {
    vec![
        Entity::new("acme", "Acme"),
        Entity::new("globex", "Globex"),
        Entity::new("initech", "Initech"),
    ]
}

/// Every distinct guardian a generated policy may contain.
pub fn guardian_pool() -> Vec<Guardian> {
    let mut pool = vec![
        Guardian::SelfCustody,
        Guardian::WalletPassword,
        Guardian::Passkey,
        Guardian::zk_id("zkpassport", "zkPassport"),
    ];
    for entity in entity_pool() {
        pool.push(Guardian::wallet_provider(entity.clone(), ""));
        pool.push(Guardian::user_external_account(entity, ""));
    }
    pool
}

/// Strategy for one entity from [`entity_pool`].
pub fn arb_entity() -> impl Strategy<Value = Entity> {
    prop::sample::select(entity_pool())
}

/// Strategy for one guardian from [`guardian_pool`].
pub fn arb_guardian() -> impl Strategy<Value = Guardian> {
    prop::sample::select(guardian_pool())
}

/// Strategy for valid secret-split policies.
///
/// A non-empty subsequence of the pool is split into required and optional
/// guardians; thresholds satisfy `needed <= configurable <= optional`.
pub fn arb_secret_split_policy() -> impl Strategy<Value = SecretSplitPolicy> {
    let pool = guardian_pool();
    let size = pool.len();
    (
        prop::sample::subsequence(pool, 1..=size),
        prop::option::of(arb_entity()),
    )
        .prop_flat_map(|(guardians, reconstitutor)| {
            let len = guardians.len();
            (Just(guardians), Just(reconstitutor), 0..=len)
        })
        .prop_flat_map(|(guardians, reconstitutor, split_at)| {
            let optional_len = (guardians.len() - split_at) as u32;
            (
                Just(guardians),
                Just(reconstitutor),
                Just(split_at),
                0..=optional_len,
            )
        })
        .prop_flat_map(|(guardians, reconstitutor, split_at, configurable)| {
            (
                Just(guardians),
                Just(reconstitutor),
                Just(split_at),
                Just(configurable),
                0..=configurable,
            )
        })
        .prop_map(
            |(mut guardians, reconstitutor, split_at, configurable, needed)| {
                let optional_guardians = guardians.split_off(split_at);
                SecretSplitPolicy {
                    description: "generated".to_string(),
                    required_guardians: guardians,
                    optional_guardians,
                    optional_min_configurable: configurable,
                    optional_min_needed_for_recovery: needed,
                    secret_reconstitution: reconstitutor
                        .map_or(SecretReconstitution::ClientSide, SecretReconstitution::Entity),
                }
            },
        )
}

/// [`arb_secret_split_policy`] wrapped as a [`GuardianPolicy`].
pub fn arb_guardian_policy() -> impl Strategy<Value = GuardianPolicy> {
    arb_secret_split_policy().prop_map(GuardianPolicy::SecretSplitAcrossGuardians)
}
