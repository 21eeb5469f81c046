//! Fluent construction of secret-split policies.

use keyward_core::{Entity, Guardian, GuardianPolicy, SecretReconstitution, SecretSplitPolicy};

/// Builder for [`SecretSplitPolicy`]; defaults to client-side reconstitution
/// and a 0-of-0 optional threshold.
#[derive(Debug, Clone)]
pub struct SecretSplitPolicyBuilder {
    policy: SecretSplitPolicy,
}

impl Default for SecretSplitPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretSplitPolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy: SecretSplitPolicy {
                description: String::new(),
                required_guardians: Vec::new(),
                optional_guardians: Vec::new(),
                optional_min_configurable: 0,
                optional_min_needed_for_recovery: 0,
                secret_reconstitution: SecretReconstitution::ClientSide,
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.policy.description = description.into();
        self
    }

    pub fn required(mut self, guardian: Guardian) -> Self {
        self.policy.required_guardians.push(guardian);
        self
    }

    pub fn optional(mut self, guardian: Guardian) -> Self {
        self.policy.optional_guardians.push(guardian);
        self
    }

    /// Set (minimum configurable, minimum needed for recovery).
    pub fn threshold(mut self, configurable: u32, needed: u32) -> Self {
        self.policy.optional_min_configurable = configurable;
        self.policy.optional_min_needed_for_recovery = needed;
        self
    }

    pub fn reconstituted_by(mut self, entity: Entity) -> Self {
        self.policy.secret_reconstitution = SecretReconstitution::Entity(entity);
        self
    }

    pub fn build_split(self) -> SecretSplitPolicy {
        self.policy
    }

    pub fn build(self) -> GuardianPolicy {
        GuardianPolicy::SecretSplitAcrossGuardians(self.policy)
    }
}
