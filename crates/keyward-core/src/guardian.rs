//! Guardian model.
//!
//! A guardian is one party or factor whose cooperation contributes to
//! recovering account control. The set of kinds is closed; analyzers match
//! on it exhaustively so that a new kind cannot be added without deciding
//! how every scenario treats it.

use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single guardian within a multi-guardian setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Guardian {
    /// The wallet user's own self-custodied key material.
    SelfCustody,

    /// A password independent of self-custody.
    WalletPassword,

    /// A service operated by the wallet developer.
    WalletProvider {
        entity: Entity,
        #[serde(default)]
        description: String,
    },

    /// An account the user holds at a third party (e.g. an exchange).
    UserExternalAccount {
        entity: Entity,
        #[serde(default)]
        description: String,
    },

    /// A private key stored as a platform passkey.
    Passkey,

    /// A zero-knowledge identity credential (zkPassport, Anon Aadhaar, ...).
    #[serde(rename = "ZKID")]
    ZkId {
        id: String,
        #[serde(default)]
        description: String,
    },
}

/// Discriminant of [`Guardian`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardianKind {
    SelfCustody,
    WalletPassword,
    WalletProvider,
    UserExternalAccount,
    Passkey,
    #[serde(rename = "ZKID")]
    ZkId,
}

impl GuardianKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GuardianKind::SelfCustody => "self_custody",
            GuardianKind::WalletPassword => "wallet_password",
            GuardianKind::WalletProvider => "wallet_provider",
            GuardianKind::UserExternalAccount => "user_external_account",
            GuardianKind::Passkey => "passkey",
            GuardianKind::ZkId => "zkid",
        }
    }
}

impl fmt::Display for GuardianKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable textual key of a guardian, used to build scenario identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuardianId(String);

impl GuardianId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuardianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Guardian {
    /// Helper constructor for a wallet-provider guardian.
    pub fn wallet_provider(entity: Entity, description: impl Into<String>) -> Self {
        Self::WalletProvider {
            entity,
            description: description.into(),
        }
    }

    /// Helper constructor for a user-external-account guardian.
    pub fn user_external_account(entity: Entity, description: impl Into<String>) -> Self {
        Self::UserExternalAccount {
            entity,
            description: description.into(),
        }
    }

    /// Helper constructor for a ZK identity guardian.
    pub fn zk_id(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::ZkId {
            id: id.into(),
            description: description.into(),
        }
    }

    pub fn kind(&self) -> GuardianKind {
        match self {
            Guardian::SelfCustody => GuardianKind::SelfCustody,
            Guardian::WalletPassword => GuardianKind::WalletPassword,
            Guardian::WalletProvider { .. } => GuardianKind::WalletProvider,
            Guardian::UserExternalAccount { .. } => GuardianKind::UserExternalAccount,
            Guardian::Passkey => GuardianKind::Passkey,
            Guardian::ZkId { .. } => GuardianKind::ZkId,
        }
    }

    /// The organization controlling this guardian, if any.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Guardian::WalletProvider { entity, .. }
            | Guardian::UserExternalAccount { entity, .. } => {
                Some(entity)
            }
            Guardian::SelfCustody
            | Guardian::WalletPassword
            | Guardian::Passkey
            | Guardian::ZkId { .. } => None,
        }
    }

    /// Stable key: kind, plus entity id or ZK id where applicable.
    pub fn id(&self) -> GuardianId {
        let key = match self {
            Guardian::WalletProvider { entity, .. }
            | Guardian::UserExternalAccount { entity, .. } => {
                format!("{}:{}", self.kind(), entity.id)
            }
            Guardian::ZkId { id, .. } => format!("{}:{id}", self.kind()),
            Guardian::SelfCustody | Guardian::WalletPassword | Guardian::Passkey => {
                self.kind().to_string()
            }
        };
        GuardianId(key)
    }

    /// Whether this guardian lives on the user's own device.
    pub fn is_on_user_device(&self) -> bool {
        matches!(self, Guardian::SelfCustody | Guardian::Passkey)
    }

    /// Whether this guardian is controlled by any of `entities`.
    pub fn is_controlled_by_any(&self, entities: &[Entity]) -> bool {
        self.entity()
            .is_some_and(|entity| entities.iter().any(|evil| evil.id == entity.id))
    }
}

impl PartialEq for Guardian {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Guardian {}

impl Hash for Guardian {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Guardian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Whether `guardian` is part of `guardians`.
pub fn guardians_include(guardian: &Guardian, guardians: &[Guardian]) -> bool {
    guardians.iter().any(|candidate| candidate == guardian)
}

/// Guardians among `guardians` controlled by `entity`.
pub fn guardians_with_entity<'a>(entity: &Entity, guardians: &'a [Guardian]) -> Vec<&'a Guardian> {
    guardians
        .iter()
        .filter(|guardian| guardian.entity().is_some_and(|e| e.id == entity.id))
        .collect()
}

/// Guardians among `guardians` controlled by any of `entities`.
pub fn guardians_with_entities<'a>(
    entities: &[Entity],
    guardians: &'a [Guardian],
) -> Vec<&'a Guardian> {
    guardians
        .iter()
        .filter(|guardian| guardian.is_controlled_by_any(entities))
        .collect()
}

/// First guardian that appears more than once, if any.
pub fn find_duplicate_guardian<'a, I>(guardians: I) -> Option<&'a Guardian>
where
    I: IntoIterator<Item = &'a Guardian>,
{
    let mut seen = std::collections::HashSet::new();
    guardians.into_iter().find(|guardian| !seen.insert(guardian.id()))
}
