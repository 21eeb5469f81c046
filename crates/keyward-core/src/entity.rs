//! Organizations and services that may control guardians.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable entity identifier (e.g. `acme-exchange`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An organization or service.
///
/// Identity is the `id`; two values with the same id and different display
/// names are the same entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier
    pub id: EntityId,
    /// Display name used in scenario descriptions
    pub name: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
            name: name.into(),
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whether `entity` appears in `entities`.
pub fn entities_include(entity: &Entity, entities: &[Entity]) -> bool {
    entities.iter().any(|candidate| candidate.id == entity.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_display_name() {
        let a = Entity::new("acme", "Acme Corp");
        let b = Entity::new("acme", "ACME Corporation");
        assert_eq!(a, b);
        assert!(entities_include(&b, &[a]));
    }
}
